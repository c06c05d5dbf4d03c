//! The `gramcheck scores` command: last/best per set id as a table.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use gramcheck_core::history::{self, Tally};
use gramcheck_session::SessionConfig;

pub fn execute(data_dir: PathBuf) -> Result<i32> {
    let config = SessionConfig::new(data_dir);
    let history = history::load_history_or_empty(&config.scores_path());
    if history.is_empty() {
        println!("No scores recorded yet.");
        return Ok(0);
    }

    let stats = history::stats_by_set(&history);

    // rows in first-appearance order, titled by the most recent entry
    let mut order: Vec<&str> = Vec::new();
    let mut titles: HashMap<&str, &str> = HashMap::new();
    for entry in &history {
        if !titles.contains_key(entry.set_id.as_str()) {
            order.push(&entry.set_id);
        }
        titles.insert(&entry.set_id, &entry.set_title);
    }

    let fmt = |t: Option<Tally>| t.map(|t| t.to_string()).unwrap_or_else(|| "-".into());

    let mut table = Table::new();
    table.set_header(vec!["Set", "Title", "Last", "Best"]);
    for set_id in order {
        let s = &stats[set_id];
        table.add_row(vec![
            Cell::new(set_id),
            Cell::new(titles[set_id]),
            Cell::new(fmt(s.last)),
            Cell::new(fmt(s.best)),
        ]);
    }

    println!("{table}");
    println!("{} runs recorded.", history.len());
    Ok(0)
}
