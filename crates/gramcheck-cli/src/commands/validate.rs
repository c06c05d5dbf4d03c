//! The `gramcheck validate` command.
//!
//! Loads every data file the session would load and reports problems up
//! front: hard errors (malformed JSON, malformed questions) fail the
//! command, author-facing issues are printed as warnings.

use std::path::PathBuf;

use anyhow::Result;
use gramcheck_core::parser;
use gramcheck_session::SessionConfig;

pub fn execute(data_dir: PathBuf) -> Result<i32> {
    let config = SessionConfig::new(data_dir);

    let bank = parser::load_question_bank(&config.questions_path())?;
    let mut total_warnings = 0;

    for key in bank.keys() {
        let sets = bank.sets(key);
        let question_count: usize = sets.iter().map(|s| s.questions.len()).sum();
        println!(
            "Question bank key '{key}': {} sets, {question_count} questions",
            sets.len()
        );
    }

    let warnings = parser::validate_bank(&bank);
    for w in &warnings {
        let prefix = w
            .set_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
    total_warnings += warnings.len();

    match parser::load_manifest(&config.manifest_path())? {
        Some(topics) => {
            println!("Manifest: {} topics", topics.len());
            for topic in &topics {
                let path = config.data_dir.join(&topic.curriculum);
                match parser::load_curriculum(&path) {
                    Ok(c) => println!(
                        "  [{}] curriculum '{}': {} check questions, {} practice sections",
                        topic.id,
                        topic.curriculum,
                        c.check.questions.len(),
                        c.practice.len()
                    ),
                    Err(e) if e.is_missing() => {
                        println!(
                            "  [{}] WARNING: curriculum file '{}' not found",
                            topic.id, topic.curriculum
                        );
                        total_warnings += 1;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        None => {
            // no manifest: single implicit topic; check its curriculum
            let path = config.curriculum_path();
            if path.exists() {
                let c = parser::load_curriculum(&path)?;
                println!(
                    "Curriculum: {} check questions, {} practice sections",
                    c.check.questions.len(),
                    c.practice.len()
                );
            }
        }
    }

    if total_warnings == 0 {
        println!("All data files valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(0)
}
