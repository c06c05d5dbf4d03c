//! Append-only score history with JSON persistence.
//!
//! Every completed set, section, check, or aggregate run appends one
//! immutable entry. Reads are permissive: a missing or corrupt history
//! file maps to "no history", logged, and never aborts a session.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// One immutable record of a completed run against a given set id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub set_id: String,
    pub set_title: String,
    pub score: u32,
    pub total: u32,
    /// ISO-8601 timestamp of when the run finished.
    pub date: DateTime<Utc>,
}

impl ScoreEntry {
    pub fn new(set_id: &str, set_title: &str, score: u32, total: u32) -> Self {
        Self {
            set_id: set_id.into(),
            set_title: set_title.into(),
            score,
            total,
            date: Utc::now(),
        }
    }
}

/// On-disk form: `{"history": [...]}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(default)]
    history: Vec<ScoreEntry>,
}

/// Load the full history in stored (append) order. A missing file is an
/// error here so callers can tell "first run" from "broken file";
/// use [`load_history_or_empty`] for the degrade-and-continue path.
pub fn load_history(path: &Path) -> Result<Vec<ScoreEntry>, DataError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DataError::MissingFile(path.to_path_buf())
        } else {
            DataError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let file: ScoreFile = serde_json::from_str(&content).map_err(|e| DataError::Malformed {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(file.history)
}

/// Load the history, degrading to empty. Corruption is logged; a missing
/// file is a normal first run and is not.
pub fn load_history_or_empty(path: &Path) -> Vec<ScoreEntry> {
    match load_history(path) {
        Ok(history) => history,
        Err(e) if e.is_missing() => Vec::new(),
        Err(e) => {
            tracing::warn!("ignoring unreadable score history: {e}");
            Vec::new()
        }
    }
}

/// Append one entry and save the whole accumulated list back as a
/// full-file overwrite.
pub fn append_score(path: &Path, entry: ScoreEntry) -> Result<()> {
    let mut history = load_history_or_empty(path);
    history.push(entry);
    let json = serde_json::to_string_pretty(&ScoreFile { history })
        .context("failed to serialize score history")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write score history to {}", path.display()))?;
    Ok(())
}

/// A score/total pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub score: u32,
    pub total: u32,
}

impl Tally {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.score) / f64::from(self.total)
        }
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.score, self.total)
    }
}

/// Last and best recorded scores for one set id.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetStats {
    /// The most recently appended entry.
    pub last: Option<Tally>,
    /// The entry with the highest score/total ratio; ties keep the
    /// earliest entry in stored order.
    pub best: Option<Tally>,
}

/// Fold the history into per-set-id stats, scanning in stored order.
/// Entries with total == 0 still count as "last" but are never compared
/// for "best".
pub fn stats_by_set(history: &[ScoreEntry]) -> HashMap<String, SetStats> {
    let mut stats: HashMap<String, SetStats> = HashMap::new();
    for entry in history {
        let tally = Tally {
            score: entry.score,
            total: entry.total,
        };
        let s = stats.entry(entry.set_id.clone()).or_default();
        s.last = Some(tally);
        if entry.total > 0 && s.best.is_none_or(|b| tally.ratio() > b.ratio()) {
            s.best = Some(tally);
        }
    }
    stats
}
