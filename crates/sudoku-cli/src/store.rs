//! Persisted play history and aggregate statistics.
//!
//! A single JSON file records what was generated and solved. The store is
//! bookkeeping only: nothing in it is ever consulted in place of solving or
//! validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use sudoku_engine::Difficulty;

/// What produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Generated,
    Solved,
}

/// One generate/solve event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub kind: RecordKind,
    /// 81-character puzzle line.
    pub puzzle: String,
    /// Known for generated puzzles; solving arbitrary input records `None`.
    pub difficulty: Option<Difficulty>,
    pub clue_count: usize,
    /// Unix timestamp, seconds.
    pub timestamp: u64,
}

/// Aggregated view over the history.
#[derive(Debug, Serialize)]
pub struct StatsSummary {
    pub total_generated: usize,
    pub total_solved: usize,
    pub by_difficulty: BTreeMap<String, usize>,
    pub recent: Vec<HistoryRecord>,
}

/// On-disk history store.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct HistoryStore {
    pub history: Vec<HistoryRecord>,
}

impl HistoryStore {
    fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sudoku-cli")
            .join("history.json")
    }

    /// Load the store, falling back to an empty one for a missing or
    /// unreadable file. Returns the path it will save back to.
    pub fn load(override_path: Option<&Path>) -> (Self, PathBuf) {
        let path = override_path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);
        let store = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => Self::default(),
        };
        (store, path)
    }

    /// Save the store, creating parent directories as needed. Failures are
    /// logged and swallowed: bookkeeping never fails the command.
    pub fn save(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("could not write history to {}: {}", path.display(), err);
                }
            }
            Err(err) => log::warn!("could not serialize history: {}", err),
        }
    }

    pub fn record(&mut self, record: HistoryRecord) {
        self.history.push(record);
    }

    /// Totals, per-difficulty breakdown, and the most recent entries.
    pub fn stats(&self) -> StatsSummary {
        let mut by_difficulty = BTreeMap::new();
        for record in &self.history {
            if let Some(difficulty) = record.difficulty {
                *by_difficulty.entry(difficulty.to_string()).or_insert(0) += 1;
            }
        }
        StatsSummary {
            total_generated: self
                .history
                .iter()
                .filter(|r| r.kind == RecordKind::Generated)
                .count(),
            total_solved: self
                .history
                .iter()
                .filter(|r| r.kind == RecordKind::Solved)
                .count(),
            by_difficulty,
            recent: self.history.iter().rev().take(10).cloned().collect(),
        }
    }

    pub fn now_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0)
    }
}
