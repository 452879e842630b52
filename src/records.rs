//! Best scores and win history.
//!
//! This module keeps the records a finished attempt produces. The in-memory copy is authoritative;
//! every change is also pushed to a [`Store`] on a best-effort basis, so a broken disk never stops
//! the game.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::{maze::Dimensions, storage::Store};

/// Maximum number of history entries kept.
pub const HISTORY_LIMIT: usize = 10;

/// Store key of the history list.
pub const HISTORY_KEY: &str = "invisible-wall-history";

/// Prefix of the per-size best score keys.
pub const BEST_KEY_PREFIX: &str = "invisible-wall-best";

/// Source of wall-clock timestamps.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Clock reading the system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// One completed attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the goal was reached, in milliseconds since the Unix epoch.
    #[serde(rename = "date")]
    pub timestamp: i64,
    /// Steps used.
    pub steps: u32,
    /// Rows of the maze.
    pub rows: usize,
    /// Columns of the maze.
    pub cols: usize,
}

impl HistoryEntry {
    /// The timestamp as a UTC date, if it is representable.
    #[must_use]
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// What a win changed in the records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinSummary {
    /// Steps used in this win.
    pub steps: u32,
    /// Best score for the maze size after this win.
    pub best: u32,
    /// Whether this win set a new best.
    pub new_best: bool,
}

/// Best scores per maze size plus the recent history.
pub struct ScoreBook {
    /// Persistence backend.
    store: Box<dyn Store>,
    /// Recent wins, newest first.
    history: Vec<HistoryEntry>,
    /// Lowest step count per maze size.
    bests: BTreeMap<Dimensions, u32>,
}

impl std::fmt::Debug for ScoreBook {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ScoreBook")
            .field("history", &self.history)
            .field("bests", &self.bests)
            .finish_non_exhaustive()
    }
}

impl ScoreBook {
    /// Loads the history from `store`.
    ///
    /// Unreadable or malformed data is logged and replaced with an empty history.
    #[must_use]
    pub fn load(store: Box<dyn Store>) -> Self {
        let mut history = match store.get(HISTORY_KEY) {
            Ok(Some(value)) => serde_json::from_value::<Vec<HistoryEntry>>(value)
                .unwrap_or_else(|err| {
                    warn!(%err, "discarding malformed history");
                    Vec::new()
                }),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(%err, "history unavailable, keeping it in memory only");
                Vec::new()
            }
        };
        history.truncate(HISTORY_LIMIT);

        Self {
            store,
            history,
            bests: BTreeMap::new(),
        }
    }

    /// Store key holding the best score for a maze size.
    #[must_use]
    pub fn best_key(dimensions: Dimensions) -> String {
        format!(
            "{BEST_KEY_PREFIX}-{}x{}",
            dimensions.rows(),
            dimensions.cols()
        )
    }

    /// Pulls the persisted best score for `dimensions` into memory, unless already known.
    pub fn load_best(&mut self, dimensions: Dimensions) {
        if self.bests.contains_key(&dimensions) {
            return;
        }

        match self.store.get(&Self::best_key(dimensions)) {
            Ok(Some(value)) => match serde_json::from_value::<u32>(value) {
                Ok(best) => {
                    let _ = self.bests.insert(dimensions, best);
                }
                Err(err) => warn!(%err, "discarding malformed best score"),
            },
            Ok(None) => {}
            Err(err) => warn!(%err, "best score unavailable"),
        }
    }

    /// Best score known for `dimensions`.
    #[must_use]
    pub fn best(&self, dimensions: Dimensions) -> Option<u32> {
        self.bests.get(&dimensions).copied()
    }

    /// Recent wins, newest first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Records a win: lowers the best score if needed and prepends a history entry.
    pub fn record_win(&mut self, entry: HistoryEntry) -> WinSummary {
        let Ok(dimensions) = Dimensions::new(entry.rows, entry.cols) else {
            warn!(rows = entry.rows, cols = entry.cols, "win recorded for invalid size");
            return WinSummary {
                steps: entry.steps,
                best: entry.steps,
                new_best: false,
            };
        };

        self.load_best(dimensions);
        let previous = self.best(dimensions);
        let best = previous.map_or(entry.steps, |best| best.min(entry.steps));
        let new_best = previous.is_none_or(|best| entry.steps < best);
        let _ = self.bests.insert(dimensions, best);
        if new_best {
            info!(steps = entry.steps, rows = entry.rows, cols = entry.cols, "new best score");
            self.persist_best(dimensions, best);
        }

        self.history.insert(0, entry);
        self.history.truncate(HISTORY_LIMIT);
        self.persist_history();

        WinSummary {
            steps: entry.steps,
            best,
            new_best,
        }
    }

    /// Forgets every history entry. Best scores are kept.
    pub fn clear_history(&mut self) {
        self.history.clear();
        if let Err(err) = self.store.remove(HISTORY_KEY) {
            warn!(%err, "failed to remove stored history");
        }
    }

    /// Writes `best` for `dimensions` unless the store already holds a value at least as low.
    ///
    /// The stored value is read again first, since an earlier failed read leaves the in-memory map
    /// without it. When that read fails too, nothing is written.
    fn persist_best(&mut self, dimensions: Dimensions, best: u32) {
        let key = Self::best_key(dimensions);
        match self.store.get(&key) {
            Ok(Some(value)) if value.as_u64().is_some_and(|stored| stored <= u64::from(best)) => {
                info!(key, "stored best score is already lower");
            }
            Ok(_) => self.persist(&key, Value::from(best)),
            Err(err) => warn!(%err, key, "cannot check stored best score, not overwriting it"),
        }
    }

    /// Writes the history list to the store.
    fn persist_history(&mut self) {
        match serde_json::to_value(&self.history) {
            Ok(value) => self.persist(HISTORY_KEY, value),
            Err(err) => warn!(%err, "failed to encode history"),
        }
    }

    /// Best-effort write of a single key.
    fn persist(&mut self, key: &str, value: Value) {
        if let Err(err) = self.store.set(key, value) {
            warn!(%err, key, "failed to persist record");
        }
    }
}
