// src/query/report.rs

use serde::Serialize;

use crate::errors::Result;
use crate::store::SqliteStore;
use crate::types::{ItemId, ItemState};

/// Aggregate view of the derived flags.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BlockingReport {
    pub total_items: usize,
    pub blocking_count: usize,
    pub blocked_count: usize,
    pub blocking: Vec<ItemState>,
    pub blocked: Vec<ItemState>,
}

impl BlockingReport {
    pub fn from_states(states: &[ItemState]) -> Self {
        let blocking: Vec<ItemState> = states.iter().filter(|s| s.is_blocking).cloned().collect();
        let blocked: Vec<ItemState> = states.iter().filter(|s| s.is_blocked).cloned().collect();
        Self {
            total_items: states.len(),
            blocking_count: blocking.len(),
            blocked_count: blocked.len(),
            blocking,
            blocked,
        }
    }

    pub fn blocking_ids(&self) -> Vec<ItemId> {
        self.blocking.iter().map(|s| s.id.clone()).collect()
    }

    pub fn blocked_ids(&self) -> Vec<ItemId> {
        self.blocked.iter().map(|s| s.id.clone()).collect()
    }
}

/// Counts and listings of blocking / blocked items, ordered by id.
pub fn blocking_report(store: &SqliteStore) -> Result<BlockingReport> {
    Ok(BlockingReport::from_states(&store.all_states()?))
}

/// The actionable frontier: blocking and not blocked, ordered by id.
pub fn blocking_ids(store: &SqliteStore) -> Result<Vec<ItemId>> {
    Ok(store
        .all_states()?
        .into_iter()
        .filter(|s| s.is_actionable())
        .map(|s| s.id)
        .collect())
}
