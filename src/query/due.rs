// src/query/due.rs

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::Result;
use crate::store::SqliteStore;
use crate::types::{DueDate, ItemId, ItemState, QueueStatus, Stage};

/// Ordering tier of a due item. Lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuePriority {
    /// Learning/Relearning item whose due instant could not be derived.
    Unclassified = 0,
    /// Any item with a known due date.
    Dated = 1,
    /// New items.
    New = 2,
}

/// An unblocked item that should be surfaced to the user now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueItem {
    pub id: ItemId,
    pub stage: Stage,
    pub queue_status: QueueStatus,
    pub due_date: Option<DueDate>,
    pub priority: DuePriority,
}

impl DueItem {
    /// `Some` when `state` is unblocked, active and due on `today`.
    pub fn from_state(state: &ItemState, today: NaiveDate) -> Option<Self> {
        if state.is_blocked || state.queue_status.is_suspended() {
            return None;
        }

        let priority = match (state.stage, state.due_date) {
            (Stage::New, _) => DuePriority::New,
            (stage, None) if stage.is_learning() => DuePriority::Unclassified,
            (_, Some(due)) if due.is_due_on(today) => DuePriority::Dated,
            _ => return None,
        };

        Some(Self {
            id: state.id.clone(),
            stage: state.stage,
            queue_status: state.queue_status,
            due_date: state.due_date,
            priority,
        })
    }

    fn sort_key(&self) -> (DuePriority, Option<NaiveDate>, Option<String>, &str) {
        (
            self.priority,
            self.due_date.map(|d| d.local_date()),
            self.due_date.map(|d| d.to_iso()),
            self.id.as_str(),
        )
    }
}

/// Unblocked, active items that are due, in surfacing order:
/// unclassified learning items, then dated items by due date, then new items.
pub fn due_items(store: &SqliteStore, today: NaiveDate) -> Result<Vec<DueItem>> {
    Ok(select_due(&store.all_states()?, today))
}

/// Pure selection + ordering over a set of rows.
pub fn select_due(states: &[ItemState], today: NaiveDate) -> Vec<DueItem> {
    let mut items: Vec<DueItem> = states
        .iter()
        .filter_map(|s| DueItem::from_state(s, today))
        .collect();
    items.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    items
}
