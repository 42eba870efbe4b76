// src/blocking/policy.rs

use chrono::NaiveDate;

use crate::types::{ItemState, Stage};

/// Whether an item, standing alone, is something to work on now.
///
/// - suspended/buried: never
/// - New: always
/// - otherwise: when the due date is unknown or on/before `today`
///
/// An unknown due date counts as due, so unclassifiable items are surfaced
/// rather than hidden.
pub fn is_blocking(state: &ItemState, today: NaiveDate) -> bool {
    if state.queue_status.is_suspended() {
        return false;
    }
    match state.stage {
        Stage::New => true,
        Stage::Learning | Stage::Review | Stage::Relearning => match state.due_date {
            None => true,
            Some(due) => due.is_due_on(today),
        },
    }
}
