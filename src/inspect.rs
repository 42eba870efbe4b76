// src/inspect.rs

//! Diagnostic view of a single item straight from the scheduler.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::scheduler::CardInfo;
use crate::sync::classify_due;
use crate::types::{DueDate, QueueStatus, Stage};

/// Live scheduling state of one item plus a human-readable due summary.
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub card: CardInfo,
    pub stage: Option<Stage>,
    pub queue_status: QueueStatus,
    pub due_date: Option<DueDate>,
    pub epoch: Option<DateTime<Utc>>,
    pub summary: String,
}

impl Inspection {
    pub fn new(card: CardInfo, epoch: Option<DateTime<Utc>>, now: DateTime<Local>) -> Self {
        let stage = card.stage();
        let due_date = stage.and_then(|s| classify_due(s, card.due, epoch));
        let summary = describe_due(stage, card.due, due_date, epoch.is_some(), now);
        Self {
            queue_status: card.queue_status(),
            card,
            stage,
            due_date,
            epoch,
            summary,
        }
    }
}

/// Relative description of when an item is due.
pub fn describe_due(
    stage: Option<Stage>,
    raw_due: i64,
    due_date: Option<DueDate>,
    epoch_known: bool,
    now: DateTime<Local>,
) -> String {
    let Some(stage) = stage else {
        return "unknown stage".to_string();
    };

    match (stage, due_date) {
        (Stage::New, _) => "new, not yet studied".to_string(),
        (Stage::Review, Some(due)) => {
            let days = (due.local_date() - now.date_naive()).num_days();
            match days {
                d if d < 0 => format!("{due}: overdue by {} days", -d),
                0 => format!("{due}: due today"),
                d => format!("{due}: due in {d} days"),
            }
        }
        (Stage::Review, None) if !epoch_known => {
            format!("cannot compute without the collection epoch (raw due = day {raw_due})")
        }
        (_, Some(DueDate::At(at))) => {
            let secs = (at - now.with_timezone(&Utc)).num_seconds();
            let due = DueDate::At(at);
            if secs < 0 {
                format!("{due}: overdue")
            } else if secs < 3600 {
                format!("{due}: due in {} minutes", secs / 60)
            } else {
                format!("{due}: due in {} hours", secs / 3600)
            }
        }
        (_, Some(due)) => format!("{due}"),
        (_, None) => format!("invalid due value {raw_due}"),
    }
}
