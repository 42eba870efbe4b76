// src/sync/classify.rs

//! Stage-dependent interpretation of the scheduler's raw due value.

use chrono::{DateTime, Days, Local, TimeZone, Utc};

use crate::types::{DueDate, Stage};

/// Derive an absolute due date from a raw due value.
///
/// - `New`: no date (the raw value is a queue position).
/// - `Review`: day offset from `epoch`, at date granularity; `None` when the
///   epoch is unknown.
/// - `Learning` / `Relearning`: unix timestamp; `None` if out of range.
pub fn classify_due(stage: Stage, raw_due: i64, epoch: Option<DateTime<Utc>>) -> Option<DueDate> {
    match stage {
        Stage::New => None,
        Stage::Review => {
            let day0 = epoch?.with_timezone(&Local).date_naive();
            let offset = Days::new(raw_due.unsigned_abs());
            let day = if raw_due >= 0 {
                day0.checked_add_days(offset)
            } else {
                day0.checked_sub_days(offset)
            };
            day.map(DueDate::Day)
        }
        Stage::Learning | Stage::Relearning => {
            Utc.timestamp_opt(raw_due, 0).single().map(DueDate::At)
        }
    }
}
