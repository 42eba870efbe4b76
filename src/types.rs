use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Opaque item identifier, as used in the layout and the store.
pub type ItemId = String;

/// Spaced-repetition lifecycle stage of an item.
///
/// Scheduler codes: `0 = New`, `1 = Learning`, `2 = Review`, `3 = Relearning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    New,
    Learning,
    Review,
    Relearning,
}

impl Stage {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Stage::New),
            1 => Some(Stage::Learning),
            2 => Some(Stage::Review),
            3 => Some(Stage::Relearning),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Stage::New => 0,
            Stage::Learning => 1,
            Stage::Review => 2,
            Stage::Relearning => 3,
        }
    }

    /// Learning and Relearning carry an absolute timestamp in `raw_due`.
    pub fn is_learning(self) -> bool {
        matches!(self, Stage::Learning | Stage::Relearning)
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::New => "New",
            Stage::Learning => "Learning",
            Stage::Review => "Review",
            Stage::Relearning => "Relearning",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether an item can currently be scheduled at all.
///
/// The three non-active variants are distinct on the scheduler side but are
/// treated identically by blocking policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    Active,
    /// Buried by the user.
    UserSuspended,
    /// Buried by the scheduler (e.g. sibling burying).
    SchedulerSuspended,
    Suspended,
}

impl QueueStatus {
    /// Map a raw scheduler queue value. Every non-negative queue is active.
    pub fn from_code(code: i64) -> Self {
        match code {
            -3 => QueueStatus::UserSuspended,
            -2 => QueueStatus::SchedulerSuspended,
            -1 => QueueStatus::Suspended,
            _ => QueueStatus::Active,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            QueueStatus::Active => 0,
            QueueStatus::Suspended => -1,
            QueueStatus::SchedulerSuspended => -2,
            QueueStatus::UserSuspended => -3,
        }
    }

    pub fn is_suspended(self) -> bool {
        !matches!(self, QueueStatus::Active)
    }

    pub fn label(self) -> &'static str {
        match self {
            QueueStatus::Active => "Active",
            QueueStatus::UserSuspended => "User Buried",
            QueueStatus::SchedulerSuspended => "Scheduler Buried",
            QueueStatus::Suspended => "Suspended",
        }
    }
}

/// Absolute point in time at which an item becomes due.
///
/// Review items are due on a calendar day; learning items at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum DueDate {
    Day(NaiveDate),
    At(DateTime<Utc>),
}

impl DueDate {
    /// Calendar date used for date-level comparisons (local time).
    pub fn local_date(&self) -> NaiveDate {
        match self {
            DueDate::Day(day) => *day,
            DueDate::At(at) => at.with_timezone(&Local).date_naive(),
        }
    }

    /// True when the item is due on or before `today`.
    pub fn is_due_on(&self, today: NaiveDate) -> bool {
        self.local_date() <= today
    }

    /// ISO-8601 text used for persistence.
    pub fn to_iso(&self) -> String {
        match self {
            DueDate::Day(day) => day.format("%Y-%m-%d").to_string(),
            DueDate::At(at) => at.to_rfc3339(),
        }
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueDate::Day(day) => write!(f, "{}", day.format("%Y-%m-%d")),
            DueDate::At(at) => write!(
                f,
                "{}",
                at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
            ),
        }
    }
}

impl FromStr for DueDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(DueDate::Day(day));
        }
        DateTime::parse_from_rfc3339(s)
            .map(|at| DueDate::At(at.with_timezone(&Utc)))
            .map_err(|e| format!("invalid due date {s:?}: {e}"))
    }
}

/// One row of persisted scheduling state.
///
/// `is_blocking` / `is_blocked` are outputs of the blocking engine; sync
/// writes them as `false` on insert and never touches them on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemState {
    pub id: ItemId,
    pub stage: Stage,
    pub queue_status: QueueStatus,
    pub due_date: Option<DueDate>,
    pub raw_due: i64,
    pub is_blocking: bool,
    pub is_blocked: bool,
}

impl ItemState {
    /// Fresh row as produced by a sync, with derived flags cleared.
    pub fn synced(
        id: impl Into<ItemId>,
        stage: Stage,
        queue_status: QueueStatus,
        due_date: Option<DueDate>,
        raw_due: i64,
    ) -> Self {
        Self {
            id: id.into(),
            stage,
            queue_status,
            due_date,
            raw_due,
            is_blocking: false,
            is_blocked: false,
        }
    }

    /// Visible and actionable: ready, and not locked by an ancestor.
    pub fn is_actionable(&self) -> bool {
        self.is_blocking && !self.is_blocked
    }
}

/// Prerequisite edge: `parent` must be resolved before `child` is usable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Edge {
    pub parent: ItemId,
    pub child: ItemId,
}

impl Edge {
    pub fn new(parent: impl Into<ItemId>, child: impl Into<ItemId>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
        }
    }
}
