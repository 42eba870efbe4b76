// src/query/mod.rs

//! Read-only views over the store for the presentation layer.

pub mod due;
pub mod report;

pub use due::{DueItem, DuePriority, due_items, select_due};
pub use report::{BlockingReport, blocking_ids, blocking_report};
