// src/store/mod.rs

//! Persisted ground truth: per-item scheduling state and the edge set.

mod schema;
pub mod sqlite;

pub use sqlite::SqliteStore;
