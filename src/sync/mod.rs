// src/sync/mod.rs

//! Pull per-item scheduling state from the external scheduler into the store.
//!
//! - [`classify`] turns a stage + raw due value into an absolute due date.
//! - [`state_sync`] runs full and single-item syncs.

pub mod classify;
pub mod state_sync;

pub use classify::classify_due;
pub use state_sync::{
    FetchOutcome, SyncContext, SyncSummary, fetch_item_state, sync_all, sync_one,
};
