// src/blocking/mod.rs

//! Blocking engine: which items are ready, and which are locked behind a
//! ready ancestor.
//!
//! - [`policy`] is the per-item readiness rule (phase 1).
//! - [`engine`] runs both phases over the store (phase 2 = propagation).

pub mod engine;
pub mod policy;

pub use engine::{RecomputeOutcome, propagate_blocked, recompute};
pub use policy::is_blocking;
