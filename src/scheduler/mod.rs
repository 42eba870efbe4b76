// src/scheduler/mod.rs

//! External scheduler access.
//!
//! - [`client`] provides the `SchedulerClient` trait and the HTTP
//!   implementation used in production.
//! - [`model`] holds the per-card scheduling snapshot.
//! - [`epoch`] looks up the collection-creation epoch.

pub mod client;
pub mod epoch;
pub mod model;

pub use client::{AnkiConnectClient, SchedulerClient, SchedulerFuture};
pub use epoch::{find_collection_path, read_epoch, resolve_epoch};
pub use model::CardInfo;
