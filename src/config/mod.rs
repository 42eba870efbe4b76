// src/config/mod.rs

//! Configuration loading and validation for deckgraph.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants like URL shape and limits (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_for_cli, load_from_path};
pub use model::{ConfigFile, LayoutSection, RawConfigFile, SchedulerSection, StoreSection};
pub use validate::validate_config;
