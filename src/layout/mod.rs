// src/layout/mod.rs

//! Layout description consumed by the graph builder.
//!
//! - [`model`] is the serde mapping of the canvas document.
//! - [`loader`] reads it from disk.

pub mod loader;
pub mod model;

pub use loader::{load_layout, parse_layout};
pub use model::{Arrow, GroupSpec, LayoutDocument};
