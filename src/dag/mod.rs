// src/dag/mod.rs

//! Prerequisite graph representation and construction.
//!
//! - [`graph`] holds an in-memory adjacency view over the edge set.
//! - [`builder`] expands a layout (groups, arrows) into edges and replaces
//!   the persisted edge set.

pub mod builder;
pub mod graph;

pub use builder::{BuildOutcome, ExpandedLayout, build_graph, expand_layout};
pub use graph::DagGraph;
