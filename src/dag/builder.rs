// src/dag/builder.rs

//! Turn a layout document into a flat, deduplicated edge set.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use crate::dag::DagGraph;
use crate::errors::Result;
use crate::layout::LayoutDocument;
use crate::store::SqliteStore;
use crate::types::{Edge, ItemId};

/// Result of expanding a layout: every referenced item and every edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedLayout {
    /// Explicit items plus every group member.
    pub item_ids: BTreeSet<ItemId>,
    pub edges: BTreeSet<Edge>,
    /// Arrows dropped for lacking an endpoint.
    pub skipped_arrows: usize,
}

/// Outcome of [`build_graph`].
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub item_ids: BTreeSet<ItemId>,
    pub edge_count: usize,
    pub skipped_arrows: usize,
    /// A node on a cycle, if the edge set is not acyclic.
    pub cycle_node: Option<ItemId>,
}

impl BuildOutcome {
    pub fn has_cycle(&self) -> bool {
        self.cycle_node.is_some()
    }
}

/// Expand groups and arrows into item ids and member-to-member edges.
///
/// - a group id expands to its member list
/// - any other endpoint is a singleton containing itself
/// - an arrow missing either endpoint is skipped
pub fn expand_layout(doc: &LayoutDocument) -> ExpandedLayout {
    let mut item_ids: BTreeSet<ItemId> = doc.items.keys().cloned().collect();
    let mut group_members: BTreeMap<&str, &[ItemId]> = BTreeMap::new();

    for (gid, group) in doc.groups.iter() {
        let members = group.members();
        item_ids.extend(members.iter().cloned());
        group_members.insert(gid.as_str(), members);
    }

    let mut edges = BTreeSet::new();
    let mut skipped_arrows = 0;

    for arrow in doc.arrows.iter() {
        let Some((from, to)) = arrow.endpoints() else {
            warn!(?arrow, "arrow without both endpoints; skipping");
            skipped_arrows += 1;
            continue;
        };

        let parents = expand_endpoint(&group_members, from);
        let children = expand_endpoint(&group_members, to);

        for parent in parents.iter() {
            for child in children.iter() {
                if edges.insert(Edge::new(parent.clone(), child.clone())) {
                    debug!(parent = %parent, child = %child, "edge");
                }
            }
        }
    }

    ExpandedLayout {
        item_ids,
        edges,
        skipped_arrows,
    }
}

fn expand_endpoint(groups: &BTreeMap<&str, &[ItemId]>, endpoint: &str) -> Vec<ItemId> {
    match groups.get(endpoint) {
        Some(members) => members.to_vec(),
        None => vec![endpoint.to_string()],
    }
}

/// Expand `doc` and atomically replace the store's edge set with the result.
///
/// Returns every item id referenced by the layout, for the full sync.
pub fn build_graph(doc: &LayoutDocument, store: &mut SqliteStore) -> Result<BuildOutcome> {
    let expanded = expand_layout(doc);

    let graph = DagGraph::from_edges(expanded.edges.iter());
    let cycle_node = graph.find_cycle_node();
    if let Some(ref node) = cycle_node {
        warn!(
            item = %node,
            "prerequisite graph contains a cycle; items on it will lock each other"
        );
    }

    store.replace_edges(expanded.edges.iter())?;

    info!(
        items = expanded.item_ids.len(),
        edges = expanded.edges.len(),
        skipped_arrows = expanded.skipped_arrows,
        "graph rebuilt from layout"
    );

    Ok(BuildOutcome {
        edge_count: expanded.edges.len(),
        item_ids: expanded.item_ids,
        skipped_arrows: expanded.skipped_arrows,
        cycle_node,
    })
}
