// src/dag/graph.rs

use std::collections::{BTreeMap, BTreeSet};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::types::{Edge, ItemId};

/// Internal node structure: stores immediate children.
#[derive(Debug, Clone, Default)]
struct DagNode {
    /// Items that list this one as a prerequisite.
    children: Vec<ItemId>,
}

/// In-memory prerequisite graph keyed by item id.
///
/// Built from the persisted edge set. Acyclicity is *not* guaranteed: the
/// layout is free-form, so traversals must carry their own visited set.
/// Node and adjacency order is deterministic (sorted by id).
#[derive(Debug, Clone, Default)]
pub struct DagGraph {
    nodes: BTreeMap<ItemId, DagNode>,
}

impl DagGraph {
    /// Build a graph from a set of edges. Duplicate edges collapse.
    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = &'a Edge>,
    {
        let unique: BTreeSet<&Edge> = edges.into_iter().collect();
        let mut nodes: BTreeMap<ItemId, DagNode> = BTreeMap::new();

        for edge in unique {
            nodes
                .entry(edge.parent.clone())
                .or_default()
                .children
                .push(edge.child.clone());
            nodes.entry(edge.child.clone()).or_default();
        }

        Self { nodes }
    }

    /// Immediate dependents of an item.
    pub fn children_of(&self, id: &str) -> &[ItemId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Every item reachable from `source` via one or more edges, never
    /// `source` itself (even when it lies on a cycle).
    pub fn descendants_of(&self, source: &str) -> BTreeSet<ItemId> {
        let mut seen: BTreeSet<ItemId> = BTreeSet::from([source.to_string()]);
        let mut stack: Vec<&str> = self.children_of(source).iter().map(|s| s.as_str()).collect();

        while let Some(id) = stack.pop() {
            if !seen.insert(id.to_string()) {
                continue;
            }
            stack.extend(self.children_of(id).iter().map(|s| s.as_str()));
        }

        seen.remove(source);
        seen
    }

    /// If the graph contains a cycle, return one node that lies on it.
    pub fn find_cycle_node(&self) -> Option<ItemId> {
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
        for (id, node) in self.nodes.iter() {
            graph.add_node(id.as_str());
            for child in node.children.iter() {
                graph.add_edge(id.as_str(), child.as_str(), ());
            }
        }

        match toposort(&graph, None) {
            Ok(_order) => None,
            Err(cycle) => Some(cycle.node_id().to_string()),
        }
    }
}
