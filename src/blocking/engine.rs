// src/blocking/engine.rs

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::blocking::policy::is_blocking;
use crate::dag::DagGraph;
use crate::errors::Result;
use crate::store::SqliteStore;
use crate::types::ItemId;

/// Counts produced by one [`recompute`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecomputeOutcome {
    pub items: usize,
    pub blocking: usize,
    pub blocked: usize,
}

/// Recompute `is_blocking` and `is_blocked` for every item.
///
/// Phase 1 classifies each row on its own and commits. Phase 2 then resets
/// `is_blocked` and marks every descendant of every blocking item, as a
/// single transaction. A blocking item is never marked by its own walk. Running it twice without state changes yields the
/// same flags.
pub fn recompute(store: &mut SqliteStore, today: NaiveDate) -> Result<RecomputeOutcome> {
    let states = store.all_states()?;

    // Phase 1
    let flags: Vec<(ItemId, bool)> = states
        .iter()
        .map(|s| (s.id.clone(), is_blocking(s, today)))
        .collect();
    store.write_blocking_flags(&flags)?;

    let sources: Vec<&str> = flags
        .iter()
        .filter(|(_, blocking)| *blocking)
        .map(|(id, _)| id.as_str())
        .collect();
    debug!(blocking = sources.len(), "phase 1 complete");

    // Phase 2
    let edges = store.edges()?;
    let graph = DagGraph::from_edges(edges.iter());
    let blocked = propagate_blocked(&graph, sources.iter().copied());
    store.write_blocked_flags(&blocked)?;

    let outcome = RecomputeOutcome {
        items: states.len(),
        blocking: sources.len(),
        blocked: states.iter().filter(|s| blocked.contains(&s.id)).count(),
    };
    info!(
        items = outcome.items,
        blocking = outcome.blocking,
        blocked = outcome.blocked,
        "blocking state recomputed"
    );
    Ok(outcome)
}

/// Every item reachable via one or more edges from any of `sources`.
///
/// Each source is walked with its own visited set seeded with the source, so
/// a traversal never marks its own starting item, even on a cycle. A source
/// ends up blocked only when a different source reaches it.
pub fn propagate_blocked<'a, I>(graph: &DagGraph, sources: I) -> BTreeSet<ItemId>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut blocked: BTreeSet<ItemId> = BTreeSet::new();

    for source in sources {
        let mut visited: BTreeSet<&str> = BTreeSet::from([source]);
        let mut stack: Vec<&str> = graph.children_of(source).iter().map(|s| s.as_str()).collect();

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            blocked.insert(id.to_string());
            stack.extend(graph.children_of(id).iter().map(|s| s.as_str()));
        }
    }

    blocked
}
