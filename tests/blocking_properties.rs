use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use deckgraph::blocking::{propagate_blocked, recompute};
use deckgraph::dag::DagGraph;
use deckgraph::store::SqliteStore;
use deckgraph::types::{DueDate, Edge, ItemState, QueueStatus, Stage};
use proptest::prelude::*;

// Arbitrary directed graphs over a small node set, cycles and self-loops
// included.
fn graph_strategy(max_nodes: usize) -> impl Strategy<Value = (usize, Vec<Edge>)> {
    (1..=max_nodes).prop_flat_map(|n| {
        let edges = proptest::collection::vec((0..n, 0..n), 0..(n * 3));
        edges.prop_map(move |pairs| {
            let edges = pairs
                .into_iter()
                .map(|(p, c)| Edge::new(format!("n{p}"), format!("n{c}")))
                .collect();
            (n, edges)
        })
    })
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

// One row per node: stage code, queue code, and an optional day offset from
// today for the due date.
fn state_strategy() -> impl Strategy<Value = (i64, i64, Option<i64>)> {
    (0..4i64, -3..3i64, proptest::option::of(-5..5i64))
}

fn build_state(id: String, (stage, queue, offset): (i64, i64, Option<i64>)) -> ItemState {
    let stage = Stage::from_code(stage).unwrap();
    let due = match (stage, offset) {
        (Stage::New, _) | (_, None) => None,
        (_, Some(d)) if d >= 0 => today().checked_add_days(Days::new(d as u64)),
        (_, Some(d)) => today().checked_sub_days(Days::new(d.unsigned_abs())),
    };
    ItemState::synced(
        id,
        stage,
        QueueStatus::from_code(queue),
        due.map(DueDate::Day),
        offset.unwrap_or(0),
    )
}

proptest! {
    #[test]
    fn propagation_equals_union_of_descendants(
        (n, edges) in graph_strategy(10),
        source_idx in proptest::collection::vec(0..10usize, 0..5),
    ) {
        let graph = DagGraph::from_edges(edges.iter());
        let sources: Vec<String> = source_idx
            .into_iter()
            .filter(|&i| i < n)
            .map(|i| format!("n{i}"))
            .collect();

        let blocked = propagate_blocked(&graph, sources.iter().map(|s| s.as_str()));

        let mut expected = BTreeSet::new();
        for s in sources.iter() {
            expected.extend(graph.descendants_of(s));
        }
        prop_assert_eq!(blocked, expected);
    }

    #[test]
    fn single_source_never_marks_itself(
        (n, edges) in graph_strategy(8),
        source in 0..8usize,
    ) {
        let graph = DagGraph::from_edges(edges.iter());
        let source = format!("n{}", source % n);

        let blocked = propagate_blocked(&graph, [source.as_str()]);

        prop_assert!(!blocked.contains(&source));
        for id in blocked.iter() {
            for child in graph.children_of(id) {
                prop_assert!(child == &source || blocked.contains(child));
            }
        }
        for child in graph.children_of(&source) {
            prop_assert!(child == &source || blocked.contains(child));
        }
    }

    #[test]
    fn recompute_twice_yields_identical_rows(
        (n, edges) in graph_strategy(8),
        rows in proptest::collection::vec(state_strategy(), 8),
    ) {
        let states: Vec<ItemState> = rows
            .into_iter()
            .take(n)
            .enumerate()
            .map(|(i, row)| build_state(format!("n{i}"), row))
            .collect();

        let mut store = SqliteStore::open_in_memory().unwrap();
        store.replace_states(&states, &BTreeSet::new()).unwrap();
        store.replace_edges(edges.iter()).unwrap();

        let first = recompute(&mut store, today()).unwrap();
        let rows_first = store.all_states().unwrap();
        let second = recompute(&mut store, today()).unwrap();
        let rows_second = store.all_states().unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(rows_first, rows_second);
    }
}
