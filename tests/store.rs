mod common;

use std::collections::BTreeSet;

use chrono::{TimeZone, Utc};
use common::{day, new_item, review_item};
use deckgraph::store::SqliteStore;
use deckgraph::types::{DueDate, Edge, ItemState, QueueStatus, Stage};

#[test]
fn state_rows_round_trip_through_sqlite() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let at = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
    let rows = vec![
        review_item("r", day(2024, 3, 10)),
        ItemState::synced(
            "l",
            Stage::Relearning,
            QueueStatus::SchedulerSuspended,
            Some(DueDate::At(at)),
            at.timestamp(),
        ),
        new_item("n"),
    ];

    store.replace_states(&rows, &BTreeSet::new()).unwrap();

    let loaded = store.all_states().unwrap();
    let ids: Vec<&str> = loaded.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["l", "n", "r"]);
    assert_eq!(store.get_state("l").unwrap().unwrap(), rows[1]);
    assert_eq!(store.get_state("r").unwrap().unwrap(), rows[0]);
    assert!(store.get_state("nope").unwrap().is_none());
    assert_eq!(store.item_count().unwrap(), 3);
}

#[test]
fn replace_states_drops_rows_not_kept() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store
        .replace_states(&[new_item("a"), new_item("b"), new_item("c")], &BTreeSet::new())
        .unwrap();
    store
        .write_blocking_flags(&[("b".to_string(), true)])
        .unwrap();

    let keep: BTreeSet<String> = ["b".to_string()].into_iter().collect();
    store
        .replace_states(&[review_item("d", day(2024, 1, 1))], &keep)
        .unwrap();

    let ids: Vec<String> = store.all_states().unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["b".to_string(), "d".to_string()]);
    // kept rows survive verbatim, flags included
    assert!(store.get_state("b").unwrap().unwrap().is_blocking);
}

#[test]
fn upsert_updates_scheduling_fields_but_keeps_flags() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store
        .replace_states(&[new_item("a"), new_item("b")], &BTreeSet::new())
        .unwrap();
    store
        .write_blocking_flags(&[("a".to_string(), true), ("b".to_string(), true)])
        .unwrap();
    let blocked: BTreeSet<String> = ["a".to_string()].into_iter().collect();
    store.write_blocked_flags(&blocked).unwrap();

    store.upsert_state(&review_item("a", day(2030, 1, 1))).unwrap();

    let a = store.get_state("a").unwrap().unwrap();
    assert_eq!(a.stage, Stage::Review);
    assert_eq!(a.due_date, Some(DueDate::Day(day(2030, 1, 1))));
    assert!(a.is_blocking);
    assert!(a.is_blocked);

    let b = store.get_state("b").unwrap().unwrap();
    assert_eq!(b.stage, Stage::New);
    assert!(b.is_blocking);
}

#[test]
fn upsert_inserts_with_cleared_flags() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let mut state = new_item("fresh");
    state.is_blocking = true;

    store.upsert_state(&state).unwrap();

    let row = store.get_state("fresh").unwrap().unwrap();
    assert!(!row.is_blocking);
    assert!(!row.is_blocked);
}

#[test]
fn write_blocked_flags_resets_previous_marks() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store
        .replace_states(&[new_item("a"), new_item("b")], &BTreeSet::new())
        .unwrap();

    store
        .write_blocked_flags(&["a".to_string()].into_iter().collect())
        .unwrap();
    store
        .write_blocked_flags(&["b".to_string(), "ghost".to_string()].into_iter().collect())
        .unwrap();

    assert!(!store.get_state("a").unwrap().unwrap().is_blocked);
    assert!(store.get_state("b").unwrap().unwrap().is_blocked);
    assert_eq!(store.item_count().unwrap(), 2);
}

#[test]
fn edges_are_deduplicated_and_ordered() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let edges = vec![
        Edge::new("b", "c"),
        Edge::new("a", "b"),
        Edge::new("a", "b"),
    ];

    let inserted = store.replace_edges(edges.iter()).unwrap();

    assert_eq!(inserted, 2);
    assert_eq!(
        store.edges().unwrap(),
        vec![Edge::new("a", "b"), Edge::new("b", "c")]
    );
}

#[test]
fn create_discards_existing_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("graph.db");

    {
        let mut store = SqliteStore::create(&path).unwrap();
        store
            .replace_states(&[new_item("old")], &BTreeSet::new())
            .unwrap();
    }
    {
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.item_count().unwrap(), 1);
    }

    let store = SqliteStore::create(&path).unwrap();
    assert_eq!(store.item_count().unwrap(), 0);
}
