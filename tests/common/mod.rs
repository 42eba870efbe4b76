#![allow(dead_code)]

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use deckgraph::store::SqliteStore;
use deckgraph::types::{DueDate, ItemState, QueueStatus, Stage};

pub use deckgraph_test_utils::builders::{CardInfoBuilder, ConfigFileBuilder, LayoutBuilder};
pub use deckgraph_test_utils::fake_scheduler::FakeScheduler;
pub use deckgraph_test_utils::{init_tracing, with_timeout};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// A fixed "today" used across tests.
pub fn today() -> NaiveDate {
    day(2024, 3, 15)
}

/// Epoch whose local calendar date is `date`.
pub fn epoch_on(date: NaiveDate) -> DateTime<Utc> {
    Local
        .from_local_datetime(&date.and_hms_opt(12, 0, 0).expect("valid time"))
        .single()
        .expect("unambiguous local time")
        .with_timezone(&Utc)
}

pub fn new_item(id: &str) -> ItemState {
    ItemState::synced(id, Stage::New, QueueStatus::Active, None, 1)
}

pub fn review_item(id: &str, due: NaiveDate) -> ItemState {
    ItemState::synced(
        id,
        Stage::Review,
        QueueStatus::Active,
        Some(DueDate::Day(due)),
        0,
    )
}

pub fn learning_item(id: &str, due: Option<DateTime<Utc>>) -> ItemState {
    ItemState::synced(
        id,
        Stage::Learning,
        QueueStatus::Active,
        due.map(DueDate::At),
        due.map(|d| d.timestamp()).unwrap_or(0),
    )
}

pub fn suspended(mut state: ItemState) -> ItemState {
    state.queue_status = QueueStatus::Suspended;
    state
}

/// In-memory store seeded with `states` and `edges` (parent, child).
pub fn seeded_store(states: &[ItemState], edges: &[(&str, &str)]) -> SqliteStore {
    let mut store = SqliteStore::open_in_memory().expect("in-memory store");
    store
        .replace_states(states, &Default::default())
        .expect("seed states");
    let edges: Vec<deckgraph::types::Edge> = edges
        .iter()
        .map(|(p, c)| deckgraph::types::Edge::new(*p, *c))
        .collect();
    store.replace_edges(edges.iter()).expect("seed edges");
    store
}

pub fn flags(store: &SqliteStore, id: &str) -> (bool, bool) {
    let state = store
        .get_state(id)
        .expect("query state")
        .unwrap_or_else(|| panic!("no row for {id}"));
    (state.is_blocking, state.is_blocked)
}
