mod common;

use chrono::{Days, Duration, Utc};
use common::{
    flags, init_tracing, learning_item, new_item, review_item, seeded_store, suspended, today,
};
use deckgraph::blocking::{is_blocking, recompute};
use deckgraph::query::{blocking_ids, due_items};
use deckgraph::types::{QueueStatus, Stage};

#[test]
fn new_items_are_always_ready() {
    assert!(is_blocking(&new_item("n"), today()));
}

#[test]
fn review_items_block_on_or_after_their_due_date() {
    let t = today();
    assert!(is_blocking(&review_item("past", t - Days::new(3)), t));
    assert!(is_blocking(&review_item("today", t), t));
    assert!(!is_blocking(&review_item("future", t + Days::new(1)), t));
}

#[test]
fn unknown_due_date_counts_as_due() {
    let mut state = review_item("r", today());
    state.due_date = None;
    assert!(is_blocking(&state, today()));
    assert!(is_blocking(&learning_item("l", None), today()));
}

#[test]
fn suspension_overrides_every_stage() {
    let t = today();
    for status in [
        QueueStatus::Suspended,
        QueueStatus::SchedulerSuspended,
        QueueStatus::UserSuspended,
    ] {
        let mut n = new_item("n");
        n.queue_status = status;
        assert!(!is_blocking(&n, t), "{status:?} new item");

        let mut r = review_item("r", t - Days::new(1));
        r.queue_status = status;
        assert!(!is_blocking(&r, t), "{status:?} review item");
    }
}

#[test]
fn learning_items_use_their_local_date() {
    let past = Utc::now() - Duration::days(2);
    let future = Utc::now() + Duration::days(2);
    let t = chrono::Local::now().date_naive();

    assert!(is_blocking(&learning_item("l1", Some(past)), t));
    assert!(!is_blocking(&learning_item("l2", Some(future)), t));
}

#[test]
fn blocking_item_locks_all_descendants() {
    init_tracing();

    let t = today();
    let mut store = seeded_store(
        &[
            new_item("a"),
            review_item("b", t + Days::new(10)),
            review_item("c", t + Days::new(10)),
            review_item("d", t + Days::new(10)),
        ],
        &[("a", "b"), ("b", "c"), ("x", "d")],
    );

    let outcome = recompute(&mut store, t).unwrap();

    assert_eq!(outcome.items, 4);
    assert_eq!(outcome.blocking, 1);
    assert_eq!(outcome.blocked, 2);
    assert_eq!(flags(&store, "a"), (true, false));
    assert_eq!(flags(&store, "b"), (false, true));
    assert_eq!(flags(&store, "c"), (false, true));
    // "x" has no row, so it does not lock "d"
    assert_eq!(flags(&store, "d"), (false, false));
}

#[test]
fn blocked_item_that_is_itself_ready_still_propagates() {
    let t = today();
    let mut store = seeded_store(
        &[
            new_item("a"),
            new_item("b"),
            review_item("c", t + Days::new(5)),
        ],
        &[("a", "b"), ("b", "c")],
    );

    recompute(&mut store, t).unwrap();

    assert_eq!(flags(&store, "b"), (true, true));
    assert_eq!(flags(&store, "c"), (false, true));
}

#[test]
fn suspended_items_neither_block_nor_get_skipped_when_locked() {
    let t = today();
    let mut store = seeded_store(
        &[
            suspended(new_item("a")),
            suspended(review_item("b", t)),
            new_item("c"),
        ],
        &[("a", "b"), ("c", "a")],
    );

    recompute(&mut store, t).unwrap();

    assert_eq!(flags(&store, "a"), (false, true));
    assert_eq!(flags(&store, "b"), (false, true));
    assert_eq!(flags(&store, "c"), (true, false));
}

#[test]
fn recompute_is_idempotent() {
    let t = today();
    let mut store = seeded_store(
        &[new_item("a"), new_item("b"), review_item("c", t)],
        &[("a", "b"), ("c", "b")],
    );

    let first = recompute(&mut store, t).unwrap();
    let rows_first = store.all_states().unwrap();
    let second = recompute(&mut store, t).unwrap();
    let rows_second = store.all_states().unwrap();

    assert_eq!(first, second);
    assert_eq!(rows_first, rows_second);
}

#[test]
fn stale_blocked_flags_are_cleared() {
    let t = today();
    let mut store = seeded_store(
        &[new_item("a"), review_item("b", t + Days::new(3))],
        &[("a", "b")],
    );
    recompute(&mut store, t).unwrap();
    assert_eq!(flags(&store, "b"), (false, true));

    // "a" gets reviewed and moves into the future
    store.upsert_state(&review_item("a", t + Days::new(7))).unwrap();
    recompute(&mut store, t).unwrap();

    assert_eq!(flags(&store, "a"), (false, false));
    assert_eq!(flags(&store, "b"), (false, false));
}

#[test]
fn diamond_marks_shared_descendant_once() {
    let t = today();
    let mut store = seeded_store(
        &[
            new_item("top"),
            new_item("left"),
            new_item("right"),
            review_item("bottom", t + Days::new(1)),
        ],
        &[
            ("top", "left"),
            ("top", "right"),
            ("left", "bottom"),
            ("right", "bottom"),
        ],
    );

    let outcome = recompute(&mut store, t).unwrap();

    assert_eq!(outcome.blocked, 3);
    assert_eq!(flags(&store, "top"), (true, false));
    assert_eq!(flags(&store, "bottom"), (false, true));
}

#[test]
fn cycle_terminates_without_locking_its_source() {
    init_tracing();

    let t = today();
    let mut store = seeded_store(
        &[
            new_item("a"),
            review_item("b", t + Days::new(2)),
            review_item("c", t + Days::new(2)),
        ],
        &[("a", "b"), ("b", "a"), ("b", "c")],
    );

    let outcome = recompute(&mut store, t).unwrap();

    assert_eq!(outcome.blocked, 2);
    assert_eq!(flags(&store, "a"), (true, false));
    assert_eq!(flags(&store, "b"), (false, true));
    assert_eq!(flags(&store, "c"), (false, true));
}

#[test]
fn only_ready_item_on_cycle_stays_actionable() {
    let t = today();
    let mut store = seeded_store(
        &[new_item("a"), suspended(review_item("b", t))],
        &[("a", "b"), ("b", "a")],
    );

    recompute(&mut store, t).unwrap();

    assert_eq!(flags(&store, "a"), (true, false));
    assert_eq!(flags(&store, "b"), (false, true));
    assert_eq!(blocking_ids(&store).unwrap(), vec!["a".to_string()]);
    let due: Vec<String> = due_items(&store, t).unwrap().into_iter().map(|d| d.id).collect();
    assert_eq!(due, vec!["a".to_string()]);
}

#[test]
fn ready_items_on_a_cycle_lock_each_other() {
    let t = today();
    let mut store = seeded_store(
        &[new_item("a"), new_item("b"), review_item("c", t + Days::new(1))],
        &[("a", "b"), ("b", "a"), ("b", "c")],
    );

    let outcome = recompute(&mut store, t).unwrap();

    assert_eq!(outcome.blocked, 3);
    assert_eq!(flags(&store, "a"), (true, true));
    assert_eq!(flags(&store, "b"), (true, true));
    assert_eq!(flags(&store, "c"), (false, true));
}

#[test]
fn empty_store_recomputes_to_nothing() {
    let mut store = seeded_store(&[], &[("a", "b")]);

    let outcome = recompute(&mut store, today()).unwrap();

    assert_eq!(outcome.items, 0);
    assert_eq!(outcome.blocking, 0);
    assert_eq!(outcome.blocked, 0);
}

#[test]
fn relearning_item_due_today_is_ready() {
    let t = chrono::Local::now().date_naive();
    let mut state = learning_item("r", Some(Utc::now()));
    state.stage = Stage::Relearning;
    assert!(is_blocking(&state, t));
}
