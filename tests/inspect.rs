mod common;

use chrono::{Duration, Local, TimeZone, Utc};
use common::{CardInfoBuilder, day, epoch_on};
use deckgraph::inspect::{Inspection, describe_due};
use deckgraph::types::{DueDate, QueueStatus, Stage};

fn noon(d: chrono::NaiveDate) -> chrono::DateTime<Local> {
    Local
        .from_local_datetime(&d.and_hms_opt(12, 0, 0).unwrap())
        .single()
        .unwrap()
}

#[test]
fn review_descriptions_are_relative_to_today() {
    let now = noon(day(2024, 3, 15));

    let overdue = describe_due(
        Some(Stage::Review),
        0,
        Some(DueDate::Day(day(2024, 3, 12))),
        true,
        now,
    );
    assert_eq!(overdue, "2024-03-12: overdue by 3 days");

    let today = describe_due(
        Some(Stage::Review),
        0,
        Some(DueDate::Day(day(2024, 3, 15))),
        true,
        now,
    );
    assert_eq!(today, "2024-03-15: due today");

    let later = describe_due(
        Some(Stage::Review),
        0,
        Some(DueDate::Day(day(2024, 3, 20))),
        true,
        now,
    );
    assert_eq!(later, "2024-03-20: due in 5 days");
}

#[test]
fn review_without_epoch_explains_why() {
    let summary = describe_due(Some(Stage::Review), 812, None, false, Local::now());
    assert_eq!(
        summary,
        "cannot compute without the collection epoch (raw due = day 812)"
    );
}

#[test]
fn learning_descriptions_use_minutes_and_hours() {
    let now = Local::now();
    let in_ten_minutes = now.with_timezone(&Utc) + Duration::seconds(10 * 60 + 30);
    let in_three_hours = now.with_timezone(&Utc) + Duration::seconds(3 * 3600 + 30);
    let earlier = now.with_timezone(&Utc) - Duration::minutes(5);

    let s = describe_due(
        Some(Stage::Learning),
        in_ten_minutes.timestamp(),
        Some(DueDate::At(in_ten_minutes)),
        false,
        now,
    );
    assert!(s.ends_with("due in 10 minutes"), "{s}");

    let s = describe_due(
        Some(Stage::Relearning),
        in_three_hours.timestamp(),
        Some(DueDate::At(in_three_hours)),
        false,
        now,
    );
    assert!(s.ends_with("due in 3 hours"), "{s}");

    let s = describe_due(
        Some(Stage::Learning),
        earlier.timestamp(),
        Some(DueDate::At(earlier)),
        false,
        now,
    );
    assert!(s.ends_with("overdue"), "{s}");
}

#[test]
fn other_cases() {
    let now = Local::now();
    assert_eq!(
        describe_due(Some(Stage::New), 3, None, true, now),
        "new, not yet studied"
    );
    assert_eq!(describe_due(None, 3, None, true, now), "unknown stage");
    assert_eq!(
        describe_due(Some(Stage::Learning), i64::MAX, None, true, now),
        "invalid due value 9223372036854775807"
    );
}

#[test]
fn inspection_combines_card_and_classification() {
    let card = CardInfoBuilder::review(9, 2).queue(-2).build();
    let now = noon(day(2024, 3, 15));

    let inspection = Inspection::new(card.clone(), Some(epoch_on(day(2024, 3, 10))), now);

    assert_eq!(inspection.card, card);
    assert_eq!(inspection.stage, Some(Stage::Review));
    assert_eq!(inspection.queue_status, QueueStatus::SchedulerSuspended);
    assert_eq!(inspection.due_date, Some(DueDate::Day(day(2024, 3, 12))));
    assert_eq!(inspection.summary, "2024-03-12: overdue by 3 days");
}
