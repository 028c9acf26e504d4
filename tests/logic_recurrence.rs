// File: tests/logic_recurrence.rs
use chrono::NaiveDate;
use odot::model::Todo;
use odot::model::recurrence::next_occurrence;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_daily_next_occurrence() {
    assert_eq!(
        next_occurrence("FREQ=DAILY", date(2023, 1, 1)),
        Some(date(2023, 1, 2))
    );
}

#[test]
fn test_after_is_exclusive() {
    // 2023-01-02 is a Monday; the rule must not return the same day.
    assert_eq!(
        next_occurrence("FREQ=WEEKLY;BYDAY=MO", date(2023, 1, 2)),
        Some(date(2023, 1, 9))
    );
}

#[test]
fn test_byday_from_adjacent_day() {
    // From Sunday, the immediate next Monday wins.
    assert_eq!(
        next_occurrence("FREQ=WEEKLY;BYDAY=MO", date(2023, 1, 1)),
        Some(date(2023, 1, 2))
    );
}

#[test]
fn test_custom_interval() {
    assert_eq!(
        next_occurrence("FREQ=DAILY;INTERVAL=3", date(2023, 1, 1)),
        Some(date(2023, 1, 4))
    );
}

#[test]
fn test_monthly_next_occurrence() {
    assert_eq!(
        next_occurrence("FREQ=MONTHLY", date(2023, 2, 1)),
        Some(date(2023, 3, 1))
    );
}

#[test]
fn test_exhausted_count_ends_series() {
    // COUNT=1 covers only the seed occurrence, nothing strictly after it.
    assert_eq!(next_occurrence("FREQ=DAILY;COUNT=1", date(2023, 1, 1)), None);
}

#[test]
fn test_past_until_ends_series() {
    assert_eq!(
        next_occurrence("FREQ=DAILY;UNTIL=20230101T000000Z", date(2023, 1, 1)),
        None
    );
}

#[test]
fn test_date_only_until_is_upgraded() {
    // Hand-edited rules may carry a date-only UNTIL; it must still evaluate.
    assert_eq!(
        next_occurrence("FREQ=DAILY;UNTIL=20230102", date(2023, 1, 1)),
        Some(date(2023, 1, 2))
    );
}

#[test]
fn test_rrule_prefix_is_tolerated() {
    assert_eq!(
        next_occurrence("RRULE:FREQ=DAILY", date(2023, 1, 1)),
        Some(date(2023, 1, 2))
    );
}

#[test]
fn test_invalid_rule_yields_none() {
    assert_eq!(next_occurrence("garbage", date(2023, 1, 1)), None);
    assert_eq!(next_occurrence("", date(2023, 1, 1)), None);
}

#[test]
fn test_next_occurrence_todo() {
    let mut todo = Todo::new("Water plants", 1.0);
    todo.notes = Some("the ficus too".to_string());
    todo.project_id = Some("p1".to_string());
    todo.when_date = Some(date(2023, 1, 2)); // Monday
    todo.recurrence_rule = Some("FREQ=WEEKLY".to_string());
    todo.set_completed(true);

    let next = todo.next_occurrence_todo(date(2023, 1, 2)).unwrap();
    assert_ne!(next.id, todo.id);
    assert_eq!(next.title, "Water plants");
    assert_eq!(next.notes.as_deref(), Some("the ficus too"));
    assert_eq!(next.project_id.as_deref(), Some("p1"));
    assert_eq!(next.when_date, Some(date(2023, 1, 9)));
    assert_eq!(
        next.recurrence_rule.as_deref(),
        Some("FREQ=WEEKLY")
    );
    assert!(!next.is_completed);
    assert!(next.completed_at.is_none());
}

#[test]
fn test_next_occurrence_todo_without_schedule_uses_today() {
    let mut todo = Todo::new("Review inbox", 0.0);
    todo.recurrence_rule = Some("FREQ=DAILY".to_string());

    let next = todo.next_occurrence_todo(date(2023, 6, 14)).unwrap();
    assert_eq!(next.when_date, Some(date(2023, 6, 15)));
}

#[test]
fn test_next_occurrence_todo_requires_rule() {
    let mut todo = Todo::new("One-off", 0.0);
    todo.when_date = Some(date(2023, 1, 2));
    assert!(todo.next_occurrence_todo(date(2023, 1, 2)).is_none());

    todo.recurrence_rule = Some("not a rule".to_string());
    assert!(todo.next_occurrence_todo(date(2023, 1, 2)).is_none());
}
