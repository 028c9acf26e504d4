// File: tests/quick_add_tests.rs
use chrono::NaiveDate;
use odot::model::quick_add::{
    DateFormat, EntityRef, Schedule, parse_quick_add_on,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// A fixed Wednesday keeps every relative date deterministic.
fn wednesday() -> NaiveDate {
    date(2023, 6, 14)
}

fn groceries() -> Vec<EntityRef> {
    vec![EntityRef::new("p1", "Groceries")]
}

fn errand() -> Vec<EntityRef> {
    vec![EntityRef::new("t1", "errand")]
}

#[test]
fn test_full_precedence_line() {
    let parsed = parse_quick_add_on(
        wednesday(),
        "Buy milk !tomorrow ^friday @Groceries #errand",
        &groceries(),
        &errand(),
        DateFormat::DayFirst,
    );

    assert_eq!(parsed.title, "Buy milk");
    assert_eq!(parsed.schedule, Schedule::Date(date(2023, 6, 15)));
    assert_eq!(parsed.deadline, Some(date(2023, 6, 16)));
    assert_eq!(parsed.project.as_ref().map(|p| p.id.as_str()), Some("p1"));
    assert_eq!(parsed.tags.len(), 1);
    assert_eq!(parsed.tags[0].id, "t1");
}

#[test]
fn test_unknown_project_stays_in_title() {
    let parsed = parse_quick_add_on(
        wednesday(),
        "Buy milk !tomorrow ^friday @Groceries #errand",
        &[], // no projects known
        &errand(),
        DateFormat::DayFirst,
    );

    assert_eq!(parsed.title, "Buy milk @Groceries");
    assert!(parsed.project.is_none());
    assert_eq!(parsed.schedule, Schedule::Date(date(2023, 6, 15)));
}

#[test]
fn test_multi_tag_collection_with_dedup() {
    let tags = vec![EntityRef::new("ta", "a"), EntityRef::new("tb", "b")];
    let parsed = parse_quick_add_on(
        wednesday(),
        "Task #a #b #a",
        &[],
        &tags,
        DateFormat::DayFirst,
    );

    assert_eq!(parsed.title, "Task");
    let ids: Vec<&str> = parsed.tags.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["ta", "tb"]);
}

#[test]
fn test_unknown_tag_stays_literal() {
    let parsed = parse_quick_add_on(
        wednesday(),
        "Task #known #mystery",
        &[],
        &[EntityRef::new("tk", "known")],
        DateFormat::DayFirst,
    );
    assert_eq!(parsed.title, "Task #mystery");
    assert_eq!(parsed.tags.len(), 1);
}

#[test]
fn test_quoted_multi_word_names() {
    let projects = vec![EntityRef::new("p9", "Home Renovation")];
    let tags = vec![EntityRef::new("t9", "deep work")];
    let parsed = parse_quick_add_on(
        wednesday(),
        "Paint hall @\"home renovation\" #\"Deep Work\"",
        &projects,
        &tags,
        DateFormat::DayFirst,
    );

    assert_eq!(parsed.title, "Paint hall");
    assert_eq!(parsed.project.as_ref().map(|p| p.id.as_str()), Some("p9"));
    assert_eq!(parsed.tags[0].id, "t9");
}

#[test]
fn test_schedule_keywords() {
    let today = wednesday();
    let cases = [
        ("!today", Schedule::Date(today)),
        ("!tomorrow", Schedule::Date(date(2023, 6, 15))),
        ("!weekend", Schedule::Date(date(2023, 6, 17))), // Saturday
        ("!nextweek", Schedule::Date(date(2023, 6, 19))), // Monday
        ("!someday", Schedule::Someday),
        ("!tonight", Schedule::Evening(today)),
        ("!evening", Schedule::Evening(today)),
        ("!2023-12-25", Schedule::Date(date(2023, 12, 25))),
    ];
    for (input, expected) in cases {
        let parsed = parse_quick_add_on(today, input, &[], &[], DateFormat::DayFirst);
        assert_eq!(parsed.schedule, expected, "input: {}", input);
        assert_eq!(parsed.title, "", "input: {}", input);
    }
}

#[test]
fn test_unrecognized_schedule_token_is_skipped() {
    // The scan keeps going past !asap and still finds !tomorrow.
    let parsed = parse_quick_add_on(
        wednesday(),
        "Ship !asap release !tomorrow",
        &[],
        &[],
        DateFormat::DayFirst,
    );
    assert_eq!(parsed.schedule, Schedule::Date(date(2023, 6, 15)));
    assert_eq!(parsed.title, "Ship !asap release");
}

#[test]
fn test_only_first_schedule_token_wins() {
    let parsed = parse_quick_add_on(
        wednesday(),
        "Call !today !tomorrow",
        &[],
        &[],
        DateFormat::DayFirst,
    );
    assert_eq!(parsed.schedule, Schedule::Date(wednesday()));
    assert_eq!(parsed.title, "Call !tomorrow");
}

#[test]
fn test_deadline_weekday_excludes_today() {
    // Today is Wednesday, so ^wednesday advances a full week.
    let parsed = parse_quick_add_on(
        wednesday(),
        "Report ^wednesday",
        &[],
        &[],
        DateFormat::DayFirst,
    );
    assert_eq!(parsed.deadline, Some(date(2023, 6, 21)));
}

#[test]
fn test_deadline_keywords() {
    let today = wednesday();
    let cases = [
        ("^today", date(2023, 6, 14)),
        ("^tomorrow", date(2023, 6, 15)),
        ("^sunday", date(2023, 6, 18)),
        ("^2023-08-01", date(2023, 8, 1)),
        ("^1.12.", date(2023, 12, 1)), // dot-terminated short date
    ];
    for (input, expected) in cases {
        let parsed = parse_quick_add_on(today, input, &[], &[], DateFormat::DayFirst);
        assert_eq!(parsed.deadline, Some(expected), "input: {}", input);
    }
}

#[test]
fn test_short_date_day_first() {
    let parsed = parse_quick_add_on(wednesday(), "Taxes !15.3", &[], &[], DateFormat::DayFirst);
    assert_eq!(parsed.schedule, Schedule::Date(date(2023, 3, 15)));
    assert_eq!(parsed.title, "Taxes");
}

#[test]
fn test_short_date_month_first_rejects_month_15() {
    // Month 15 does not exist, so the token stays literal text.
    let parsed = parse_quick_add_on(wednesday(), "Taxes !15.3", &[], &[], DateFormat::MonthFirst);
    assert_eq!(parsed.schedule, Schedule::None);
    assert_eq!(parsed.title, "Taxes !15.3");
}

#[test]
fn test_short_date_month_first_order() {
    let parsed = parse_quick_add_on(wednesday(), "Trip !3-15", &[], &[], DateFormat::MonthFirst);
    assert_eq!(parsed.schedule, Schedule::Date(date(2023, 3, 15)));
}

#[test]
fn test_unpadded_iso_is_not_a_date() {
    let parsed = parse_quick_add_on(wednesday(), "!2023-1-1", &[], &[], DateFormat::DayFirst);
    assert_eq!(parsed.schedule, Schedule::None);
    assert_eq!(parsed.title, "!2023-1-1");
}

#[test]
fn test_title_whitespace_is_collapsed() {
    let parsed = parse_quick_add_on(
        wednesday(),
        "  Buy   milk   !tomorrow  ",
        &[],
        &[],
        DateFormat::DayFirst,
    );
    assert_eq!(parsed.title, "Buy milk");
}

#[test]
fn test_empty_title_is_allowed() {
    let parsed = parse_quick_add_on(wednesday(), "!today", &[], &[], DateFormat::DayFirst);
    assert_eq!(parsed.title, "");
    assert_eq!(parsed.schedule, Schedule::Date(wednesday()));
}

#[test]
fn test_into_todo_materializes_fields() {
    let projects = vec![EntityRef::new("p1", "Groceries")];
    let tags = vec![EntityRef::new("t1", "errand")];
    let parsed = parse_quick_add_on(
        wednesday(),
        "Buy milk !tonight ^friday @Groceries #errand",
        &projects,
        &tags,
        DateFormat::DayFirst,
    );

    let (todo, todo_tags) = parsed.into_todo(3.0);
    assert_eq!(todo.title, "Buy milk");
    assert_eq!(todo.when_date, Some(wednesday()));
    assert!(todo.when_evening);
    assert!(!todo.when_someday);
    assert_eq!(todo.deadline, Some(date(2023, 6, 16)));
    assert_eq!(todo.project_id.as_deref(), Some("p1"));
    assert_eq!(todo.position, 3.0);
    assert_eq!(todo_tags.len(), 1);
    assert_eq!(todo_tags[0].todo_id, todo.id);
    assert_eq!(todo_tags[0].tag_id, "t1");
}

#[test]
fn test_into_todo_someday() {
    let parsed = parse_quick_add_on(wednesday(), "Learn oboe !someday", &[], &[], DateFormat::DayFirst);
    let (todo, _) = parsed.into_todo(0.0);
    assert!(todo.when_someday);
    assert!(todo.when_date.is_none());
}
