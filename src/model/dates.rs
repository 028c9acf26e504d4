// File: ./src/model/dates.rs
// Small calendar helpers shared by the quick-add parser and the view
// filters. Each helper has an `_on(today)` form taking the reference date
// explicitly; the bare form reads the local date.
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn yesterday() -> NaiveDate {
    today() - Duration::days(1)
}

pub fn tomorrow() -> NaiveDate {
    tomorrow_on(today())
}

pub fn tomorrow_on(today: NaiveDate) -> NaiveDate {
    today + Duration::days(1)
}

pub fn this_weekend() -> NaiveDate {
    this_weekend_on(today())
}

/// Upcoming Saturday. Saturday itself already counts as the weekend;
/// Sunday rolls over to the next one.
pub fn this_weekend_on(today: NaiveDate) -> NaiveDate {
    let days_until_sat = match today.weekday() {
        Weekday::Sun => 6,
        wd => 6 - wd.num_days_from_sunday() as i64,
    };
    today + Duration::days(days_until_sat)
}

pub fn next_week() -> NaiveDate {
    next_week_on(today())
}

/// Upcoming Monday, always at least one day out.
pub fn next_week_on(today: NaiveDate) -> NaiveDate {
    let days_until_mon = match today.weekday() {
        Weekday::Sun => 1,
        wd => 8 - wd.num_days_from_sunday() as i64,
    };
    today + Duration::days(days_until_mon)
}

pub fn next_weekday(target: Weekday) -> NaiveDate {
    next_weekday_on(today(), target)
}

/// Next future occurrence of `target`, today excluded. If today is that
/// weekday the result is a full week out.
pub fn next_weekday_on(today: NaiveDate, target: Weekday) -> NaiveDate {
    let mut d = today + Duration::days(1);
    while d.weekday() != target {
        d += Duration::days(1);
    }
    d
}

pub fn is_overdue(date: NaiveDate) -> bool {
    is_overdue_on(today(), date)
}

pub fn is_overdue_on(today: NaiveDate, date: NaiveDate) -> bool {
    date < today
}

pub fn format_date_label(date: NaiveDate) -> String {
    format_date_label_on(today(), date)
}

/// Long label for list group headers ("Today", "Friday, March 14").
pub fn format_date_label_on(today: NaiveDate, date: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }
    if date == today - Duration::days(1) {
        return "Yesterday".to_string();
    }
    if date == today + Duration::days(1) {
        return "Tomorrow".to_string();
    }
    date.format("%A, %B %-d").to_string()
}

pub fn format_date_short(date: NaiveDate, evening: bool) -> String {
    format_date_short_on(today(), date, evening)
}

/// Compact label for todo rows ("This Evening", "Mar 14").
pub fn format_date_short_on(today: NaiveDate, date: NaiveDate, evening: bool) -> String {
    if date == today && evening {
        return "This Evening".to_string();
    }
    if date == today {
        return "Today".to_string();
    }
    if date == today + Duration::days(1) {
        return "Tomorrow".to_string();
    }
    date.format("%b %-d").to_string()
}
