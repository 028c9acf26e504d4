// File: ./src/model/quick_add.rs
// Quick-add micro-syntax: one line of free text carrying inline schedule
// (!tomorrow), deadline (^friday), project (@"Home Renovation") and tag
// (#errand) tokens around the task title.
//
// Categories run in a fixed order (schedule, deadline, project, tags) and
// each removes its matched span from a working copy of the input before the
// next category scans. Schedule, deadline and project honor only their
// first recognized token; tags collect every match. Anything unrecognized
// stays verbatim in the title.
use crate::model::dates;
use crate::model::item::{Todo, TodoTag};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Order of the day and month fields in short date tokens like `15.3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateFormat {
    #[default]
    DayFirst,
    MonthFirst,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Schedule {
    #[default]
    None,
    Date(NaiveDate),
    Someday,
    Evening(NaiveDate),
}

/// A resolved reference to a known project or tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    pub id: String,
    pub name: String,
}

impl EntityRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedQuickAdd {
    pub title: String,
    pub project: Option<EntityRef>,
    pub tags: Vec<EntityRef>,
    pub schedule: Schedule,
    pub deadline: Option<NaiveDate>,
}

impl ParsedQuickAdd {
    /// Materializes the parsed line as a new todo plus its tag join rows.
    pub fn into_todo(self, position: f64) -> (Todo, Vec<TodoTag>) {
        let mut todo = Todo::new(self.title, position);
        match self.schedule {
            Schedule::Date(d) => todo.when_date = Some(d),
            Schedule::Evening(d) => {
                todo.when_date = Some(d);
                todo.when_evening = true;
            }
            Schedule::Someday => todo.when_someday = true,
            Schedule::None => {}
        }
        todo.deadline = self.deadline;
        todo.project_id = self.project.map(|p| p.id);

        let todo_tags = self
            .tags
            .into_iter()
            .map(|t| TodoTag::new(&todo.id, &t.id))
            .collect();
        (todo, todo_tags)
    }
}

/// One sigil token found in the working text. `start..end` spans the sigil
/// and the word (including quotes for quoted forms), as byte offsets.
struct SigilToken {
    start: usize,
    end: usize,
    word: String,
}

fn scan_sigil_tokens(text: &str, sigil: char, allow_quoted: bool) -> Vec<SigilToken> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(rel) = text[pos..].find(sigil) {
        let start = pos + rel;
        let after = start + sigil.len_utf8();
        let rest = &text[after..];

        if allow_quoted && rest.starts_with('"') {
            if let Some(close) = rest[1..].find('"') {
                let word = rest[1..1 + close].to_string();
                let end = after + 2 + close;
                if !word.is_empty() {
                    tokens.push(SigilToken { start, end, word });
                }
                pos = end;
                continue;
            }
            // Unterminated quote: fall through to the unquoted form.
        }

        let word_len = rest
            .find(char::is_whitespace)
            .unwrap_or(rest.len());
        if word_len == 0 {
            pos = after;
            continue;
        }
        tokens.push(SigilToken {
            start,
            end: after + word_len,
            word: rest[..word_len].to_string(),
        });
        pos = after + word_len;
    }

    tokens
}

/// Strict YYYY-MM-DD; chrono alone would also accept unpadded fields.
fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let b = s.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Locale short dates: `D.M`, `D-M` (or month-first), optional trailing
/// dot, year defaulted to the current one. Out-of-range values (month 15 in
/// month-first mode) fail the from_ymd_opt check and stay literal text.
fn parse_short_date(word: &str, date_format: DateFormat, year: i32) -> Option<NaiveDate> {
    let trimmed = word.strip_suffix('.').unwrap_or(word);
    let (a, b) = trimmed.split_once(['.', '-'])?;
    if a.is_empty() || a.len() > 2 || b.is_empty() || b.len() > 2 {
        return None;
    }
    if !a.bytes().all(|c| c.is_ascii_digit()) || !b.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let first: u32 = a.parse().ok()?;
    let second: u32 = b.parse().ok()?;
    let (day, month) = match date_format {
        DateFormat::DayFirst => (first, second),
        DateFormat::MonthFirst => (second, first),
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn weekday_from_name(s: &str) -> Option<Weekday> {
    match s {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn parse_schedule_keyword(
    word: &str,
    date_format: DateFormat,
    today: NaiveDate,
) -> Option<Schedule> {
    let lower = word.to_lowercase();
    match lower.as_str() {
        "tonight" | "evening" => return Some(Schedule::Evening(today)),
        "today" => return Some(Schedule::Date(today)),
        "tomorrow" => return Some(Schedule::Date(dates::tomorrow_on(today))),
        "weekend" => return Some(Schedule::Date(dates::this_weekend_on(today))),
        "nextweek" => return Some(Schedule::Date(dates::next_week_on(today))),
        "someday" => return Some(Schedule::Someday),
        _ => {}
    }
    if let Some(d) = parse_iso_date(&lower) {
        return Some(Schedule::Date(d));
    }
    parse_short_date(word, date_format, today.year()).map(Schedule::Date)
}

fn parse_deadline_keyword(
    word: &str,
    date_format: DateFormat,
    today: NaiveDate,
) -> Option<NaiveDate> {
    let lower = word.to_lowercase();
    match lower.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(dates::tomorrow_on(today)),
        _ => {}
    }
    if let Some(wd) = weekday_from_name(&lower) {
        return Some(dates::next_weekday_on(today, wd));
    }
    if let Some(d) = parse_iso_date(&lower) {
        return Some(d);
    }
    parse_short_date(word, date_format, today.year())
}

fn find_by_name<'a>(items: &'a [EntityRef], name: &str) -> Option<&'a EntityRef> {
    let lower = name.to_lowercase();
    items.iter().find(|i| i.name.to_lowercase() == lower)
}

/// Parses one quick-add line against the caller's current project and tag
/// lists, resolving dates relative to the local date.
pub fn parse_quick_add(
    input: &str,
    projects: &[EntityRef],
    tags: &[EntityRef],
    date_format: DateFormat,
) -> ParsedQuickAdd {
    parse_quick_add_on(dates::today(), input, projects, tags, date_format)
}

/// Same as [`parse_quick_add`] but with the reference date made explicit,
/// which keeps the whole parse a pure function of its arguments.
pub fn parse_quick_add_on(
    today: NaiveDate,
    input: &str,
    projects: &[EntityRef],
    tags: &[EntityRef],
    date_format: DateFormat,
) -> ParsedQuickAdd {
    let mut text = input.to_string();
    let mut result = ParsedQuickAdd::default();

    // 1. Schedule: first recognized !keyword wins, the rest stay literal.
    for tok in scan_sigil_tokens(&text, '!', false) {
        if let Some(schedule) = parse_schedule_keyword(&tok.word, date_format, today) {
            result.schedule = schedule;
            text.replace_range(tok.start..tok.end, "");
            break;
        }
    }

    // 2. Deadline: first recognized ^keyword wins.
    for tok in scan_sigil_tokens(&text, '^', false) {
        if let Some(deadline) = parse_deadline_keyword(&tok.word, date_format, today) {
            result.deadline = Some(deadline);
            text.replace_range(tok.start..tok.end, "");
            break;
        }
    }

    // 3. Project: first @token naming a known project wins.
    for tok in scan_sigil_tokens(&text, '@', true) {
        if let Some(project) = find_by_name(projects, &tok.word) {
            result.project = Some(project.clone());
            text.replace_range(tok.start..tok.end, "");
            break;
        }
    }

    // 4. Tags: every #token naming a known tag is collected (deduplicated
    // by id) and removed. Removal runs back-to-front so that earlier match
    // offsets stay valid.
    let mut removals: Vec<(usize, usize)> = Vec::new();
    for tok in scan_sigil_tokens(&text, '#', true) {
        if let Some(tag) = find_by_name(tags, &tok.word) {
            if !result.tags.iter().any(|t| t.id == tag.id) {
                result.tags.push(tag.clone());
            }
            removals.push((tok.start, tok.end));
        }
    }
    for (start, end) in removals.into_iter().rev() {
        text.replace_range(start..end, "");
    }

    // 5. Whatever is left becomes the title, whitespace collapsed.
    result.title = text.split_whitespace().collect::<Vec<_>>().join(" ");

    result
}
