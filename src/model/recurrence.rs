// File: ./src/model/recurrence.rs
// Round-trips between structured recurrence options and the serialized RRULE
// string stored on a todo, and computes forward occurrences. The actual date
// math is delegated to the rrule crate.
use chrono::NaiveDate;
use rrule::RRuleSet;
use std::collections::HashMap;
use std::str::FromStr;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter)]
pub enum Frequency {
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn code(self) -> &'static str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "DAILY" => Some(Frequency::Daily),
            "WEEKLY" => Some(Frequency::Weekly),
            "MONTHLY" => Some(Frequency::Monthly),
            "YEARLY" => Some(Frequency::Yearly),
            _ => None,
        }
    }

    fn unit(self) -> &'static str {
        match self {
            Frequency::Daily => "day",
            Frequency::Weekly => "week",
            Frequency::Monthly => "month",
            Frequency::Yearly => "year",
        }
    }
}

/// Weekday as it appears in a BYDAY clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum RuleDay {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl RuleDay {
    pub fn code(self) -> &'static str {
        match self {
            RuleDay::Mon => "MO",
            RuleDay::Tue => "TU",
            RuleDay::Wed => "WE",
            RuleDay::Thu => "TH",
            RuleDay::Fri => "FR",
            RuleDay::Sat => "SA",
            RuleDay::Sun => "SU",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "MO" => Some(RuleDay::Mon),
            "TU" => Some(RuleDay::Tue),
            "WE" => Some(RuleDay::Wed),
            "TH" => Some(RuleDay::Thu),
            "FR" => Some(RuleDay::Fri),
            "SA" => Some(RuleDay::Sat),
            "SU" => Some(RuleDay::Sun),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            RuleDay::Mon => "Monday",
            RuleDay::Tue => "Tuesday",
            RuleDay::Wed => "Wednesday",
            RuleDay::Thu => "Thursday",
            RuleDay::Fri => "Friday",
            RuleDay::Sat => "Saturday",
            RuleDay::Sun => "Sunday",
        }
    }
}

/// End condition of a recurrence series. Exactly one variant applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Terminator {
    #[default]
    Never,
    AfterCount(u32),
    Until(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecurrenceOptions {
    pub frequency: Frequency,
    pub interval: u32,
    /// Only meaningful when frequency is Weekly.
    pub by_weekday: Vec<RuleDay>,
    pub terminator: Terminator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrencePreset {
    pub label: &'static str,
    pub rule: &'static str,
}

/// The fixed presets exposed as one-click choices in the recurrence picker.
pub const RECURRENCE_PRESETS: [RecurrencePreset; 5] = [
    RecurrencePreset {
        label: "Daily",
        rule: "FREQ=DAILY",
    },
    RecurrencePreset {
        label: "Weekdays",
        rule: "FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR",
    },
    RecurrencePreset {
        label: "Weekly",
        rule: "FREQ=WEEKLY",
    },
    RecurrencePreset {
        label: "Monthly",
        rule: "FREQ=MONTHLY",
    },
    RecurrencePreset {
        label: "Yearly",
        rule: "FREQ=YEARLY",
    },
];

fn strip_rrule_prefix(s: &str) -> &str {
    let trimmed = s.trim();
    match trimmed.get(..6) {
        Some(prefix) if prefix.eq_ignore_ascii_case("RRULE:") => &trimmed[6..],
        _ => trimmed,
    }
}

/// Builds the canonical rule string. INTERVAL is omitted when 1 (an interval
/// of 0 is treated the same way); BYDAY only applies to weekly rules; COUNT
/// and UNTIL never co-occur because the terminator enum holds at most one.
pub fn build_rule(opts: &RecurrenceOptions) -> String {
    let mut parts = vec![format!("FREQ={}", opts.frequency.code())];

    if opts.interval > 1 {
        parts.push(format!("INTERVAL={}", opts.interval));
    }

    if opts.frequency == Frequency::Weekly && !opts.by_weekday.is_empty() {
        let csv = opts
            .by_weekday
            .iter()
            .map(|d| d.code())
            .collect::<Vec<_>>()
            .join(",");
        parts.push(format!("BYDAY={}", csv));
    }

    match opts.terminator {
        Terminator::AfterCount(n) if n > 0 => parts.push(format!("COUNT={}", n)),
        Terminator::Until(d) => parts.push(format!("UNTIL={}T000000Z", d.format("%Y%m%d"))),
        _ => {}
    }

    parts.join(";")
}

/// Parses a rule string back into structured options, tolerating an optional
/// RRULE: prefix. Unknown frequencies fall back to Weekly rather than
/// erroring. When a hand-edited rule carries both COUNT and UNTIL (which
/// build_rule never emits), COUNT wins.
pub fn parse_rule(rule: &str) -> RecurrenceOptions {
    let stripped = strip_rrule_prefix(rule).to_uppercase();
    let mut params: HashMap<&str, &str> = HashMap::new();
    for part in stripped.split(';') {
        if let Some((key, value)) = part.split_once('=') {
            params.insert(key.trim(), value.trim());
        }
    }

    let frequency = params
        .get("FREQ")
        .and_then(|v| Frequency::from_code(v))
        .unwrap_or_default();
    let interval = params
        .get("INTERVAL")
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(1);
    let by_weekday = params
        .get("BYDAY")
        .map(|v| v.split(',').filter_map(RuleDay::from_code).collect())
        .unwrap_or_default();

    let terminator = if let Some(n) = params.get("COUNT").and_then(|v| v.parse::<u32>().ok()) {
        Terminator::AfterCount(n)
    } else if let Some(raw) = params.get("UNTIL") {
        // Keep the date-only part before any time marker.
        let date_only = raw.split('T').next().unwrap_or(raw);
        match NaiveDate::parse_from_str(date_only, "%Y%m%d") {
            Ok(d) => Terminator::Until(d),
            Err(_) => Terminator::Never,
        }
    } else {
        Terminator::Never
    };

    RecurrenceOptions {
        frequency,
        interval,
        by_weekday,
        terminator,
    }
}

/// Exact match against the preset table, used to decide whether the UI shows
/// a preset label or a custom-rule description.
pub fn match_preset(rule: &str) -> Option<&'static RecurrencePreset> {
    let normalized = strip_rrule_prefix(rule).to_uppercase();
    RECURRENCE_PRESETS.iter().find(|p| p.rule == normalized)
}

/// Upgrades a date-only UNTIL value to an end-of-day datetime. The rrule
/// crate (per RFC 5545) requires UNTIL to match the type of DTSTART, and we
/// always synthesize a datetime DTSTART.
fn normalize_until(rule: &str) -> String {
    let mut out = rule.to_string();
    if let Some(idx) = out.find("UNTIL=") {
        let start = idx + 6;
        let end = out[start..]
            .find(';')
            .map(|i| start + i)
            .unwrap_or(out.len());
        let value = &out[start..end];
        if value.len() == 8 && !value.contains('T') {
            let upgraded = format!("{}T235959Z", value);
            out.replace_range(start..end, &upgraded);
        }
    }
    out
}

fn is_valid_rule(rule: &str) -> bool {
    // Let the rrule crate decide. The seed date is irrelevant for syntax
    // validation, it only has to predate any plausible UNTIL value.
    let rule_part = normalize_until(strip_rrule_prefix(rule));
    let probe = format!("DTSTART:19700101T000000Z\nRRULE:{}", rule_part);
    RRuleSet::from_str(&probe).is_ok()
}

fn join_day_names(days: &[RuleDay]) -> String {
    match days.len() {
        0 => String::new(),
        1 => days[0].display_name().to_string(),
        n => {
            let head = days[..n - 1]
                .iter()
                .map(|d| d.display_name())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} and {}", head, days[n - 1].display_name())
        }
    }
}

/// Renders a rule as human-readable text ("every 2 weeks on Monday and
/// Wednesday, 10 times"). Anything the rrule crate rejects is returned
/// unchanged; this never errors back to the caller.
pub fn rule_to_text(rule: &str) -> String {
    if !is_valid_rule(rule) {
        return rule.to_string();
    }

    let opts = parse_rule(rule);
    let mut text = if opts.interval > 1 {
        format!("every {} {}s", opts.interval, opts.frequency.unit())
    } else {
        format!("every {}", opts.frequency.unit())
    };

    if opts.frequency == Frequency::Weekly && !opts.by_weekday.is_empty() {
        text.push_str(" on ");
        text.push_str(&join_day_names(&opts.by_weekday));
    }

    match opts.terminator {
        Terminator::AfterCount(1) => text.push_str(", once"),
        Terminator::AfterCount(n) if n > 1 => text.push_str(&format!(", {} times", n)),
        Terminator::Until(d) => text.push_str(&format!(", until {}", d.format("%B %-d, %Y"))),
        _ => {}
    }

    text
}

/// First occurrence strictly after `after`, or None when the series has
/// ended or the rule is invalid. All rrule-crate failures are swallowed.
pub fn next_occurrence(rule: &str, after: NaiveDate) -> Option<NaiveDate> {
    let after_utc = after.and_hms_opt(0, 0, 0)?.and_utc();
    let rule_part = normalize_until(strip_rrule_prefix(rule));
    let set_str = format!(
        "DTSTART:{}\nRRULE:{}",
        after_utc.format("%Y%m%dT%H%M%SZ"),
        rule_part
    );

    let rrule_set = RRuleSet::from_str(&set_str).ok()?;
    rrule_set
        .into_iter()
        .find(|d| d.to_utc() > after_utc)
        .map(|d| d.to_utc().date_naive())
}
