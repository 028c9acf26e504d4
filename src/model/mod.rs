// File: ./src/model/mod.rs
pub mod dates;
pub mod filters;
pub mod item;
pub mod quick_add;
pub mod recurrence;

pub use item::{Area, ChecklistItem, Project, ProjectHeading, Tag, Todo, TodoTag};
pub use quick_add::{DateFormat, EntityRef, ParsedQuickAdd, Schedule, parse_quick_add};
pub use recurrence::{
    Frequency, RECURRENCE_PRESETS, RecurrenceOptions, RecurrencePreset, RuleDay, Terminator,
};
