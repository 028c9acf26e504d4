// File: ./src/model/item.rs
use crate::model::recurrence;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    #[serde(default = "default_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Scheduled date ("when"), independent of the deadline.
    #[serde(default)]
    pub when_date: Option<NaiveDate>,
    #[serde(default)]
    pub when_someday: bool,
    #[serde(default)]
    pub when_evening: bool,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub project_id: Option<String>,
    /// Fractional sort key maintained by list reordering.
    #[serde(default)]
    pub position: f64,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Serialized recurrence rule, see `model::recurrence`.
    #[serde(default)]
    pub recurrence_rule: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Todo {
    pub fn new(title: impl Into<String>, position: f64) -> Self {
        Self {
            id: default_id(),
            title: title.into(),
            notes: None,
            when_date: None,
            when_someday: false,
            when_evening: false,
            deadline: None,
            project_id: None,
            position,
            is_completed: false,
            completed_at: None,
            recurrence_rule: None,
            updated_at: None,
        }
    }

    pub fn set_completed(&mut self, done: bool) {
        let now = Utc::now();
        self.is_completed = done;
        self.completed_at = done.then_some(now);
        self.updated_at = Some(now);
    }

    /// Builds the follow-up instance of a recurring todo: fresh id, next
    /// scheduled date, carried-over fields, cleared completion state. The
    /// base date is the current schedule, falling back to today for todos
    /// completed without one. None when there is no rule, the rule is
    /// invalid, or the series has ended.
    pub fn next_occurrence_todo(&self, today: NaiveDate) -> Option<Todo> {
        let rule = self.recurrence_rule.as_ref()?;
        let base = self.when_date.unwrap_or(today);
        let next_date = recurrence::next_occurrence(rule, base)?;

        let mut next = Todo::new(self.title.clone(), self.position);
        next.notes = self.notes.clone();
        next.project_id = self.project_id.clone();
        next.when_date = Some(next_date);
        next.when_evening = self.when_evening;
        next.recurrence_rule = self.recurrence_rule.clone();
        Some(next)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(default = "default_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Hex color for the sidebar dot.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub position: f64,
    #[serde(default)]
    pub area_id: Option<String>,
}

impl Project {
    pub fn new(name: impl Into<String>, position: f64) -> Self {
        Self {
            id: default_id(),
            name: name.into(),
            notes: None,
            color: None,
            position,
            area_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Area {
    #[serde(default = "default_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub position: f64,
}

impl Area {
    pub fn new(name: impl Into<String>, position: f64) -> Self {
        Self {
            id: default_id(),
            name: name.into(),
            notes: None,
            position,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default = "default_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub position: f64,
}

impl Tag {
    pub fn new(name: impl Into<String>, position: f64) -> Self {
        Self {
            id: default_id(),
            name: name.into(),
            color: None,
            position,
        }
    }
}

/// Join row between a todo and a tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoTag {
    #[serde(default = "default_id")]
    pub id: String,
    pub todo_id: String,
    pub tag_id: String,
}

impl TodoTag {
    pub fn new(todo_id: impl Into<String>, tag_id: impl Into<String>) -> Self {
        Self {
            id: default_id(),
            todo_id: todo_id.into(),
            tag_id: tag_id.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    #[serde(default = "default_id")]
    pub id: String,
    pub todo_id: String,
    pub text: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub position: f64,
}

impl ChecklistItem {
    pub fn new(todo_id: impl Into<String>, text: impl Into<String>, position: f64) -> Self {
        Self {
            id: default_id(),
            todo_id: todo_id.into(),
            text: text.into(),
            is_completed: false,
            position,
        }
    }
}

/// Section header inside a project view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectHeading {
    #[serde(default = "default_id")]
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub position: f64,
}

impl ProjectHeading {
    pub fn new(project_id: impl Into<String>, title: impl Into<String>, position: f64) -> Self {
        Self {
            id: default_id(),
            project_id: project_id.into(),
            title: title.into(),
            position,
        }
    }
}
