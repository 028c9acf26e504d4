// File: ./src/model/filters.rs
// Pure view filters over todo slices. Every filter takes the reference date
// explicitly where it matters; completed todos are hidden unless the caller
// passes show_completed.
use crate::model::item::{Todo, TodoTag};
use chrono::{Duration, NaiveDate};
use std::collections::{HashMap, HashSet};

pub type TodoTagMap = HashMap<String, HashSet<String>>;

pub fn build_todo_tag_map(todo_tags: &[TodoTag]) -> TodoTagMap {
    let mut map: TodoTagMap = HashMap::new();
    for tt in todo_tags {
        map.entry(tt.todo_id.clone())
            .or_default()
            .insert(tt.tag_id.clone());
    }
    map
}

fn visible(todo: &Todo, show_completed: bool) -> bool {
    show_completed || !todo.is_completed
}

/// Unscheduled, unfiled, untagged todos.
pub fn filter_inbox<'a>(
    todos: &'a [Todo],
    tag_map: &TodoTagMap,
    show_completed: bool,
) -> Vec<&'a Todo> {
    todos
        .iter()
        .filter(|t| {
            visible(t, show_completed)
                && t.when_date.is_none()
                && !t.when_someday
                && t.project_id.is_none()
                && !tag_map.contains_key(&t.id)
        })
        .collect()
}

/// Scheduled for today or earlier; overdue todos stay in Today.
pub fn filter_today<'a>(
    todos: &'a [Todo],
    today: NaiveDate,
    show_completed: bool,
) -> Vec<&'a Todo> {
    todos
        .iter()
        .filter(|t| visible(t, show_completed) && t.when_date.is_some_and(|d| d <= today))
        .collect()
}

/// Scheduled within the next `days_ahead` days, today excluded.
pub fn filter_upcoming<'a>(
    todos: &'a [Todo],
    today: NaiveDate,
    days_ahead: u32,
    show_completed: bool,
) -> Vec<&'a Todo> {
    let end = today + Duration::days(days_ahead as i64);
    todos
        .iter()
        .filter(|t| {
            visible(t, show_completed) && t.when_date.is_some_and(|d| d > today && d <= end)
        })
        .collect()
}

pub fn filter_someday<'a>(todos: &'a [Todo], show_completed: bool) -> Vec<&'a Todo> {
    todos
        .iter()
        .filter(|t| visible(t, show_completed) && t.when_someday)
        .collect()
}

/// Completed todos, newest completion first. Todos completed before the
/// completion timestamp existed fall back to their update time.
pub fn filter_logbook<'a>(todos: &'a [Todo]) -> Vec<&'a Todo> {
    let mut done: Vec<&Todo> = todos.iter().filter(|t| t.is_completed).collect();
    done.sort_by(|a, b| {
        let a_time = a.completed_at.or(a.updated_at);
        let b_time = b.completed_at.or(b.updated_at);
        b_time.cmp(&a_time)
    });
    done
}

pub fn filter_by_project<'a>(
    todos: &'a [Todo],
    project_id: &str,
    show_completed: bool,
) -> Vec<&'a Todo> {
    todos
        .iter()
        .filter(|t| visible(t, show_completed) && t.project_id.as_deref() == Some(project_id))
        .collect()
}

/// Todos of every project belonging to one area.
pub fn filter_by_area<'a>(
    todos: &'a [Todo],
    project_ids: &[String],
    show_completed: bool,
) -> Vec<&'a Todo> {
    let pid_set: HashSet<&str> = project_ids.iter().map(String::as_str).collect();
    todos
        .iter()
        .filter(|t| {
            visible(t, show_completed)
                && t.project_id
                    .as_deref()
                    .is_some_and(|pid| pid_set.contains(pid))
        })
        .collect()
}

pub fn filter_by_tag<'a>(
    todos: &'a [Todo],
    tag_id: &str,
    tag_map: &TodoTagMap,
    show_completed: bool,
) -> Vec<&'a Todo> {
    todos
        .iter()
        .filter(|t| {
            visible(t, show_completed)
                && tag_map.get(&t.id).is_some_and(|tags| tags.contains(tag_id))
        })
        .collect()
}
