// Manages the local snapshot file and the JSON export/import format.
//
// ⚠️ VERSION BUMP REQUIRED:
// Changes to the entity structs in model::item require incrementing
// SNAPSHOT_VERSION below to prevent data corruption.
use crate::model::{Area, ChecklistItem, Project, ProjectHeading, Tag, Todo, TodoTag};
use crate::paths::AppPaths;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const SNAPSHOT_FILENAME: &str = "odot.json";

// Version history:
// - v1: Initial format
pub const SNAPSHOT_VERSION: u32 = 1;

/// All persisted tables, as one snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotTables {
    #[serde(default)]
    pub areas: Vec<Area>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub project_headings: Vec<ProjectHeading>,
    #[serde(default)]
    pub todos: Vec<Todo>,
    #[serde(default)]
    pub todo_tags: Vec<TodoTag>,
    #[serde(default)]
    pub checklist_items: Vec<ChecklistItem>,
}

/// Wrapper struct for the versioned snapshot file.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub data: SnapshotTables,
}

/// Serializes a full snapshot for export.
pub fn export_json(tables: &SnapshotTables) -> Result<String> {
    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        exported_at: Utc::now(),
        data: tables.clone(),
    };
    serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")
}

/// Parses an exported snapshot and remaps every id to a fresh one so an
/// import never collides with existing rows. Cross-references follow the
/// remapping; rows pointing at entities missing from the file are dropped.
pub fn import_json(json: &str) -> Result<SnapshotTables> {
    let snapshot: Snapshot =
        serde_json::from_str(json).context("Invalid export file format")?;
    if snapshot.version != SNAPSHOT_VERSION {
        bail!("Unsupported snapshot version: {}", snapshot.version);
    }
    Ok(remap_ids(snapshot.data))
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

fn remap_ids(mut data: SnapshotTables) -> SnapshotTables {
    let mut area_ids: HashMap<String, String> = HashMap::new();
    for area in &mut data.areas {
        let fresh = fresh_id();
        area_ids.insert(std::mem::replace(&mut area.id, fresh.clone()), fresh);
    }

    let mut project_ids: HashMap<String, String> = HashMap::new();
    for project in &mut data.projects {
        let fresh = fresh_id();
        project_ids.insert(std::mem::replace(&mut project.id, fresh.clone()), fresh);
        project.area_id = project
            .area_id
            .take()
            .and_then(|a| area_ids.get(&a).cloned());
    }

    let mut tag_ids: HashMap<String, String> = HashMap::new();
    for tag in &mut data.tags {
        let fresh = fresh_id();
        tag_ids.insert(std::mem::replace(&mut tag.id, fresh.clone()), fresh);
    }

    let mut todo_ids: HashMap<String, String> = HashMap::new();
    for todo in &mut data.todos {
        let fresh = fresh_id();
        todo_ids.insert(std::mem::replace(&mut todo.id, fresh.clone()), fresh);
        todo.project_id = todo
            .project_id
            .take()
            .and_then(|p| project_ids.get(&p).cloned());
    }

    data.project_headings.retain_mut(|heading| {
        match project_ids.get(&heading.project_id) {
            Some(pid) => {
                heading.id = fresh_id();
                heading.project_id = pid.clone();
                true
            }
            None => false,
        }
    });

    data.todo_tags.retain_mut(|tt| {
        match (todo_ids.get(&tt.todo_id), tag_ids.get(&tt.tag_id)) {
            (Some(todo_id), Some(tag_id)) => {
                tt.id = fresh_id();
                tt.todo_id = todo_id.clone();
                tt.tag_id = tag_id.clone();
                true
            }
            _ => false,
        }
    });

    data.checklist_items
        .retain_mut(|item| match todo_ids.get(&item.todo_id) {
            Some(todo_id) => {
                item.id = fresh_id();
                item.todo_id = todo_id.clone();
                true
            }
            None => false,
        });

    data
}

pub struct LocalStorage;

impl LocalStorage {
    fn get_path() -> Result<PathBuf> {
        Ok(AppPaths::get_data_dir()?.join(SNAPSHOT_FILENAME))
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)
            .with_context(|| format!("Failed to write {:?}", tmp_path))?;
        fs::rename(&tmp_path, path).with_context(|| format!("Failed to rename to {:?}", path))?;
        Ok(())
    }

    pub fn load() -> Result<SnapshotTables> {
        Self::load_from(&Self::get_path()?)
    }

    pub fn load_from(path: &Path) -> Result<SnapshotTables> {
        if !path.exists() {
            log::info!("No snapshot at {:?}, starting empty", path);
            return Ok(SnapshotTables::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot: {:?}", path))?;
        let snapshot: Snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse snapshot: {:?}", path))?;
        if snapshot.version != SNAPSHOT_VERSION {
            bail!("Unsupported snapshot version: {}", snapshot.version);
        }
        log::debug!(
            "Loaded {} todos, {} projects from {:?}",
            snapshot.data.todos.len(),
            snapshot.data.projects.len(),
            path
        );
        Ok(snapshot.data)
    }

    pub fn save(tables: &SnapshotTables) -> Result<()> {
        Self::save_to(&Self::get_path()?, tables)
    }

    pub fn save_to(path: &Path, tables: &SnapshotTables) -> Result<()> {
        let json = export_json(tables)?;
        Self::atomic_write(path, json)?;
        log::debug!("Saved {} todos to {:?}", tables.todos.len(), path);
        Ok(())
    }
}
