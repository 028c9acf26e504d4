// File: src/paths.rs
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::PathBuf;

pub struct AppPaths;

impl AppPaths {
    /// Returns the ProjectDirs struct, common to all path lookups.
    fn get_proj_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "odot", "odot")
    }

    /// Helper to ensure a directory exists before returning it.
    fn ensure_exists(path: PathBuf) -> Result<PathBuf> {
        if !path.exists() {
            fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(path)
    }

    /// Determines the base directory from an environment override or OS defaults.
    fn resolve_base(subdir: &str) -> Option<PathBuf> {
        // Test override: everything lands flat in the given directory.
        if let Ok(test_dir) = env::var("ODOT_TEST_DIR") {
            return Some(PathBuf::from(test_dir));
        }

        let proj = Self::get_proj_dirs()?;

        let dir = match subdir {
            "data" => proj.data_dir(),
            "config" => proj.config_dir(),
            _ => return None,
        };

        Some(dir.to_path_buf())
    }

    pub fn get_data_dir() -> Result<PathBuf> {
        let path = Self::resolve_base("data")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Self::ensure_exists(path)
    }

    pub fn get_config_dir() -> Result<PathBuf> {
        let path = Self::resolve_base("config")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::ensure_exists(path)
    }
}
