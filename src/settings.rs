//! Persistence model and configuration IO.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::geometry::WindowRect;
use crate::slides::Direction;

/// File name used under the per-user config directory.
const SETTINGS_FILE: &str = "slideshow_viewer.json";

/// Settings persisted to `slideshow_viewer.json`.
///
/// Rewritten synchronously on every relevant state change; the file is the
/// single source of truth between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Folder whose images were last shown.
    pub last_folder: Option<String>,
    /// Outer window rectangle from the previous run.
    pub window_geometry: Option<WindowRect>,
    /// Index of the slide being displayed.
    pub current_slide: usize,
    /// Step direction for timer-driven advances.
    pub slide_direction: Direction,
    /// Slideshow period in milliseconds.
    pub slide_delay_ms: u64,
    /// Monitor the window was last placed on.
    pub screen_number: usize,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            last_folder: None,
            window_geometry: None,
            current_slide: 0,
            slide_direction: Direction::Forward,
            slide_delay_ms: 4000,
            screen_number: 0,
        }
    }
}

/// Build the settings path and ensure the directory exists.
fn settings_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("dev", "slideshow_viewer", "slideshow_viewer")
        .ok_or_else(|| anyhow!("cannot determine config directory"))?;
    let config_dir = proj_dirs.config_dir();
    fs::create_dir_all(config_dir)?;
    Ok(config_dir.join(SETTINGS_FILE))
}

/// Load settings from disk, returning defaults when the file is missing.
///
/// A malformed file is an error; startup logs it and terminates.
pub fn load() -> Result<ViewerSettings> {
    load_from(&settings_path()?)
}

/// Persist settings to disk as pretty JSON.
pub fn save(settings: &ViewerSettings) -> Result<()> {
    save_to(&settings_path()?, settings)
}

pub fn load_from(path: &Path) -> Result<ViewerSettings> {
    if !path.exists() {
        return Ok(ViewerSettings::default());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("malformed settings file {}", path.display()))
}

pub fn save_to(path: &Path, settings: &ViewerSettings) -> Result<()> {
    let contents = serde_json::to_string_pretty(settings)?;
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_from(&dir.path().join("absent.json")).unwrap();
        assert!(settings.last_folder.is_none());
        assert_eq!(settings.current_slide, 0);
        assert_eq!(settings.slide_direction, Direction::Forward);
        assert_eq!(settings.slide_delay_ms, 4000);
    }

    #[test]
    fn round_trip_preserves_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = ViewerSettings {
            last_folder: Some("/photos/vacation".to_string()),
            window_geometry: Some(WindowRect {
                x: 10.0,
                y: 20.0,
                width: 800.0,
                height: 600.0,
            }),
            current_slide: 7,
            slide_direction: Direction::Backward,
            slide_delay_ms: 2000,
            screen_number: 1,
        };
        save_to(&path, &settings).unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.last_folder.as_deref(), Some("/photos/vacation"));
        assert_eq!(loaded.window_geometry, settings.window_geometry);
        assert_eq!(loaded.current_slide, 7);
        assert_eq!(loaded.slide_direction, Direction::Backward);
        assert_eq!(loaded.slide_delay_ms, 2000);
        assert_eq!(loaded.screen_number, 1);
    }

    #[test]
    fn direction_persists_as_signed_integer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = ViewerSettings {
            slide_direction: Direction::Backward,
            ..Default::default()
        };
        save_to(&path, &settings).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["slide_direction"], serde_json::json!(-1));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_from(&path).is_err());
    }

    #[test]
    fn unknown_delay_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"slide_delay_ms": 1000}"#).unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.slide_delay_ms, 1000);
        assert_eq!(loaded.current_slide, 0);
    }
}
