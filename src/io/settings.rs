use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::model::config::config_dir;

/// Persisted lister window state (written to window.json in the per-user
/// config directory).
///
/// `monitor_x`/`monitor_y` record the top-left corner of the display work
/// area the window was last on, so the position is only restored while that
/// display is still present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WindowSettings {
    pub monitor_x: i32,
    pub monitor_y: i32,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// List scroll offset at last close
    pub scroll: usize,
}

/// Default path of the settings file.
pub fn settings_path() -> PathBuf {
    config_dir().join("window.json")
}

/// Read window settings from the given path. Missing or malformed files
/// yield `None`.
pub fn read_settings(path: &Path) -> Option<WindowSettings> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write window settings to the given path, creating parent directories as
/// needed.
pub fn write_settings(path: &Path, settings: &WindowSettings) -> Result<(), io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    atomic_write(path, content.as_bytes())
}

/// Write `content` to `path` atomically using a temp file + rename.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("window.json");
        let settings = WindowSettings {
            monitor_x: 1920,
            monitor_y: 0,
            x: 2000,
            y: 80,
            width: 700,
            height: 500,
            scroll: 12,
        };

        write_settings(&path, &settings).unwrap();
        let loaded = read_settings(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn read_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_settings(&dir.path().join("window.json")).is_none());
    }

    #[test]
    fn read_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("window.json");
        fs::write(&path, "not json {{{").unwrap();
        assert!(read_settings(&path).is_none());
    }

    #[test]
    fn serde_defaults_on_minimal_object() {
        let settings: WindowSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, WindowSettings::default());
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deep").join("window.json");
        write_settings(&path, &WindowSettings::default()).unwrap();
        assert!(read_settings(&path).is_some());
    }
}
