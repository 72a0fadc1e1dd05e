use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

/// Optional per-user configuration (`config.toml` in the tix config
/// directory). Everything defaults; the file does not need to exist.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
}

/// UI settings
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UiConfig {
    /// Hex color overrides for the theme, e.g. `text = "#B0AAFF"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

/// Per-user config directory, respecting XDG_CONFIG_HOME (APPDATA on
/// Windows).
pub fn config_dir() -> PathBuf {
    if cfg!(windows)
        && let Ok(appdata) = std::env::var("APPDATA")
    {
        return PathBuf::from(appdata).join("tix");
    }
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    base.join("tix")
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Load the config from the default location. Missing file gives defaults;
/// a malformed file gives defaults with a warning on stderr.
pub fn load_config() -> Config {
    let path = config_dir().join("config.toml");
    match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("warning: could not parse {}: {}", path.display(), e);
                Config::default()
            }
        },
        Err(_) => Config::default(),
    }
}
