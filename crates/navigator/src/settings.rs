// Chunk: docs/chunks/navigator_settings - Settings file
//!
//! Navigator settings.
//!
//! Settings are read from a JSON file once per session and handed around as a
//! plain [`Settings`] value; nothing in the navigator looks keys up by path.
//! Every field has a default, so a partial file (or no file at all) is valid.
//!
//! ## File Location
//!
//! The default settings file is `<config dir>/compass/settings.json`:
//! - Linux: `~/.config/compass/settings.json`
//! - macOS: `~/Library/Application Support/compass/settings.json`
//!
//! ## Example
//!
//! ```json
//! {
//!     "enable_tags": true,
//!     "jump_to_most_recent_on_show": false,
//!     "plugins": { "files": { "enable_cache": true } }
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application name used for the config directory.
const APP_NAME: &str = "compass";

/// Settings file name.
const SETTINGS_FILENAME: &str = "settings.json";

/// Errors that can occur while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// All recognized navigator options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Raise log verbosity to debug
    pub debug: bool,
    /// Show sheet tags as annotations and list every tagged file on its own
    pub enable_tags: bool,
    /// Only list sheets of the active pane
    pub only_show_items_in_focused_group: bool,
    /// Start the panel on the second entry (the previously used sheet)
    pub jump_to_most_recent_on_show: bool,
    /// Select sheets while they are highlighted in the panel
    pub preview_on_highlight: bool,
    /// Only offer unopened files when the window has no open sheets
    pub only_show_unopened_files_on_empty_window: bool,
    pub plugins: PluginSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            enable_tags: false,
            only_show_items_in_focused_group: true,
            jump_to_most_recent_on_show: true,
            preview_on_highlight: true,
            only_show_unopened_files_on_empty_window: true,
            plugins: PluginSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSettings {
    pub files: FilesPluginSettings,
}

/// Options of the unopened-file cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesPluginSettings {
    /// Offer files that are not open in the window
    pub enabled: bool,
    /// Keep the cache between invocations instead of rebuilding it every time
    pub enable_cache: bool,
    /// Upper bound on files discovered by walking the window's folders
    pub max_files: usize,
    /// Upper bound on remembered closed files per window
    pub max_recently_closed: usize,
}

impl Default for FilesPluginSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            enable_cache: false,
            max_files: 1000,
            max_recently_closed: 50,
        }
    }
}

impl Settings {
    /// Returns the path of the default settings file.
    ///
    /// Returns `None` if the platform config directory cannot be determined.
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join(APP_NAME).join(SETTINGS_FILENAME))
    }

    /// Loads settings from the default location, falling back to defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads and validates settings from `path`.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let settings: Settings = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plugins.files.max_files == 0 {
            return Err(ConfigError::Invalid {
                key: "plugins.files.max_files",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.enable_tags);
        assert!(settings.only_show_items_in_focused_group);
        assert!(settings.jump_to_most_recent_on_show);
        assert!(settings.preview_on_highlight);
        assert!(settings.only_show_unopened_files_on_empty_window);
        assert!(settings.plugins.files.enabled);
        assert!(!settings.plugins.files.enable_cache);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"enable_tags": true, "plugins": {"files": {"enable_cache": true}}}"#).unwrap();
        assert!(settings.enable_tags);
        assert!(settings.plugins.files.enable_cache);
        assert!(settings.plugins.files.enabled);
        assert_eq!(settings.plugins.files.max_files, 1000);
        assert!(settings.jump_to_most_recent_on_show);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let settings: Settings = serde_json::from_str(r#"{"theme": "dark"}"#).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"preview_on_highlight": false, "debug": true}"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert!(!settings.preview_on_highlight);
        assert!(settings.debug);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Settings::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"enable_tags": "yes"}"#).unwrap();

        assert!(matches!(Settings::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_zero_max_files_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"plugins": {"files": {"max_files": 0}}}"#).unwrap();

        assert!(matches!(
            Settings::load(&path),
            Err(ConfigError::Invalid { key: "plugins.files.max_files", .. })
        ));
    }
}
