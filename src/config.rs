//! Configuration management for Daynotes.
//!
//! This module handles loading and saving application configuration to/from
//! a JSON file in the app's data directory. A missing or unreadable file
//! falls back to defaults, which are then written out.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{NotesError, NotesResult};
use crate::gesture::{DEFAULT_DOUBLE_TAP_WINDOW, DEFAULT_SCROLL_SETTLE};
use crate::models::NoteColor;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DATABASE_FILE_NAME: &str = "notes.db";

/// Gesture timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Two presses closer than this open a note
    #[serde(default = "default_double_tap_window_ms")]
    pub double_tap_window_ms: u64,
    /// Taps are ignored for this long after a scroll is released
    #[serde(default = "default_scroll_settle_ms")]
    pub scroll_settle_ms: u64,
}

fn default_double_tap_window_ms() -> u64 {
    DEFAULT_DOUBLE_TAP_WINDOW.as_millis() as u64
}

fn default_scroll_settle_ms() -> u64 {
    DEFAULT_SCROLL_SETTLE.as_millis() as u64
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_tap_window_ms: default_double_tap_window_ms(),
            scroll_settle_ms: default_scroll_settle_ms(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigData {
    /// Path to the database file
    #[serde(default)]
    pub database_file: String,
    /// Color for new notes
    #[serde(default)]
    pub default_color: NoteColor,
    #[serde(default)]
    pub gestures: GestureConfig,
    /// Log filter directive; RUST_LOG takes precedence
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for ConfigData {
    fn default() -> Self {
        Self {
            database_file: String::new(),
            default_color: NoteColor::default(),
            gestures: GestureConfig::default(),
            log_level: None,
        }
    }
}

impl ConfigData {
    fn for_dir(config_dir: &Path) -> Self {
        Self {
            database_file: config_dir
                .join(DATABASE_FILE_NAME)
                .to_string_lossy()
                .to_string(),
            ..Self::default()
        }
    }
}

/// Configuration manager
pub struct Config {
    config_dir: PathBuf,
    config_file: PathBuf,
    data: ConfigData,
}

impl Config {
    /// Create a new configuration manager
    ///
    /// On mobile platforms (without the `desktop` feature), `config_dir` is required.
    pub fn new(config_dir: Option<PathBuf>) -> NotesResult<Self> {
        let config_dir = match config_dir {
            Some(dir) => dir,
            None => {
                #[cfg(feature = "desktop")]
                {
                    dirs::config_dir()
                        .unwrap_or_else(|| PathBuf::from("."))
                        .join("daynotes")
                }
                #[cfg(not(feature = "desktop"))]
                {
                    return Err(NotesError::Config(
                        "config_dir is required on mobile platforms".to_string(),
                    ));
                }
            }
        };

        fs::create_dir_all(&config_dir)?;
        let config_file = config_dir.join(CONFIG_FILE_NAME);
        let existed = config_file.exists();

        let mut data = if existed {
            match fs::read_to_string(&config_file) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Config file unreadable, using defaults");
                    ConfigData::for_dir(&config_dir)
                }),
                Err(e) => {
                    tracing::warn!(error = %e, "Config file unreadable, using defaults");
                    ConfigData::for_dir(&config_dir)
                }
            }
        } else {
            ConfigData::for_dir(&config_dir)
        };

        if data.database_file.is_empty() {
            data.database_file = ConfigData::for_dir(&config_dir).database_file;
        }
        if data.gestures.double_tap_window_ms == 0 {
            tracing::warn!("double_tap_window_ms must be greater than zero, using default");
            data.gestures.double_tap_window_ms = default_double_tap_window_ms();
        }

        let config = Self {
            config_dir,
            config_file,
            data,
        };

        // Save default config if it doesn't exist
        if !existed {
            config.save()?;
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> NotesResult<()> {
        let content = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.config_file, content)?;
        Ok(())
    }

    /// Get the configuration directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get the database file path
    pub fn database_file(&self) -> &str {
        &self.data.database_file
    }

    /// Color new notes start with
    pub fn default_color(&self) -> NoteColor {
        self.data.default_color
    }

    pub fn set_default_color(&mut self, color: NoteColor) -> NotesResult<()> {
        self.data.default_color = color;
        self.save()
    }

    pub fn double_tap_window(&self) -> Duration {
        Duration::from_millis(self.data.gestures.double_tap_window_ms)
    }

    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(self.data.gestures.scroll_settle_ms)
    }

    pub fn set_gestures(&mut self, gestures: GestureConfig) -> NotesResult<()> {
        if gestures.double_tap_window_ms == 0 {
            return Err(NotesError::validation(
                "double_tap_window_ms",
                "must be greater than zero",
            ));
        }
        self.data.gestures = gestures;
        self.save()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.data.log_level.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new(Some(temp_dir.path().to_path_buf())).unwrap();

        assert!(config.database_file().ends_with(DATABASE_FILE_NAME));
        assert_eq!(config.default_color(), NoteColor::Yellow);
        assert_eq!(config.double_tap_window(), Duration::from_millis(300));
        assert_eq!(config.scroll_settle(), Duration::from_millis(150));
        assert!(config.log_level().is_none());
        assert!(temp_dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_settings_persist() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut config = Config::new(Some(temp_dir.path().to_path_buf())).unwrap();
            config.set_default_color(NoteColor::Green).unwrap();
            config
                .set_gestures(GestureConfig {
                    double_tap_window_ms: 400,
                    scroll_settle_ms: 100,
                })
                .unwrap();
        }

        let config = Config::new(Some(temp_dir.path().to_path_buf())).unwrap();
        assert_eq!(config.default_color(), NoteColor::Green);
        assert_eq!(config.double_tap_window(), Duration::from_millis(400));
        assert_eq!(config.scroll_settle(), Duration::from_millis(100));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r##"{"default_color": "#fecaca"}"##,
        )
        .unwrap();

        let config = Config::new(Some(temp_dir.path().to_path_buf())).unwrap();
        assert_eq!(config.default_color(), NoteColor::Red);
        assert_eq!(config.double_tap_window(), Duration::from_millis(300));
        assert!(config.database_file().ends_with(DATABASE_FILE_NAME));
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "not json").unwrap();

        let config = Config::new(Some(temp_dir.path().to_path_buf())).unwrap();
        assert_eq!(config.default_color(), NoteColor::Yellow);
    }

    #[test]
    fn test_rejects_zero_double_tap_window() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::new(Some(temp_dir.path().to_path_buf())).unwrap();
        let result = config.set_gestures(GestureConfig {
            double_tap_window_ms: 0,
            scroll_settle_ms: 150,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_double_tap_window_in_file_uses_default() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"{"gestures": {"double_tap_window_ms": 0, "scroll_settle_ms": 0}}"#,
        )
        .unwrap();

        let config = Config::new(Some(temp_dir.path().to_path_buf())).unwrap();
        assert_eq!(config.double_tap_window(), Duration::from_millis(300));
        assert_eq!(config.scroll_settle(), Duration::ZERO);
    }

    #[cfg(not(feature = "desktop"))]
    #[test]
    fn test_config_dir_required_on_mobile() {
        assert!(matches!(Config::new(None), Err(NotesError::Config(_))));
    }
}
