//! TOML-based configuration for keysynth.
//!
//! Reads `AppConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\keysynth\config.toml`
//! - Linux:    `~/.config/keysynth/config.toml`
//! - macOS:    `~/Library/Application Support/keysynth/config.toml`
//!
//! or from an explicit path given with `--config`.
//!
//! ```toml
//! [keyboard]
//! locale = "de"
//! key_delay_ms = 10
//! fallback = "permissive"
//!
//! [chat]
//! dismiss_key = "esc"
//! open_key = "t"
//! submit_key = "enter"
//! focus_delay_ms = 100
//! message_delay_ms = 100
//!
//! [logging]
//! level = "info"
//! ```
//!
//! # Serde default values
//!
//! Every field has a `#[serde(default = "...")]`, so a missing file, a
//! missing section, or a missing key all fall back to the values shown above.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::{dispatch_chat::ChatKeys, type_text::FallbackPolicy};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub keyboard: KeyboardConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Layout and event timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyboardConfig {
    /// Locale id selecting a layout patch (e.g. `"de"`).  Unknown ids are
    /// ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Spacing before and after every key event, in milliseconds.
    #[serde(default = "default_key_delay_ms")]
    pub key_delay_ms: u64,
    /// What to do with characters the layout cannot map.
    #[serde(default)]
    pub fallback: FallbackPolicy,
}

/// Chat macro keys and pauses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatConfig {
    #[serde(default = "default_dismiss_key")]
    pub dismiss_key: String,
    #[serde(default = "default_open_key")]
    pub open_key: String,
    #[serde(default = "default_submit_key")]
    pub submit_key: String,
    /// Pause before the first key, letting a just-focused window settle.
    #[serde(default = "default_chat_delay_ms")]
    pub focus_delay_ms: u64,
    /// Pause after each submitted message.
    #[serde(default = "default_chat_delay_ms")]
    pub message_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_key_delay_ms() -> u64 {
    10
}
fn default_dismiss_key() -> String {
    "esc".to_string()
}
fn default_open_key() -> String {
    "t".to_string()
}
fn default_submit_key() -> String {
    "enter".to_string()
}
fn default_chat_delay_ms() -> u64 {
    100
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            locale: None,
            key_delay_ms: default_key_delay_ms(),
            fallback: FallbackPolicy::default(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            dismiss_key: default_dismiss_key(),
            open_key: default_open_key(),
            submit_key: default_submit_key(),
            focus_delay_ms: default_chat_delay_ms(),
            message_delay_ms: default_chat_delay_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl KeyboardConfig {
    pub fn key_delay(&self) -> Duration {
        Duration::from_millis(self.key_delay_ms)
    }
}

impl ChatConfig {
    pub fn keys(&self) -> ChatKeys {
        ChatKeys {
            dismiss: self.dismiss_key.clone(),
            open: self.open_key.clone(),
            submit: self.submit_key.clone(),
        }
    }

    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }

    pub fn message_delay(&self) -> Duration {
        Duration::from_millis(self.message_delay_ms)
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    platform_config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads `AppConfig` from `path`, or from the platform default when `path`
/// is `None`.  A missing file yields `AppConfig::default()`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match config_file_path() {
            Ok(path) => path,
            Err(ConfigError::NoPlatformConfigDir) => return Ok(AppConfig::default()),
            Err(e) => return Err(e),
        },
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Writes `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config base directory including the `keysynth`
/// subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("keysynth"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("keysynth"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("keysynth")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
