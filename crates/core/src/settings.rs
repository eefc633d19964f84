//! User settings: API credentials, model choice, transcoder path, logging.
//!
//! Settings are read through the [`SettingsStore`] trait so the analysis and
//! editor code can run against an in-memory store in tests.

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";
pub const DEFAULT_MODEL: &str = "qwen-plus";
pub const DEFAULT_FFMPEG: &str = "ffmpeg";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write settings at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub ffmpeg_path: String,
    pub request_timeout_secs: u64,
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "warn" or "livecut_core=debug,warn".
    pub level: String,

    /// Emit structured JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            ffmpeg_path: DEFAULT_FFMPEG.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

/// A partial update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub ffmpeg_path: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == SettingsPatch::default()
    }

    pub fn apply(self, settings: &mut Settings) {
        if let Some(api_key) = self.api_key {
            settings.api_key = api_key;
        }
        if let Some(base_url) = self.base_url {
            settings.base_url = base_url;
        }
        if let Some(model) = self.model {
            settings.model = model;
        }
        if let Some(ffmpeg_path) = self.ffmpeg_path {
            settings.ffmpeg_path = ffmpeg_path;
        }
        if let Some(timeout) = self.request_timeout_secs {
            settings.request_timeout_secs = timeout;
        }
    }
}

impl Settings {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// API key with everything but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.is_empty() {
            return "(not set)".to_string();
        }
        let visible = chars.len().min(4);
        let hidden = chars.len() - visible;
        let tail: String = chars[hidden..].iter().collect();
        format!("{}{}", "*".repeat(hidden), tail)
    }
}

pub trait SettingsStore: Send + Sync {
    fn get(&self) -> Result<Settings, SettingsError>;

    /// Read-modify-write. Returns the settings as persisted.
    fn set(&self, patch: SettingsPatch) -> Result<Settings, SettingsError>;
}

/// JSON file store, by default under the user config directory.
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Self {
        Self::new(default_settings_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self) -> Result<Settings, SettingsError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No settings file, using defaults");
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| SettingsError::Read {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn set(&self, patch: SettingsPatch) -> Result<Settings, SettingsError> {
        let mut settings = self.get()?;
        patch.apply(&mut settings);

        let write_err = |source| SettingsError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(&settings).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(write_err)?;

        tracing::info!(path = %self.path.display(), "Settings saved");
        Ok(settings)
    }
}

/// Process-local store for tests and one-off runs.
#[derive(Default)]
pub struct MemorySettingsStore {
    settings: Mutex<Settings>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Mutex::new(settings),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self) -> Result<Settings, SettingsError> {
        Ok(self.settings.lock().expect("settings poisoned").clone())
    }

    fn set(&self, patch: SettingsPatch) -> Result<Settings, SettingsError> {
        let mut settings = self.settings.lock().expect("settings poisoned");
        patch.apply(&mut settings);
        Ok(settings.clone())
    }
}

pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("livecut")
        .join("config.json")
}
