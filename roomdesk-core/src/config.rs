use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub rooms: RoomDefaultsConfig,
    pub streaming: StreamingConfig,
    pub logging: LoggingConfig,
}

/// Where the room backend lives and how long we wait for it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:16001".to_string(),
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
        }
    }
}

/// Values stamped onto a freshly created room
///
/// The credential fields are placeholders; the real values are filled in
/// from the room edit page once the meeting exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomDefaultsConfig {
    pub default_conference: String,
    pub default_meeting_number: String,
    pub default_passcode: String,
    pub default_invite_link: String,
    pub default_video_width: u32,
    pub default_video_height: u32,
    /// Rows per table page
    pub page_size: usize,
}

impl Default for RoomDefaultsConfig {
    fn default() -> Self {
        Self {
            default_conference: "conference_0".to_string(),
            default_meeting_number: "123456789".to_string(),
            default_passcode: "123456".to_string(),
            default_invite_link: "https://zoom.us/j/123456789?pwd=123456".to_string(),
            default_video_width: 640,
            default_video_height: 360,
            page_size: 100,
        }
    }
}

/// Live stream player settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Source URL template, `{owner}` and `{name}` are replaced per room
    pub url_template: String,
    /// Initial FLV stash buffer size in KiB
    pub stash_initial_size: u32,
    pub control_bar_visibility: String,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            url_template: "https://live.example.com/live/{owner}/{name}.flv".to_string(),
            stash_initial_size: 32,
            control_bar_visibility: "hover".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. Config file (if provided)
    /// 3. Defaults (lowest priority)
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            }
        }

        // ROOMDESK_BACKEND_BASE_URL etc. Nested keys are split on "__" so
        // snake_case field names survive the mapping.
        builder = builder.add_source(
            Environment::with_prefix("ROOMDESK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from file path
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    /// Collect every configuration problem instead of stopping at the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.backend.base_url.trim().is_empty() {
            errors.push("backend.base_url must not be empty".to_string());
        } else if let Err(e) = url::Url::parse(&self.backend.base_url) {
            errors.push(format!("backend.base_url is not a valid URL: {e}"));
        }
        if self.backend.timeout_seconds == 0 {
            errors.push("backend.timeout_seconds must be greater than zero".to_string());
        }

        if self.rooms.page_size == 0 {
            errors.push("rooms.page_size must be greater than zero".to_string());
        }
        if self.rooms.default_video_width == 0 || self.rooms.default_video_height == 0 {
            errors.push("rooms.default_video_width/height must be non-zero".to_string());
        }

        if !self.streaming.url_template.contains("{name}") {
            errors.push("streaming.url_template must contain a {name} placeholder".to_string());
        }

        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            errors.push(format!(
                "logging.format must be \"json\" or \"pretty\", got {:?}",
                self.logging.format
            ));
        }
        if !matches!(
            self.logging.level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "warning" | "error"
        ) {
            errors.push(format!("logging.level {:?} is not a known level", self.logging.level));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
