use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use drink_track_core::{DEFAULT_DAILY_GOAL_ML, DEFAULT_FILE_NAME};

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Path to the JSON data file
    pub data_file: ConfigValue<PathBuf>,
    /// Daily intake goal in ml
    pub daily_goal_ml: ConfigValue<f64>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_file: Option<PathBuf>,
    daily_goal_ml: Option<f64>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_file = ConfigValue::new(
            Self::default_data_dir().join(DEFAULT_FILE_NAME),
            ConfigSource::Default,
        );
        let mut daily_goal_ml = ConfigValue::new(DEFAULT_DAILY_GOAL_ML, ConfigSource::Default);
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(file) = file_config.data_file {
                // Resolve relative paths against config file's directory
                let resolved = if file.is_relative() {
                    path.parent().map(|p| p.join(&file)).unwrap_or(file)
                } else {
                    file
                };
                data_file = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(goal) = file_config.daily_goal_ml {
                daily_goal_ml = ConfigValue::new(goal, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(file) = std::env::var("DRINKTRACK_DATA_FILE") {
            data_file = ConfigValue::new(PathBuf::from(file), ConfigSource::Environment);
        }
        if let Ok(goal) = std::env::var("DRINKTRACK_DAILY_GOAL_ML") {
            let parsed = goal.trim().parse::<f64>().map_err(|_| {
                ConfigError::InvalidValue("DRINKTRACK_DAILY_GOAL_ML".to_string(), goal.clone())
            })?;
            daily_goal_ml = ConfigValue::new(parsed, ConfigSource::Environment);
        }

        if !(daily_goal_ml.value.is_finite() && daily_goal_ml.value > 0.0) {
            return Err(ConfigError::InvalidValue(
                "daily_goal_ml".to_string(),
                daily_goal_ml.value.to_string(),
            ));
        }

        tracing::debug!(
            "Using data file {} ({})",
            data_file.value.display(),
            data_file.source
        );

        Ok(Self {
            data_file,
            daily_goal_ml,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/drinktrack/
    /// - macOS: ~/Library/Application Support/drinktrack/
    /// - Windows: %APPDATA%/drinktrack/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("drinktrack")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/drinktrack/
    /// - macOS: ~/Library/Application Support/drinktrack/
    /// - Windows: %APPDATA%/drinktrack/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("drinktrack")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(String, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(key, value) => {
                write!(
                    f,
                    "Invalid value for {}: '{}' (expected a positive number)",
                    key, value
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
