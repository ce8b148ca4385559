use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::models::MotionParameters;

pub const ENV_PREFIX: &str = "JOG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found at {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to parse configuration: {source}")]
    ParseError { source: ::config::ConfigError },

    #[error("Failed to serialize configuration: {source}")]
    SerializeError { source: toml::ser::Error },

    #[error("Failed to write configuration file: {source}")]
    WriteError { source: std::io::Error },

    #[error("Configuration validation failed: {message}")]
    ValidationError { message: String },
}

/// Initial text of the jog page fields.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FormDefaults {
    pub absolute_targets: [i64; 2],
    pub relative_distance: i64,
    pub parameters: MotionParameters,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            absolute_targets: [0, 0],
            relative_distance: 100,
            parameters: MotionParameters::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimerConfig {
    pub page_status_interval_ms: u64,
    pub window_status_interval_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            page_status_interval_ms: 100,
            window_status_interval_ms: 1000,
        }
    }
}

impl TimerConfig {
    pub fn page_status_interval(&self) -> Duration {
        Duration::from_millis(self.page_status_interval_ms)
    }

    pub fn window_status_interval(&self) -> Duration {
        Duration::from_millis(self.window_status_interval_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Directory for daily rotated JSON logs. Stdout only when unset.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct JogControllerConfig {
    pub form: FormDefaults,
    pub timers: TimerConfig,
    pub logging: LoggingConfig,
}

impl JogControllerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timers.page_status_interval_ms == 0 || self.timers.window_status_interval_ms == 0
        {
            return Err(ConfigError::ValidationError {
                message: "status intervals must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct ConfigOptions {
    pub config_path: PathBuf,
    pub create_if_missing: bool,
    pub env_prefix: String,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            config_path: Self::default_config_path(),
            create_if_missing: true,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }
}

impl ConfigOptions {
    pub fn default_config_path() -> PathBuf {
        std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("default_config.toml"))
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }
}

#[derive(Debug)]
pub struct ConfigManager {
    options: ConfigOptions,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            options: ConfigOptions::default(),
        }
    }

    pub fn with_options(options: ConfigOptions) -> Self {
        Self { options }
    }

    /// Reads the TOML file, then applies `<PREFIX>_SECTION__KEY` environment
    /// overrides.
    pub fn load(&self) -> anyhow::Result<JogControllerConfig> {
        let config_path = &self.options.config_path;

        if !config_path.exists() {
            if self.options.create_if_missing {
                self.save(&JogControllerConfig::default())
                    .context("Failed to save default config")?;
            } else {
                return Err(ConfigError::FileNotFound {
                    path: config_path.clone(),
                }
                .into());
            }
        }

        let settings = ::config::Config::builder()
            .add_source(
                ::config::File::from(config_path.as_path()).format(::config::FileFormat::Toml),
            )
            .add_source(
                ::config::Environment::with_prefix(&self.options.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ConfigError::ParseError { source: e })?;

        let config: JogControllerConfig = settings
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError { source: e })?;

        config.validate()?;

        Ok(config)
    }

    pub fn save(&self, config: &JogControllerConfig) -> anyhow::Result<()> {
        let config_path = &self.options.config_path;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError { source: e })?;
        }

        let content = toml::to_string_pretty(config)
            .map_err(|e| ConfigError::SerializeError { source: e })?;

        fs::write(config_path, content).map_err(|e| ConfigError::WriteError { source: e })?;

        Ok(())
    }
}

pub fn init_config() -> anyhow::Result<(ConfigManager, JogControllerConfig)> {
    let manager = ConfigManager::new();
    let config = manager.load()?;
    Ok((manager, config))
}

pub fn create_default_config<P: AsRef<Path>>(path: Option<P>) -> anyhow::Result<()> {
    let config_path = path
        .map(|p| p.as_ref().to_path_buf())
        .unwrap_or_else(ConfigOptions::default_config_path);

    let manager = ConfigManager::with_options(ConfigOptions::with_path(config_path));
    manager.save(&JogControllerConfig::default())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(path: PathBuf, prefix: &str) -> ConfigOptions {
        ConfigOptions {
            config_path: path,
            create_if_missing: true,
            env_prefix: prefix.to_string(),
        }
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("jog.toml");
        let manager = ConfigManager::with_options(options(path.clone(), "JOGTEST_CREATE"));

        let config = manager.load().unwrap();

        assert_eq!(config, JogControllerConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn missing_file_is_an_error_when_creation_is_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_options(ConfigOptions {
            create_if_missing: false,
            ..options(dir.path().join("absent.toml"), "JOGTEST_ABSENT")
        });

        let err = manager.load().unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jog.toml");
        fs::write(
            &path,
            "[form]\nrelative_distance = 250\n\n[form.parameters]\nspeed = 900\n",
        )
        .unwrap();

        let config = ConfigManager::with_options(options(path, "JOGTEST_PARTIAL"))
            .load()
            .unwrap();

        assert_eq!(config.form.relative_distance, 250);
        assert_eq!(config.form.parameters.speed, 900);
        assert_eq!(config.form.parameters.acceleration, 1000);
        assert_eq!(config.timers, TimerConfig::default());
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jog.toml");
        create_default_config(Some(&path)).unwrap();

        std::env::set_var("JOGTEST_ENV_TIMERS__PAGE_STATUS_INTERVAL_MS", "50");
        let config = ConfigManager::with_options(options(path, "JOGTEST_ENV"))
            .load()
            .unwrap();
        std::env::remove_var("JOGTEST_ENV_TIMERS__PAGE_STATUS_INTERVAL_MS");

        assert_eq!(config.timers.page_status_interval(), Duration::from_millis(50));
    }

    #[test]
    fn zero_interval_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jog.toml");
        fs::write(&path, "[timers]\nwindow_status_interval_ms = 0\n").unwrap();

        let err = ConfigManager::with_options(options(path, "JOGTEST_ZERO"))
            .load()
            .unwrap_err();

        assert!(err.to_string().contains("validation"));
    }
}
