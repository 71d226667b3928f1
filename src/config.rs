// Global configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use crate::engine::OutputFormat;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ffmpeg: FfmpegConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FfmpegConfig {
    /// Explicit ffmpeg binary; when unset a bundled `extra/bin/ffmpeg` or PATH is used
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Output container used when `--format` is not given
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Preferred encoder; ignored when it did not probe successfully
    #[serde(default)]
    pub encoder: Option<String>,

    /// Show the terminal dashboard during conversion (plain lines otherwise)
    #[serde(default = "default_true_config")]
    pub use_tui: bool,
}

fn default_true_config() -> bool {
    true
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            encoder: None,
            use_tui: true,
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "macos") {
            dirs::home_dir()
                .context("Could not determine home directory")?
                .join(".config")
                .join("gpuconv")
        } else {
            dirs::config_dir()
                .context("Could not determine config directory")?
                .join("gpuconv")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from disk, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).with_context(|| {
                format!("Failed to read config file: {}", config_path.display())
            })?;

            Self::from_toml(&contents).with_context(|| {
                format!("Failed to parse config file: {}", config_path.display())
            })
        } else {
            let config = Config::default();

            // Not being able to write the default is not fatal
            if let Err(e) = config.save() {
                warn!(
                    "Could not create default config file: {:#}. Using built-in defaults; run 'gpuconv init-config' to create one.",
                    e
                );
            }

            Ok(config)
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid config TOML")
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }
}
