//! Configuration management for rcg.
//!
//! Parses `rcg.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [code_group]
//! inject_assets = true
//!
//! [code_group.class_names]
//! active_tab_class = "my-active-tab"
//!
//! [output]
//! standalone = false
//! title = "Docs"
//! ```

use std::path::{Path, PathBuf};

use rcg_transform::CodeGroupOptions;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override asset injection.
    pub inject_assets: Option<bool>,
    /// Override standalone document output.
    pub standalone: Option<bool>,
    /// Override the standalone document title.
    pub title: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rcg.toml";

/// Characters that cannot appear in a class token list.
const FORBIDDEN_CLASS_CHARS: &[char] = &['"', '<', '>'];

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Code group transform options.
    pub code_group: CodeGroupOptions,
    /// Output configuration.
    pub output: OutputConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// HTML output configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Wrap rendered fragments in a full HTML document.
    pub standalone: bool,
    /// `<title>` of standalone documents.
    pub title: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `rcg.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Some(path.to_path_buf())
            }
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_config(&cwd)),
        };

        let mut config = match discovered {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(inject_assets) = settings.inject_assets {
            self.code_group.inject_assets = inject_assets;
        }
        if let Some(standalone) = settings.standalone {
            self.output.standalone = standalone;
        }
        if let Some(title) = &settings.title {
            self.output.title = Some(title.clone());
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a class name override contains a
    /// character that cannot appear in a class attribute.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.code_group.class_names.iter() {
            if let Some(c) = value.chars().find(|c| FORBIDDEN_CLASS_CHARS.contains(c)) {
                return Err(ConfigError::Validation(format!(
                    "code_group.class_names.{field} cannot contain '{c}'"
                )));
            }
        }
        Ok(())
    }
}
