use mailblocks_engine::CompileOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for `{field}` in {config_path}: {reason}")]
    InvalidValue {
        config_path: PathBuf,
        field: &'static str,
        reason: String,
    },
}

/// User settings; every field may be omitted from the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where relative template names are resolved
    pub templates_path: PathBuf,
    /// Layout table width in pixels
    pub content_width: u32,
    /// Mobile media-query breakpoint in pixels
    pub mobile_breakpoint: u32,
    pub body_background: String,
}

impl Default for Config {
    fn default() -> Self {
        let layout = CompileOptions::default();
        Self {
            templates_path: Self::default_templates_path(),
            content_width: layout.content_width,
            mobile_breakpoint: layout.mobile_breakpoint,
            body_background: layout.body_background,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;
        config.validate(config_path)?;

        // Expand shell variables and tilde in the templates directory
        config.templates_path =
            Self::expand_path(&config.templates_path).unwrap_or(config.templates_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// The saved config, or defaults when no file exists yet
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/mailblocks");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn default_templates_path() -> PathBuf {
        let templates_dir = shellexpand::tilde("~/.config/mailblocks/templates");
        PathBuf::from(templates_dir.as_ref())
    }

    /// Template file for `name`; absolute paths are used as given
    pub fn template_path(&self, name: &Path) -> PathBuf {
        let expanded = Self::expand_path(name).unwrap_or_else(|| name.to_path_buf());
        if expanded.is_absolute() {
            expanded
        } else {
            self.templates_path.join(expanded)
        }
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            content_width: self.content_width,
            mobile_breakpoint: self.mobile_breakpoint,
            body_background: self.body_background.clone(),
        }
    }

    fn validate(&self, config_path: &Path) -> Result<(), ConfigError> {
        let invalid = |field, reason: &str| ConfigError::InvalidValue {
            config_path: config_path.to_path_buf(),
            field,
            reason: reason.to_string(),
        };
        if self.content_width == 0 {
            return Err(invalid("content_width", "must be greater than zero"));
        }
        if self.body_background.trim().is_empty() {
            return Err(invalid("body_background", "must not be empty"));
        }
        Ok(())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
