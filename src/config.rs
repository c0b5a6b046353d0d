//! Outline configuration, stored as TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields the stock
//! `// #-- Group :: leaf` annotation syntax.
//!
//! ```toml
//! [syntax]
//! marker = "#--"
//! separator = "::"
//!
//! [watch]
//! debounce_ms = 300
//! ```

use crate::error::OutlineError;
use serde::{Deserialize, Serialize};
use std::{
    fs::{read_to_string, write},
    path::{Path, PathBuf},
};

pub const DEFAULT_MARKER: &str = "#--";
pub const DEFAULT_SEPARATOR: &str = "::";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    pub syntax: SyntaxConfig,
    pub watch: WatchConfig,
}

/// The annotation marker token and the path separator used inside labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxConfig {
    pub marker: String,
    pub separator: String,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        SyntaxConfig {
            marker: DEFAULT_MARKER.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl SyntaxConfig {
    pub fn is_default(&self) -> bool {
        self.marker == DEFAULT_MARKER && self.separator == DEFAULT_SEPARATOR
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Window used to coalesce bursts of file-system events into one refresh.
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        WatchConfig {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl OutlineConfig {
    pub fn from_toml(content: &str) -> Result<Self, OutlineError> {
        let config: OutlineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, OutlineError> {
        tracing::debug!("Reading outline config from {:?}", path.as_ref());
        let content = read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load `path` when given, otherwise fall back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, OutlineError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml(&self) -> Result<String, OutlineError> {
        Ok(toml::to_string(self)?)
    }

    fn validate(&self) -> Result<(), OutlineError> {
        if self.syntax.marker.trim().is_empty() {
            return Err(OutlineError::Config(
                "syntax.marker must not be empty".to_string(),
            ));
        }
        if self.syntax.separator.is_empty() {
            return Err(OutlineError::Config(
                "syntax.separator must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

pub trait ConfigProvider: Send + Sync {
    fn get_config(&self) -> Result<OutlineConfig, OutlineError>;
    fn set_config(&self, config: &OutlineConfig) -> Result<(), OutlineError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfigProvider {
    path: PathBuf,
}

impl TomlConfigProvider {
    pub fn new(path: PathBuf) -> Self {
        TomlConfigProvider { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigProvider for TomlConfigProvider {
    fn get_config(&self) -> Result<OutlineConfig, OutlineError> {
        if !self.path.exists() {
            tracing::debug!("Config file {:?} not found, using defaults.", &self.path);
            return Ok(OutlineConfig::default());
        }
        OutlineConfig::load(&self.path)
    }

    fn set_config(&self, config: &OutlineConfig) -> Result<(), OutlineError> {
        tracing::debug!("Writing outline config to: {:?}", &self.path);
        config.validate()?;
        write(&self.path, config.to_toml()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = OutlineConfig::from_toml("").unwrap();
        assert_eq!(config, OutlineConfig::default());
        assert!(config.syntax.is_default());
        assert_eq!(config.watch.debounce_ms, DEFAULT_DEBOUNCE_MS);
    }

    #[test]
    fn test_partial_override() {
        let config = OutlineConfig::from_toml(
            r#"
[syntax]
marker = "@@"
"#,
        )
        .unwrap();
        assert_eq!(config.syntax.marker, "@@");
        assert_eq!(config.syntax.separator, DEFAULT_SEPARATOR);
        assert!(!config.syntax.is_default());
    }

    #[test]
    fn test_empty_separator_rejected() {
        let err = OutlineConfig::from_toml(
            r#"
[syntax]
separator = ""
"#,
        )
        .unwrap_err();
        assert!(matches!(err, OutlineError::Config(_)));
    }

    #[test]
    fn test_malformed_toml_is_serialization_error() {
        let err = OutlineConfig::from_toml("[syntax\nmarker=").unwrap_err();
        assert!(matches!(err, OutlineError::Serialization(_)));
    }

    #[test]
    fn test_toml_provider_round_trips_through_disk() {
        let temp_dir = TempDir::new().unwrap();
        let provider = TomlConfigProvider::new(temp_dir.path().join("outline.toml"));

        assert_eq!(provider.get_config().unwrap(), OutlineConfig::default());

        let mut config = OutlineConfig::default();
        config.watch.debounce_ms = 50;
        provider.set_config(&config).unwrap();
        assert_eq!(provider.get_config().unwrap(), config);
    }
}
