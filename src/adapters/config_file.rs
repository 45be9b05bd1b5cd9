//! JSON file configuration adapter.
//!
//! Implements [`ConfigPort`] over an optional path.  No path, or a path
//! that does not exist, yields the defaults; anything that does exist must
//! parse and pass [`ControllerConfig::validate`].

use std::path::{Path, PathBuf};

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::ControllerConfig;

#[derive(Debug, Clone, Default)]
pub struct JsonConfigFile {
    path: Option<PathBuf>,
}

impl JsonConfigFile {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Parse and validate a config document.
    pub fn parse(text: &str) -> Result<ControllerConfig, ConfigError> {
        let config: ControllerConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<ControllerConfig, ConfigError> {
        let Some(path) = self.path.as_deref() else {
            info!("CONFIG | no file given, using defaults");
            return Ok(ControllerConfig::default());
        };
        if !path.exists() {
            info!("CONFIG | {} not found, using defaults", path.display());
            return Ok(ControllerConfig::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::parse(&text)?;
        info!("CONFIG | loaded {}", path.display());
        Ok(config)
    }
}
