//! Top-level configuration.
//!
//! A [`HelpdexConfig`] groups the loader and search settings together with
//! the UI locale. It can be read from a JSON file; missing fields fall back
//! to their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::loader::config::LoaderConfig;
use crate::messages::DEFAULT_LOCALE;
use crate::search::config::SearchConfig;

/// Configuration of a help viewer session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpdexConfig {
    /// Book loading settings.
    pub loader: LoaderConfig,

    /// Query settings.
    pub search: SearchConfig,

    /// Locale used to resolve UI messages, e.g. `de` or `pt_BR`.
    pub locale: String,
}

impl Default for HelpdexConfig {
    fn default() -> Self {
        HelpdexConfig {
            loader: LoaderConfig::default(),
            search: SearchConfig::default(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl HelpdexConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path)?;
        let config: HelpdexConfig = serde_json::from_slice(&bytes)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.loader.validate()?;
        self.search.validate()?;
        Ok(())
    }
}
