//! View configuration
//!
//! Settings for the grid and the batch poller: defaults live in code, hosts
//! may persist overrides as JSON next to their other app data.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::batch::PollConfig;
use crate::grid::page::{DEFAULT_PAGE_SIZE, PAGE_SIZE_CHOICES};
use crate::locale::Locale;

/// Errors loading or saving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File content is not valid configuration JSON
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for one grid screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Offered page sizes
    pub page_sizes: Vec<usize>,
    /// Page size used until the user picks one
    pub default_page_size: usize,
    /// Message catalog language
    pub locale: Locale,
    /// Batch poller timing and budget
    pub poll: PollConfig,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            page_sizes: PAGE_SIZE_CHOICES.to_vec(),
            default_page_size: DEFAULT_PAGE_SIZE,
            locale: Locale::default(),
            poll: PollConfig::default(),
        }
    }
}

impl ViewConfig {
    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
