//! JSON configuration for detail screen loading and logging

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::DEFAULT_LIMIT;

const DEFAULT_PAGE_SIZE: usize = 20;
const DEFAULT_LOG_DIR: &str = ".logs";
const DEFAULT_LOG_FILTER: &str = "spotify_detail=debug,rspotify=info,warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailConfig {
    /// Items kept from the first page of non-paginated sections
    pub section_limit: usize,
    /// Items requested per fetch
    pub page_size: usize,
    /// Let the API pick the market from the access token's account
    pub market_from_token: bool,
    pub logging: LoggingConfig,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            section_limit: DEFAULT_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
            market_from_token: true,
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingConfig {
    pub directory: String,
    /// Used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_LOG_DIR.to_string(),
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl DetailConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
