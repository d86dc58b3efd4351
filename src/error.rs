//! Crate-wide error type.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("could not parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("could not serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("score store is not valid JSON: {0}")]
    StoreFormat(#[from] serde_json::Error),

    #[error("could not determine config/data directories for this platform")]
    NoProjectDirs,
}

pub type Result<T> = std::result::Result<T, Error>;
