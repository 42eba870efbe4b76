// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckgraphError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Layout error: {0}")]
    LayoutError(String),

    #[error("Store error: {0}")]
    StoreError(#[from] rusqlite::Error),

    #[error("Scheduler error: {0}")]
    SchedulerError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<reqwest::Error> for DeckgraphError {
    fn from(err: reqwest::Error) -> Self {
        DeckgraphError::SchedulerError(err.to_string())
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, DeckgraphError>;
