// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DeckgraphError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::DeckgraphError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.store, raw.layout, raw.scheduler))
    }
}

/// Check basic invariants of a raw config.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    validate_paths(cfg)?;
    validate_scheduler(cfg)?;
    Ok(())
}

fn validate_paths(cfg: &RawConfigFile) -> Result<()> {
    if cfg.store.path.as_os_str().is_empty() {
        return Err(DeckgraphError::ConfigError(
            "[store].path must not be empty".to_string(),
        ));
    }
    if cfg.layout.path.as_os_str().is_empty() {
        return Err(DeckgraphError::ConfigError(
            "[layout].path must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_scheduler(cfg: &RawConfigFile) -> Result<()> {
    let sched = &cfg.scheduler;

    if !(sched.url.starts_with("http://") || sched.url.starts_with("https://")) {
        return Err(DeckgraphError::ConfigError(format!(
            "[scheduler].url must be an http(s) URL (got {:?})",
            sched.url
        )));
    }

    if sched.concurrency == 0 {
        return Err(DeckgraphError::ConfigError(
            "[scheduler].concurrency must be >= 1 (got 0)".to_string(),
        ));
    }

    if sched.timeout_secs == 0 {
        return Err(DeckgraphError::ConfigError(
            "[scheduler].timeout_secs must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}
