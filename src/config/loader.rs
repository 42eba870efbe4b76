// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Name of the config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "Deckgraph.toml";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path, validate it and resolve relative
/// paths against the config file's directory.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let raw_config = load_from_path(path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config.resolve_paths(&config_root_dir(path)))
}

/// Load the config the CLI asked for.
///
/// - explicit path: must exist
/// - no path: `Deckgraph.toml` if present, otherwise built-in defaults
pub fn load_for_cli(explicit: Option<&str>) -> Result<ConfigFile> {
    match explicit {
        Some(p) => {
            info!(path = %p, "loading config");
            load_and_validate(p)
        }
        None => {
            let path = default_config_path();
            if path.is_file() {
                info!(path = ?path, "loading default config");
                load_and_validate(&path)
            } else {
                debug!(path = ?path, "no config file; using defaults");
                Ok(ConfigFile::default())
            }
        }
    }
}

/// Path of the implicit config file in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}

/// Directory relative paths inside the config are resolved against.
///
/// A bare filename like "Deckgraph.toml" has an empty parent, which means
/// "relative to the working directory".
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::new(),
    }
}
