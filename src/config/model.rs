// src/config/model.rs

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [store]
/// path = "data/graph.db"
///
/// [layout]
/// path = "data/card_positions.json"
///
/// [scheduler]
/// url = "http://localhost:8765"
/// concurrency = 4
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub layout: LayoutSection,

    #[serde(default)]
    pub scheduler: SchedulerSection,
}

/// Validated configuration. Only constructed through
/// `ConfigFile::try_from(RawConfigFile)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub store: StoreSection,
    pub layout: LayoutSection,
    pub scheduler: SchedulerSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        store: StoreSection,
        layout: LayoutSection,
        scheduler: SchedulerSection,
    ) -> Self {
        Self {
            store,
            layout,
            scheduler,
        }
    }

    /// Resolve relative `store.path` / `layout.path` against `base`
    /// (normally the directory holding the config file).
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.store.path = resolve(base, &self.store.path);
        self.layout.path = resolve(base, &self.layout.path);
        self.scheduler.collection_path = self
            .scheduler
            .collection_path
            .as_deref()
            .map(|p| resolve(base, p));
        self
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        let raw = RawConfigFile::default();
        Self::new_unchecked(raw.store, raw.layout, raw.scheduler)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || base.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// `[store]` section: where the graph database lives.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSection {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data/graph.db")
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// `[layout]` section: the canvas document describing items, groups and
/// arrows.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutSection {
    #[serde(default = "default_layout_path")]
    pub path: PathBuf,
}

fn default_layout_path() -> PathBuf {
    PathBuf::from("data/card_positions.json")
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            path: default_layout_path(),
        }
    }
}

/// `[scheduler]` section: how to reach the external scheduler.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerSection {
    /// Endpoint accepting `{"action", "params", "version"}` JSON posts.
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_api_version")]
    pub api_version: u32,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of item queries in flight during a sync.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Collection database used to look up the epoch. If `None`, well-known
    /// locations are searched.
    #[serde(default)]
    pub collection_path: Option<PathBuf>,

    /// Explicit epoch (unix seconds); skips the collection lookup entirely.
    #[serde(default)]
    pub epoch: Option<i64>,
}

fn default_url() -> String {
    "http://localhost:8765".to_string()
}

fn default_api_version() -> u32 {
    6
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_concurrency() -> usize {
    4
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
            concurrency: default_concurrency(),
            collection_path: None,
            epoch: None,
        }
    }
}
