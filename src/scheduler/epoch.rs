// src/scheduler/epoch.rs

//! Collection epoch lookup.
//!
//! Review-stage due values are day offsets from the moment the collection
//! was created. The scheduler protocol does not expose that value, so it is
//! read from the collection database (`col.crt`, unix seconds).

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use reqwest::Url;
use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info, warn};

use crate::config::SchedulerSection;

/// How long to wait for the scheduler to release its lock on the collection.
const LOCK_TIMEOUT: Duration = Duration::from_secs(15);

/// File name of the collection database inside a profile directory.
pub const COLLECTION_FILE: &str = "collection.anki2";

/// Resolve the epoch for one sync run.
///
/// Order: explicit `epoch` → configured `collection_path` → discovered
/// collection. Any failure yields `None` ("epoch unknown").
pub fn resolve_epoch(cfg: &SchedulerSection) -> Option<DateTime<Utc>> {
    if let Some(secs) = cfg.epoch {
        debug!(secs, "using epoch from config");
        return epoch_from_secs(secs);
    }

    let path = match cfg.collection_path.clone().or_else(find_collection_path) {
        Some(p) => p,
        None => {
            warn!("no collection database found; review due dates will be unknown");
            return None;
        }
    };

    match read_epoch(&path) {
        Some(epoch) => {
            info!(path = ?path, %epoch, "collection epoch loaded");
            Some(epoch)
        }
        None => {
            warn!(path = ?path, "could not read collection epoch");
            None
        }
    }
}

/// Read `crt` from a collection database.
///
/// First a normal read-only open that waits for the lock; if that fails, an
/// `immutable` open that bypasses locking altogether (safe: `crt` is written
/// once at creation).
pub fn read_epoch(path: &Path) -> Option<DateTime<Utc>> {
    if !path.is_file() {
        return None;
    }

    let Some(file) = file_uri(path) else {
        debug!(path = ?path, "collection path cannot be expressed as a file URI");
        return None;
    };
    let uri = format!("{file}?mode=ro");
    if let Some(secs) = read_crt(&uri, LOCK_TIMEOUT) {
        return epoch_from_secs(secs);
    }

    let uri = format!("{file}?mode=ro&immutable=1");
    read_crt(&uri, Duration::ZERO).and_then(epoch_from_secs)
}

/// Absolute, percent-encoded `file:` URI for `path`.
fn file_uri(path: &Path) -> Option<String> {
    let absolute = std::path::absolute(path).ok()?;
    Url::from_file_path(absolute).ok().map(String::from)
}

fn read_crt(uri: &str, timeout: Duration) -> Option<i64> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI;
    let result = Connection::open_with_flags(uri, flags).and_then(|conn| {
        conn.busy_timeout(timeout)?;
        conn.query_row("SELECT crt FROM col", [], |row| row.get::<_, i64>(0))
    });

    match result {
        Ok(secs) => Some(secs),
        Err(e) => {
            debug!(uri, error = %e, "reading crt failed");
            None
        }
    }
}

fn epoch_from_secs(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}

/// Search the usual profile locations for a collection database.
///
/// Each candidate `Anki2` folder is checked for the default `User 1`
/// profile first, then for any other profile (sorted by name).
pub fn find_collection_path() -> Option<PathBuf> {
    let mut bases = Vec::new();
    if let Some(data) = dirs::data_dir() {
        bases.push(data.join("Anki2"));
    }
    if let Some(home) = dirs::home_dir() {
        bases.push(home.join("Library/Application Support/Anki2"));
        bases.push(home.join(".local/share/Anki2"));
        bases.push(home.join("Documents/Anki2"));
        bases.push(home.join("AppData/Roaming/Anki2"));
    }

    for base in bases.iter() {
        if let Some(found) = first_profile_collection(base) {
            return Some(found);
        }
    }
    None
}

fn first_profile_collection(base: &Path) -> Option<PathBuf> {
    let preferred = base.join("User 1").join(COLLECTION_FILE);
    if preferred.is_file() {
        return Some(preferred);
    }

    let mut profiles: Vec<PathBuf> = std::fs::read_dir(base)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_dir())
        .collect();
    profiles.sort();

    profiles
        .into_iter()
        .map(|p| p.join(COLLECTION_FILE))
        .find(|p| p.is_file())
}
