// src/layout/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::{DeckgraphError, Result};
use crate::layout::model::LayoutDocument;

/// Read and parse a layout document from disk.
///
/// An unreadable file is an `IoError`; malformed JSON is a `LayoutError`.
/// Both are fatal for a rebuild and happen before any store mutation.
pub fn load_layout(path: impl AsRef<Path>) -> Result<LayoutDocument> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let doc = parse_layout(&contents)
        .map_err(|e| DeckgraphError::LayoutError(format!("{}: {e}", path.display())))?;
    debug!(
        path = ?path,
        items = doc.items.len(),
        groups = doc.groups.len(),
        arrows = doc.arrows.len(),
        "loaded layout"
    );
    Ok(doc)
}

/// Parse a layout document from a JSON string.
pub fn parse_layout(json: &str) -> std::result::Result<LayoutDocument, serde_json::Error> {
    serde_json::from_str(json)
}
