// src/layout/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::ItemId;

/// Canvas layout document as saved by the authoring UI.
///
/// ```json
/// {
///   "cards":  { "101": { "x": 10, "y": 20 }, "102": {} },
///   "groups": { "g1": { "cards": ["102", "103"] } },
///   "arrows": [ { "from": "101", "to": "g1" } ]
/// }
/// ```
///
/// Item metadata (positions, sizes, ...) is irrelevant here and kept as raw
/// JSON. All three collections default to empty.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LayoutDocument {
    #[serde(default, alias = "cards")]
    pub items: BTreeMap<ItemId, serde_json::Value>,

    #[serde(default)]
    pub groups: BTreeMap<String, GroupSpec>,

    #[serde(default)]
    pub arrows: Vec<Arrow>,
}

/// A group is either a bare member list or an object carrying one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GroupSpec {
    Members(Vec<ItemId>),
    Object {
        #[serde(default, alias = "cards")]
        members: Vec<ItemId>,
    },
}

impl GroupSpec {
    pub fn members(&self) -> &[ItemId] {
        match self {
            GroupSpec::Members(m) => m,
            GroupSpec::Object { members } => members,
        }
    }
}

/// Arrow between two endpoints, each an item id or a group id.
///
/// Endpoints are optional so that a half-drawn arrow does not fail the whole
/// document; such arrows are skipped when building the graph.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Arrow {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

impl Arrow {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    /// Both endpoints, if present and non-empty.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        let from = self.from.as_deref().filter(|s| !s.is_empty())?;
        let to = self.to.as_deref().filter(|s| !s.is_empty())?;
        Some((from, to))
    }
}
