#![allow(dead_code)]

use std::path::Path;

use deckgraph::config::{ConfigFile, RawConfigFile};
use deckgraph::layout::{Arrow, GroupSpec, LayoutDocument};
use deckgraph::scheduler::CardInfo;

/// Builder for `LayoutDocument` to simplify test setup.
pub struct LayoutBuilder {
    doc: LayoutDocument,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self {
            doc: LayoutDocument::default(),
        }
    }

    pub fn item(mut self, id: &str) -> Self {
        self.doc
            .items
            .insert(id.to_string(), serde_json::json!({ "x": 0, "y": 0 }));
        self
    }

    pub fn items(mut self, ids: &[&str]) -> Self {
        for id in ids {
            self = self.item(id);
        }
        self
    }

    pub fn group(mut self, id: &str, members: &[&str]) -> Self {
        self.doc.groups.insert(
            id.to_string(),
            GroupSpec::Members(members.iter().map(|m| m.to_string()).collect()),
        );
        self
    }

    pub fn arrow(mut self, from: &str, to: &str) -> Self {
        self.doc.arrows.push(Arrow::new(from, to));
        self
    }

    /// Arrow with a missing endpoint, as left behind by a half-drawn edge.
    pub fn dangling_arrow(mut self, from: &str) -> Self {
        self.doc.arrows.push(Arrow {
            from: Some(from.to_string()),
            to: None,
        });
        self
    }

    pub fn build(self) -> LayoutDocument {
        self.doc
    }
}

impl Default for LayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `CardInfo`.
pub struct CardInfoBuilder {
    card: CardInfo,
}

impl CardInfoBuilder {
    pub fn new(card_id: i64) -> Self {
        Self {
            card: CardInfo {
                card_id,
                stage_code: 0,
                queue: 0,
                due: 0,
                interval: 0,
                factor: 0,
                reps: 0,
                lapses: 0,
                deck_name: "test".to_string(),
                note_id: card_id,
                model_name: "Basic".to_string(),
            },
        }
    }

    /// New card, first in the new queue.
    pub fn new_card(card_id: i64) -> Self {
        Self::new(card_id).stage(0).queue(0).due(1)
    }

    /// Review card due `day` days after the collection epoch.
    pub fn review(card_id: i64, day: i64) -> Self {
        Self::new(card_id).stage(2).queue(2).due(day).interval(1).factor(2500)
    }

    /// Learning card due at unix timestamp `ts`.
    pub fn learning(card_id: i64, ts: i64) -> Self {
        Self::new(card_id).stage(1).queue(1).due(ts)
    }

    pub fn stage(mut self, code: i64) -> Self {
        self.card.stage_code = code;
        self
    }

    pub fn queue(mut self, queue: i64) -> Self {
        self.card.queue = queue;
        self
    }

    pub fn due(mut self, due: i64) -> Self {
        self.card.due = due;
        self
    }

    pub fn interval(mut self, interval: i64) -> Self {
        self.card.interval = interval;
        self
    }

    pub fn factor(mut self, factor: i64) -> Self {
        self.card.factor = factor;
        self
    }

    pub fn suspended(self) -> Self {
        self.queue(-1)
    }

    pub fn build(self) -> CardInfo {
        self.card
    }
}

/// Builder for `ConfigFile`.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn store_path(mut self, path: &Path) -> Self {
        self.config.store.path = path.to_path_buf();
        self
    }

    pub fn layout_path(mut self, path: &Path) -> Self {
        self.config.layout.path = path.to_path_buf();
        self
    }

    pub fn epoch(mut self, secs: i64) -> Self {
        self.config.scheduler.epoch = Some(secs);
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.scheduler.concurrency = n;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
