// src/scheduler/model.rs

use serde::{Deserialize, Serialize};

use crate::types::{QueueStatus, Stage};

/// Scheduling snapshot of one card, as reported by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInfo {
    pub card_id: i64,
    /// Raw stage code (`type` on the wire).
    #[serde(rename = "type", default)]
    pub stage_code: i64,
    #[serde(default)]
    pub queue: i64,
    /// Stage-dependent: queue position (New), day offset from the
    /// collection epoch (Review), unix timestamp (Learning/Relearning).
    #[serde(default)]
    pub due: i64,
    #[serde(default)]
    pub interval: i64,
    /// Ease factor in permille (2500 = 250%).
    #[serde(default)]
    pub factor: i64,
    #[serde(default)]
    pub reps: i64,
    #[serde(default)]
    pub lapses: i64,
    #[serde(default)]
    pub deck_name: String,
    #[serde(rename = "note", default)]
    pub note_id: i64,
    #[serde(default)]
    pub model_name: String,
}

impl CardInfo {
    /// `None` for stage codes outside 0..=3.
    pub fn stage(&self) -> Option<Stage> {
        Stage::from_code(self.stage_code)
    }

    pub fn queue_status(&self) -> QueueStatus {
        QueueStatus::from_code(self.queue)
    }

    pub fn factor_percent(&self) -> f64 {
        self.factor as f64 / 10.0
    }
}

/// Wire shape of one `cardsInfo` entry. The scheduler answers unknown ids
/// with an entry lacking `cardId`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawCardEntry {
    #[serde(rename = "cardId", default)]
    pub card_id: Option<i64>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl RawCardEntry {
    pub(crate) fn into_card_info(self) -> Result<Option<CardInfo>, serde_json::Error> {
        let Some(card_id) = self.card_id else {
            return Ok(None);
        };
        let mut obj = self.rest;
        obj.insert("cardId".to_string(), serde_json::Value::from(card_id));
        serde_json::from_value(serde_json::Value::Object(obj)).map(Some)
    }
}
