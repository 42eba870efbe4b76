// src/scheduler/client.rs

//! Pluggable scheduler client abstraction.
//!
//! Sync code talks to a `SchedulerClient` instead of HTTP directly, so tests
//! can swap in a fake that answers from memory.
//!
//! - `AnkiConnectClient` is the production implementation: JSON posts of
//!   `{"action", "params", "version"}` to a local endpoint.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, trace};

use crate::config::SchedulerSection;
use crate::errors::{DeckgraphError, Result};
use crate::scheduler::model::{CardInfo, RawCardEntry};

/// Boxed future returned by [`SchedulerClient`] methods.
pub type SchedulerFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Trait abstracting the external scheduler's request/response protocol.
pub trait SchedulerClient: Send + Sync {
    /// Current scheduling state of one card; `Ok(None)` if it does not exist.
    fn card_info(&self, card_id: i64) -> SchedulerFuture<'_, Option<CardInfo>>;

    /// Protocol version, used as a reachability check.
    fn version(&self) -> SchedulerFuture<'_, u32>;
}

#[derive(Debug, Serialize)]
struct Request<'a> {
    action: &'a str,
    params: serde_json::Value,
    version: u32,
}

#[derive(Debug, Deserialize)]
struct Response<T> {
    result: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for an AnkiConnect-compatible endpoint.
#[derive(Debug, Clone)]
pub struct AnkiConnectClient {
    client: reqwest::Client,
    url: String,
    api_version: u32,
}

impl AnkiConnectClient {
    pub fn new(url: impl Into<String>, api_version: u32, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            api_version,
        })
    }

    pub fn from_config(cfg: &SchedulerSection) -> Result<Self> {
        Self::new(
            cfg.url.clone(),
            cfg.api_version,
            Duration::from_secs(cfg.timeout_secs),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request<T>(&self, action: &str, params: serde_json::Value) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        let body = Request {
            action,
            params,
            version: self.api_version,
        };
        trace!(action, "scheduler request");

        let response = self.client.post(&self.url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(DeckgraphError::SchedulerError(format!(
                "unexpected status code for {action}: {}",
                response.status()
            )));
        }

        let decoded: Response<T> = response.json().await?;
        if let Some(err) = decoded.error {
            return Err(DeckgraphError::SchedulerError(format!("{action}: {err}")));
        }
        Ok(decoded.result)
    }
}

impl SchedulerClient for AnkiConnectClient {
    fn card_info(&self, card_id: i64) -> SchedulerFuture<'_, Option<CardInfo>> {
        Box::pin(async move {
            let entries: Option<Vec<RawCardEntry>> = self
                .request("cardsInfo", json!({ "cards": [card_id] }))
                .await?;

            let Some(entry) = entries.and_then(|v| v.into_iter().next()) else {
                debug!(card_id, "scheduler returned no entry");
                return Ok(None);
            };

            entry.into_card_info().map_err(|e| {
                DeckgraphError::SchedulerError(format!("malformed card {card_id}: {e}"))
            })
        })
    }

    fn version(&self) -> SchedulerFuture<'_, u32> {
        Box::pin(async move {
            let version: Option<u32> = self.request("version", json!({})).await?;
            version.ok_or_else(|| {
                DeckgraphError::SchedulerError("version: empty result".to_string())
            })
        })
    }
}
