// src/sync/state_sync.rs

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::scheduler::SchedulerClient;
use crate::store::SqliteStore;
use crate::sync::classify::classify_due;
use crate::types::{ItemId, ItemState};

/// Per-run inputs threaded through a sync.
#[derive(Debug, Clone, Copy)]
pub struct SyncContext {
    /// Collection epoch, fetched once per run. `None` = unknown.
    pub epoch: Option<DateTime<Utc>>,
    /// Maximum number of scheduler queries in flight.
    pub concurrency: usize,
}

impl SyncContext {
    pub fn new(epoch: Option<DateTime<Utc>>, concurrency: usize) -> Self {
        Self {
            epoch,
            concurrency: concurrency.max(1),
        }
    }
}

/// What the scheduler told us about one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Synced(ItemState),
    /// The scheduler does not know the item.
    Missing,
    /// Transport/protocol failure, unparseable id or unknown stage.
    Failed(String),
}

/// Counts and ids from a full sync.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncSummary {
    pub requested: usize,
    pub synced: usize,
    pub missing: Vec<ItemId>,
    pub failed: Vec<ItemId>,
}

/// Query the scheduler for one item and classify its due date.
///
/// Never returns an error: every failure is folded into the outcome so one
/// bad item cannot abort a sync.
pub async fn fetch_item_state<C>(
    client: &C,
    id: &str,
    epoch: Option<DateTime<Utc>>,
) -> FetchOutcome
where
    C: SchedulerClient + ?Sized,
{
    let card_id: i64 = match id.trim().parse() {
        Ok(n) => n,
        Err(_) => return FetchOutcome::Failed(format!("not a card id: {id:?}")),
    };

    let card = match client.card_info(card_id).await {
        Ok(Some(card)) => card,
        Ok(None) => return FetchOutcome::Missing,
        Err(e) => return FetchOutcome::Failed(e.to_string()),
    };

    let Some(stage) = card.stage() else {
        return FetchOutcome::Failed(format!("unknown stage code {}", card.stage_code));
    };

    let due_date = classify_due(stage, card.due, epoch);
    debug!(
        item = %id,
        %stage,
        queue = card.queue,
        raw_due = card.due,
        due = ?due_date,
        "fetched item state"
    );

    FetchOutcome::Synced(ItemState::synced(
        id,
        stage,
        card.queue_status(),
        due_date,
        card.due,
    ))
}

/// Full sync: query every id and atomically replace all item rows.
///
/// - missing items get no row
/// - failed items keep their previous row, if they had one
/// - rows for ids outside `ids` are dropped
///
/// Derived flags of fresh rows start out `false`; run the blocking engine
/// afterwards.
pub async fn sync_all<C>(
    store: &mut SqliteStore,
    client: &C,
    ids: &BTreeSet<ItemId>,
    ctx: &SyncContext,
) -> Result<SyncSummary>
where
    C: SchedulerClient + ?Sized,
{
    info!(
        items = ids.len(),
        concurrency = ctx.concurrency,
        epoch_known = ctx.epoch.is_some(),
        "syncing item state from scheduler"
    );

    let epoch = ctx.epoch;
    let mut fetched: Vec<(ItemId, FetchOutcome)> = stream::iter(ids.iter())
        .map(|id| async move { (id.clone(), fetch_item_state(client, id, epoch).await) })
        .buffer_unordered(ctx.concurrency)
        .collect()
        .await;
    fetched.sort_by(|a, b| a.0.cmp(&b.0));

    let mut summary = SyncSummary {
        requested: ids.len(),
        ..Default::default()
    };
    let mut states = Vec::new();
    let mut keep = BTreeSet::new();

    for (id, outcome) in fetched {
        match outcome {
            FetchOutcome::Synced(state) => states.push(state),
            FetchOutcome::Missing => {
                debug!(item = %id, "item not found in scheduler; skipping");
                summary.missing.push(id);
            }
            FetchOutcome::Failed(reason) => {
                warn!(item = %id, %reason, "could not sync item; skipping");
                keep.insert(id.clone());
                summary.failed.push(id);
            }
        }
    }
    summary.synced = states.len();

    store.replace_states(&states, &keep)?;

    info!(
        synced = summary.synced,
        missing = summary.missing.len(),
        failed = summary.failed.len(),
        "item state sync complete"
    );
    Ok(summary)
}

/// Incremental sync of a single item.
///
/// Only that item's scheduling fields change; its derived flags and every
/// other row are untouched. Missing/failed items leave the store as is.
pub async fn sync_one<C>(
    store: &mut SqliteStore,
    client: &C,
    id: &str,
    epoch: Option<DateTime<Utc>>,
) -> Result<FetchOutcome>
where
    C: SchedulerClient + ?Sized,
{
    let outcome = fetch_item_state(client, id, epoch).await;
    match &outcome {
        FetchOutcome::Synced(state) => {
            store.upsert_state(state)?;
            info!(item = %id, stage = %state.stage, "item state updated");
        }
        FetchOutcome::Missing => {
            warn!(item = %id, "item not found in scheduler; store unchanged");
        }
        FetchOutcome::Failed(reason) => {
            warn!(item = %id, %reason, "could not sync item; store unchanged");
        }
    }
    Ok(outcome)
}
