// src/pipeline.rs

//! End-to-end operations: full rebuild, single-item sync, inspection.
//!
//! A rebuild runs GraphBuilder → StateSync (full) → BlockingEngine in that
//! order and is not meant to run concurrently with itself.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

use crate::blocking::{RecomputeOutcome, recompute};
use crate::config::ConfigFile;
use crate::dag::build_graph;
use crate::errors::{DeckgraphError, Result};
use crate::inspect::Inspection;
use crate::layout::{LayoutDocument, load_layout};
use crate::query::{BlockingReport, blocking_report};
use crate::scheduler::{SchedulerClient, resolve_epoch};
use crate::store::SqliteStore;
use crate::sync::{FetchOutcome, SyncContext, SyncSummary, sync_all, sync_one};
use crate::types::ItemId;

/// Everything a rebuild did, for printing.
#[derive(Debug, Clone, Serialize)]
pub struct RebuildSummary {
    pub edge_count: usize,
    pub skipped_arrows: usize,
    pub cycle_node: Option<ItemId>,
    pub sync: SyncSummary,
    pub recompute: RecomputeOutcome,
    pub report: BlockingReport,
}

/// Full rebuild driven by config: load the layout, recreate the store,
/// resolve the epoch once and run every phase.
///
/// The layout is parsed before the store is touched, so a malformed
/// document leaves the previous database intact.
pub async fn rebuild<C>(cfg: &ConfigFile, client: &C, today: NaiveDate) -> Result<RebuildSummary>
where
    C: SchedulerClient + ?Sized,
{
    let doc = load_layout(&cfg.layout.path)?;
    let mut store = SqliteStore::create(&cfg.store.path)?;
    let ctx = SyncContext::new(resolve_epoch(&cfg.scheduler), cfg.scheduler.concurrency);
    rebuild_with(&doc, &mut store, client, &ctx, today).await
}

/// Rebuild against an already-open store and an already-parsed layout.
pub async fn rebuild_with<C>(
    doc: &LayoutDocument,
    store: &mut SqliteStore,
    client: &C,
    ctx: &SyncContext,
    today: NaiveDate,
) -> Result<RebuildSummary>
where
    C: SchedulerClient + ?Sized,
{
    let build = build_graph(doc, store)?;
    let sync = sync_all(store, client, &build.item_ids, ctx).await?;
    let recompute = recompute(store, today)?;
    let report = blocking_report(store)?;

    info!(
        total = report.total_items,
        blocking = report.blocking_count,
        blocked = report.blocked_count,
        "rebuild complete"
    );

    Ok(RebuildSummary {
        edge_count: build.edge_count,
        skipped_arrows: build.skipped_arrows,
        cycle_node: build.cycle_node,
        sync,
        recompute,
        report,
    })
}

/// Result of a single-item sync.
#[derive(Debug, Clone, Serialize)]
pub struct ItemSyncResult {
    pub id: ItemId,
    /// `false` when the item was missing or the scheduler failed.
    pub updated: bool,
    pub recompute: RecomputeOutcome,
}

/// Re-sync one item (e.g. after a review was submitted), then run a full
/// blocking recompute.
pub async fn sync_item<C>(
    store: &mut SqliteStore,
    client: &C,
    id: &str,
    epoch: Option<DateTime<Utc>>,
    today: NaiveDate,
) -> Result<ItemSyncResult>
where
    C: SchedulerClient + ?Sized,
{
    let outcome = sync_one(store, client, id, epoch).await?;
    let recompute = recompute(store, today)?;
    Ok(ItemSyncResult {
        id: id.to_string(),
        updated: matches!(outcome, FetchOutcome::Synced(_)),
        recompute,
    })
}

/// Fetch one item's live state. `Ok(None)` if the scheduler does not know it.
pub async fn inspect_item<C>(
    client: &C,
    id: &str,
    epoch: Option<DateTime<Utc>>,
    now: DateTime<Local>,
) -> Result<Option<Inspection>>
where
    C: SchedulerClient + ?Sized,
{
    let card_id: i64 = id
        .trim()
        .parse()
        .map_err(|_| DeckgraphError::SchedulerError(format!("not a card id: {id:?}")))?;

    let card = client.card_info(card_id).await?;
    Ok(card.map(|card| Inspection::new(card, epoch, now)))
}
