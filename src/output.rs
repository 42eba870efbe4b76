// src/output.rs

//! Text / JSON rendering of command results on stdout.

use anyhow::Result;
use serde::Serialize;

use crate::inspect::Inspection;
use crate::pipeline::{ItemSyncResult, RebuildSummary};
use crate::query::{BlockingReport, DueItem};

/// Print `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_rebuild(summary: &RebuildSummary) {
    println!("Graph:");
    println!("  Edges: {}", summary.edge_count);
    if summary.skipped_arrows > 0 {
        println!("  Skipped arrows: {}", summary.skipped_arrows);
    }
    if let Some(ref node) = summary.cycle_node {
        println!("  Cycle detected through: {node}");
    }
    println!("Sync:");
    println!("  Requested: {}", summary.sync.requested);
    println!("  Synced: {}", summary.sync.synced);
    if !summary.sync.missing.is_empty() {
        println!("  Missing: {:?}", summary.sync.missing);
    }
    if !summary.sync.failed.is_empty() {
        println!("  Failed: {:?}", summary.sync.failed);
    }
    print_report(&summary.report);
}

pub fn print_report(report: &BlockingReport) {
    println!("Blocking report:");
    println!("  Total items: {}", report.total_items);
    println!("  Blocking: {}", report.blocking_count);
    println!("  Blocked: {}", report.blocked_count);
    if !report.blocking.is_empty() {
        println!("  Blocking items: {:?}", report.blocking_ids());
    }
    if !report.blocked.is_empty() {
        println!("  Blocked items: {:?}", report.blocked_ids());
    }
}

pub fn print_item_sync(result: &ItemSyncResult) {
    if result.updated {
        println!("{}: updated", result.id);
    } else {
        println!("{}: unchanged (missing or unreachable)", result.id);
    }
    println!(
        "  Blocking: {}  Blocked: {}  (of {})",
        result.recompute.blocking, result.recompute.blocked, result.recompute.items
    );
}

pub fn print_due(items: &[DueItem]) {
    if items.is_empty() {
        println!("Nothing due.");
        return;
    }
    println!("{} due:", items.len());
    for item in items {
        let due = item
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "now".to_string());
        println!("  {:<16} {:<11} {}", item.id, item.stage.label(), due);
    }
}

pub fn print_ids(ids: &[String]) {
    for id in ids {
        println!("{id}");
    }
}

pub fn print_inspection(id: &str, inspection: &Inspection) {
    let card = &inspection.card;
    println!("Item: {id}");
    match inspection.epoch {
        Some(epoch) => println!("Collection created: {}", epoch.format("%Y-%m-%d %H:%M:%S")),
        None => println!("Collection created: unknown"),
    }
    match inspection.stage {
        Some(stage) => println!("Stage: {stage}"),
        None => println!("Stage: unknown ({})", card.stage_code),
    }
    println!("Queue: {}", inspection.queue_status.label());
    println!("Due (raw): {}", card.due);
    println!("Interval: {} days", card.interval);
    println!("Ease: {:.1}%", card.factor_percent());
    if !card.deck_name.is_empty() {
        println!("Deck: {}", card.deck_name);
    }
    println!("Due: {}", inspection.summary);
}
