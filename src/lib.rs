// src/lib.rs

pub mod blocking;
pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod inspect;
pub mod layout;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod query;
pub mod scheduler;
pub mod store;
pub mod sync;
pub mod types;

use anyhow::{Result, bail};
use chrono::Local;
use tracing::{debug, info, warn};

use crate::cli::{CliArgs, Command};
use crate::config::{ConfigFile, load_for_cli};
use crate::scheduler::{AnkiConnectClient, SchedulerClient, resolve_epoch};
use crate::store::SqliteStore;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the store and scheduler client
/// - the requested command and its output
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_for_cli(args.config.as_deref())?;
    debug!(?cfg, "effective config");

    let today = Local::now().date_naive();

    match args.command {
        Command::Rebuild => {
            let client = AnkiConnectClient::from_config(&cfg.scheduler)?;
            let summary = pipeline::rebuild(&cfg, &client, today).await?;
            if args.json {
                output::print_json(&summary)?;
            } else {
                output::print_rebuild(&summary);
            }
        }
        Command::SyncItem { id } => {
            let client = AnkiConnectClient::from_config(&cfg.scheduler)?;
            let mut store = open_existing_store(&cfg)?;
            let epoch = resolve_epoch(&cfg.scheduler);
            let result = pipeline::sync_item(&mut store, &client, &id, epoch, today).await?;
            if args.json {
                output::print_json(&result)?;
            } else {
                output::print_item_sync(&result);
            }
        }
        Command::Report => {
            let store = open_existing_store(&cfg)?;
            let report = query::blocking_report(&store)?;
            if args.json {
                output::print_json(&report)?;
            } else {
                output::print_report(&report);
            }
        }
        Command::Due => {
            let store = open_existing_store(&cfg)?;
            let items = query::due_items(&store, today)?;
            if args.json {
                output::print_json(&items)?;
            } else {
                output::print_due(&items);
            }
        }
        Command::Blocking => {
            let store = open_existing_store(&cfg)?;
            let ids = query::blocking_ids(&store)?;
            if args.json {
                output::print_json(&ids)?;
            } else {
                output::print_ids(&ids);
            }
        }
        Command::Inspect { id } => {
            let client = AnkiConnectClient::from_config(&cfg.scheduler)?;
            let epoch = resolve_epoch(&cfg.scheduler);
            let Some(inspection) =
                pipeline::inspect_item(&client, &id, epoch, Local::now()).await?
            else {
                bail!("item {id} not found in scheduler");
            };
            if args.json {
                output::print_json(&inspection)?;
            } else {
                output::print_inspection(&id, &inspection);
            }
        }
        Command::Status => {
            let client = AnkiConnectClient::from_config(&cfg.scheduler)?;
            print_status(&cfg, &client).await;
        }
    }

    Ok(())
}

/// Open the store for queries / incremental sync; it must already exist.
fn open_existing_store(cfg: &ConfigFile) -> Result<SqliteStore> {
    if !cfg.store.path.is_file() {
        bail!(
            "no graph database at {}; run `deckgraph rebuild` first",
            cfg.store.path.display()
        );
    }
    Ok(SqliteStore::open(&cfg.store.path)?)
}

/// Report scheduler reachability and epoch availability.
async fn print_status(cfg: &ConfigFile, client: &AnkiConnectClient) {
    match client.version().await {
        Ok(version) => {
            info!(url = %client.url(), version, "scheduler reachable");
            println!("Scheduler: connected ({}, protocol v{version})", client.url());
        }
        Err(e) => {
            warn!(url = %client.url(), error = %e, "scheduler unreachable");
            println!("Scheduler: not connected ({}): {e}", client.url());
        }
    }

    match resolve_epoch(&cfg.scheduler) {
        Some(epoch) => println!(
            "Collection epoch: {}",
            epoch.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        ),
        None => println!("Collection epoch: not found"),
    }

    println!("Store: {}", cfg.store.path.display());
    println!("Layout: {}", cfg.layout.path.display());
}
