//! Long-running background task that polls the Soroban RPC and writes
//! decoded contract events to the database.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::config::Config;
use crate::db;
use crate::rpc;

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub client: Client,
}

/// Poll forever, sleeping `poll_interval_secs` between iterations.
pub async fn run(state: Arc<IndexerState>) {
    info!(
        "Indexer starting, contracts: {}",
        state.config.contract_ids.join(", ")
    );

    // Resume from the stored cursor; fall back to the configured start ledger.
    let last_ledger = db::get_last_ledger(&state.pool).await.unwrap_or(0);
    let mut cursor = db::get_cursor_string(&state.pool).await.unwrap_or(None);
    let mut current_ledger = resume_ledger(last_ledger, state.config.start_ledger);

    info!("Resuming from ledger {current_ledger}");

    loop {
        match poll_once(
            &state.pool,
            &state.client,
            &state.config,
            current_ledger,
            cursor.as_deref(),
        )
        .await
        {
            Ok((next_ledger, next_cursor)) => {
                current_ledger = next_ledger;
                cursor = next_cursor;
            }
            Err(e) => {
                error!("Indexer poll error: {e}");
            }
        }

        tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)).await;
    }
}

fn resume_ledger(stored: i64, configured: u32) -> u32 {
    if stored > 0 {
        u32::try_from(stored).unwrap_or(u32::MAX)
    } else {
        configured
    }
}

/// Ledger to scan from next, never moving backwards.
///
/// A short page means the scan caught up, so the next poll can start at the
/// latest ledger the RPC reported. A full page may have stopped mid-range;
/// only the highest ledger actually seen is safe to skip to, since events
/// re-read from that ledger are dropped as duplicates on insert.
fn next_start_ledger(
    start_ledger: u32,
    page: &[rpc::RawEvent],
    limit: u32,
    latest_ledger: Option<u64>,
) -> u32 {
    let to_u32 = |l: u64| u32::try_from(l).unwrap_or(u32::MAX);
    let target = if page.len() < limit as usize {
        latest_ledger
    } else {
        page.iter().filter_map(|e| e.ledger).max()
    };
    target.map(to_u32).unwrap_or(start_ledger).max(start_ledger)
}

/// Perform a single poll iteration.
///
/// Returns `(next_start_ledger, next_cursor)`.
async fn poll_once(
    pool: &SqlitePool,
    client: &Client,
    config: &Config,
    start_ledger: u32,
    cursor: Option<&str>,
) -> crate::errors::Result<(u32, Option<String>)> {
    let (raw_events, next_cursor, latest_ledger) = rpc::fetch_events(
        client,
        &config.rpc_url,
        &config.contract_ids,
        start_ledger,
        cursor,
        config.events_per_page,
    )
    .await?;

    if !raw_events.is_empty() {
        let decoded = rpc::decode_events(&raw_events);
        let inserted = db::insert_events(pool, &decoded).await?;
        info!(
            "Polled {} raw events, {} new records stored",
            raw_events.len(),
            inserted
        );
    }

    let next_ledger = next_start_ledger(
        start_ledger,
        &raw_events,
        config.events_per_page,
        latest_ledger,
    );

    // Persist cursor so restarts are deterministic.
    db::save_cursor(pool, next_ledger as i64, next_cursor.as_deref()).await?;

    Ok((next_ledger, next_cursor))
}
