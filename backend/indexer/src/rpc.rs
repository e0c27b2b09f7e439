//! Soroban RPC client: polls `getEvents` and decodes contract events.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{ContractEvent, EventKind};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RawEvent {
    /// Topic list, decoded by the RPC
    pub topic: Vec<String>,
    /// Event data, decoded by the RPC
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
    #[serde(rename = "pagingToken")]
    pub paging_token: Option<String>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events emitted by any of `contract_ids`.
///
/// * `start_ledger`: the ledger sequence to scan from (inclusive).
/// * `cursor`: optional opaque pagination cursor from a previous response.
/// * `limit`: maximum number of events to return.
///
/// Returns `(events, next_cursor, latest_ledger)`.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_ids: &[String],
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<(Vec<RawEvent>, Option<String>, Option<u64>)> {
    let mut backoff = INITIAL_BACKOFF_SECS;

    loop {
        let params = build_params(contract_ids, start_ledger, cursor, limit);

        let response = client
            .post(rpc_url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "getEvents",
                "params": params,
            }))
            .send()
            .await;

        match response {
            Err(e) => {
                warn!("RPC request failed (will retry in {backoff}s): {e}");
                tokio::time::sleep(Duration::from_secs(backoff)).await;
                backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                continue;
            }
            Ok(resp) => {
                if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    warn!("Rate-limited by RPC (will retry in {backoff}s)");
                    tokio::time::sleep(Duration::from_secs(backoff)).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                    continue;
                }

                let body: RpcResponse = resp.json().await?;

                if let Some(err) = body.error {
                    if is_hard_error(err.code) {
                        return Err(IndexerError::Rpc {
                            code: err.code,
                            message: err.message,
                        });
                    }
                    warn!(
                        "RPC soft error (will retry in {backoff}s): {} {}",
                        err.code, err.message
                    );
                    tokio::time::sleep(Duration::from_secs(backoff)).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                    continue;
                }

                let result = body.result.ok_or_else(|| {
                    IndexerError::EventParse("Empty result from getEvents".to_string())
                })?;

                debug!(
                    "Fetched {} events (latest_ledger={:?})",
                    result.events.len(),
                    result.latest_ledger
                );

                return Ok((result.events, result.cursor, result.latest_ledger));
            }
        }
    }
}

/// Invalid request, unknown method and invalid params are not retried.
fn is_hard_error(code: i64) -> bool {
    matches!(code, -32600 | -32601 | -32602)
}

fn build_params(
    contract_ids: &[String],
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": contract_ids
            }
        ],
        "pagination": {
            "limit": limit
        }
    });

    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Fields pulled out of an event's data payload.
#[derive(Debug, Default, PartialEq, Eq)]
struct Payload {
    actor: Option<String>,
    subject_id: Option<String>,
    amount: Option<String>,
}

/// Decode a page of raw RPC events. Events from failed invocations and
/// events without a topic are dropped.
pub fn decode_events(raw: &[RawEvent]) -> Vec<ContractEvent> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, e)| decode_single(e, index))
        .collect()
}

fn decode_single(raw: &RawEvent, index: usize) -> Option<ContractEvent> {
    if raw.in_successful_contract_call == Some(false) {
        return None;
    }

    let first_topic = raw.topic.first()?;
    let kind = EventKind::from_topic(&extract_symbol(first_topic));

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    let key = raw.topic.get(1).map(|t| extract_u64_or_raw(t));
    let mut payload = decode_data(&raw.value, kind);
    let project_id = if kind.keyed_by_project() {
        key
    } else {
        payload.actor = payload.actor.or(key);
        None
    };

    let event_id = raw
        .id
        .clone()
        .or_else(|| raw.paging_token.clone())
        .unwrap_or_else(|| {
            format!(
                "{ledger}-{}-{index}",
                raw.tx_hash.as_deref().unwrap_or("none")
            )
        });

    Some(ContractEvent {
        event_id,
        event_type: kind.as_str().to_string(),
        project_id,
        subject_id: payload.subject_id,
        actor: payload.actor,
        amount: payload.amount,
        ledger,
        timestamp,
        contract_id: raw.contract_id.clone().unwrap_or_default(),
        tx_hash: raw.tx_hash.clone(),
    })
}

/// Pull apart the JSON `value` blob the RPC returns for event data. Every
/// contract publishes a struct, which arrives as a JSON object keyed by
/// field name.
fn decode_data(value: &Value, kind: EventKind) -> Payload {
    let field = |keys: &[&str]| extract_field(value, keys);
    match kind {
        EventKind::OracleRegistered | EventKind::OracleRevoked | EventKind::OracleAssigned => {
            Payload {
                actor: field(&["oracle"]),
                ..Payload::default()
            }
        }
        EventKind::DataSubmitted => Payload {
            actor: field(&["oracle"]),
            subject_id: field(&["submission_id"]),
            amount: None,
        },
        EventKind::DataUpdated => Payload {
            subject_id: field(&["submission_id"]),
            ..Payload::default()
        },
        EventKind::ManagerAdded => Payload {
            actor: field(&["manager"]),
            ..Payload::default()
        },
        EventKind::MilestoneDefined => Payload {
            actor: None,
            subject_id: field(&["milestone_id"]),
            amount: field(&["reward_amount"]),
        },
        EventKind::ReportSubmitted => Payload {
            actor: field(&["submitter"]),
            subject_id: field(&["report_id"]),
            amount: None,
        },
        EventKind::ReportUpdated | EventKind::ReportVerified => Payload {
            subject_id: field(&["report_id"]),
            ..Payload::default()
        },
        EventKind::MilestoneAchieved | EventKind::MilestonePartial => Payload {
            subject_id: field(&["milestone_id"]),
            ..Payload::default()
        },
        EventKind::ProjectInitialized => Payload {
            amount: field(&["goal"]),
            ..Payload::default()
        },
        EventKind::Donated | EventKind::DonorRefunded => Payload {
            actor: field(&["donor"]),
            subject_id: None,
            amount: field(&["amount"]),
        },
        EventKind::FundsReleased => Payload {
            actor: field(&["released_by"]),
            subject_id: field(&["milestone_id"]),
            amount: field(&["amount"]),
        },
        EventKind::ProjectClosed => Payload {
            amount: field(&["remaining_escrow"]),
            ..Payload::default()
        },
        EventKind::Unknown => Payload::default(),
    }
}

fn extract_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Extract a Soroban Symbol from the decoded topic string.
/// The RPC may return `{"type":"symbol","value":"donated"}` or just the raw string.
fn extract_symbol(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        if let Some(s) = v.get("value").and_then(|x| x.as_str()) {
            return s.to_string();
        }
    }
    raw.to_string()
}

/// Extract a project id or address from a topic entry that might be a JSON
/// object or a raw number/string.
fn extract_u64_or_raw(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        if let Some(n) = v.get("value").and_then(|x| x.as_u64()) {
            return n.to_string();
        }
        if let Some(s) = v.get("value").and_then(|x| x.as_str()) {
            return s.to_string();
        }
    }
    raw.to_string()
}

/// Parse an RFC 3339 timestamp into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
