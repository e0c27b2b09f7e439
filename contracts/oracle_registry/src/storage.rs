//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by the registry.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key                | Type      | Description                         |
//! |--------------------|-----------|-------------------------------------|
//! | `Admin`            | `Address` | Registry administrator              |
//! | `TotalSubmissions` | `u64`     | Global accepted-submission counter  |
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                         | Type         | Description                  |
//! |-----------------------------|--------------|------------------------------|
//! | `Oracle(addr)`              | `OracleInfo` | Oracle identity and counters |
//! | `Data(project, submission)` | `OracleData` | Measurement record           |
//! | `Assigned(project, addr)`   | `bool`       | Presence-only assignment     |

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{OracleData, OracleInfo};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Registry administrator (Instance).
    Admin,
    /// Global submission counter (Instance).
    TotalSubmissions,
    /// Oracle record keyed by account (Persistent).
    Oracle(Address),
    /// Measurement keyed by `(project_id, submission_id)` (Persistent).
    Data(u64, u64),
    /// Assignment marker keyed by `(project_id, oracle)` (Persistent).
    Assigned(u64, Address),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

// ── Instance Storage Helpers ─────────────────────────────────────────

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

pub fn get_admin(env: &Env) -> Option<Address> {
    let admin = env.storage().instance().get(&DataKey::Admin);
    if admin.is_some() {
        bump_instance(env);
    }
    admin
}

pub fn get_total_submissions(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSubmissions)
        .unwrap_or(0)
}

/// Increment the global counter and return the new total.
pub fn increment_total_submissions(env: &Env) -> u64 {
    let next = get_total_submissions(env) + 1;
    env.storage()
        .instance()
        .set(&DataKey::TotalSubmissions, &next);
    bump_instance(env);
    next
}

// ── Persistent Storage Helpers ───────────────────────────────────────

pub fn load_oracle(env: &Env, oracle: &Address) -> Option<OracleInfo> {
    let key = DataKey::Oracle(oracle.clone());
    let info = env.storage().persistent().get(&key);
    if info.is_some() {
        bump_persistent(env, &key);
    }
    info
}

pub fn save_oracle(env: &Env, oracle: &Address, info: &OracleInfo) {
    let key = DataKey::Oracle(oracle.clone());
    env.storage().persistent().set(&key, info);
    bump_persistent(env, &key);
}

pub fn has_data(env: &Env, project_id: u64, submission_id: u64) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Data(project_id, submission_id))
}

pub fn load_data(env: &Env, project_id: u64, submission_id: u64) -> Option<OracleData> {
    let key = DataKey::Data(project_id, submission_id);
    let data = env.storage().persistent().get(&key);
    if data.is_some() {
        bump_persistent(env, &key);
    }
    data
}

pub fn save_data(env: &Env, project_id: u64, submission_id: u64, data: &OracleData) {
    let key = DataKey::Data(project_id, submission_id);
    env.storage().persistent().set(&key, data);
    bump_persistent(env, &key);
}

pub fn is_assigned(env: &Env, project_id: u64, oracle: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Assigned(project_id, oracle.clone()))
}

pub fn set_assigned(env: &Env, project_id: u64, oracle: &Address) {
    let key = DataKey::Assigned(project_id, oracle.clone());
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}
