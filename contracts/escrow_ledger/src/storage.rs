//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by the ledger.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key       | Type      | Description                          |
//! |-----------|-----------|--------------------------------------|
//! | `Admin`   | `Address` | Ledger administrator                 |
//! | `Custody` | `i128`    | Aggregate escrow across all projects |
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                      | Type            | Description                |
//! |--------------------------|-----------------|----------------------------|
//! | `ProjConfig(id)`         | `ProjectConfig` | Immutable configuration    |
//! | `ProjState(id)`          | `ProjectState`  | Mutable counters           |
//! | `Donation(id, donor)`    | `Donation`      | Cumulative donor record    |
//! | `Release(id, milestone)` | `EscrowRelease` | One-shot release record    |
//!
//! Donations hit only `ProjState` and `Donation`; the config entry is read
//! but never rewritten.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{Donation, EscrowRelease, Project, ProjectConfig, ProjectState};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Ledger administrator (Instance).
    Admin,
    /// Aggregate custody balance (Instance).
    Custody,
    /// Immutable project configuration keyed by ID (Persistent).
    ProjConfig(u64),
    /// Mutable project state keyed by ID (Persistent).
    ProjState(u64),
    /// Donation keyed by `(project_id, donor)` (Persistent).
    Donation(u64, Address),
    /// Release keyed by `(project_id, milestone_id)` (Persistent).
    Release(u64, u64),
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

pub fn get_custody(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::Custody)
        .unwrap_or(0)
}

pub fn set_custody(env: &Env, balance: i128) {
    env.storage().instance().set(&DataKey::Custody, &balance);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

pub fn has_project(env: &Env, id: u64) -> bool {
    env.storage().persistent().has(&DataKey::ProjConfig(id))
}

/// Save the immutable config and the initial state of a new project.
pub fn save_project(env: &Env, project: &Project) {
    let config_key = DataKey::ProjConfig(project.id);
    let config = ProjectConfig {
        id: project.id,
        goal: project.goal,
        report_verifier: project.report_verifier.clone(),
    };
    env.storage().persistent().set(&config_key, &config);
    bump_persistent(env, &config_key);

    let state = ProjectState {
        status: project.status,
        raised: project.raised,
        released: project.released,
        refunded: project.refunded,
        donor_count: project.donor_count,
        escrow_balance: project.escrow_balance,
    };
    save_project_state(env, project.id, &state);
}

/// Load the full `Project` by combining config and state.
pub fn load_project(env: &Env, id: u64) -> Option<Project> {
    let config = load_project_config(env, id)?;
    let state = load_project_state(env, id)?;
    Some(Project {
        id: config.id,
        status: state.status,
        goal: config.goal,
        raised: state.raised,
        released: state.released,
        refunded: state.refunded,
        donor_count: state.donor_count,
        escrow_balance: state.escrow_balance,
        report_verifier: config.report_verifier,
    })
}

pub fn load_project_config(env: &Env, id: u64) -> Option<ProjectConfig> {
    let key = DataKey::ProjConfig(id);
    let config = env.storage().persistent().get(&key);
    if config.is_some() {
        bump_persistent(env, &key);
    }
    config
}

pub fn load_project_state(env: &Env, id: u64) -> Option<ProjectState> {
    let key = DataKey::ProjState(id);
    let state = env.storage().persistent().get(&key);
    if state.is_some() {
        bump_persistent(env, &key);
    }
    state
}

pub fn save_project_state(env: &Env, id: u64, state: &ProjectState) {
    let key = DataKey::ProjState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

pub fn load_donation(env: &Env, project_id: u64, donor: &Address) -> Option<Donation> {
    let key = DataKey::Donation(project_id, donor.clone());
    let donation = env.storage().persistent().get(&key);
    if donation.is_some() {
        bump_persistent(env, &key);
    }
    donation
}

pub fn save_donation(env: &Env, project_id: u64, donor: &Address, donation: &Donation) {
    let key = DataKey::Donation(project_id, donor.clone());
    env.storage().persistent().set(&key, donation);
    bump_persistent(env, &key);
}

pub fn has_release(env: &Env, project_id: u64, milestone_id: u64) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Release(project_id, milestone_id))
}

pub fn load_release(env: &Env, project_id: u64, milestone_id: u64) -> Option<EscrowRelease> {
    let key = DataKey::Release(project_id, milestone_id);
    let release = env.storage().persistent().get(&key);
    if release.is_some() {
        bump_persistent(env, &key);
    }
    release
}

pub fn save_release(env: &Env, project_id: u64, milestone_id: u64, release: &EscrowRelease) {
    let key = DataKey::Release(project_id, milestone_id);
    env.storage().persistent().set(&key, release);
    bump_persistent(env, &key);
}
