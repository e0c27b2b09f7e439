//! # Storage
//!
//! ## Instance storage
//!
//! | Key            | Type  | Description              |
//! |----------------|-------|--------------------------|
//! | `TotalReports` | `u64` | Accepted report counter  |
//!
//! ## Persistent storage
//!
//! | Key                        | Type           | Description             |
//! |----------------------------|----------------|-------------------------|
//! | `Managers(project)`        | `Vec<Address>` | Authorized managers     |
//! | `Milestone(project, id)`   | `Milestone`    | Target definition       |
//! | `Report(project, id)`      | `Report`       | Report and its status   |

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{Milestone, Report};

// ── TTL Constants ────────────────────────────────────────────────────

const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    TotalReports,
    Managers(u64),
    Milestone(u64, u64),
    Report(u64, u64),
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

// ── Counters ─────────────────────────────────────────────────────────

pub fn get_total_reports(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::TotalReports)
        .unwrap_or(0)
}

pub fn increment_total_reports(env: &Env) -> u64 {
    let next = get_total_reports(env) + 1;
    env.storage().instance().set(&DataKey::TotalReports, &next);
    bump_instance(env);
    next
}

// ── Managers ─────────────────────────────────────────────────────────

/// Managers of `project_id`, empty if none were registered yet.
pub fn load_managers(env: &Env, project_id: u64) -> Vec<Address> {
    let key = DataKey::Managers(project_id);
    match env.storage().persistent().get(&key) {
        Some(managers) => {
            bump_persistent(env, &key);
            managers
        }
        None => Vec::new(env),
    }
}

pub fn save_managers(env: &Env, project_id: u64, managers: &Vec<Address>) {
    let key = DataKey::Managers(project_id);
    env.storage().persistent().set(&key, managers);
    bump_persistent(env, &key);
}

// ── Milestones ───────────────────────────────────────────────────────

pub fn load_milestone(env: &Env, project_id: u64, milestone_id: u64) -> Option<Milestone> {
    let key = DataKey::Milestone(project_id, milestone_id);
    let milestone = env.storage().persistent().get(&key);
    if milestone.is_some() {
        bump_persistent(env, &key);
    }
    milestone
}

pub fn has_milestone(env: &Env, project_id: u64, milestone_id: u64) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Milestone(project_id, milestone_id))
}

pub fn save_milestone(env: &Env, project_id: u64, milestone_id: u64, milestone: &Milestone) {
    let key = DataKey::Milestone(project_id, milestone_id);
    env.storage().persistent().set(&key, milestone);
    bump_persistent(env, &key);
}

// ── Reports ──────────────────────────────────────────────────────────

pub fn load_report(env: &Env, project_id: u64, report_id: u64) -> Option<Report> {
    let key = DataKey::Report(project_id, report_id);
    let report = env.storage().persistent().get(&key);
    if report.is_some() {
        bump_persistent(env, &key);
    }
    report
}

pub fn has_report(env: &Env, project_id: u64, report_id: u64) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Report(project_id, report_id))
}

pub fn save_report(env: &Env, project_id: u64, report_id: u64, report: &Report) {
    let key = DataKey::Report(project_id, report_id);
    env.storage().persistent().set(&key, report);
    bump_persistent(env, &key);
}
