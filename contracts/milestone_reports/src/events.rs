//! Events published by the milestone/report engine.
//!
//! Every topic is `(kind, project_id)`:
//!
//! | Kind      | Data                  |
//! |-----------|-----------------------|
//! | `mgr_add` | [`ManagerAdded`]      |
//! | `ms_def`  | [`MilestoneDefined`]  |
//! | `rpt_sub` | [`ReportSubmitted`]   |
//! | `rpt_upd` | [`ReportUpdated`]     |
//! | `rpt_ver` | [`ReportVerified`]    |
//! | `ms_done` | [`MilestoneOutcome`]  |
//! | `ms_part` | [`MilestoneOutcome`]  |

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, Symbol};

use crate::types::ImpactMetrics;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ManagerAdded {
    pub project_id: u64,
    pub manager: Address,
    pub added_by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneDefined {
    pub project_id: u64,
    pub milestone_id: u64,
    pub targets: ImpactMetrics,
    pub reward_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportSubmitted {
    pub project_id: u64,
    pub report_id: u64,
    pub milestone_id: u64,
    pub submitter: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportUpdated {
    pub project_id: u64,
    pub report_id: u64,
    pub metrics: ImpactMetrics,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportVerified {
    pub project_id: u64,
    pub report_id: u64,
    pub oracle_hash: BytesN<32>,
}

/// Outcome of finalizing a report against its milestone.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneOutcome {
    pub project_id: u64,
    pub milestone_id: u64,
    pub report_id: u64,
    pub metrics: ImpactMetrics,
}

fn publish<D>(env: &Env, kind: Symbol, project_id: u64, data: D)
where
    D: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.events().publish((kind, project_id), data);
}

pub fn emit_manager_added(env: &Env, project_id: u64, manager: Address, added_by: Address) {
    publish(
        env,
        symbol_short!("mgr_add"),
        project_id,
        ManagerAdded {
            project_id,
            manager,
            added_by,
        },
    );
}

pub fn emit_milestone_defined(
    env: &Env,
    project_id: u64,
    milestone_id: u64,
    targets: ImpactMetrics,
    reward_amount: i128,
) {
    publish(
        env,
        symbol_short!("ms_def"),
        project_id,
        MilestoneDefined {
            project_id,
            milestone_id,
            targets,
            reward_amount,
        },
    );
}

pub fn emit_report_submitted(
    env: &Env,
    project_id: u64,
    report_id: u64,
    milestone_id: u64,
    submitter: Address,
) {
    publish(
        env,
        symbol_short!("rpt_sub"),
        project_id,
        ReportSubmitted {
            project_id,
            report_id,
            milestone_id,
            submitter,
        },
    );
}

pub fn emit_report_updated(env: &Env, project_id: u64, report_id: u64, metrics: ImpactMetrics) {
    publish(
        env,
        symbol_short!("rpt_upd"),
        project_id,
        ReportUpdated {
            project_id,
            report_id,
            metrics,
        },
    );
}

pub fn emit_report_verified(env: &Env, project_id: u64, report_id: u64, oracle_hash: BytesN<32>) {
    publish(
        env,
        symbol_short!("rpt_ver"),
        project_id,
        ReportVerified {
            project_id,
            report_id,
            oracle_hash,
        },
    );
}

/// `ms_done` when every target was met, `ms_part` otherwise.
pub fn emit_milestone_outcome(env: &Env, all_met: bool, outcome: MilestoneOutcome) {
    let kind = if all_met {
        symbol_short!("ms_done")
    } else {
        symbol_short!("ms_part")
    };
    publish(env, kind, outcome.project_id, outcome);
}
