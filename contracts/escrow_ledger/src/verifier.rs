//! The single question the ledger asks of a report engine.

use soroban_sdk::{contractclient, Env};

#[contractclient(name = "MilestoneVerifierClient")]
pub trait MilestoneVerifier {
    /// `true` once `milestone_id` of `project_id` has been achieved.
    fn is_milestone_achieved(env: Env, project_id: u64, milestone_id: u64) -> bool;
}
