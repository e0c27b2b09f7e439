//! # Milestone Report Engine Contract
//!
//! Managers define quantitative milestones for a project and submit impact
//! reports against them. A report is cross-checked against the hash an
//! oracle attested, then finalized against the milestone targets; only a
//! report meeting every target flips the milestone to achieved.
//!
//! | Phase        | Entry Point(s)                                          |
//! |--------------|---------------------------------------------------------|
//! | Managers     | [`MilestoneReports::register_project_manager`]          |
//! | Targets      | `define_milestone`                                      |
//! | Reporting    | `submit_report`, `update_report_metrics`                |
//! | Verification | `verify_report_oracle`, `verify_report_with_registry`   |
//! | Outcome      | `finalize_report`                                       |
//! | Queries      | `get_report`, `get_milestone`, `get_total_reports`, `get_managers`, `is_manager`, `is_milestone_achieved` |
//!
//! `is_milestone_achieved` is the only entry point the escrow ledger calls.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, log, Address, Bytes, BytesN, Env, String, Vec,
};

pub mod events;
pub mod oracle;
mod storage;
mod types;

#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_registry;

use events::MilestoneOutcome;
use oracle::OracleHashSourceClient;
pub use types::{ImpactMetrics, Milestone, MilestoneStatus, Report, ReportStatus};

/// Upper bound on managers per project.
pub const MAX_MANAGERS: u32 = 10;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotAuthorized = 100,
    ReportNotFound = 101,
    ReportExists = 102,
    InvalidHash = 103,
    OracleMismatch = 104,
    MilestoneNotFound = 105,
    ReportNotVerified = 106,
    InvalidMetric = 108,
    ReportFinalized = 109,
    MilestoneExists = 110,
    ReportLocked = 111,
}

#[contract]
pub struct MilestoneReports;

#[contractimpl]
#[allow(clippy::too_many_arguments)]
impl MilestoneReports {
    // ─────────────────────────────────────────────────────────
    // Managers
    // ─────────────────────────────────────────────────────────

    /// Add `manager` to the project's manager set.
    ///
    /// The first registration on a project without managers bootstraps it.
    /// Afterwards `caller` must already be a manager, or be registering
    /// themself.
    ///
    /// Returns `true` when added. Returns `false` without touching storage
    /// when the set already holds `MAX_MANAGERS` entries or `manager`.
    pub fn register_project_manager(
        env: Env,
        caller: Address,
        project_id: u64,
        manager: Address,
    ) -> Result<bool, Error> {
        caller.require_auth();

        let mut managers = storage::load_managers(&env, project_id);
        let authorized =
            managers.is_empty() || managers.contains(&caller) || caller == manager;
        if !authorized {
            return Err(Error::NotAuthorized);
        }
        if managers.len() >= MAX_MANAGERS || managers.contains(&manager) {
            return Ok(false);
        }

        managers.push_back(manager.clone());
        storage::save_managers(&env, project_id, &managers);

        events::emit_manager_added(&env, project_id, manager, caller);
        Ok(true)
    }

    // ─────────────────────────────────────────────────────────
    // Milestones
    // ─────────────────────────────────────────────────────────

    /// Define the targets of `milestone_id`. Milestones are write-once.
    ///
    /// Every target must be positive; `reward_amount` is informational and
    /// not range-checked.
    pub fn define_milestone(
        env: Env,
        manager: Address,
        project_id: u64,
        milestone_id: u64,
        targets: ImpactMetrics,
        reward_amount: i128,
    ) -> Result<(), Error> {
        manager.require_auth();
        Self::require_manager(&env, &manager, project_id)?;

        if storage::has_milestone(&env, project_id, milestone_id) {
            return Err(Error::MilestoneExists);
        }
        if !targets.is_positive() {
            return Err(Error::InvalidMetric);
        }

        let milestone = Milestone {
            targets: targets.clone(),
            reward_amount,
            status: MilestoneStatus::Pending,
        };
        storage::save_milestone(&env, project_id, milestone_id, &milestone);

        events::emit_milestone_defined(&env, project_id, milestone_id, targets, reward_amount);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Reports
    // ─────────────────────────────────────────────────────────

    /// Submit a report claiming `metrics` towards `milestone_id`.
    ///
    /// Report ids are write-once per project. The report starts in `Draft`.
    pub fn submit_report(
        env: Env,
        manager: Address,
        project_id: u64,
        report_id: u64,
        title: String,
        description: String,
        data_hash: Bytes,
        oracle_hash: Bytes,
        milestone_id: u64,
        metrics: ImpactMetrics,
    ) -> Result<(), Error> {
        manager.require_auth();
        Self::require_manager(&env, &manager, project_id)?;

        if storage::has_report(&env, project_id, report_id) {
            return Err(Error::ReportExists);
        }
        let data_hash = parse_hash(&env, &data_hash)?;
        let oracle_hash = parse_hash(&env, &oracle_hash)?;
        if !metrics.is_positive() {
            return Err(Error::InvalidMetric);
        }
        if !storage::has_milestone(&env, project_id, milestone_id) {
            return Err(Error::MilestoneNotFound);
        }

        let report = Report {
            title,
            description,
            data_hash,
            oracle_hash,
            submitter: manager.clone(),
            sequence: env.ledger().sequence(),
            status: ReportStatus::Draft,
            milestone_id,
            metrics,
        };
        storage::save_report(&env, project_id, report_id, &report);
        storage::increment_total_reports(&env);

        events::emit_report_submitted(&env, project_id, report_id, milestone_id, manager);
        Ok(())
    }

    /// Replace the claimed metrics of a report that is still in `Draft`.
    ///
    /// Hashes, title and description are left as submitted.
    pub fn update_report_metrics(
        env: Env,
        manager: Address,
        project_id: u64,
        report_id: u64,
        metrics: ImpactMetrics,
    ) -> Result<(), Error> {
        manager.require_auth();

        let mut report =
            storage::load_report(&env, project_id, report_id).ok_or(Error::ReportNotFound)?;
        Self::require_manager(&env, &manager, project_id)?;
        report.status.ensure_editable()?;
        if !metrics.is_positive() {
            return Err(Error::InvalidMetric);
        }

        report.metrics = metrics.clone();
        storage::save_report(&env, project_id, report_id, &report);

        events::emit_report_updated(&env, project_id, report_id, metrics);
        Ok(())
    }

    /// Mark a report verified when `oracle_hash` is byte-for-byte the hash
    /// the report cites.
    ///
    /// Any caller may verify. Resolving the oracle's own hash for a
    /// submission is left to the caller; see `verify_report_with_registry`
    /// for the registry-backed variant.
    pub fn verify_report_oracle(
        env: Env,
        project_id: u64,
        report_id: u64,
        oracle_hash: Bytes,
    ) -> Result<(), Error> {
        let report =
            storage::load_report(&env, project_id, report_id).ok_or(Error::ReportNotFound)?;
        // Wrong-length input can never equal a 32-byte hash.
        let candidate = parse_hash(&env, &oracle_hash).map_err(|_| Error::OracleMismatch);
        Self::apply_verification(&env, project_id, report_id, report, candidate)
    }

    /// Verify a report against the hash `registry` holds for
    /// `(project_id, submission_id)`.
    ///
    /// The registry is chosen by the caller and is not pinned by this
    /// contract. A verified report is only as trustworthy as the registry
    /// that was passed in.
    ///
    /// A submission the registry cannot resolve fails with `OracleMismatch`.
    pub fn verify_report_with_registry(
        env: Env,
        project_id: u64,
        report_id: u64,
        registry: Address,
        submission_id: u64,
    ) -> Result<(), Error> {
        let report =
            storage::load_report(&env, project_id, report_id).ok_or(Error::ReportNotFound)?;

        let candidate = match OracleHashSourceClient::new(&env, &registry)
            .try_get_oracle_hash_for_report(&project_id, &submission_id)
        {
            Ok(Ok(hash)) => Ok(hash),
            _ => Err(Error::OracleMismatch),
        };
        Self::apply_verification(&env, project_id, report_id, report, candidate)
    }

    /// Evaluate a verified report against its milestone.
    ///
    /// The report is finalized whatever the outcome. The milestone becomes
    /// achieved only when every claimed metric meets its target. Returns
    /// whether all targets were met.
    pub fn finalize_report(
        env: Env,
        manager: Address,
        project_id: u64,
        report_id: u64,
    ) -> Result<bool, Error> {
        manager.require_auth();

        let mut report =
            storage::load_report(&env, project_id, report_id).ok_or(Error::ReportNotFound)?;
        Self::require_manager(&env, &manager, project_id)?;
        let finalized = report.status.finalize()?;
        let mut milestone = storage::load_milestone(&env, project_id, report.milestone_id)
            .ok_or(Error::MilestoneNotFound)?;

        let all_met = report.metrics.meets(&milestone.targets);

        report.status = finalized;
        storage::save_report(&env, project_id, report_id, &report);

        if all_met && !milestone.is_achieved() {
            milestone.status = MilestoneStatus::Achieved;
            storage::save_milestone(&env, project_id, report.milestone_id, &milestone);
        }

        log!(
            &env,
            "report finalized",
            project_id,
            report_id,
            report.milestone_id,
            all_met
        );
        events::emit_milestone_outcome(
            &env,
            all_met,
            MilestoneOutcome {
                project_id,
                milestone_id: report.milestone_id,
                report_id,
                metrics: report.metrics,
            },
        );
        Ok(all_met)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_report(env: Env, project_id: u64, report_id: u64) -> Option<Report> {
        storage::load_report(&env, project_id, report_id)
    }

    pub fn get_milestone(env: Env, project_id: u64, milestone_id: u64) -> Option<Milestone> {
        storage::load_milestone(&env, project_id, milestone_id)
    }

    pub fn get_total_reports(env: Env) -> u64 {
        storage::get_total_reports(&env)
    }

    pub fn get_managers(env: Env, project_id: u64) -> Vec<Address> {
        storage::load_managers(&env, project_id)
    }

    pub fn is_manager(env: Env, project_id: u64, account: Address) -> bool {
        storage::load_managers(&env, project_id).contains(&account)
    }

    /// `false` for milestones that were never defined.
    pub fn is_milestone_achieved(env: Env, project_id: u64, milestone_id: u64) -> bool {
        storage::load_milestone(&env, project_id, milestone_id)
            .map(|m| m.is_achieved())
            .unwrap_or(false)
    }

    // ─────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────

    /// Membership check only; callers authenticate `caller` first.
    fn require_manager(env: &Env, caller: &Address, project_id: u64) -> Result<(), Error> {
        if storage::load_managers(env, project_id).contains(caller) {
            Ok(())
        } else {
            Err(Error::NotAuthorized)
        }
    }

    /// Shared tail of both verification paths. Lifecycle is checked before
    /// the hash so a finalized report reports `ReportFinalized`.
    fn apply_verification(
        env: &Env,
        project_id: u64,
        report_id: u64,
        mut report: Report,
        candidate: Result<BytesN<32>, Error>,
    ) -> Result<(), Error> {
        let verified = report.status.verify()?;
        let candidate = candidate?;
        if candidate != report.oracle_hash {
            return Err(Error::OracleMismatch);
        }

        report.status = verified;
        storage::save_report(env, project_id, report_id, &report);

        events::emit_report_verified(env, project_id, report_id, candidate);
        Ok(())
    }
}

/// Accept only hashes of exactly 32 bytes.
fn parse_hash(env: &Env, hash: &Bytes) -> Result<BytesN<32>, Error> {
    if hash.len() != 32 {
        return Err(Error::InvalidHash);
    }
    let mut buf = [0u8; 32];
    hash.copy_into_slice(&mut buf);
    Ok(BytesN::from_array(env, &buf))
}
