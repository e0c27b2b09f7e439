//! # Escrow Ledger Contract
//!
//! Holds donations per project and pays them out one milestone at a time.
//! A release goes through only when the project's report verifier says the
//! milestone was achieved, and each milestone can be paid once. After an
//! admin closes a project the remaining escrow is returned donor by donor.
//!
//! | Phase     | Entry Point(s)                                   |
//! |-----------|--------------------------------------------------|
//! | Bootstrap | [`EscrowLedger::init`], `initialize_project`     |
//! | Funding   | `donate`                                         |
//! | Payout    | `release_funds_on_milestone`                     |
//! | Wind-down | `close_project`, `refund_donor`                  |
//! | Queries   | `get_project`, `get_donation`, `get_release`, `get_total_donors`, `get_raised_vs_goal`, `get_custody_balance`, `admin` |
//!
//! The aggregate custody balance always equals the sum of every project's
//! escrow balance. Donations credit both; releases and refunds debit both.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, log, Address, Env};

pub mod events;
mod storage;
mod types;
pub mod verifier;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_milestone_release;

pub use types::{
    Donation, DonationStatus, EscrowRelease, Progress, Project, ProjectStatus,
};
use verifier::MilestoneVerifierClient;

/// Upper bound for goals, donations and releases, in minor units.
pub const MAX_AMOUNT: i128 = 1_000_000_000_000;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotAuthorized = 200,
    ProjectNotFound = 201,
    InsufficientBalance = 202,
    MilestoneNotAchieved = 203,
    ZeroDonation = 204,
    ProjectClosed = 205,
    InvalidGoal = 206,
    ProjectExists = 207,
    EscrowLocked = 208,
    InvalidAmount = 209,
    AlreadyInitialized = 210,
}

#[contract]
pub struct EscrowLedger;

#[contractimpl]
impl EscrowLedger {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Set the ledger administrator. Callable once.
    pub fn init(env: Env, admin: Address) -> Result<(), Error> {
        if storage::has_admin(&env) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();
        storage::set_admin(&env, &admin);
        Ok(())
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        storage::get_admin(&env).ok_or(Error::NotAuthorized)
    }

    /// Open `project_id` for donations.
    ///
    /// - `admin` must be the ledger administrator.
    /// - `goal` must lie in `(0, MAX_AMOUNT]`.
    /// - `report_verifier` is fixed for the life of the project and is
    ///   consulted on every release.
    pub fn initialize_project(
        env: Env,
        admin: Address,
        project_id: u64,
        goal: i128,
        report_verifier: Address,
    ) -> Result<Project, Error> {
        Self::require_admin(&env, &admin)?;

        if goal <= 0 || goal > MAX_AMOUNT {
            return Err(Error::InvalidGoal);
        }
        if storage::has_project(&env, project_id) {
            return Err(Error::ProjectExists);
        }

        let project = Project {
            id: project_id,
            status: ProjectStatus::Active,
            goal,
            raised: 0,
            released: 0,
            refunded: 0,
            donor_count: 0,
            escrow_balance: 0,
            report_verifier: report_verifier.clone(),
        };
        storage::save_project(&env, &project);

        events::emit_project_initialized(&env, project_id, goal, report_verifier);
        Ok(project)
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Add `amount` to `donor`'s donation to an active project.
    ///
    /// Donations accumulate per donor; only the first one counts towards
    /// `donor_count`. Only the state entry is rewritten.
    pub fn donate(env: Env, donor: Address, project_id: u64, amount: i128) -> Result<(), Error> {
        donor.require_auth();

        let mut state = storage::load_project_state(&env, project_id)
            .filter(|s| s.status.is_active())
            .ok_or(Error::ProjectClosed)?;
        if amount <= 0 || amount > MAX_AMOUNT {
            return Err(Error::ZeroDonation);
        }

        let sequence = env.ledger().sequence();
        let donation = match storage::load_donation(&env, project_id, &donor) {
            Some(mut existing) => {
                existing.amount = checked_add(existing.amount, amount)?;
                existing.sequence = sequence;
                existing
            }
            None => {
                state.donor_count += 1;
                Donation {
                    amount,
                    sequence,
                    status: DonationStatus::Held,
                }
            }
        };

        state.raised = checked_add(state.raised, amount)?;
        state.escrow_balance = checked_add(state.escrow_balance, amount)?;
        let custody = checked_add(storage::get_custody(&env), amount)?;

        storage::save_donation(&env, project_id, &donor, &donation);
        storage::save_project_state(&env, project_id, &state);
        storage::set_custody(&env, custody);

        events::emit_donated(&env, project_id, donor, amount, donation.amount);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Payout
    // ─────────────────────────────────────────────────────────

    /// Pay `amount` out of escrow for an achieved milestone.
    ///
    /// Checked in order: project active, amount in range, escrow covers
    /// the amount, verifier reports the milestone achieved, milestone not
    /// paid before. A milestone is paid at most once whatever escrow
    /// remains afterwards.
    pub fn release_funds_on_milestone(
        env: Env,
        caller: Address,
        project_id: u64,
        milestone_id: u64,
        amount: i128,
    ) -> Result<EscrowRelease, Error> {
        caller.require_auth();

        let config = storage::load_project_config(&env, project_id).ok_or(Error::ProjectClosed)?;
        let mut state = storage::load_project_state(&env, project_id)
            .filter(|s| s.status.is_active())
            .ok_or(Error::ProjectClosed)?;
        if amount <= 0 || amount > MAX_AMOUNT {
            return Err(Error::InvalidAmount);
        }
        if state.escrow_balance < amount {
            return Err(Error::InsufficientBalance);
        }

        let achieved = MilestoneVerifierClient::new(&env, &config.report_verifier)
            .is_milestone_achieved(&project_id, &milestone_id);
        if !achieved {
            return Err(Error::MilestoneNotAchieved);
        }
        if storage::has_release(&env, project_id, milestone_id) {
            return Err(Error::EscrowLocked);
        }

        let release = EscrowRelease {
            amount,
            sequence: env.ledger().sequence(),
            released_by: caller.clone(),
        };
        state.escrow_balance -= amount;
        state.released = checked_add(state.released, amount)?;
        let custody = debit_custody(&env, amount)?;

        storage::save_release(&env, project_id, milestone_id, &release);
        storage::save_project_state(&env, project_id, &state);
        storage::set_custody(&env, custody);

        log!(&env, "funds released", project_id, milestone_id, amount);
        events::emit_released(&env, project_id, milestone_id, amount, caller);
        Ok(release)
    }

    // ─────────────────────────────────────────────────────────
    // Wind-down
    // ─────────────────────────────────────────────────────────

    /// Stop accepting donations and releases for `project_id`.
    ///
    /// Remaining escrow stays in custody so donors can be refunded; the
    /// `closed` event carries it for reconciliation.
    pub fn close_project(env: Env, admin: Address, project_id: u64) -> Result<(), Error> {
        Self::require_admin(&env, &admin)?;

        let mut state = storage::load_project_state(&env, project_id).ok_or(Error::ProjectClosed)?;
        state.status = state.status.close()?;
        storage::save_project_state(&env, project_id, &state);

        log!(&env, "project closed", project_id, state.escrow_balance);
        events::emit_closed(&env, project_id, state.escrow_balance);
        Ok(())
    }

    /// Return `donor`'s full donation from a closed project. One-shot.
    ///
    /// Returns the refunded amount.
    pub fn refund_donor(
        env: Env,
        admin: Address,
        project_id: u64,
        donor: Address,
    ) -> Result<i128, Error> {
        Self::require_admin(&env, &admin)?;

        // Missing and still-active projects are both `ProjectClosed`.
        let mut state = storage::load_project_state(&env, project_id)
            .filter(|s| !s.status.is_active())
            .ok_or(Error::ProjectClosed)?;
        let mut donation = storage::load_donation(&env, project_id, &donor)
            .ok_or(Error::InsufficientBalance)?;
        let refunded = donation.status.refund()?;
        if state.escrow_balance < donation.amount {
            return Err(Error::InsufficientBalance);
        }

        donation.status = refunded;
        state.escrow_balance -= donation.amount;
        state.refunded = checked_add(state.refunded, donation.amount)?;
        let custody = debit_custody(&env, donation.amount)?;

        storage::save_donation(&env, project_id, &donor, &donation);
        storage::save_project_state(&env, project_id, &state);
        storage::set_custody(&env, custody);

        events::emit_refunded(&env, project_id, donor, donation.amount);
        Ok(donation.amount)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_project(env: Env, project_id: u64) -> Option<Project> {
        storage::load_project(&env, project_id)
    }

    pub fn get_donation(env: Env, project_id: u64, donor: Address) -> Option<Donation> {
        storage::load_donation(&env, project_id, &donor)
    }

    pub fn get_release(env: Env, project_id: u64, milestone_id: u64) -> Option<EscrowRelease> {
        storage::load_release(&env, project_id, milestone_id)
    }

    pub fn get_total_donors(env: Env, project_id: u64) -> Result<u32, Error> {
        storage::load_project_state(&env, project_id)
            .map(|s| s.donor_count)
            .ok_or(Error::ProjectNotFound)
    }

    pub fn get_raised_vs_goal(env: Env, project_id: u64) -> Result<Progress, Error> {
        storage::load_project(&env, project_id)
            .map(|p| Progress {
                raised: p.raised,
                goal: p.goal,
            })
            .ok_or(Error::ProjectNotFound)
    }

    /// Aggregate escrow held across all projects.
    pub fn get_custody_balance(env: Env) -> i128 {
        storage::get_custody(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────

    fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        match storage::get_admin(env) {
            Some(admin) if admin == *caller => Ok(()),
            _ => Err(Error::NotAuthorized),
        }
    }
}

fn checked_add(total: i128, amount: i128) -> Result<i128, Error> {
    total.checked_add(amount).ok_or(Error::InvalidAmount)
}

/// Custody never goes below zero; a shortfall means project escrow and
/// custody have drifted apart.
fn debit_custody(env: &Env, amount: i128) -> Result<i128, Error> {
    let custody = storage::get_custody(env);
    if custody < amount {
        return Err(Error::InsufficientBalance);
    }
    Ok(custody - amount)
}
