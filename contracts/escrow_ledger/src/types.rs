//! # Types
//!
//! Project, donation and release records held by the escrow ledger.
//!
//! ## Config / State split
//!
//! A project is stored as two ledger entries:
//!
//! - [`ProjectConfig`]: written once by `initialize_project`, never mutated.
//! - [`ProjectState`]: written on every donation, release, closure and refund.
//!
//! Queries return the reconstructed [`Project`].
//!
//! ## One-way flags
//!
//! ```text
//! ProjectStatus:  Active ──► Closed
//! DonationStatus: Held   ──► Refunded
//! ```
//!
//! Neither transition can be undone.

use soroban_sdk::{contracttype, Address};

use crate::Error;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProjectStatus {
    /// Accepting donations; releases allowed.
    Active,
    /// Closed by the admin; only refunds remain.
    Closed,
}

impl ProjectStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, ProjectStatus::Active)
    }

    pub fn close(self) -> Result<ProjectStatus, Error> {
        match self {
            ProjectStatus::Active => Ok(ProjectStatus::Closed),
            ProjectStatus::Closed => Err(Error::ProjectClosed),
        }
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DonationStatus {
    Held,
    Refunded,
}

impl DonationStatus {
    /// A refunded donation has nothing left to refund.
    pub fn refund(self) -> Result<DonationStatus, Error> {
        match self {
            DonationStatus::Held => Ok(DonationStatus::Refunded),
            DonationStatus::Refunded => Err(Error::InsufficientBalance),
        }
    }
}

/// Immutable project configuration, written once at initialisation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    pub id: u64,
    pub goal: i128,
    /// Contract answering `is_milestone_achieved` for this project.
    pub report_verifier: Address,
}

/// Mutable project counters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectState {
    pub status: ProjectStatus,
    pub raised: i128,
    pub released: i128,
    pub refunded: i128,
    pub donor_count: u32,
    pub escrow_balance: i128,
}

/// Full on-chain view of a project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    pub id: u64,
    pub status: ProjectStatus,
    /// Funding target.
    pub goal: i128,
    /// Total ever donated.
    pub raised: i128,
    /// Total paid out through milestone releases.
    pub released: i128,
    /// Total returned to donors after closure.
    pub refunded: i128,
    /// Distinct donors with a recorded donation.
    pub donor_count: u32,
    /// Funds still in custody for this project.
    pub escrow_balance: i128,
    pub report_verifier: Address,
}

/// Cumulative donation of one donor to one project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Donation {
    pub amount: i128,
    /// Ledger sequence of the most recent donation.
    pub sequence: u32,
    pub status: DonationStatus,
}

/// One-shot payout for a `(project, milestone)` pair.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowRelease {
    pub amount: i128,
    pub sequence: u32,
    pub released_by: Address,
}

/// Raised amount against the goal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Progress {
    pub raised: i128,
    pub goal: i128,
}
