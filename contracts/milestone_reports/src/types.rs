//! # Types
//!
//! Milestones, reports and the one-way status machines that govern them.
//!
//! ## Report lifecycle
//!
//! ```text
//! Draft ──► Verified ──► Finalized
//! ```
//!
//! Metrics can be edited only in `Draft`. Verification can be repeated
//! until the report is finalized; finalization happens once. There is no
//! transition back.
//!
//! ## Milestone lifecycle
//!
//! ```text
//! Pending ──► Achieved
//! ```
//!
//! The escrow ledger trusts `Achieved` to unlock a release, so nothing ever
//! moves a milestone back to `Pending`.

use soroban_sdk::{contracttype, Address, BytesN, String};

use crate::Error;

/// Field measurements: targets on a milestone, claims on a report.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImpactMetrics {
    /// Energy generated, in kilowatt-hours.
    pub kwh: u64,
    /// Households served.
    pub households: u64,
    /// Emissions avoided, in kilograms of CO2.
    pub co2_kg: u64,
}

impl ImpactMetrics {
    pub fn is_positive(&self) -> bool {
        self.kwh > 0 && self.households > 0 && self.co2_kg > 0
    }

    /// True when every field meets or exceeds the matching field of
    /// `targets`. There is no partial credit.
    pub fn meets(&self, targets: &ImpactMetrics) -> bool {
        self.kwh >= targets.kwh
            && self.households >= targets.households
            && self.co2_kg >= targets.co2_kg
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MilestoneStatus {
    Pending,
    Achieved,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Milestone {
    pub targets: ImpactMetrics,
    /// Informational; the escrow ledger decides the released amount.
    pub reward_amount: i128,
    pub status: MilestoneStatus,
}

impl Milestone {
    pub fn is_achieved(&self) -> bool {
        self.status == MilestoneStatus::Achieved
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReportStatus {
    /// Submitted; metrics still editable.
    Draft,
    /// Oracle hash matched; metrics frozen.
    Verified,
    /// Evaluated against the milestone; terminal.
    Finalized,
}

impl ReportStatus {
    /// `Draft | Verified → Verified`.
    pub fn verify(self) -> Result<Self, Error> {
        match self {
            ReportStatus::Draft | ReportStatus::Verified => Ok(ReportStatus::Verified),
            ReportStatus::Finalized => Err(Error::ReportFinalized),
        }
    }

    /// `Verified → Finalized`.
    pub fn finalize(self) -> Result<Self, Error> {
        match self {
            ReportStatus::Verified => Ok(ReportStatus::Finalized),
            ReportStatus::Draft => Err(Error::ReportNotVerified),
            ReportStatus::Finalized => Err(Error::ReportFinalized),
        }
    }

    pub fn ensure_editable(self) -> Result<(), Error> {
        match self {
            ReportStatus::Draft => Ok(()),
            ReportStatus::Verified | ReportStatus::Finalized => Err(Error::ReportLocked),
        }
    }
}

/// A manager's claim of measured outcomes for one milestone.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Report {
    pub title: String,
    pub description: String,
    /// Digest of the supporting evidence bundle.
    pub data_hash: BytesN<32>,
    /// Hash the oracle is claimed to have attested.
    pub oracle_hash: BytesN<32>,
    pub submitter: Address,
    /// Ledger sequence at submission.
    pub sequence: u32,
    pub status: ReportStatus,
    pub milestone_id: u64,
    pub metrics: ImpactMetrics,
}
