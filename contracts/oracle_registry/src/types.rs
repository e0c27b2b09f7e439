//! # Types
//!
//! Records owned by the oracle registry.
//!
//! ## Authorization gate
//!
//! [`OracleStatus`] is the only mutable part of an oracle's identity:
//!
//! ```text
//! Active ──► Revoked
//! ```
//!
//! Revocation blocks new submissions and corrections. It does not touch
//! past [`OracleData`] records nor the project assignment set.

use soroban_sdk::{contracttype, Address, BytesN, String};

/// Authorization state of a registered oracle.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OracleStatus {
    /// May submit for the projects it is assigned to.
    Active,
    /// Blocked from submitting; history is kept.
    Revoked,
}

impl OracleStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, OracleStatus::Active)
    }
}

/// Field measurements attested for a project.
///
/// The same shape is used for oracle submissions, milestone targets and
/// report claims so the three can be compared field by field.
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
    /// Every measurement must be strictly positive.
    pub fn is_positive(&self) -> bool {
        self.kwh > 0 && self.households > 0 && self.co2_kg > 0
    }
}

/// Identity and activity counters of a registered oracle.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleInfo {
    /// Display name chosen at registration.
    pub name: String,
    pub status: OracleStatus,
    /// Number of accepted submissions.
    pub submission_count: u64,
    /// Ledger sequence of the latest accepted submission (0 if none).
    pub last_submission: u32,
}

/// One measurement record, keyed by `(project_id, submission_id)`.
///
/// Immutable once written except for the metrics, which the submitting
/// oracle may correct.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleData {
    pub oracle: Address,
    pub data_hash: BytesN<32>,
    pub metrics: ImpactMetrics,
    /// Ledger sequence at submission.
    pub sequence: u32,
    /// Set by the environment's signature check before the call lands here.
    pub signature_valid: bool,
}
