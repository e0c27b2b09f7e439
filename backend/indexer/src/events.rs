//! Event kinds published by the escrow, oracle and report contracts, and
//! the flat record the indexer stores for each of them.
//!
//! The leading topic of every contract event is a short symbol naming its
//! kind. The second topic is the project id, except for oracle lifecycle
//! events where it is the oracle address.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    // Oracle registry
    /// `orc_reg`
    OracleRegistered,
    /// `orc_rvk`
    OracleRevoked,
    /// `orc_asgn`
    OracleAssigned,
    /// `data_sub`
    DataSubmitted,
    /// `data_upd`
    DataUpdated,

    // Milestone reports
    /// `mgr_add`
    ManagerAdded,
    /// `ms_def`
    MilestoneDefined,
    /// `rpt_sub`
    ReportSubmitted,
    /// `rpt_upd`
    ReportUpdated,
    /// `rpt_ver`
    ReportVerified,
    /// `ms_done`: every target met.
    MilestoneAchieved,
    /// `ms_part`: at least one target missed.
    MilestonePartial,

    // Escrow ledger
    /// `prj_init`
    ProjectInitialized,
    /// `donated`
    Donated,
    /// `released`
    FundsReleased,
    /// `closed`
    ProjectClosed,
    /// `refunded`
    DonorRefunded,

    /// An event we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "orc_reg" => Self::OracleRegistered,
            "orc_rvk" => Self::OracleRevoked,
            "orc_asgn" => Self::OracleAssigned,
            "data_sub" => Self::DataSubmitted,
            "data_upd" => Self::DataUpdated,
            "mgr_add" => Self::ManagerAdded,
            "ms_def" => Self::MilestoneDefined,
            "rpt_sub" => Self::ReportSubmitted,
            "rpt_upd" => Self::ReportUpdated,
            "rpt_ver" => Self::ReportVerified,
            "ms_done" => Self::MilestoneAchieved,
            "ms_part" => Self::MilestonePartial,
            "prj_init" => Self::ProjectInitialized,
            "donated" => Self::Donated,
            "released" => Self::FundsReleased,
            "closed" => Self::ProjectClosed,
            "refunded" => Self::DonorRefunded,
            _ => Self::Unknown,
        }
    }

    /// Identifier stored in the `event_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OracleRegistered => "oracle_registered",
            Self::OracleRevoked => "oracle_revoked",
            Self::OracleAssigned => "oracle_assigned",
            Self::DataSubmitted => "data_submitted",
            Self::DataUpdated => "data_updated",
            Self::ManagerAdded => "manager_added",
            Self::MilestoneDefined => "milestone_defined",
            Self::ReportSubmitted => "report_submitted",
            Self::ReportUpdated => "report_updated",
            Self::ReportVerified => "report_verified",
            Self::MilestoneAchieved => "milestone_achieved",
            Self::MilestonePartial => "milestone_partial",
            Self::ProjectInitialized => "project_initialized",
            Self::Donated => "donated",
            Self::FundsReleased => "funds_released",
            Self::ProjectClosed => "project_closed",
            Self::DonorRefunded => "donor_refunded",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the second topic is a project id.
    pub fn keyed_by_project(&self) -> bool {
        !matches!(self, Self::OracleRegistered | Self::OracleRevoked)
    }

    /// Kinds whose `subject_id` is a milestone id.
    pub const MILESTONE_SCOPED: [EventKind; 4] = [
        Self::MilestoneDefined,
        Self::MilestoneAchieved,
        Self::MilestonePartial,
        Self::FundsReleased,
    ];
}

/// A decoded contract event, ready to be stored.
///
/// `subject_id` is the entity inside the project the event is about: a
/// submission id, report id or milestone id depending on `event_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractEvent {
    pub event_id: String,
    pub event_type: String,
    pub project_id: Option<String>,
    pub subject_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// An event row as read back from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub project_id: Option<String>,
    pub subject_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
