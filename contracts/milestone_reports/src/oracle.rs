//! Read-only view of an oracle registry.
//!
//! Report verification only needs the hash an oracle attested for a
//! submission. Any contract exposing this entry point can back
//! `verify_report_with_registry`.

use soroban_sdk::{contractclient, BytesN, Env};

#[contractclient(name = "OracleHashSourceClient")]
pub trait OracleHashSource {
    /// Hash attested for `(project_id, submission_id)`; fails when the
    /// submission does not exist.
    fn get_oracle_hash_for_report(env: Env, project_id: u64, submission_id: u64) -> BytesN<32>;
}
