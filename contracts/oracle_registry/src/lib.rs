//! # Oracle Registry Contract
//!
//! Keeps the set of trusted impact oracles, which projects each of them may
//! report on, and the raw measurements they submit.
//!
//! | Phase        | Entry Point(s)                                         |
//! |--------------|--------------------------------------------------------|
//! | Bootstrap    | [`OracleRegistry::init`]                               |
//! | Oracle admin | `register_oracle`, `revoke_oracle`, `assign_oracle_to_project` |
//! | Measurements | `submit_oracle_data`, `update_oracle_data`             |
//! | Queries      | `get_oracle`, `get_oracle_data`, `get_oracle_hash_for_report`, `get_total_submissions`, `is_oracle_assigned` |
//!
//! Submission ids are chosen by the oracle and scoped per project. The
//! registry refuses to reuse one but does not force them to be contiguous.
//!
//! Signatures over the measurements are checked by the environment before a
//! submission reaches this contract; accepted records carry
//! `signature_valid = true`.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, log, Address, Bytes, BytesN, Env, String};

pub mod events;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

pub use types::{ImpactMetrics, OracleData, OracleInfo, OracleStatus};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotAuthorized = 300,
    OracleNotRegistered = 301,
    DataExists = 302,
    InvalidHash = 303,
    DataNotFound = 304,
    InvalidMetric = 305,
    AlreadyRegistered = 306,
    OracleRevoked = 307,
    AlreadyInitialized = 308,
}

#[contract]
pub struct OracleRegistry;

#[contractimpl]
impl OracleRegistry {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Set the registry administrator. Callable once.
    pub fn init(env: Env, admin: Address) -> Result<(), Error> {
        if storage::has_admin(&env) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();
        storage::set_admin(&env, &admin);
        Ok(())
    }

    /// Return the registry administrator.
    pub fn admin(env: Env) -> Result<Address, Error> {
        storage::get_admin(&env).ok_or(Error::NotAuthorized)
    }

    // ─────────────────────────────────────────────────────────
    // Oracle administration
    // ─────────────────────────────────────────────────────────

    /// Register `oracle` under a display name.
    ///
    /// - `admin` must be the registry administrator.
    /// - Fails with `AlreadyRegistered` if `oracle` already has a record;
    ///   records are created once and never replaced.
    pub fn register_oracle(
        env: Env,
        admin: Address,
        oracle: Address,
        name: String,
    ) -> Result<(), Error> {
        Self::require_admin(&env, &admin)?;

        if storage::load_oracle(&env, &oracle).is_some() {
            return Err(Error::AlreadyRegistered);
        }

        let info = OracleInfo {
            name: name.clone(),
            status: OracleStatus::Active,
            submission_count: 0,
            last_submission: 0,
        };
        storage::save_oracle(&env, &oracle, &info);

        events::emit_oracle_registered(&env, oracle, name);
        Ok(())
    }

    /// Revoke `oracle`.
    ///
    /// Past submissions stay valid and project assignments are kept; the
    /// oracle is only blocked from submitting or correcting from now on.
    pub fn revoke_oracle(env: Env, admin: Address, oracle: Address) -> Result<(), Error> {
        Self::require_admin(&env, &admin)?;

        let mut info = storage::load_oracle(&env, &oracle).ok_or(Error::OracleNotRegistered)?;
        info.status = OracleStatus::Revoked;
        storage::save_oracle(&env, &oracle, &info);

        log!(&env, "oracle revoked", oracle);
        events::emit_oracle_revoked(&env, oracle);
        Ok(())
    }

    /// Allow `oracle` to submit measurements for `project_id`.
    ///
    /// Idempotent: assigning twice leaves a single assignment.
    pub fn assign_oracle_to_project(
        env: Env,
        admin: Address,
        project_id: u64,
        oracle: Address,
    ) -> Result<(), Error> {
        Self::require_admin(&env, &admin)?;

        let info = storage::load_oracle(&env, &oracle).ok_or(Error::OracleNotRegistered)?;
        if !info.status.is_active() {
            return Err(Error::OracleRevoked);
        }

        storage::set_assigned(&env, project_id, &oracle);
        events::emit_oracle_assigned(&env, project_id, oracle);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Measurements
    // ─────────────────────────────────────────────────────────

    /// Record a measurement for `(project_id, submission_id)`.
    ///
    /// `oracle` must be registered, active and assigned to the project.
    /// Submissions are append-only: an id already holding data is rejected
    /// with `DataExists` and the stored record is left untouched.
    pub fn submit_oracle_data(
        env: Env,
        oracle: Address,
        project_id: u64,
        submission_id: u64,
        data_hash: Bytes,
        metrics: ImpactMetrics,
    ) -> Result<(), Error> {
        oracle.require_auth();

        let mut info = Self::require_active_oracle(&env, &oracle)?;
        if !storage::is_assigned(&env, project_id, &oracle) {
            return Err(Error::NotAuthorized);
        }
        if storage::has_data(&env, project_id, submission_id) {
            return Err(Error::DataExists);
        }
        let data_hash = parse_hash(&env, &data_hash)?;
        if !metrics.is_positive() {
            return Err(Error::InvalidMetric);
        }

        let sequence = env.ledger().sequence();
        let data = OracleData {
            oracle: oracle.clone(),
            data_hash: data_hash.clone(),
            metrics,
            sequence,
            signature_valid: true,
        };
        storage::save_data(&env, project_id, submission_id, &data);

        info.submission_count += 1;
        info.last_submission = sequence;
        storage::save_oracle(&env, &oracle, &info);
        storage::increment_total_submissions(&env);

        events::emit_data_submitted(&env, project_id, submission_id, oracle, data_hash);
        Ok(())
    }

    /// Correct the metrics of an existing record.
    ///
    /// Only the oracle that made the submission may correct it, revoked or
    /// not. The data hash, sequence number and submission counters are not
    /// changed.
    pub fn update_oracle_data(
        env: Env,
        oracle: Address,
        project_id: u64,
        submission_id: u64,
        metrics: ImpactMetrics,
    ) -> Result<(), Error> {
        oracle.require_auth();

        let mut data =
            storage::load_data(&env, project_id, submission_id).ok_or(Error::DataNotFound)?;
        if data.oracle != oracle {
            return Err(Error::NotAuthorized);
        }
        if !metrics.is_positive() {
            return Err(Error::InvalidMetric);
        }

        data.metrics = metrics.clone();
        storage::save_data(&env, project_id, submission_id, &data);

        events::emit_data_updated(&env, project_id, submission_id, metrics);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_oracle(env: Env, oracle: Address) -> Option<OracleInfo> {
        storage::load_oracle(&env, &oracle)
    }

    pub fn get_oracle_data(env: Env, project_id: u64, submission_id: u64) -> Option<OracleData> {
        storage::load_data(&env, project_id, submission_id)
    }

    /// Hash an oracle attested for `(project_id, submission_id)`.
    ///
    /// Report verification joins on this value.
    pub fn get_oracle_hash_for_report(
        env: Env,
        project_id: u64,
        submission_id: u64,
    ) -> Result<BytesN<32>, Error> {
        storage::load_data(&env, project_id, submission_id)
            .map(|data| data.data_hash)
            .ok_or(Error::DataNotFound)
    }

    pub fn get_total_submissions(env: Env) -> u64 {
        storage::get_total_submissions(&env)
    }

    pub fn is_oracle_assigned(env: Env, project_id: u64, oracle: Address) -> bool {
        storage::is_assigned(&env, project_id, &oracle)
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

    /// Submitters that are unknown or revoked are both `NotAuthorized`.
    fn require_active_oracle(env: &Env, oracle: &Address) -> Result<OracleInfo, Error> {
        storage::load_oracle(env, oracle)
            .filter(|info| info.status.is_active())
            .ok_or(Error::NotAuthorized)
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
