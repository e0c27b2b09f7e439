//! Events published by the oracle registry.
//!
//! | Topic                     | Data               |
//! |---------------------------|--------------------|
//! | `("orc_reg", oracle)`     | [`OracleRegistered`] |
//! | `("orc_rvk", oracle)`     | [`OracleRevoked`]  |
//! | `("orc_asgn", project)`   | [`OracleAssigned`] |
//! | `("data_sub", project)`   | [`DataSubmitted`]  |
//! | `("data_upd", project)`   | [`DataUpdated`]    |

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, String};

use crate::types::ImpactMetrics;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleRegistered {
    pub oracle: Address,
    pub name: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleRevoked {
    pub oracle: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleAssigned {
    pub project_id: u64,
    pub oracle: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataSubmitted {
    pub project_id: u64,
    pub submission_id: u64,
    pub oracle: Address,
    pub data_hash: BytesN<32>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataUpdated {
    pub project_id: u64,
    pub submission_id: u64,
    pub metrics: ImpactMetrics,
}

pub fn emit_oracle_registered(env: &Env, oracle: Address, name: String) {
    env.events().publish(
        (symbol_short!("orc_reg"), oracle.clone()),
        OracleRegistered { oracle, name },
    );
}

pub fn emit_oracle_revoked(env: &Env, oracle: Address) {
    env.events().publish(
        (symbol_short!("orc_rvk"), oracle.clone()),
        OracleRevoked { oracle },
    );
}

pub fn emit_oracle_assigned(env: &Env, project_id: u64, oracle: Address) {
    env.events().publish(
        (symbol_short!("orc_asgn"), project_id),
        OracleAssigned { project_id, oracle },
    );
}

pub fn emit_data_submitted(
    env: &Env,
    project_id: u64,
    submission_id: u64,
    oracle: Address,
    data_hash: BytesN<32>,
) {
    env.events().publish(
        (symbol_short!("data_sub"), project_id),
        DataSubmitted {
            project_id,
            submission_id,
            oracle,
            data_hash,
        },
    );
}

pub fn emit_data_updated(env: &Env, project_id: u64, submission_id: u64, metrics: ImpactMetrics) {
    env.events().publish(
        (symbol_short!("data_upd"), project_id),
        DataUpdated {
            project_id,
            submission_id,
            metrics,
        },
    );
}
