//! Events published by the escrow ledger.
//!
//! Every topic is `(kind, project_id)`:
//!
//! | Kind       | Data                   |
//! |------------|------------------------|
//! | `prj_init` | [`ProjectInitialized`] |
//! | `donated`  | [`Donated`]            |
//! | `released` | [`FundsReleased`]      |
//! | `closed`   | [`ProjectClosed`]      |
//! | `refunded` | [`DonorRefunded`]      |

use soroban_sdk::{contracttype, symbol_short, Address, Env, IntoVal, Symbol, Val};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectInitialized {
    pub project_id: u64,
    pub goal: i128,
    pub report_verifier: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Donated {
    pub project_id: u64,
    pub donor: Address,
    pub amount: i128,
    /// Donor's cumulative amount after this donation.
    pub total: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsReleased {
    pub project_id: u64,
    pub milestone_id: u64,
    pub amount: i128,
    pub released_by: Address,
}

/// `remaining_escrow` is what was still held at closure, for reconciliation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectClosed {
    pub project_id: u64,
    pub remaining_escrow: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonorRefunded {
    pub project_id: u64,
    pub donor: Address,
    pub amount: i128,
}

fn publish<D>(env: &Env, kind: Symbol, project_id: u64, data: D)
where
    D: IntoVal<Env, Val>,
{
    env.events().publish((kind, project_id), data);
}

pub fn emit_project_initialized(env: &Env, project_id: u64, goal: i128, report_verifier: Address) {
    publish(
        env,
        symbol_short!("prj_init"),
        project_id,
        ProjectInitialized {
            project_id,
            goal,
            report_verifier,
        },
    );
}

pub fn emit_donated(env: &Env, project_id: u64, donor: Address, amount: i128, total: i128) {
    publish(
        env,
        symbol_short!("donated"),
        project_id,
        Donated {
            project_id,
            donor,
            amount,
            total,
        },
    );
}

pub fn emit_released(
    env: &Env,
    project_id: u64,
    milestone_id: u64,
    amount: i128,
    released_by: Address,
) {
    publish(
        env,
        symbol_short!("released"),
        project_id,
        FundsReleased {
            project_id,
            milestone_id,
            amount,
            released_by,
        },
    );
}

pub fn emit_closed(env: &Env, project_id: u64, remaining_escrow: i128) {
    publish(
        env,
        symbol_short!("closed"),
        project_id,
        ProjectClosed {
            project_id,
            remaining_escrow,
        },
    );
}

pub fn emit_refunded(env: &Env, project_id: u64, donor: Address, amount: i128) {
    publish(
        env,
        symbol_short!("refunded"),
        project_id,
        DonorRefunded {
            project_id,
            donor,
            amount,
        },
    );
}
