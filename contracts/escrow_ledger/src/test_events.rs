extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Env, IntoVal, Symbol, TryIntoVal, Val, Vec,
};

use crate::events::{Donated, DonorRefunded, FundsReleased, ProjectClosed, ProjectInitialized};
use crate::test::{FakeVerifier, FakeVerifierClient};
use crate::{EscrowLedger, EscrowLedgerClient};

fn setup() -> (Env, EscrowLedgerClient<'static>, FakeVerifierClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let ledger = EscrowLedgerClient::new(&env, &env.register(EscrowLedger, ()));
    let verifier = FakeVerifierClient::new(&env, &env.register(FakeVerifier, ()));
    let admin = Address::generate(&env);
    ledger.init(&admin);
    ledger.initialize_project(&admin, &1, &10_000, &verifier.address);
    (env, ledger, verifier, admin)
}

fn assert_topics(env: &Env, topics: Vec<Val>, kind: Symbol, project_id: u64) {
    let expected = vec![env, kind.into_val(env), project_id.into_val(env)];
    assert_eq!(topics, expected);
}

#[test]
fn test_project_initialized_event() {
    let (env, ledger, verifier, _) = setup();

    let last_event = env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, ledger.address);
    assert_topics(&env, last_event.1, symbol_short!("prj_init"), 1);
    let data: ProjectInitialized = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        ProjectInitialized {
            project_id: 1,
            goal: 10_000,
            report_verifier: verifier.address,
        }
    );
}

#[test]
fn test_donated_event_carries_running_total() {
    let (env, ledger, _, _) = setup();
    let donor = Address::generate(&env);

    ledger.donate(&donor, &1, &300);
    ledger.donate(&donor, &1, &700);

    let last_event = env.events().all().last().expect("No events found");
    assert_topics(&env, last_event.1, symbol_short!("donated"), 1);
    let data: Donated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        Donated {
            project_id: 1,
            donor,
            amount: 700,
            total: 1000,
        }
    );
}

#[test]
fn test_released_event() {
    let (env, ledger, verifier, _) = setup();
    ledger.donate(&Address::generate(&env), &1, &1000);
    verifier.set_achieved(&1, &2);
    let caller = Address::generate(&env);

    ledger.release_funds_on_milestone(&caller, &1, &2, &400);

    let last_event = env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, ledger.address);
    assert_topics(&env, last_event.1, symbol_short!("released"), 1);
    let data: FundsReleased = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        FundsReleased {
            project_id: 1,
            milestone_id: 2,
            amount: 400,
            released_by: caller,
        }
    );
}

#[test]
fn test_closed_event_reports_remaining_escrow() {
    let (env, ledger, _, admin) = setup();
    ledger.donate(&Address::generate(&env), &1, &500);

    ledger.close_project(&admin, &1);

    let last_event = env.events().all().last().expect("No events found");
    assert_topics(&env, last_event.1, symbol_short!("closed"), 1);
    let data: ProjectClosed = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        ProjectClosed {
            project_id: 1,
            remaining_escrow: 500,
        }
    );
}

#[test]
fn test_refunded_event() {
    let (env, ledger, _, admin) = setup();
    let donor = Address::generate(&env);
    ledger.donate(&donor, &1, &500);
    ledger.close_project(&admin, &1);

    ledger.refund_donor(&admin, &1, &donor);

    let last_event = env.events().all().last().expect("No events found");
    assert_topics(&env, last_event.1, symbol_short!("refunded"), 1);
    let data: DonorRefunded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        DonorRefunded {
            project_id: 1,
            donor,
            amount: 500,
        }
    );
}
