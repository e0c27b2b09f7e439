//! Releases gated by a live milestone/report engine.

extern crate std;

use milestone_reports::{
    ImpactMetrics, MilestoneReports, MilestoneReportsClient,
};
use soroban_sdk::{testutils::Address as _, Address, Bytes, Env, String};

use crate::{EscrowLedger, EscrowLedgerClient, Error};

struct Fixture {
    env: Env,
    ledger: EscrowLedgerClient<'static>,
    reports: MilestoneReportsClient<'static>,
    manager: Address,
}

fn setup() -> Fixture {
    let env = Env::default();
    env.mock_all_auths();

    let reports = MilestoneReportsClient::new(&env, &env.register(MilestoneReports, ()));
    let manager = Address::generate(&env);
    reports.register_project_manager(&manager, &1, &manager);
    reports.define_milestone(
        &manager,
        &1,
        &0,
        &ImpactMetrics {
            kwh: 1000,
            households: 50,
            co2_kg: 200,
        },
        &5000,
    );

    let ledger = EscrowLedgerClient::new(&env, &env.register(EscrowLedger, ()));
    let admin = Address::generate(&env);
    ledger.init(&admin);
    ledger.initialize_project(&admin, &1, &10_000, &reports.address);
    ledger.donate(&Address::generate(&env), &1, &8000);

    Fixture {
        env,
        ledger,
        reports,
        manager,
    }
}

fn report_and_finalize(f: &Fixture, report_id: u64, claimed: ImpactMetrics) -> bool {
    let oracle_hash = Bytes::from_array(&f.env, &[0xbb; 32]);
    f.reports.submit_report(
        &f.manager,
        &1,
        &report_id,
        &String::from_str(&f.env, "Field report"),
        &String::from_str(&f.env, "Solar installation"),
        &Bytes::from_array(&f.env, &[0xaa; 32]),
        &oracle_hash,
        &0,
        &claimed,
    );
    f.reports.verify_report_oracle(&1, &report_id, &oracle_hash);
    f.reports.finalize_report(&f.manager, &1, &report_id)
}

#[test]
fn test_release_after_milestone_achieved() {
    let f = setup();
    let caller = Address::generate(&f.env);

    assert_eq!(
        f.ledger.try_release_funds_on_milestone(&caller, &1, &0, &5000),
        Err(Ok(Error::MilestoneNotAchieved))
    );

    assert!(report_and_finalize(
        &f,
        0,
        ImpactMetrics {
            kwh: 1200,
            households: 60,
            co2_kg: 250,
        }
    ));
    f.ledger.release_funds_on_milestone(&caller, &1, &0, &5000);

    assert_eq!(f.ledger.get_project(&1).unwrap().escrow_balance, 3000);
    assert_eq!(f.ledger.get_custody_balance(), 3000);
    assert_eq!(
        f.ledger.try_release_funds_on_milestone(&caller, &1, &0, &1000),
        Err(Ok(Error::EscrowLocked))
    );
}

#[test]
fn test_partial_report_keeps_funds_locked() {
    let f = setup();
    let caller = Address::generate(&f.env);

    assert!(!report_and_finalize(
        &f,
        0,
        ImpactMetrics {
            kwh: 900,
            households: 60,
            co2_kg: 250,
        }
    ));

    assert_eq!(
        f.ledger.try_release_funds_on_milestone(&caller, &1, &0, &5000),
        Err(Ok(Error::MilestoneNotAchieved))
    );
    assert_eq!(f.ledger.get_project(&1).unwrap().escrow_balance, 8000);
}

#[test]
fn test_undefined_milestone_is_not_achieved() {
    let f = setup();
    let caller = Address::generate(&f.env);

    assert_eq!(
        f.ledger.try_release_funds_on_milestone(&caller, &1, &7, &100),
        Err(Ok(Error::MilestoneNotAchieved))
    );
}
