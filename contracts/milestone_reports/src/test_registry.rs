//! Report verification against a live oracle registry.

extern crate std;

use oracle_registry::{
    ImpactMetrics as OracleMetrics, OracleRegistry, OracleRegistryClient,
};
use soroban_sdk::{testutils::Address as _, Address, Bytes, Env, String};

use crate::{
    Error, ImpactMetrics, MilestoneReports, MilestoneReportsClient, ReportStatus,
};

struct Fixture {
    env: Env,
    reports: MilestoneReportsClient<'static>,
    registry: OracleRegistryClient<'static>,
    manager: Address,
    oracle: Address,
}

fn setup() -> Fixture {
    let env = Env::default();
    env.mock_all_auths();

    let registry = OracleRegistryClient::new(&env, &env.register(OracleRegistry, ()));
    let admin = Address::generate(&env);
    let oracle = Address::generate(&env);
    registry.init(&admin);
    registry.register_oracle(&admin, &oracle, &String::from_str(&env, "EcoMeter"));
    registry.assign_oracle_to_project(&admin, &1, &oracle);

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

    Fixture {
        env,
        reports,
        registry,
        manager,
        oracle,
    }
}

fn attest(f: &Fixture, submission_id: u64, hash: [u8; 32]) {
    f.registry.submit_oracle_data(
        &f.oracle,
        &1,
        &submission_id,
        &Bytes::from_array(&f.env, &hash),
        &OracleMetrics {
            kwh: 1200,
            households: 60,
            co2_kg: 250,
        },
    );
}

fn submit_report(f: &Fixture, report_id: u64, cited: [u8; 32]) {
    f.reports.submit_report(
        &f.manager,
        &1,
        &report_id,
        &String::from_str(&f.env, "Q1 Report"),
        &String::from_str(&f.env, "Solar installation"),
        &Bytes::from_array(&f.env, &[0x01; 32]),
        &Bytes::from_array(&f.env, &cited),
        &0,
        &ImpactMetrics {
            kwh: 1200,
            households: 60,
            co2_kg: 250,
        },
    );
}

#[test]
fn test_registry_hash_verifies_report() {
    let f = setup();
    attest(&f, 7, [0xbb; 32]);
    submit_report(&f, 0, [0xbb; 32]);

    f.reports
        .verify_report_with_registry(&1, &0, &f.registry.address, &7);

    assert_eq!(
        f.reports.get_report(&1, &0).unwrap().status,
        ReportStatus::Verified
    );
    assert!(f.reports.finalize_report(&f.manager, &1, &0));
    assert!(f.reports.is_milestone_achieved(&1, &0));
}

#[test]
fn test_registry_hash_mismatch() {
    let f = setup();
    attest(&f, 7, [0xcc; 32]);
    submit_report(&f, 0, [0xbb; 32]);

    let result = f
        .reports
        .try_verify_report_with_registry(&1, &0, &f.registry.address, &7);

    assert_eq!(result, Err(Ok(Error::OracleMismatch)));
    assert_eq!(
        f.reports.get_report(&1, &0).unwrap().status,
        ReportStatus::Draft
    );
}

#[test]
fn test_missing_submission_is_mismatch() {
    let f = setup();
    submit_report(&f, 0, [0xbb; 32]);

    let result = f
        .reports
        .try_verify_report_with_registry(&1, &0, &f.registry.address, &99);

    assert_eq!(result, Err(Ok(Error::OracleMismatch)));
}

#[test]
fn test_registry_lookup_on_missing_report() {
    let f = setup();
    attest(&f, 7, [0xbb; 32]);

    let result = f
        .reports
        .try_verify_report_with_registry(&1, &4, &f.registry.address, &7);

    assert_eq!(result, Err(Ok(Error::ReportNotFound)));
}

#[test]
fn test_outcome_follows_the_registry_passed_in() {
    let f = setup();
    attest(&f, 7, [0xbb; 32]);
    submit_report(&f, 0, [0xbb; 32]);

    // A second registry holding a different hash under the same id.
    let other = OracleRegistryClient::new(&f.env, &f.env.register(OracleRegistry, ()));
    let other_admin = Address::generate(&f.env);
    other.init(&other_admin);
    other.register_oracle(&other_admin, &f.oracle, &String::from_str(&f.env, "Other"));
    other.assign_oracle_to_project(&other_admin, &1, &f.oracle);
    other.submit_oracle_data(
        &f.oracle,
        &1,
        &7,
        &Bytes::from_array(&f.env, &[0xcc; 32]),
        &OracleMetrics {
            kwh: 1200,
            households: 60,
            co2_kg: 250,
        },
    );

    let result = f
        .reports
        .try_verify_report_with_registry(&1, &0, &other.address, &7);
    assert_eq!(result, Err(Ok(Error::OracleMismatch)));

    f.reports
        .verify_report_with_registry(&1, &0, &f.registry.address, &7);
    assert_eq!(
        f.reports.get_report(&1, &0).unwrap().status,
        ReportStatus::Verified
    );
}
