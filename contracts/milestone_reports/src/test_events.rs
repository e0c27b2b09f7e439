extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Bytes, BytesN, Env, IntoVal, String, Symbol, TryIntoVal,
};

use crate::events::{
    ManagerAdded, MilestoneDefined, MilestoneOutcome, ReportSubmitted, ReportUpdated,
    ReportVerified,
};
use crate::{ImpactMetrics, MilestoneReports, MilestoneReportsClient};

fn setup() -> (Env, MilestoneReportsClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(MilestoneReports, ());
    let client = MilestoneReportsClient::new(&env, &contract_id);
    let manager = Address::generate(&env);
    client.register_project_manager(&manager, &1, &manager);
    (env, client, manager)
}

fn metrics(kwh: u64, households: u64, co2_kg: u64) -> ImpactMetrics {
    ImpactMetrics {
        kwh,
        households,
        co2_kg,
    }
}

fn submit(env: &Env, client: &MilestoneReportsClient<'static>, manager: &Address, claimed: ImpactMetrics) {
    client.define_milestone(manager, &1, &0, &metrics(1000, 50, 200), &5000);
    client.submit_report(
        manager,
        &1,
        &0,
        &String::from_str(env, "Q1 Report"),
        &String::from_str(env, "Solar installation"),
        &Bytes::from_array(env, &[0xaa; 32]),
        &Bytes::from_array(env, &[0xbb; 32]),
        &0,
        &claimed,
    );
}

fn assert_topics(env: &Env, topics: soroban_sdk::Vec<soroban_sdk::Val>, kind: Symbol, project_id: u64) {
    let expected = vec![env, kind.into_val(env), project_id.into_val(env)];
    assert_eq!(topics, expected);
}

#[test]
fn test_manager_added_event() {
    let (env, client, manager) = setup();
    let other = Address::generate(&env);

    client.register_project_manager(&manager, &1, &other);

    let last_event = env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, client.address);
    assert_topics(&env, last_event.1, symbol_short!("mgr_add"), 1);
    let data: ManagerAdded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        ManagerAdded {
            project_id: 1,
            manager: other,
            added_by: manager,
        }
    );
}

#[test]
fn test_milestone_defined_event() {
    let (env, client, manager) = setup();

    client.define_milestone(&manager, &1, &3, &metrics(10, 20, 30), &750);

    let last_event = env.events().all().last().expect("No events found");
    assert_topics(&env, last_event.1, symbol_short!("ms_def"), 1);
    let data: MilestoneDefined = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        MilestoneDefined {
            project_id: 1,
            milestone_id: 3,
            targets: metrics(10, 20, 30),
            reward_amount: 750,
        }
    );
}

#[test]
fn test_report_submitted_and_updated_events() {
    let (env, client, manager) = setup();
    submit(&env, &client, &manager, metrics(100, 10, 20));

    let last_event = env.events().all().last().expect("No events found");
    assert_topics(&env, last_event.1, symbol_short!("rpt_sub"), 1);
    let data: ReportSubmitted = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        ReportSubmitted {
            project_id: 1,
            report_id: 0,
            milestone_id: 0,
            submitter: manager.clone(),
        }
    );

    client.update_report_metrics(&manager, &1, &0, &metrics(1200, 60, 250));
    let last_event = env.events().all().last().expect("No events found");
    assert_topics(&env, last_event.1, symbol_short!("rpt_upd"), 1);
    let data: ReportUpdated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(data.metrics, metrics(1200, 60, 250));
}

#[test]
fn test_report_verified_event() {
    let (env, client, manager) = setup();
    submit(&env, &client, &manager, metrics(1200, 60, 250));

    client.verify_report_oracle(&1, &0, &Bytes::from_array(&env, &[0xbb; 32]));

    let last_event = env.events().all().last().expect("No events found");
    assert_topics(&env, last_event.1, symbol_short!("rpt_ver"), 1);
    let data: ReportVerified = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        ReportVerified {
            project_id: 1,
            report_id: 0,
            oracle_hash: BytesN::from_array(&env, &[0xbb; 32]),
        }
    );
}

#[test]
fn test_milestone_done_event() {
    let (env, client, manager) = setup();
    submit(&env, &client, &manager, metrics(1200, 60, 250));
    client.verify_report_oracle(&1, &0, &Bytes::from_array(&env, &[0xbb; 32]));

    client.finalize_report(&manager, &1, &0);

    let last_event = env.events().all().last().expect("No events found");
    assert_topics(&env, last_event.1, symbol_short!("ms_done"), 1);
    let data: MilestoneOutcome = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        MilestoneOutcome {
            project_id: 1,
            milestone_id: 0,
            report_id: 0,
            metrics: metrics(1200, 60, 250),
        }
    );
}

#[test]
fn test_milestone_partial_event() {
    let (env, client, manager) = setup();
    submit(&env, &client, &manager, metrics(900, 60, 250));
    client.verify_report_oracle(&1, &0, &Bytes::from_array(&env, &[0xbb; 32]));

    client.finalize_report(&manager, &1, &0);

    let last_event = env.events().all().last().expect("No events found");
    assert_topics(&env, last_event.1, symbol_short!("ms_part"), 1);
    let data: MilestoneOutcome = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(data.metrics, metrics(900, 60, 250));
}
