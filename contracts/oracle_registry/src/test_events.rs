extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Bytes, BytesN, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{DataSubmitted, DataUpdated, OracleAssigned, OracleRegistered, OracleRevoked};
use crate::{ImpactMetrics, OracleRegistry, OracleRegistryClient};

fn setup() -> (Env, OracleRegistryClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(OracleRegistry, ());
    let client = OracleRegistryClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    client.init(&admin);
    (env, client, admin)
}

#[test]
fn test_oracle_registered_event() {
    let (env, client, admin) = setup();
    let oracle = Address::generate(&env);
    let name = String::from_str(&env, "EcoMeter");

    client.register_oracle(&admin, &oracle, &name);

    let last_event = env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("orc_reg").into_val(&env),
        oracle.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let data: OracleRegistered = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(data, OracleRegistered { oracle, name });
}

#[test]
fn test_oracle_assigned_and_revoked_events() {
    let (env, client, admin) = setup();
    let oracle = Address::generate(&env);
    client.register_oracle(&admin, &oracle, &String::from_str(&env, "x"));

    client.assign_oracle_to_project(&admin, &4, &oracle);
    let last_event = env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &env,
        symbol_short!("orc_asgn").into_val(&env),
        4u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let data: OracleAssigned = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        OracleAssigned {
            project_id: 4,
            oracle: oracle.clone()
        }
    );

    client.revoke_oracle(&admin, &oracle);
    let last_event = env.events().all().last().expect("No events found");
    let data: OracleRevoked = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(data, OracleRevoked { oracle });
}

#[test]
fn test_data_submitted_and_updated_events() {
    let (env, client, admin) = setup();
    let oracle = Address::generate(&env);
    client.register_oracle(&admin, &oracle, &String::from_str(&env, "x"));
    client.assign_oracle_to_project(&admin, &1, &oracle);

    let metrics = ImpactMetrics {
        kwh: 1200,
        households: 60,
        co2_kg: 240,
    };
    client.submit_oracle_data(
        &oracle,
        &1,
        &3,
        &Bytes::from_array(&env, &[0xbb; 32]),
        &metrics,
    );

    let last_event = env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &env,
        symbol_short!("data_sub").into_val(&env),
        1u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let data: DataSubmitted = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        DataSubmitted {
            project_id: 1,
            submission_id: 3,
            oracle: oracle.clone(),
            data_hash: BytesN::from_array(&env, &[0xbb; 32]),
        }
    );

    let corrected = ImpactMetrics {
        kwh: 1250,
        households: 60,
        co2_kg: 240,
    };
    client.update_oracle_data(&oracle, &1, &3, &corrected);
    let last_event = env.events().all().last().expect("No events found");
    let data: DataUpdated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        DataUpdated {
            project_id: 1,
            submission_id: 3,
            metrics: corrected,
        }
    );
}
