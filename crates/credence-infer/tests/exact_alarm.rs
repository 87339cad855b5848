use credence_core::errors::CredenceError;
use credence_core::{Evidence, Value};
use credence_infer::{exact, Algorithm, ExactEngine, InferenceAlgorithm};
use credence_net::{prepare, ConditionalTable, NetworkStructure, PreparedNetwork, TableStore};
use test_log::test;

fn alarm_network() -> PreparedNetwork {
    let structure = NetworkStructure::from_edges([
        ("Burglary", "Alarm"),
        ("Earthquake", "Alarm"),
        ("Alarm", "JohnCalls"),
        ("Alarm", "MaryCalls"),
    ])
    .unwrap();

    let mut store = TableStore::new();
    store.set(ConditionalTable::new("Burglary").with_root_row([(true, 0.001), (false, 0.999)]));
    store.set(ConditionalTable::new("Earthquake").with_root_row([(true, 0.002), (false, 0.998)]));
    store.set(
        ConditionalTable::new("Alarm")
            .with_row(
                [("Burglary", true), ("Earthquake", true)],
                [(true, 0.95), (false, 0.05)],
            )
            .with_row(
                [("Burglary", true), ("Earthquake", false)],
                [(true, 0.94), (false, 0.06)],
            )
            .with_row(
                [("Burglary", false), ("Earthquake", true)],
                [(true, 0.29), (false, 0.71)],
            )
            .with_row(
                [("Burglary", false), ("Earthquake", false)],
                [(true, 0.001), (false, 0.999)],
            ),
    );
    store.set(
        ConditionalTable::new("JohnCalls")
            .with_row([("Alarm", true)], [(true, 0.90), (false, 0.10)])
            .with_row([("Alarm", false)], [(true, 0.05), (false, 0.95)]),
    );
    store.set(
        ConditionalTable::new("MaryCalls")
            .with_row([("Alarm", true)], [(true, 0.70), (false, 0.30)])
            .with_row([("Alarm", false)], [(true, 0.01), (false, 0.99)]),
    );
    prepare(&structure, &store).unwrap()
}

fn both_calls() -> Evidence {
    Evidence::new()
        .observe("JohnCalls", true)
        .observe("MaryCalls", true)
}

#[test]
fn burglary_posterior_given_both_calls() {
    let net = alarm_network();
    let posterior = exact::query(&net, "Burglary", &both_calls()).unwrap();

    // the textbook posterior for this network
    assert!((posterior.probability(&Value::Bool(true)) - 0.284_172).abs() < 1e-4);
    assert!((posterior.probability(&Value::Bool(false)) - 0.715_828).abs() < 1e-4);
}

#[test]
fn prior_marginal_matches_hand_computation() {
    let net = alarm_network();
    let prior = exact::query(&net, "Alarm", &Evidence::new()).unwrap();

    // sum over the four (Burglary, Earthquake) combinations
    assert!((prior.probability(&Value::Bool(true)) - 0.002_516_442).abs() < 1e-9);
}

#[test]
fn posterior_sums_to_one() {
    let net = alarm_network();
    let posterior = exact::query(&net, "Earthquake", &both_calls()).unwrap();

    let total: f64 = posterior.iter().map(|(_, probability)| probability).sum();
    assert!((total - 1.0).abs() < 1e-12);
    assert_eq!(posterior.len(), 2);
}

#[test]
fn evidenced_target_collapses_to_point_mass() {
    let net = alarm_network();
    let evidence = both_calls().observe("Burglary", true);
    let posterior = exact::query(&net, "Burglary", &evidence).unwrap();

    assert_eq!(posterior.probability(&Value::Bool(true)), 1.0);
    assert_eq!(posterior.probability(&Value::Bool(false)), 0.0);
}

#[test]
fn unknown_target_is_rejected() {
    let net = alarm_network();
    let err = exact::query(&net, "Tornado", &Evidence::new()).unwrap_err();

    assert!(matches!(err, CredenceError::UnknownVariable(_)));
    assert_eq!(err.info().code, "unknown-variable");
    assert_eq!(err.info().context["variable"], "Tornado");
}

#[test]
fn unknown_evidence_variable_is_rejected() {
    let net = alarm_network();
    let evidence = Evidence::new().observe("Typhoon", true);
    let err = exact::query(&net, "Burglary", &evidence).unwrap_err();

    assert!(matches!(err, CredenceError::InvalidEvidence(_)));
    assert_eq!(err.info().code, "evidence-variable");
}

#[test]
fn out_of_domain_evidence_value_is_rejected() {
    let net = alarm_network();
    let evidence = Evidence::new().observe("JohnCalls", "maybe");
    let err = exact::query(&net, "Burglary", &evidence).unwrap_err();

    assert!(matches!(err, CredenceError::InvalidEvidence(_)));
    assert_eq!(err.info().code, "evidence-value");
}

#[test]
fn engine_and_enum_agree_with_the_free_function() {
    let net = alarm_network();
    let expected = exact::query(&net, "Burglary", &both_calls()).unwrap();

    let via_engine = ExactEngine.answer(&net, "Burglary", &both_calls()).unwrap();
    let via_enum = Algorithm::Exact
        .answer(&net, "Burglary", &both_calls())
        .unwrap();
    assert_eq!(expected, via_engine);
    assert_eq!(expected, via_enum);
}

#[test]
fn argmax_picks_the_heavier_value() {
    let net = alarm_network();
    let posterior = exact::query(&net, "Burglary", &both_calls()).unwrap();

    assert_eq!(posterior.argmax(), Some(&Value::Bool(false)));
}
