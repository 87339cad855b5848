use credence_core::errors::CredenceError;
use credence_core::{Domain, Evidence, Value};
use credence_infer::{exact, gibbs, Distribution, GibbsConfig, ZERO_MASS_TOLERANCE};
use credence_net::{prepare, ConditionalTable, NetworkStructure, PreparedNetwork, TableStore};

/// Relay copies Source, Sink copies Relay. Deterministic rows make
/// contradictory observations carry exactly zero mass.
fn copy_chain() -> PreparedNetwork {
    let structure =
        NetworkStructure::from_edges([("Source", "Relay"), ("Relay", "Sink")]).unwrap();

    let mut store = TableStore::new();
    store.set(ConditionalTable::new("Source").with_root_row([(true, 0.5), (false, 0.5)]));
    store.set(
        ConditionalTable::new("Relay")
            .with_row([("Source", true)], [(true, 1.0), (false, 0.0)])
            .with_row([("Source", false)], [(true, 0.0), (false, 1.0)]),
    );
    store.set(
        ConditionalTable::new("Sink")
            .with_row([("Relay", true)], [(true, 1.0), (false, 0.0)])
            .with_row([("Relay", false)], [(true, 0.0), (false, 1.0)]),
    );
    prepare(&structure, &store).unwrap()
}

#[test]
fn direct_contradiction_is_detected() {
    let net = copy_chain();
    let evidence = Evidence::new().observe("Source", true).observe("Relay", false);
    let err = exact::query(&net, "Sink", &evidence).unwrap_err();

    assert!(matches!(err, CredenceError::ZeroEvidenceProbability(_)));
    assert_eq!(err.info().code, "zero-evidence");
    assert!(err.info().hint.is_some());
}

#[test]
fn contradiction_across_the_chain_is_detected() {
    let net = copy_chain();
    let evidence = Evidence::new().observe("Source", true).observe("Sink", false);
    let err = exact::query(&net, "Relay", &evidence).unwrap_err();

    assert!(matches!(err, CredenceError::ZeroEvidenceProbability(_)));
}

#[test]
fn consistent_deterministic_evidence_still_answers() {
    let net = copy_chain();
    let evidence = Evidence::new().observe("Source", true);
    let posterior = exact::query(&net, "Sink", &evidence).unwrap();

    assert_eq!(posterior.probability(&Value::Bool(true)), 1.0);
}

#[test]
fn vanishing_weights_are_treated_as_zero_mass() {
    let domain = Domain::from_values([Value::Bool(true), Value::Bool(false)]).unwrap();

    let err = Distribution::from_weights(&domain, &[0.0, ZERO_MASS_TOLERANCE / 2.0]).unwrap_err();
    assert!(matches!(err, CredenceError::ZeroEvidenceProbability(_)));

    // just above the tolerance the mass is still usable
    let tiny = Distribution::from_weights(&domain, &[0.0, 1e-9]).unwrap();
    assert_eq!(tiny.probability(&Value::Bool(false)), 1.0);
}

#[test]
fn non_finite_totals_are_rejected() {
    let domain = Domain::from_values([Value::Bool(true), Value::Bool(false)]).unwrap();
    let err = Distribution::from_weights(&domain, &[f64::NAN, 1.0]).unwrap_err();

    assert!(matches!(err, CredenceError::ZeroEvidenceProbability(_)));
}

#[test]
fn gibbs_tolerates_contradictory_evidence_without_failing() {
    let net = copy_chain();
    let evidence = Evidence::new().observe("Source", true).observe("Sink", false);
    let config = GibbsConfig {
        iterations: 500,
        burn_in: 50,
        chains: 2,
        seed: 4,
        ..GibbsConfig::default()
    };

    // every local conditional for Relay vanishes, so each chain keeps its
    // initial value for the whole walk instead of erroring out
    let summary = gibbs::run(&config, &net, "Relay", &evidence).unwrap();
    let total: f64 = summary
        .distribution
        .iter()
        .map(|(_, probability)| probability)
        .sum();
    assert!((total - 1.0).abs() < 1e-12);

    let tallied: u64 = summary.counts.iter().map(|(_, count)| count).sum();
    assert_eq!(tallied, 1_000);
}
