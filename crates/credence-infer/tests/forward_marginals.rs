use credence_core::{Assignment, Evidence, Value};
use credence_infer::{exact, sample};
use credence_net::{prepare, ConditionalTable, NetworkStructure, PreparedNetwork, TableStore};

fn sprinkler_network() -> PreparedNetwork {
    let structure = NetworkStructure::from_edges([
        ("Rain", "Sprinkler"),
        ("Rain", "WetGrass"),
        ("Sprinkler", "WetGrass"),
    ])
    .unwrap();

    let mut store = TableStore::new();
    store.set(ConditionalTable::new("Rain").with_root_row([(true, 0.3), (false, 0.7)]));
    store.set(
        ConditionalTable::new("Sprinkler")
            .with_row([("Rain", true)], [(true, 0.01), (false, 0.99)])
            .with_row([("Rain", false)], [(true, 0.40), (false, 0.60)]),
    );
    store.set(
        ConditionalTable::new("WetGrass")
            .with_row(
                [("Rain", true), ("Sprinkler", true)],
                [(true, 0.99), (false, 0.01)],
            )
            .with_row(
                [("Rain", true), ("Sprinkler", false)],
                [(true, 0.80), (false, 0.20)],
            )
            .with_row(
                [("Rain", false), ("Sprinkler", true)],
                [(true, 0.90), (false, 0.10)],
            )
            .with_row(
                [("Rain", false), ("Sprinkler", false)],
                [(true, 0.00), (false, 1.00)],
            ),
    );
    prepare(&structure, &store).unwrap()
}

fn frequency(samples: &[Assignment], variable: &str, value: &Value) -> f64 {
    let hits = samples
        .iter()
        .filter(|assignment| assignment.get(variable) == Some(value))
        .count();
    hits as f64 / samples.len() as f64
}

#[test]
fn root_frequency_matches_its_prior() {
    let net = sprinkler_network();
    let samples: Vec<Assignment> = sample(&net, 50_000, 11).collect();

    let rain = frequency(&samples, "Rain", &Value::Bool(true));
    assert!((rain - 0.3).abs() < 0.02, "observed {rain}");
}

#[test]
fn downstream_frequencies_match_the_exact_marginals() {
    let net = sprinkler_network();
    let samples: Vec<Assignment> = sample(&net, 50_000, 12).collect();

    for variable in ["Sprinkler", "WetGrass"] {
        let marginal = exact::query(&net, variable, &Evidence::new()).unwrap();
        let observed = frequency(&samples, variable, &Value::Bool(true));
        let expected = marginal.probability(&Value::Bool(true));
        assert!(
            (observed - expected).abs() < 0.02,
            "{variable}: observed {observed}, exact {expected}"
        );
    }
}

#[test]
fn deterministic_network_reproduces_the_forced_assignment() {
    let structure = NetworkStructure::from_edges([("Source", "Relay")]).unwrap();
    let mut store = TableStore::new();
    store.set(ConditionalTable::new("Source").with_root_row([(true, 1.0), (false, 0.0)]));
    store.set(
        ConditionalTable::new("Relay")
            .with_row([("Source", true)], [(true, 1.0), (false, 0.0)])
            .with_row([("Source", false)], [(true, 0.0), (false, 1.0)]),
    );
    let net = prepare(&structure, &store).unwrap();

    for assignment in sample(&net, 100, 3) {
        assert_eq!(assignment.get("Source"), Some(&Value::Bool(true)));
        assert_eq!(assignment.get("Relay"), Some(&Value::Bool(true)));
    }
}
