use credence_core::Assignment;
use credence_infer::sample;
use credence_net::{prepare, ConditionalTable, NetworkStructure, PreparedNetwork, TableStore};

fn chain_network() -> PreparedNetwork {
    let structure = NetworkStructure::from_edges([("Rain", "Sprinkler")]).unwrap();
    let mut store = TableStore::new();
    store.set(ConditionalTable::new("Rain").with_root_row([(true, 0.3), (false, 0.7)]));
    store.set(
        ConditionalTable::new("Sprinkler")
            .with_row([("Rain", true)], [(true, 0.01), (false, 0.99)])
            .with_row([("Rain", false)], [(true, 0.40), (false, 0.60)]),
    );
    prepare(&structure, &store).unwrap()
}

#[test]
fn stream_yields_exactly_the_requested_count() {
    let net = chain_network();
    let mut stream = sample(&net, 25, 17);

    for _ in 0..25 {
        assert!(stream.next().is_some());
    }
    assert!(stream.next().is_none());
    // exhausted for good, not just once
    assert!(stream.next().is_none());
}

#[test]
fn size_hint_tracks_the_remaining_draws() {
    let net = chain_network();
    let mut stream = sample(&net, 10, 17);

    assert_eq!(stream.size_hint(), (10, Some(10)));
    stream.next();
    stream.next();
    assert_eq!(stream.len(), 8);
}

#[test]
fn zero_count_stream_is_empty() {
    let net = chain_network();
    assert_eq!(sample(&net, 0, 17).count(), 0);
}

#[test]
fn same_seed_reproduces_the_sequence() {
    let net = chain_network();
    let first: Vec<Assignment> = sample(&net, 20, 99).collect();
    let second: Vec<Assignment> = sample(&net, 20, 99).collect();
    assert_eq!(first, second);
}

#[test]
fn distinct_seeds_diverge() {
    let net = chain_network();
    let first: Vec<Assignment> = sample(&net, 20, 1).collect();
    let second: Vec<Assignment> = sample(&net, 20, 2).collect();
    assert_ne!(first, second);
}

#[test]
fn every_assignment_is_complete_and_in_domain() {
    let net = chain_network();
    for assignment in sample(&net, 200, 5) {
        assert_eq!(assignment.len(), net.variable_count());
        for variable in 0..net.variable_count() {
            let value = assignment.get(net.variable_name(variable)).unwrap();
            assert!(net.domain(variable).contains(value));
        }
    }
}
