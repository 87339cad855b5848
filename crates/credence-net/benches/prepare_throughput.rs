use credence_net::{canonical_hash, prepare, ConditionalTable, NetworkStructure, TableStore};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Chain of boolean variables: V00 -> V01 -> ... -> V(n-1).
fn chain_parts(length: usize) -> (NetworkStructure, TableStore) {
    let names: Vec<String> = (0..length).map(|index| format!("V{index:02}")).collect();
    let edges: Vec<(String, String)> = names
        .windows(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect();
    let structure = NetworkStructure::from_edges(edges).unwrap();

    let mut store = TableStore::new();
    store.set(ConditionalTable::new(names[0].clone()).with_root_row([(true, 0.6), (false, 0.4)]));
    for pair in names.windows(2) {
        store.set(
            ConditionalTable::new(pair[1].clone())
                .with_row(
                    [(pair[0].clone(), true)],
                    [(true, 0.85), (false, 0.15)],
                )
                .with_row(
                    [(pair[0].clone(), false)],
                    [(true, 0.10), (false, 0.90)],
                ),
        );
    }
    (structure, store)
}

fn prepare_bench(c: &mut Criterion) {
    let (structure, store) = chain_parts(24);

    c.bench_function("prepare_chain_24", |b| {
        b.iter(|| {
            let net = prepare(black_box(&structure), black_box(&store)).unwrap();
            black_box(net.variable_count());
        })
    });

    let net = prepare(&structure, &store).unwrap();
    c.bench_function("canonical_hash_chain_24", |b| {
        b.iter(|| {
            black_box(canonical_hash(&net));
        })
    });
}

criterion_group!(benches, prepare_bench);
criterion_main!(benches);
