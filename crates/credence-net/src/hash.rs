//! Canonical structural hashing of prepared networks.

use credence_core::Value;
use sha2::{Digest, Sha256};

use crate::prepare::PreparedNetwork;

/// Computes the canonical structural hash of a prepared network.
///
/// The hash covers names, domains, adjacency, Markov blankets, topological
/// order, and every compiled probability, all in the network's dense
/// (name-sorted) layout. Two preparations of the same structure and tables
/// therefore hash identically regardless of registration order.
pub fn canonical_hash(net: &PreparedNetwork) -> String {
    let mut hasher = Sha256::new();
    hasher.update((net.variable_count() as u64).to_le_bytes());

    for variable in 0..net.variable_count() {
        update_str(net.variable_name(variable), &mut hasher);

        let domain = net.domain(variable);
        hasher.update((domain.len() as u64).to_le_bytes());
        for value in domain.values() {
            encode_value(value, &mut hasher);
        }

        update_indices(net.parents(variable), &mut hasher);
        update_indices(net.children(variable), &mut hasher);
        update_indices(net.markov_blanket(variable), &mut hasher);

        let table = &net.tables[variable];
        update_indices(&table.strides, &mut hasher);
        hasher.update((table.probs.len() as u64).to_le_bytes());
        for probability in &table.probs {
            hasher.update(probability.to_bits().to_le_bytes());
        }
    }

    update_indices(net.topological_order(), &mut hasher);
    format!("{:x}", hasher.finalize())
}

fn encode_value(value: &Value, hasher: &mut Sha256) {
    match value {
        Value::Bool(flag) => {
            hasher.update(b"bool");
            hasher.update([u8::from(*flag)]);
        }
        Value::Int(number) => {
            hasher.update(b"int");
            hasher.update(number.to_le_bytes());
        }
        Value::Label(label) => {
            hasher.update(b"label");
            update_str(label, hasher);
        }
    }
}

fn update_str(text: &str, hasher: &mut Sha256) {
    hasher.update((text.len() as u64).to_le_bytes());
    hasher.update(text.as_bytes());
}

fn update_indices(values: &[usize], hasher: &mut Sha256) {
    hasher.update((values.len() as u64).to_le_bytes());
    for value in values {
        hasher.update((*value as u64).to_le_bytes());
    }
}
