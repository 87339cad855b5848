//! Forward (ancestral) sampling of complete joint assignments.

use credence_core::{Assignment, RngHandle};
use credence_net::PreparedNetwork;
use log::debug;

/// Bounded lazy stream of joint samples.
///
/// Each draw walks the topological order and samples every variable from its
/// conditional row given the already-drawn parents, so the stream's marginal
/// frequencies converge on the network's joint. The stream yields exactly the
/// requested number of assignments and is then exhausted; two streams over
/// the same network with the same seed yield identical sequences.
#[derive(Debug)]
pub struct SampleStream<'a> {
    net: &'a PreparedNetwork,
    rng: RngHandle,
    remaining: usize,
    state: Vec<usize>,
}

/// Opens a stream of `count` joint samples drawn from `seed`.
pub fn sample(net: &PreparedNetwork, count: usize, seed: u64) -> SampleStream<'_> {
    debug!("forward sampling {count} draw(s) from seed {seed:#018x}");
    SampleStream {
        net,
        rng: RngHandle::from_seed(seed),
        remaining: count,
        state: vec![0; net.variable_count()],
    }
}

impl Iterator for SampleStream<'_> {
    type Item = Assignment;

    fn next(&mut self) -> Option<Assignment> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let net = self.net;
        for &variable in net.topological_order() {
            let row = net.conditional_row(variable, &self.state);
            self.state[variable] = draw_from_row(row, &mut self.rng);
        }

        let mut assignment = Assignment::new();
        for (variable, &value) in self.state.iter().enumerate() {
            assignment.set(net.variable_name(variable), net.domain(variable)[value].clone());
        }
        Some(assignment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SampleStream<'_> {}

fn draw_from_row(row: &[f64], rng: &mut RngHandle) -> usize {
    // scale by the actual row sum so validation slack cannot skew the draw
    let total: f64 = row.iter().sum();
    let mut draw = rng.unit_f64() * total;
    for (index, &weight) in row.iter().enumerate() {
        draw -= weight;
        if draw < 0.0 {
            return index;
        }
    }
    row.len() - 1
}
