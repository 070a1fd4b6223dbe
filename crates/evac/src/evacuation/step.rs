//! Per-vertex flow redistribution.
//!
//! Reads only the settled graph `prev` and writes only into the zero-flow
//! skeleton `next`. Edge ids are shared between the two, so the incoming edge
//! read from `prev` and the one written in `next` are paired by id.

use rand::Rng;

use crate::network::{CapacitatedDigraph, EdgeId, VertexId};

/// Hazard classification of a vertex for the current step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    /// `detDist <= hazardRadius`: inflow is lethal.
    Dead,
    /// `detDist > hazardLimit`: inflow leaves the city.
    Escape,
    Live,
}

impl Zone {
    #[inline]
    pub fn classify(det_dist: f64, hazard_radius: f64, hazard_limit: f64) -> Self {
        if det_dist <= hazard_radius {
            Zone::Dead
        } else if det_dist > hazard_limit {
            Zone::Escape
        } else {
            Zone::Live
        }
    }
}

/// Result of updating one vertex. Amounts are population mass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VertexOutcome {
    Idle,
    Died(f64),
    Escaped(f64),
    Routed(f64),
    Returned(f64),
}

/// Everything `update_vertex` writes besides `next`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexUpdate {
    pub outcome: VertexOutcome,
    /// Excess left on over-capacity incoming roads.
    pub carried: f64,
}

/// Redistribute the inflow of `v`.
///
/// `det_dist` is indexed by vertex id and drives the choice of the "best"
/// outgoing edge (farthest destination; first one wins ties).
pub fn update_vertex<R: Rng + ?Sized>(
    prev: &CapacitatedDigraph,
    next: &mut CapacitatedDigraph,
    v: VertexId,
    zone: Zone,
    awareness: f64,
    det_dist: &[f64],
    rng: &mut R,
) -> VertexUpdate {
    let incoming: Vec<EdgeId> = prev.incoming_ids(v).collect();

    // Capped inflow and raw inflow; excess over the road's whole-unit
    // throughput stays on it unless the vertex is lethal.
    let mut in_flow = 0.0;
    let mut total_inflow = 0.0;
    let mut carried = 0.0;
    for &id in &incoming {
        let old = prev.edge(id);
        total_inflow += old.flow();
        let cap = old.throughput();
        if old.flow() <= cap || zone == Zone::Dead {
            in_flow += old.flow();
        } else {
            in_flow += cap;
            let excess = old.flow() - cap;
            next.edge_mut(id).add_flow(excess);
            carried += excess;
        }
    }

    let done = |outcome| VertexUpdate { outcome, carried };
    if total_inflow == 0.0 {
        return done(VertexOutcome::Idle);
    }
    match zone {
        Zone::Dead => return done(VertexOutcome::Died(total_inflow)),
        Zone::Escape => return done(VertexOutcome::Escaped(in_flow)),
        Zone::Live => {}
    }

    let outs: Vec<EdgeId> = next.outgoing_ids(v).collect();
    if outs.is_empty() {
        for &id in &incoming {
            let old = prev.edge(id);
            next.edge_mut(id).add_flow(old.flow().min(old.throughput()));
        }
        return done(VertexOutcome::Returned(in_flow));
    }

    let best = best_edge(next, &outs, det_dist);
    let mut weights = vec![0.0; outs.len()];
    for j in 0..outs.len() {
        let distr: f64 = rng.gen();
        let smart = distr * awareness;
        weights[best] += smart;
        weights[j] += distr - smart;
    }
    for (id, amount) in outs.iter().zip(split_floor(in_flow, &weights)) {
        next.edge_mut(*id).add_flow(amount);
    }
    done(VertexOutcome::Routed(in_flow))
}

/// Index into `outs` of the edge whose head lies farthest from the detonation.
fn best_edge(g: &CapacitatedDigraph, outs: &[EdgeId], det_dist: &[f64]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::NEG_INFINITY;
    for (j, &id) in outs.iter().enumerate() {
        let d = det_dist[g.edge(id).to().0];
        if d > best_dist {
            best = j;
            best_dist = d;
        }
    }
    best
}

/// Split `total` proportionally to `weights`, flooring each share and giving
/// the remainder to slot 0 so the shares sum back to `total`. A zero (or
/// non-finite) weight sum splits evenly. `weights` must be non-empty.
pub fn split_floor(total: f64, weights: &[f64]) -> Vec<f64> {
    let sum: f64 = weights.iter().sum();
    let mut out: Vec<f64> = if sum > 0.0 && sum.is_finite() {
        weights.iter().map(|w| (total * w / sum).floor()).collect()
    } else {
        let n = weights.len() as f64;
        vec![(total / n).floor(); weights.len()]
    };
    let assigned: f64 = out.iter().sum();
    out[0] += total - assigned;
    out
}
