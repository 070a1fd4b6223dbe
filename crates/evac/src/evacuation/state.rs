//! `EvacuationState`: network ownership, population ledger and the step driver.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::Point;
use crate::network::{CapacitatedDigraph, EdgeId, FlowEdge, VertexId};
use crate::roads::{RoadMap, RoadNetwork, RoadRecord};

use super::step::{update_vertex, VertexOutcome, Zone};
use super::types::{AwarenessMode, EvacCfg, EvacError, PopulationLedger, StepSummary};

/// Live evacuation: road network, current flow graph, hazard and ledger.
///
/// Lifecycle: `new` → `add_roads` (any number of times) → `build_network` →
/// `populate` → repeated `set_hazard_radius` + `next_state`.
#[derive(Clone, Debug)]
pub struct EvacuationState {
    cfg: EvacCfg,
    detonation: Point,
    hazard_radius: f64,
    roads: RoadNetwork,
    graph: Option<CapacitatedDigraph>,
    det_dist: Vec<f64>,
    hazard_limit: f64,
    ledger: PopulationLedger,
    rng: StdRng,
}

impl EvacuationState {
    pub fn new(detonation: Point, cfg: EvacCfg) -> Self {
        Self {
            cfg,
            detonation,
            hazard_radius: 0.0,
            roads: RoadNetwork::new(cfg.capacity_multiplier),
            graph: None,
            det_dist: Vec::new(),
            hazard_limit: 0.0,
            ledger: PopulationLedger::default(),
            rng: StdRng::seed_from_u64(cfg.seed),
        }
    }

    /// Build, wire and seed a state from a parsed map. The map's `alert`
    /// value becomes the initial hazard radius.
    pub fn from_roadmap(map: &RoadMap, population: u64, cfg: EvacCfg) -> Result<Self, EvacError> {
        let mut state = Self::new(map.detonation, cfg);
        state.set_hazard_radius(map.alert);
        state.add_roads(&map.roads)?;
        state.build_network()?;
        state.populate(population)?;
        Ok(state)
    }

    /// Extend the intersection graph. Only allowed before `build_network`.
    ///
    /// Every record is checked before any is added: a road whose capacity
    /// (`width × length × capacity_multiplier`) is negative or not finite
    /// rejects the whole batch.
    pub fn add_roads<'a>(
        &mut self,
        roads: impl IntoIterator<Item = &'a RoadRecord>,
    ) -> Result<(), EvacError> {
        if self.graph.is_some() {
            return Err(EvacError::invalid("roads added after the network was built"));
        }
        let mult = self.cfg.capacity_multiplier;
        if !(mult.is_finite() && mult >= 0.0) {
            return Err(EvacError::invalid(format!(
                "capacity multiplier must be finite and nonnegative, got {mult}"
            )));
        }
        let roads: Vec<&RoadRecord> = roads.into_iter().collect();
        if let Some(bad) = roads.iter().find(|r| {
            let cap = r.capacity(mult);
            !(cap.is_finite() && cap >= 0.0)
        }) {
            return Err(EvacError::invalid(format!(
                "road {} -> {} has capacity {}",
                bad.from,
                bad.to,
                bad.capacity(mult)
            )));
        }
        for r in roads {
            self.roads.add_road(r);
        }
        Ok(())
    }

    /// Convert the intersection graph into the flow network and fix the
    /// per-vertex detonation distances and the escape limit.
    pub fn build_network(&mut self) -> Result<&CapacitatedDigraph, EvacError> {
        if self.roads.num_intersections() == 0 {
            return Err(EvacError::invalid("road network has no intersections"));
        }
        let det = self.detonation;
        self.det_dist = self.roads.points().iter().map(|p| p.distance_to(&det)).collect();
        let farthest = self.det_dist.iter().copied().fold(0.0, f64::max);
        self.hazard_limit = farthest * self.cfg.escape_fraction;
        let graph = self.roads.to_digraph();
        tracing::info!(
            vertices = graph.num_vertices(),
            edges = graph.num_edges(),
            hazard_limit = self.hazard_limit,
            "network built"
        );
        Ok(self.graph.insert(graph))
    }

    /// Drop `population` unit increments onto uniformly chosen edges. No
    /// capacity check: an edge may start over capacity.
    pub fn populate(&mut self, population: u64) -> Result<(), EvacError> {
        let graph = self.graph.as_mut().ok_or(EvacError::NotInitialized {
            what: "road network",
        })?;
        let ids: Vec<EdgeId> = graph.edges_with_ids().map(|(id, _)| id).collect();
        if ids.is_empty() && population > 0 {
            return Err(EvacError::invalid("cannot seed population on a graph without edges"));
        }
        for _ in 0..population {
            let id = ids[self.rng.gen_range(0..ids.len())];
            graph.edge_mut(id).add_flow(1.0);
        }
        self.ledger = PopulationLedger::new(population as f64);
        tracing::info!(population, edges = ids.len(), "population seeded");
        Ok(())
    }

    /// Advance one step: stage a zero-flow copy, update every vertex against
    /// the settled graph, then swap the copy in.
    pub fn next_state(&mut self) -> Result<StepSummary, EvacError> {
        let prev = self.graph.take().ok_or(EvacError::NotInitialized {
            what: "road network",
        })?;
        let mut next = prev.snapshot_zero_flow();
        let mut summary = StepSummary::default();
        for i in 0..self.roads.num_intersections() {
            let v = VertexId(i);
            let awareness = self.awareness(v);
            let zone = Zone::classify(self.det_dist[i], self.hazard_radius, self.hazard_limit);
            let update = update_vertex(
                &prev,
                &mut next,
                v,
                zone,
                awareness,
                &self.det_dist,
                &mut self.rng,
            );
            summary.carried += update.carried;
            match update.outcome {
                VertexOutcome::Idle => {}
                VertexOutcome::Died(n) => {
                    self.ledger.record_deaths(n);
                    summary.died += n;
                }
                VertexOutcome::Escaped(n) => {
                    self.ledger.record_escapes(n);
                    summary.escaped += n;
                }
                VertexOutcome::Routed(n) => summary.routed += n,
                VertexOutcome::Returned(n) => summary.returned += n,
            }
        }
        self.graph = Some(next);
        tracing::debug!(
            radius = self.hazard_radius,
            alive = self.ledger.alive(),
            dead = self.ledger.dead(),
            escaped = self.ledger.escaped(),
            died = summary.died,
            carried = summary.carried,
            "step"
        );
        Ok(summary)
    }

    /// Awareness weight of `v` for this step, per the configured mode.
    pub fn awareness(&mut self, v: VertexId) -> f64 {
        let proximity = self.proximity(v);
        match self.cfg.awareness {
            AwarenessMode::Proximity => self.rng.gen::<f64>() * proximity,
            AwarenessMode::Fixed(a) => a,
            AwarenessMode::FixedScaled(a) => a * proximity,
        }
    }

    /// `r / (r + d)`, zero when both vanish.
    fn proximity(&self, v: VertexId) -> f64 {
        let d = self.det_dist[v.0];
        let denom = self.hazard_radius + d;
        if denom > 0.0 {
            self.hazard_radius / denom
        } else {
            0.0
        }
    }

    pub fn road_network(&self) -> Result<&CapacitatedDigraph, EvacError> {
        self.graph.as_ref().ok_or(EvacError::NotInitialized {
            what: "road network",
        })
    }

    /// The intersection graph; fails while no road has been added.
    pub fn road_graph(&self) -> Result<&RoadNetwork, EvacError> {
        if self.roads.num_intersections() == 0 {
            return Err(EvacError::NotInitialized { what: "road graph" });
        }
        Ok(&self.roads)
    }

    #[cfg(test)]
    pub(crate) fn graph_mut(&mut self) -> &mut CapacitatedDigraph {
        self.graph.as_mut().expect("network built")
    }

    /// Total flow on the network; zero or less means the run has settled.
    pub fn live_flow(&self) -> Result<f64, EvacError> {
        Ok(self.road_network()?.total_flow())
    }

    /// Saturated edges of the current graph.
    pub fn bottlenecks(&self) -> Result<Vec<(EdgeId, FlowEdge)>, EvacError> {
        Ok(self
            .road_network()?
            .saturated()
            .map(|(id, e)| (id, *e))
            .collect())
    }

    #[inline]
    pub fn ledger(&self) -> &PopulationLedger {
        &self.ledger
    }
    #[inline]
    pub fn alive(&self) -> f64 {
        self.ledger.alive()
    }
    #[inline]
    pub fn dead(&self) -> f64 {
        self.ledger.dead()
    }
    #[inline]
    pub fn escaped(&self) -> f64 {
        self.ledger.escaped()
    }
    #[inline]
    pub fn population(&self) -> f64 {
        self.ledger.population()
    }

    #[inline]
    pub fn cfg(&self) -> &EvacCfg {
        &self.cfg
    }

    #[inline]
    pub fn detonation(&self) -> Point {
        self.detonation
    }

    #[inline]
    pub fn hazard_radius(&self) -> f64 {
        self.hazard_radius
    }

    pub fn set_hazard_radius(&mut self, r: f64) {
        self.hazard_radius = r;
    }

    /// Escape limit; zero until the network is built.
    #[inline]
    pub fn hazard_limit(&self) -> f64 {
        self.hazard_limit
    }

    #[inline]
    pub fn det_dist(&self, p: &Point) -> f64 {
        p.distance_to(&self.detonation)
    }

    /// Is `p` inside the current hazard radius?
    #[inline]
    pub fn is_vulnerable(&self, p: &Point) -> bool {
        self.det_dist(p) <= self.hazard_radius
    }
}
