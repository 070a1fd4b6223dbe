//! Adjacency-list digraph over an edge arena.
//!
//! Edges live once in `edges`; each vertex keeps the ids of its incident edges
//! in insertion order. A self-loop is recorded once at its vertex. Ids are
//! stable across `snapshot_zero_flow`, which is what lets the step algorithm
//! pair an edge of the settled graph with the same edge of the next one.

use std::fmt;

use super::types::{EdgeId, FlowEdge, VertexId};

#[derive(Clone, Debug, Default)]
pub struct CapacitatedDigraph {
    edges: Vec<FlowEdge>,
    adj: Vec<Vec<EdgeId>>,
}

impl CapacitatedDigraph {
    /// Empty graph on vertices `[0, v)`.
    pub fn new(v: usize) -> Self {
        Self {
            edges: Vec::new(),
            adj: vec![Vec::new(); v],
        }
    }

    /// Graph on `[0, v)` holding `edges` in iteration order.
    pub fn with_edges(v: usize, edges: impl IntoIterator<Item = FlowEdge>) -> Self {
        let mut g = Self::new(v);
        for e in edges {
            g.add_edge(e);
        }
        g
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    /// Edge count, self-loops included.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Record `e` in both endpoints' adjacency. Parallel edges and self-loops
    /// are accepted. Panics on an out-of-range endpoint.
    pub fn add_edge(&mut self, e: FlowEdge) -> EdgeId {
        let (v, w) = (e.from(), e.to());
        self.check_vertex(v);
        self.check_vertex(w);
        let id = EdgeId(self.edges.len());
        self.edges.push(e);
        self.adj[v.0].push(id);
        if v != w {
            self.adj[w.0].push(id);
        }
        id
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &FlowEdge {
        &self.edges[id.0]
    }

    #[inline]
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut FlowEdge {
        &mut self.edges[id.0]
    }

    /// All edges incident to `v`.
    pub fn adj(&self, v: VertexId) -> impl Iterator<Item = &FlowEdge> + '_ {
        self.check_vertex(v);
        self.adj[v.0].iter().map(move |&id| &self.edges[id.0])
    }

    pub fn incoming_ids(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.check_vertex(v);
        self.adj[v.0]
            .iter()
            .copied()
            .filter(move |&id| self.edges[id.0].to() == v)
    }

    pub fn outgoing_ids(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.check_vertex(v);
        self.adj[v.0]
            .iter()
            .copied()
            .filter(move |&id| self.edges[id.0].from() == v)
    }

    /// Edges whose head is `v`. Recomputed on every call.
    pub fn incoming(&self, v: VertexId) -> impl Iterator<Item = &FlowEdge> + '_ {
        self.incoming_ids(v).map(move |id| &self.edges[id.0])
    }

    /// Edges whose tail is `v`. Recomputed on every call.
    pub fn outgoing(&self, v: VertexId) -> impl Iterator<Item = &FlowEdge> + '_ {
        self.outgoing_ids(v).map(move |id| &self.edges[id.0])
    }

    /// Every edge except self-loops, with its id.
    pub fn edges_with_ids(&self) -> impl Iterator<Item = (EdgeId, &FlowEdge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_self_loop())
            .map(|(i, e)| (EdgeId(i), e))
    }

    /// Every edge except self-loops.
    pub fn edges(&self) -> impl Iterator<Item = &FlowEdge> + '_ {
        self.edges_with_ids().map(|(_, e)| e)
    }

    /// Same vertices, edges and capacities; every flow reset to zero.
    pub fn snapshot_zero_flow(&self) -> Self {
        Self {
            edges: self.edges.iter().map(FlowEdge::zeroed).collect(),
            adj: self.adj.clone(),
        }
    }

    /// Sum of flow over every edge, self-loops included: flow parked on a
    /// self-loop is still population on the network.
    pub fn total_flow(&self) -> f64 {
        self.edges.iter().map(FlowEdge::flow).sum()
    }

    /// Loaded edges with no forward slack left: the current bottlenecks.
    pub fn saturated(&self) -> impl Iterator<Item = (EdgeId, &FlowEdge)> + '_ {
        self.edges_with_ids()
            .filter(|(_, e)| e.flow() > 0.0 && e.residual_capacity_to(e.to()) <= 0.0)
    }

    #[inline]
    fn check_vertex(&self, v: VertexId) {
        assert!(
            v.0 < self.adj.len(),
            "vertex {v} out of range [0, {})",
            self.adj.len()
        );
    }
}

/// `V E` header, then one `v:  e  e  ` line per vertex listing its outgoing
/// edges (self-loops omitted).
impl fmt::Display for CapacitatedDigraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.num_vertices(), self.num_edges())?;
        for v in 0..self.num_vertices() {
            write!(f, "{v}:  ")?;
            for e in self.adj(VertexId(v)) {
                if e.to() != VertexId(v) {
                    write!(f, "{e}  ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
