//! Identifiers and the capacitated flow edge.

use std::fmt;

/// Identifier types for clarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Directed edge `from -> to` with fixed capacity and mutable flow.
///
/// Flow above capacity is allowed: it marks a congested road whose excess is
/// carried forward by the step algorithm rather than rejected here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowEdge {
    from: VertexId,
    to: VertexId,
    capacity: f64,
    flow: f64,
}

impl FlowEdge {
    /// Panics on negative or non-finite capacity.
    pub fn new(from: VertexId, to: VertexId, capacity: f64) -> Self {
        assert!(
            capacity.is_finite() && capacity >= 0.0,
            "edge capacity must be finite and nonnegative, got {capacity}"
        );
        Self {
            from,
            to,
            capacity,
            flow: 0.0,
        }
    }

    #[inline]
    pub fn from(&self) -> VertexId {
        self.from
    }
    #[inline]
    pub fn to(&self) -> VertexId {
        self.to
    }
    #[inline]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }
    #[inline]
    pub fn flow(&self) -> f64 {
        self.flow
    }

    #[inline]
    pub fn set_flow(&mut self, flow: f64) {
        self.flow = flow;
    }

    #[inline]
    pub fn add_flow(&mut self, delta: f64) {
        self.flow += delta;
    }

    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Flow strictly above capacity.
    #[inline]
    pub fn is_over_capacity(&self) -> bool {
        self.flow > self.capacity
    }

    /// Amount of flow above capacity (zero when within capacity).
    #[inline]
    pub fn excess(&self) -> f64 {
        (self.flow - self.capacity).max(0.0)
    }

    /// Whole units the road lets through in one step: `floor(capacity)`.
    ///
    /// Population moves in whole units, so capping at this keeps every flow
    /// integral when seeded with unit increments.
    #[inline]
    pub fn throughput(&self) -> f64 {
        self.capacity.floor()
    }

    /// Same structure, zero flow.
    #[inline]
    pub fn zeroed(&self) -> Self {
        Self { flow: 0.0, ..*self }
    }

    /// Residual capacity towards `v`: forward slack if `v` is the head,
    /// cancellable flow if `v` is the tail.
    pub fn residual_capacity_to(&self, v: VertexId) -> f64 {
        if v == self.to {
            self.capacity - self.flow
        } else if v == self.from {
            self.flow
        } else {
            panic!("vertex {v} is not an endpoint of {self}")
        }
    }
}

impl fmt::Display for FlowEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}->{} {}/{}",
            self.from, self.to, self.flow, self.capacity
        )
    }
}
