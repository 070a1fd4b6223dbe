//! Capacitated directed flow network.
//!
//! Purpose
//! - Hold the road network as a digraph on contiguous vertex ids `[0, V)` where
//!   each edge carries a fixed capacity and a mutable population flow.
//! - Support the double-buffered step: `snapshot_zero_flow` yields the next
//!   step's writable skeleton while the settled graph is only read.
//!
//! Not a max-flow solver; no augmenting paths or cuts are computed here.

mod digraph;
mod types;

pub use digraph::CapacitatedDigraph;
pub use types::{EdgeId, FlowEdge, VertexId};

#[cfg(test)]
mod tests;
