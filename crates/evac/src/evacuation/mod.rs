//! Evacuation state and the per-step redistribution algorithm.
//!
//! Purpose
//! - Own the road network, the current flow graph, the hazard radius and the
//!   population ledger, and advance them one discrete step at a time.
//!
//! Step model
//! - Double-buffered: each step reads the settled graph and fills a zero-flow
//!   snapshot, which then replaces it. Nothing read during a step is mutated.
//! - Per vertex: inflow is capped at each road's whole-unit throughput and
//!   the excess stays on its road; lethal vertices turn all inflow into
//!   deaths; vertices beyond the escape limit turn capped inflow into
//!   escapes; dead ends push inflow back
//!   onto their incoming roads; all other vertices split the capped inflow
//!   randomly over outgoing roads, biased by awareness towards the road whose
//!   head is farthest from the detonation.
//! - Flow is only ever created by `populate` and only ever removed by the
//!   ledger (deaths, escapes), so `alive` equals the live network flow.

mod state;
pub mod step;
mod types;

pub use state::EvacuationState;
pub use types::{AwarenessMode, EvacCfg, EvacError, PopulationLedger, StepSummary};
