//! Evacuation flow simulation over a capacitated road network.
//!
//! A point-source hazard appears at a detonation center and its lethal radius
//! grows with the simulation clock. Population mass sits on directed road
//! edges and is redistributed at every intersection once per step, so the
//! engine answers two questions: which roads bottleneck the evacuation, and how
//! the population splits into alive/dead/escaped over time.
//!
//! Layout
//! - `geometry`: `Point`, the intersection key.
//! - `hazard`: Sedov–Taylor radius growth (`HazardModel`).
//! - `network`: `CapacitatedDigraph` with per-edge capacity and flow.
//! - `roads`: road records, map parsing, intersection graph construction.
//! - `evacuation`: `EvacuationState`, population ledger and the step algorithm.
//! - `simulation`: the bounded driver loop.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API; the CLI and
//!   experiments are the only callers.

pub mod evacuation;
pub mod geometry;
pub mod hazard;
pub mod network;
pub mod roads;
pub mod simulation;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use evacuation::{AwarenessMode, EvacCfg, EvacError, EvacuationState, PopulationLedger};
pub use geometry::Point;
pub use hazard::HazardModel;
pub use network::{CapacitatedDigraph, EdgeId, FlowEdge, VertexId};
pub use roads::{parse_roadmap, Orientation, ParseError, RoadMap, RoadRecord};
pub use simulation::{run, SimulationCfg, StepReport, StopReason};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::evacuation::{
        AwarenessMode, EvacCfg, EvacError, EvacuationState, PopulationLedger,
    };
    pub use crate::geometry::Point;
    pub use crate::hazard::HazardModel;
    pub use crate::network::{CapacitatedDigraph, EdgeId, FlowEdge, VertexId};
    pub use crate::roads::special::grid_city;
    pub use crate::roads::{parse_roadmap, Orientation, RoadMap, RoadRecord};
    pub use crate::simulation::{run, SimulationCfg, StepReport, StopReason};
}
