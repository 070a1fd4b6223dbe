//! Road records, map parsing and the intersection graph.
//!
//! Purpose
//! - Turn validated road records into intersections (one per distinct point,
//!   with cardinal neighbor links) and then into a `CapacitatedDigraph`.
//! - Own the point ↔ vertex-id table; ids follow first-sight order.

mod build;
mod parse;
pub mod special;
mod types;

pub use build::RoadNetwork;
pub use parse::{parse_roadmap, ParseError};
pub use types::{Intersection, Orientation, RoadMap, RoadRecord};

#[cfg(test)]
mod tests;
