//! Road records and intersection nodes.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::network::{FlowEdge, VertexId};

/// Map orientation of a road. Horizontal roads only link east/west
/// neighbors, vertical roads only north/south.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Map-file flag: `true` is horizontal.
    #[inline]
    pub fn from_flag(horizontal: bool) -> Self {
        if horizontal {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }
}

/// One directed road segment as read from a map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadRecord {
    pub orientation: Orientation,
    pub from: Point,
    pub to: Point,
    pub width: f64,
    pub length: f64,
}

impl RoadRecord {
    /// `width × length × multiplier`.
    #[inline]
    pub fn capacity(&self, multiplier: f64) -> f64 {
        self.width * self.length * multiplier
    }
}

/// A parsed map: header values plus road records in file order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadMap {
    /// First header field: the initial hazard radius in early maps, the map
    /// version in later ones.
    pub alert: f64,
    pub detonation: Point,
    pub roads: Vec<RoadRecord>,
}

/// Intersection node: its point, up to four cardinal neighbors and the
/// incident edges in road order.
#[derive(Clone, Debug)]
pub struct Intersection {
    pub point: Point,
    pub id: VertexId,
    pub east: Option<VertexId>,
    pub west: Option<VertexId>,
    pub north: Option<VertexId>,
    pub south: Option<VertexId>,
    pub in_edges: Vec<FlowEdge>,
    pub out_edges: Vec<FlowEdge>,
}

impl Intersection {
    pub(crate) fn new(point: Point, id: VertexId) -> Self {
        Self {
            point,
            id,
            east: None,
            west: None,
            north: None,
            south: None,
            in_edges: Vec::new(),
            out_edges: Vec::new(),
        }
    }

    /// Number of linked cardinal neighbors.
    pub fn degree(&self) -> usize {
        [self.east, self.west, self.north, self.south]
            .iter()
            .filter(|n| n.is_some())
            .count()
    }
}
