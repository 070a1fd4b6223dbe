//! Intersection graph construction and conversion to a flow network.

use std::collections::{BTreeMap, HashMap};

use crate::geometry::Point;
use crate::network::{CapacitatedDigraph, FlowEdge, VertexId};

use super::types::{Intersection, Orientation, RoadRecord};

/// Intersections keyed by point, plus the point ↔ vertex-id bijection.
///
/// Ids are handed out once, at first sight, in road-record order. That order
/// is observable downstream (edge iteration and tie-breaks), so it must not
/// depend on hashing or sorting.
#[derive(Clone, Debug)]
pub struct RoadNetwork {
    joints: BTreeMap<Point, Intersection>,
    ids: HashMap<Point, VertexId>,
    points: Vec<Point>,
    capacity_multiplier: f64,
    num_roads: usize,
}

impl RoadNetwork {
    pub fn new(capacity_multiplier: f64) -> Self {
        Self {
            joints: BTreeMap::new(),
            ids: HashMap::new(),
            points: Vec::new(),
            capacity_multiplier,
            num_roads: 0,
        }
    }

    /// Build from a sequence of records.
    pub fn from_roads<'a>(
        roads: impl IntoIterator<Item = &'a RoadRecord>,
        capacity_multiplier: f64,
    ) -> Self {
        let mut net = Self::new(capacity_multiplier);
        for r in roads {
            net.add_road(r);
        }
        net
    }

    #[inline]
    pub fn num_intersections(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn num_roads(&self) -> usize {
        self.num_roads
    }

    #[inline]
    pub fn id_of(&self, p: &Point) -> Option<VertexId> {
        self.ids.get(p).copied()
    }

    /// Point of vertex `v`. Panics on an unknown id.
    #[inline]
    pub fn point(&self, v: VertexId) -> Point {
        self.points[v.0]
    }

    /// Points indexed by vertex id.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn intersection(&self, p: &Point) -> Option<&Intersection> {
        self.joints.get(p)
    }

    /// Intersections in point order.
    pub fn intersections(&self) -> impl Iterator<Item = &Intersection> + '_ {
        self.joints.values()
    }

    /// Add one directed road: intern both endpoints, create the edge, record
    /// it on both intersections and update the cardinal neighbor links.
    pub fn add_road(&mut self, r: &RoadRecord) {
        let from = self.intern(r.from);
        let to = self.intern(r.to);
        let edge = FlowEdge::new(from, to, r.capacity(self.capacity_multiplier));
        self.num_roads += 1;

        let (dx, dy) = (r.to.x() - r.from.x(), r.to.y() - r.from.y());
        if let Some(node) = self.joints.get_mut(&r.from) {
            node.out_edges.push(edge);
            match r.orientation {
                Orientation::Horizontal if dx > 0.0 => node.east = Some(to),
                Orientation::Horizontal if dx < 0.0 => node.west = Some(to),
                Orientation::Vertical if dy > 0.0 => node.north = Some(to),
                Orientation::Vertical if dy < 0.0 => node.south = Some(to),
                _ => {}
            }
        }
        if let Some(node) = self.joints.get_mut(&r.to) {
            node.in_edges.push(edge);
            match r.orientation {
                Orientation::Horizontal if dx > 0.0 => node.west = Some(from),
                Orientation::Horizontal if dx < 0.0 => node.east = Some(from),
                Orientation::Vertical if dy > 0.0 => node.south = Some(from),
                Orientation::Vertical if dy < 0.0 => node.north = Some(from),
                _ => {}
            }
        }
    }

    /// Flow network on `[0, num_intersections)`. Every edge sits in exactly
    /// one `in_edges` list, so walking those (in point order) adds each once.
    pub fn to_digraph(&self) -> CapacitatedDigraph {
        CapacitatedDigraph::with_edges(
            self.num_intersections(),
            self.joints
                .values()
                .flat_map(|node| node.in_edges.iter().copied()),
        )
    }

    fn intern(&mut self, p: Point) -> VertexId {
        if let Some(&id) = self.ids.get(&p) {
            return id;
        }
        let id = VertexId(self.points.len());
        self.points.push(p);
        self.ids.insert(p, id);
        self.joints.insert(p, Intersection::new(p, id));
        id
    }
}
