//! Synthetic road maps for tests, benches and demos.

use crate::geometry::Point;

use super::types::{Orientation, RoadMap, RoadRecord};

/// Two-way Manhattan grid on `[-half, half]²` lattice points scaled by
/// `spacing`, with the detonation at the origin.
///
/// Records are emitted row by row (south to north, west to east); each street
/// segment yields both directions.
pub fn grid_city(half: u32, spacing: f64, width: f64) -> RoadMap {
    let h = half as i64;
    let at = |i: i64, j: i64| Point::new(i as f64 * spacing, j as f64 * spacing);
    let mut roads = Vec::new();
    for j in -h..=h {
        for i in -h..=h {
            if i < h {
                let (a, b) = (at(i, j), at(i + 1, j));
                roads.push(segment(Orientation::Horizontal, a, b, width, spacing));
                roads.push(segment(Orientation::Horizontal, b, a, width, spacing));
            }
            if j < h {
                let (a, b) = (at(i, j), at(i, j + 1));
                roads.push(segment(Orientation::Vertical, a, b, width, spacing));
                roads.push(segment(Orientation::Vertical, b, a, width, spacing));
            }
        }
    }
    RoadMap {
        alert: 0.0,
        detonation: Point::new(0.0, 0.0),
        roads,
    }
}

fn segment(orientation: Orientation, from: Point, to: Point, width: f64, length: f64) -> RoadRecord {
    RoadRecord {
        orientation,
        from,
        to,
        width,
        length,
    }
}
