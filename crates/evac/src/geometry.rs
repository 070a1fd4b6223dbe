//! Immutable plane points used as intersection keys.
//!
//! Identity is bitwise: two points are the same key iff both coordinates have
//! identical `f64` bit patterns. Ordering is lexicographic by `(y, x)` using
//! `f64::total_cmp`, which agrees with that identity.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A point `(x, y)` in map coordinates.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn to_vec2(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.to_vec2() - other.to_vec2()).norm()
    }

    #[inline]
    pub fn midpoint(&self, other: &Point) -> Point {
        let m = (self.to_vec2() + other.to_vec2()) * 0.5;
        Point::new(m.x, m.y)
    }

    /// Slope from `self` to `other`.
    ///
    /// Same point gives `-inf`, a horizontal pair `0`, a vertical pair `+inf`.
    pub fn slope_to(&self, other: &Point) -> f64 {
        let dy = other.y - self.y;
        let dx = other.x - self.x;
        if dx == 0.0 && dy == 0.0 {
            return f64::NEG_INFINITY;
        }
        if dy == 0.0 {
            return 0.0;
        }
        if dx == 0.0 {
            return f64::INFINITY;
        }
        dy / dx
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits() && self.y.to_bits() == other.y.to_bits()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y
            .total_cmp(&other.y)
            .then_with(|| self.x.total_cmp(&other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
