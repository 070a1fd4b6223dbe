//! Hazard radius growth (Sedov–Taylor blast scaling).
//!
//! `r(t) = K · (E/P)^{1/5} · t^{2/5}` with `E` in joules. `K` is a free
//! calibration constant that maps physical scale onto map units; it is not
//! calibrated against any real road map.

use serde::{Deserialize, Serialize};

/// Joules per megaton of TNT.
pub const JOULES_PER_MEGATON: f64 = 4.184e15;
/// Ambient air density in kg/m^3.
pub const AIR_DENSITY: f64 = 1.225;
/// Default map-scale calibration constant.
pub const DEFAULT_K: f64 = 1e-4;

/// Power-law radius model. Pure; holds only its constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HazardModel {
    /// Total energy in joules.
    pub energy: f64,
    pub density: f64,
    pub k: f64,
}

impl HazardModel {
    /// Model for a yield given in megatons, with default density and `K`.
    pub fn from_megatons(yield_mt: f64) -> Self {
        Self::with_constants(yield_mt, AIR_DENSITY, DEFAULT_K)
    }

    pub fn with_constants(yield_mt: f64, density: f64, k: f64) -> Self {
        Self {
            energy: yield_mt * JOULES_PER_MEGATON,
            density,
            k,
        }
    }

    /// Exclusion radius at discrete time `t`. `radius(0) == 0`.
    #[inline]
    pub fn radius(&self, t: u32) -> f64 {
        self.k * (self.energy / self.density).powf(0.2) * f64::from(t).powf(0.4)
    }

    /// Radii for `t = 0..rounds`.
    pub fn series(&self, rounds: u32) -> Vec<f64> {
        (0..rounds).map(|t| self.radius(t)).collect()
    }
}

impl Default for HazardModel {
    fn default() -> Self {
        Self::from_megatons(25.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn radius_at_zero_is_zero() {
        assert_eq!(HazardModel::from_megatons(5.0).radius(0), 0.0);
    }

    #[test]
    fn radius_matches_closed_form() {
        let m = HazardModel::from_megatons(25.0);
        let e = 25.0 * 4.184e15;
        let expected = 1e-4 * (e / 1.225_f64).powf(0.2) * 10f64.powf(0.4);
        assert!((m.radius(10) - expected).abs() < 1e-12);
    }

    #[test]
    fn series_len_and_start() {
        let s = HazardModel::default().series(5);
        assert_eq!(s.len(), 5);
        assert_eq!(s[0], 0.0);
        assert!(s.windows(2).all(|w| w[1] > w[0]));
    }

    proptest! {
        #[test]
        fn radius_strictly_increasing(t1 in 0u32..100_000, dt in 1u32..1000, mt in 0.01f64..100.0) {
            let m = HazardModel::from_megatons(mt);
            prop_assert!(m.radius(t1 + dt) > m.radius(t1));
        }
    }
}
