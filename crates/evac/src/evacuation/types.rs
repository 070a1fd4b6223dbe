//! Configuration, population ledger and errors for the evacuation engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the per-vertex awareness weight is chosen each step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AwarenessMode {
    /// `u · r / (r + d)` with `u ~ U[0,1)`, `r` the hazard radius and `d` the
    /// vertex's distance from the detonation.
    Proximity,
    /// The same fixed value at every vertex.
    Fixed(f64),
    /// A fixed value scaled by `r / (r + d)`.
    FixedScaled(f64),
}

/// Engine configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvacCfg {
    /// Road capacity = width × length × this.
    pub capacity_multiplier: f64,
    /// Escape limit as a fraction of the farthest intersection's distance.
    pub escape_fraction: f64,
    pub awareness: AwarenessMode,
    /// Seed of the run's random source.
    pub seed: u64,
}

impl Default for EvacCfg {
    fn default() -> Self {
        Self {
            capacity_multiplier: 1.0,
            escape_fraction: 0.67,
            awareness: AwarenessMode::Proximity,
            seed: 0,
        }
    }
}

/// Closed accounting of the population: `alive + dead + escaped == population`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationLedger {
    population: f64,
    alive: f64,
    dead: f64,
    escaped: f64,
}

impl PopulationLedger {
    pub fn new(population: f64) -> Self {
        Self {
            population,
            alive: population,
            dead: 0.0,
            escaped: 0.0,
        }
    }

    #[inline]
    pub fn population(&self) -> f64 {
        self.population
    }
    #[inline]
    pub fn alive(&self) -> f64 {
        self.alive
    }
    #[inline]
    pub fn dead(&self) -> f64 {
        self.dead
    }
    #[inline]
    pub fn escaped(&self) -> f64 {
        self.escaped
    }

    pub fn record_deaths(&mut self, n: f64) {
        self.dead += n;
        self.alive -= n;
    }

    pub fn record_escapes(&mut self, n: f64) {
        self.escaped += n;
        self.alive -= n;
    }

    pub fn is_balanced(&self) -> bool {
        self.alive + self.dead + self.escaped == self.population
    }
}

/// What a single step moved, summed over all vertices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StepSummary {
    pub died: f64,
    pub escaped: f64,
    /// Inflow forwarded onto outgoing roads.
    pub routed: f64,
    /// Inflow pushed back at dead ends.
    pub returned: f64,
    /// Over-capacity excess left on its road.
    pub carried: f64,
}

/// Engine errors.
#[derive(Debug, Clone, PartialEq)]
pub enum EvacError {
    /// A query ran before the structure it reads was built.
    NotInitialized { what: &'static str },
    InvalidParams { reason: String },
}

impl EvacError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for EvacError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized { what } => write!(f, "{what} not initialized"),
            Self::InvalidParams { reason } => write!(f, "invalid evacuation params: {reason}"),
        }
    }
}

impl std::error::Error for EvacError {}
