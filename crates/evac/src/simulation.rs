//! Bounded simulation driver.
//!
//! Each round sets `r(t)` from the hazard model, advances the evacuation one
//! step and reports the ledger. The loop ends when the network settles (no
//! live flow), the round cap is hit, the optional deadline passes, or the
//! observer asks to stop. A hazard radius larger than the map does not by
//! itself stop the run.

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::evacuation::{EvacError, EvacuationState, StepSummary};
use crate::hazard::HazardModel;

/// Loop configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationCfg {
    pub max_rounds: u32,
    /// Wall-clock budget checked between steps.
    pub deadline: Option<Duration>,
}

impl Default for SimulationCfg {
    fn default() -> Self {
        Self {
            max_rounds: 500,
            deadline: None,
        }
    }
}

/// Per-step observables handed to reporting collaborators.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    pub step: u32,
    pub hazard_radius: f64,
    pub alive: f64,
    pub dead: f64,
    pub escaped: f64,
    pub total: f64,
    pub live_flow: f64,
    pub bottlenecks: usize,
    pub summary: StepSummary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// No population left on the network.
    Settled,
    RoundLimit,
    Deadline,
    /// The observer returned `ControlFlow::Break`.
    Cancelled,
}

/// Drive `state` with radii from `model` until a stop condition holds.
///
/// `observe` sees every report and may cancel the run. Returns the last
/// report (if any step ran) and why the loop ended.
pub fn run<F>(
    state: &mut EvacuationState,
    model: &HazardModel,
    cfg: SimulationCfg,
    mut observe: F,
) -> Result<(Option<StepReport>, StopReason), EvacError>
where
    F: FnMut(&StepReport) -> ControlFlow<()>,
{
    let started = Instant::now();
    let mut last = None;
    for t in 0..cfg.max_rounds {
        if cfg.deadline.is_some_and(|d| started.elapsed() >= d) {
            tracing::warn!(step = t, "deadline reached");
            return Ok((last, StopReason::Deadline));
        }
        state.set_hazard_radius(model.radius(t));
        let summary = state.next_state()?;
        let report = StepReport {
            step: t,
            hazard_radius: state.hazard_radius(),
            alive: state.alive(),
            dead: state.dead(),
            escaped: state.escaped(),
            total: state.population(),
            live_flow: state.live_flow()?,
            bottlenecks: state.road_network()?.saturated().count(),
            summary,
        };
        last = Some(report);
        if observe(&report).is_break() {
            tracing::info!(step = t, "run cancelled by observer");
            return Ok((last, StopReason::Cancelled));
        }
        if report.live_flow <= 0.0 {
            tracing::info!(step = t, dead = report.dead, escaped = report.escaped, "settled");
            return Ok((last, StopReason::Settled));
        }
    }
    Ok((last, StopReason::RoundLimit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evacuation::EvacCfg;
    use crate::roads::special::grid_city;

    fn grid_state(seed: u64, pop: u64) -> EvacuationState {
        let cfg = EvacCfg {
            seed,
            ..EvacCfg::default()
        };
        EvacuationState::from_roadmap(&grid_city(3, 1.0, 2.0), pop, cfg).unwrap()
    }

    #[test]
    fn runs_until_settled_with_closed_ledger() {
        let mut s = grid_state(3, 400);
        // fast-growing radius so the whole grid is covered within the cap
        let model = HazardModel::with_constants(25.0, 1.225, 5e-4);
        let mut steps = 0;
        let (last, why) = run(&mut s, &model, SimulationCfg::default(), |r| {
            assert_eq!(r.alive + r.dead + r.escaped, r.total);
            steps += 1;
            ControlFlow::Continue(())
        })
        .unwrap();
        assert_eq!(why, StopReason::Settled);
        let last = last.unwrap();
        assert_eq!(last.live_flow, 0.0);
        assert_eq!(last.alive, 0.0);
        assert_eq!(last.dead + last.escaped, 400.0);
        assert_eq!(last.step + 1, steps);
    }

    #[test]
    fn round_cap_and_cancellation() {
        let model = HazardModel::with_constants(1e-9, 1.225, 1e-9);
        let mut s = grid_state(4, 100);
        let cfg = SimulationCfg {
            max_rounds: 3,
            deadline: None,
        };
        let (last, why) = run(&mut s, &model, cfg, |_| ControlFlow::Continue(())).unwrap();
        assert!(matches!(why, StopReason::RoundLimit | StopReason::Settled));
        assert!(last.unwrap().step < 3);

        let mut s = grid_state(4, 100);
        let (last, why) = run(&mut s, &model, SimulationCfg::default(), |r| {
            if r.step == 1 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();
        assert_eq!(why, StopReason::Cancelled);
        assert_eq!(last.unwrap().step, 1);
    }

    #[test]
    fn zero_deadline_stops_before_the_first_step() {
        let mut s = grid_state(5, 10);
        let cfg = SimulationCfg {
            deadline: Some(Duration::ZERO),
            ..SimulationCfg::default()
        };
        let (last, why) = run(&mut s, &HazardModel::default(), cfg, |_| ControlFlow::Continue(())).unwrap();
        assert_eq!(why, StopReason::Deadline);
        assert!(last.is_none());
        assert_eq!(s.alive(), 10.0);
    }
}
