//! Grid evacuation probe: how a fixed population splits into dead and
//! escaped on a Manhattan grid, and which roads are saturated midway.
//!
//! Usage: cargo run -p evac --example grid_evacuation -- [half] [population] [seed]

use std::ops::ControlFlow;

use evac::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let half: u32 = args.next().and_then(|a| a.parse().ok()).unwrap_or(6);
    let population: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(10_000);
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);

    let map = grid_city(half, 1.0, 10.0);
    let cfg = EvacCfg {
        seed,
        ..EvacCfg::default()
    };
    let mut state = EvacuationState::from_roadmap(&map, population, cfg).expect("grid builds");
    let model = HazardModel::with_constants(25.0, 1.225, 2e-4);

    let (last, why) = run(&mut state, &model, SimulationCfg::default(), |r| {
        println!(
            "t={:>3} r={:.3} alive={} dead={} escaped={} saturated={}",
            r.step, r.hazard_radius, r.alive, r.dead, r.escaped, r.bottlenecks
        );
        ControlFlow::Continue(())
    })
    .expect("simulation runs");

    println!("stop={why:?}");
    if let Some(r) = last {
        println!(
            "final: dead={:.1}% escaped={:.1}%",
            100.0 * r.dead / r.total,
            100.0 * r.escaped / r.total
        );
    }
}
