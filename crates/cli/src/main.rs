use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use evac::prelude::*;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod series;

use provenance::{current_git_rev, write_record, Limits, MapInfo, RunRecord};

#[derive(Parser)]
#[command(name = "evac-cli")]
#[command(about = "Evacuation flow simulations over road maps")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Run a simulation; optionally write the per-step series (CSV or Parquet)
    Run {
        #[command(flatten)]
        map: MapArgs,
        #[command(flatten)]
        engine: EngineArgs,
        /// Yield in megatons
        #[arg(long = "yield", default_value_t = 25.0)]
        yield_mt: f64,
        /// Radius calibration constant K
        #[arg(long, default_value_t = 1e-4)]
        k: f64,
        #[arg(long, default_value_t = 500)]
        rounds: u32,
        /// Wall-clock budget in seconds
        #[arg(long)]
        deadline_secs: Option<u64>,
        /// Series output path (.csv or .parquet); a `<stem>.run.json` record is written next to it
        #[arg(long)]
        out: Option<PathBuf>,
        /// How many saturated roads to list at the end
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Print the hazard radius for t = 0..rounds
    Radius {
        #[arg(long = "yield", default_value_t = 25.0)]
        yield_mt: f64,
        #[arg(long, default_value_t = 1e-4)]
        k: f64,
        #[arg(long, default_value_t = 100)]
        rounds: u32,
    },
    /// Print the network before and after seeding the population
    Network {
        #[command(flatten)]
        map: MapArgs,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Print the code revision and library version as JSON
    Report,
}

#[derive(Args)]
struct MapArgs {
    /// Road-map file
    #[arg(long, conflicts_with = "grid")]
    map: Option<PathBuf>,
    /// Use a generated two-way grid with this half-extent instead of a file
    #[arg(long)]
    grid: Option<u32>,
}

#[derive(Args)]
struct EngineArgs {
    #[arg(long, default_value_t = 100_000)]
    population: u64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Road capacity multiplier (capacity = width x length x mult)
    #[arg(long, default_value_t = 1.0)]
    capacity_mult: f64,
    /// Fixed awareness in [0, 1] overriding the per-vertex random draw
    #[arg(long)]
    awareness: Option<f64>,
    /// Scale the fixed awareness by hazard proximity instead of applying it uniformly
    #[arg(long, requires = "awareness")]
    scaled: bool,
}

impl EngineArgs {
    fn cfg(&self) -> Result<EvacCfg> {
        let awareness = match (self.awareness, self.scaled) {
            (None, _) => AwarenessMode::Proximity,
            (Some(a), _) if !(0.0..=1.0).contains(&a) => {
                bail!("--awareness must lie in [0, 1], got {a}")
            }
            (Some(a), false) => AwarenessMode::Fixed(a),
            (Some(a), true) => AwarenessMode::FixedScaled(a),
        };
        Ok(EvacCfg {
            capacity_multiplier: self.capacity_mult,
            awareness,
            seed: self.seed,
            ..EvacCfg::default()
        })
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run {
            map,
            engine,
            yield_mt,
            k,
            rounds,
            deadline_secs,
            out,
            top,
        } => {
            let sim = SimulationCfg {
                max_rounds: rounds,
                deadline: deadline_secs.map(Duration::from_secs),
            };
            let model = HazardModel::with_constants(yield_mt, evac::hazard::AIR_DENSITY, k);
            run_sim(&map, &engine, model, sim, deadline_secs, out, top)
        }
        Action::Radius {
            yield_mt,
            k,
            rounds,
        } => radius(yield_mt, k, rounds),
        Action::Network { map, engine } => network(&map, &engine),
        Action::Report => report(),
    }
}

fn load_map(args: &MapArgs) -> Result<(RoadMap, String)> {
    match (&args.map, args.grid) {
        (Some(path), _) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading road map {}", path.display()))?;
            let map = parse_roadmap(&text)
                .with_context(|| format!("parsing road map {}", path.display()))?;
            Ok((map, path.display().to_string()))
        }
        (None, Some(half)) => Ok((grid_city(half, 1.0, 2.0), format!("grid:{half}"))),
        (None, None) => bail!("pass --map FILE or --grid HALF"),
    }
}

fn run_sim(
    map_args: &MapArgs,
    engine: &EngineArgs,
    model: HazardModel,
    sim: SimulationCfg,
    deadline_secs: Option<u64>,
    out: Option<PathBuf>,
    top: usize,
) -> Result<()> {
    let (map, source) = load_map(map_args)?;
    let cfg = engine.cfg()?;
    tracing::info!(source = %source, roads = map.roads.len(), population = engine.population, "run");
    let mut state = EvacuationState::from_roadmap(&map, engine.population, cfg)?;

    let mut reports = Vec::new();
    let (last, why) = run(&mut state, &model, sim, |r| {
        tracing::info!(
            step = r.step,
            radius = r.hazard_radius,
            alive = r.alive,
            dead = r.dead,
            escaped = r.escaped,
            "step"
        );
        reports.push(*r);
        ControlFlow::Continue(())
    })?;
    tracing::info!(?why, steps = reports.len(), "stopped");

    if let Some(r) = last {
        println!(
            "steps={} stop={:?} alive={} dead={} escaped={} total={} radius={:.4}",
            reports.len(),
            why,
            r.alive,
            r.dead,
            r.escaped,
            r.total,
            r.hazard_radius
        );
    }
    print_bottlenecks(&state, top)?;

    if let Some(out) = out {
        let mut df = series::to_frame(&reports)?;
        series::write_frame(&mut df, &out)?;
        let record = RunRecord {
            code_rev: current_git_rev(),
            evac_version: evac::VERSION.to_string(),
            map: MapInfo {
                source,
                roads: map.roads.len(),
                intersections: state.road_graph()?.num_intersections(),
                detonation: map.detonation,
                alert: map.alert,
            },
            population: engine.population,
            cfg,
            hazard: model,
            limits: Limits {
                max_rounds: sim.max_rounds,
                deadline_secs,
            },
            steps: reports.len(),
            stop: why,
            last,
            series: out,
        };
        write_record(&record)?;
    }
    Ok(())
}

/// Saturated roads, most congested first, located by their midpoint.
fn print_bottlenecks(state: &EvacuationState, top: usize) -> Result<()> {
    let roads = state.road_graph()?;
    let mut saturated = state.bottlenecks()?;
    saturated.sort_by(|(_, a), (_, b)| b.excess().total_cmp(&a.excess()));
    for (id, e) in saturated.iter().take(top) {
        let mid = roads.point(e.from()).midpoint(&roads.point(e.to()));
        println!("bottleneck edge={} at={} {}", id.0, mid, e);
    }
    Ok(())
}

fn radius(yield_mt: f64, k: f64, rounds: u32) -> Result<()> {
    let model = HazardModel::with_constants(yield_mt, evac::hazard::AIR_DENSITY, k);
    for (t, r) in model.series(rounds).into_iter().enumerate() {
        println!("{t} {r}");
    }
    Ok(())
}

fn network(map_args: &MapArgs, engine: &EngineArgs) -> Result<()> {
    let (map, _) = load_map(map_args)?;
    let mut state = EvacuationState::new(map.detonation, engine.cfg()?);
    state.set_hazard_radius(map.alert);
    state.add_roads(&map.roads)?;
    println!("Flow-empty Network:");
    println!("{}", state.build_network()?);
    state.populate(engine.population)?;
    println!("Flow-initialized Network:");
    println!("{}", state.road_network()?);
    println!("hazard_limit={}", state.hazard_limit());
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": current_git_rev(),
        "evac_version": evac::VERSION,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../maps/unit_length_roads.txt");

    fn engine(awareness: Option<f64>, scaled: bool) -> EngineArgs {
        EngineArgs {
            population: 50,
            seed: 1,
            capacity_mult: 1.0,
            awareness,
            scaled,
        }
    }

    #[test]
    fn bundled_map_parses_and_builds() {
        let map = parse_roadmap(SAMPLE).unwrap();
        assert_eq!(map.roads.len(), 22);
        let state = EvacuationState::from_roadmap(&map, 50, engine(None, false).cfg().unwrap())
            .unwrap();
        assert_eq!(state.road_graph().unwrap().num_intersections(), 13);
        assert_eq!(state.live_flow().unwrap(), 50.0);
    }

    #[test]
    fn awareness_flags_select_the_mode() {
        assert_eq!(engine(None, false).cfg().unwrap().awareness, AwarenessMode::Proximity);
        assert_eq!(engine(Some(0.4), false).cfg().unwrap().awareness, AwarenessMode::Fixed(0.4));
        assert_eq!(
            engine(Some(0.4), true).cfg().unwrap().awareness,
            AwarenessMode::FixedScaled(0.4)
        );
        assert!(engine(Some(1.5), false).cfg().is_err());
    }

    #[test]
    fn negative_capacity_multiplier_is_an_error() {
        let mut args = engine(None, false);
        args.capacity_mult = -1.0;
        let map = grid_city(1, 1.0, 2.0);
        let err = EvacuationState::from_roadmap(&map, 5, args.cfg().unwrap()).unwrap_err();
        assert!(err.to_string().contains("capacity multiplier"));
    }

    #[test]
    fn map_source_is_required() {
        let args = MapArgs { map: None, grid: None };
        assert!(load_map(&args).is_err());
        let args = MapArgs { map: None, grid: Some(1) };
        let (map, source) = load_map(&args).unwrap();
        assert_eq!(map.roads.len(), 24);
        assert_eq!(source, "grid:1");
    }
}
