//! Per-step series as a Polars frame, written as CSV or Parquet.

use anyhow::{Context, Result};
use evac::StepReport;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

/// One row per step.
pub fn to_frame(reports: &[StepReport]) -> PolarsResult<DataFrame> {
    let col = |f: fn(&StepReport) -> f64| reports.iter().map(f).collect::<Vec<f64>>();
    df!(
        "step" => reports.iter().map(|r| r.step).collect::<Vec<u32>>(),
        "hazard_radius" => col(|r| r.hazard_radius),
        "alive" => col(|r| r.alive),
        "dead" => col(|r| r.dead),
        "escaped" => col(|r| r.escaped),
        "total" => col(|r| r.total),
        "live_flow" => col(|r| r.live_flow),
        "bottlenecks" => reports.iter().map(|r| r.bottlenecks as u64).collect::<Vec<u64>>(),
        "carried" => col(|r| r.summary.carried),
        "returned" => col(|r| r.summary.returned)
    )
}

/// Write `df` to `out`; `.parquet` selects Parquet, anything else CSV.
pub fn write_frame(df: &mut DataFrame, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    let is_parquet = out.extension().is_some_and(|e| e == "parquet");
    if is_parquet {
        ParquetWriter::new(file).finish(df)?;
    } else {
        CsvWriter::new(file).include_header(true).finish(df)?;
    }
    tracing::info!(rows = df.height(), out = %out.display(), "series written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use evac::prelude::*;
    use std::ops::ControlFlow;
    use tempfile::tempdir;

    fn short_run() -> Vec<StepReport> {
        let cfg = EvacCfg {
            seed: 9,
            ..EvacCfg::default()
        };
        let mut state = EvacuationState::from_roadmap(&grid_city(2, 1.0, 2.0), 120, cfg).unwrap();
        let mut reports = Vec::new();
        let sim = SimulationCfg {
            max_rounds: 5,
            deadline: None,
        };
        run(&mut state, &HazardModel::default(), sim, |r| {
            reports.push(*r);
            ControlFlow::Continue(())
        })
        .unwrap();
        reports
    }

    #[test]
    fn frame_has_one_row_per_step() {
        let reports = short_run();
        let df = to_frame(&reports).unwrap();
        assert_eq!(df.height(), reports.len());
        assert_eq!(df.width(), 10);
        let total = df.column("total").unwrap().f64().unwrap();
        assert!(total.into_iter().all(|v| v == Some(120.0)));
    }

    #[test]
    fn csv_round_trips_through_lazy_reader() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested/series.csv");
        let reports = short_run();
        let mut df = to_frame(&reports).unwrap();
        write_frame(&mut df, &out).unwrap();
        let back = LazyCsvReader::new(&out).finish().unwrap().collect().unwrap();
        assert_eq!(back.shape(), (reports.len(), 10));
    }
}
