//! Run records: a `<series>.run.json` file next to every written series,
//! holding what is needed to rerun it and how it ended.

use anyhow::{Context, Result};
use evac::{EvacCfg, HazardModel, Point, StepReport, StopReason};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Where the road map came from and what it held.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapInfo {
    /// File path, or `grid:<half>` for a generated grid.
    pub source: String,
    pub roads: usize,
    pub intersections: usize,
    pub detonation: Point,
    pub alert: f64,
}

/// Loop limits as given on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    pub max_rounds: u32,
    pub deadline_secs: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub code_rev: String,
    pub evac_version: String,
    pub map: MapInfo,
    pub population: u64,
    pub cfg: EvacCfg,
    pub hazard: HazardModel,
    pub limits: Limits,
    pub steps: usize,
    pub stop: StopReason,
    pub last: Option<StepReport>,
    pub series: PathBuf,
}

/// `runs/grid.csv` -> `runs/grid.run.json`.
pub fn record_path(series: &Path) -> PathBuf {
    let stem = series
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "series".to_string());
    series.with_file_name(format!("{stem}.run.json"))
}

/// Write `record` next to its series file and return the record's path.
pub fn write_record(record: &RunRecord) -> Result<PathBuf> {
    let path = record_path(&record.series);
    let body = serde_json::to_vec_pretty(record)?;
    fs::write(&path, body).with_context(|| format!("writing run record {}", path.display()))?;
    tracing::info!(path = %path.display(), stop = ?record.stop, "run record written");
    Ok(path)
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`,
/// else `"unknown"`.
pub fn current_git_rev() -> String {
    let env_rev = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    if let Some(rev) = env_rev {
        return rev;
    }
    match Command::new("git").args(["rev-parse", "HEAD"]).output() {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).trim().to_string(),
        _ => "unknown".to_string(),
    }
}
