//! Comparison orchestration.
//!
//! Opens BASE once, then each scenario case in turn, diffing every
//! scenario's loads at the requested bus against BASE's. Only one case is
//! resident at a time; each `Case` is dropped before the next open. A
//! scenario that fails to open loses only itself; a BASE that fails to
//! open aborts the run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;

use busdiff_core::{compare_load_sets, CaseLoads, LoadDiff, LoadRecord};
use busdiff_io::Case;

/// Everything one compare run produced, ready for rendering.
#[derive(Debug, Serialize)]
pub struct ComparisonRun {
    pub bus: usize,
    pub base_name: String,
    /// BASE's loads at the bus, in case order.
    pub base_loads: Vec<LoadRecord>,
    /// Wall-clock seconds for BASE's open+enumerate step.
    pub base_open_secs: f64,
    pub scenarios: Vec<ScenarioReport>,
    pub total_secs: f64,
}

#[derive(Debug, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub outcome: ScenarioOutcome,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioOutcome {
    /// Opened and diffed against BASE.
    Compared {
        diff: LoadDiff,
        /// Wall-clock seconds for this case's open+enumerate step.
        open_secs: f64,
    },
    /// The case could not be opened; only this scenario is lost.
    OpenFailed { error: String },
}

/// Run the full comparison: BASE against each scenario, in list order.
///
/// Scenario entries that point at the BASE file are skipped — BASE is the
/// reference, not a scenario.
pub fn run_comparison(
    base: &Path,
    scenarios: &[PathBuf],
    bus: usize,
    raw_version: u32,
) -> Result<ComparisonRun> {
    let started = Instant::now();

    let base_timer = Instant::now();
    let base_case = Case::open(base, raw_version)
        .with_context(|| format!("opening BASE case '{}'", base.display()))?;
    let base_loads = base_case.loads_at_bus(bus);
    let base_open_secs = base_timer.elapsed().as_secs_f64();
    drop(base_case);

    let mut reports = Vec::with_capacity(scenarios.len());
    for path in scenarios {
        if same_case(path, base) {
            continue;
        }

        let timer = Instant::now();
        let outcome = match Case::open(path, raw_version) {
            Ok(case) => {
                let loads = case.loads_at_bus(bus);
                let open_secs = timer.elapsed().as_secs_f64();
                ScenarioOutcome::Compared {
                    diff: compare_load_sets(&base_loads, &loads),
                    open_secs,
                }
            }
            Err(err) => ScenarioOutcome::OpenFailed {
                error: err.to_string(),
            },
        };
        reports.push(ScenarioReport {
            name: display_name(path),
            outcome,
        });
    }

    Ok(ComparisonRun {
        bus,
        base_name: display_name(base),
        base_loads,
        base_open_secs,
        scenarios: reports,
        total_secs: started.elapsed().as_secs_f64(),
    })
}

/// All `.raw` files in `dir`, sorted by path — the candidate set offered
/// when no scenarios are listed explicitly.
pub fn discover_cases(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("scanning case folder '{}'", dir.display()))?;

    let mut cases = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("scanning case folder '{}'", dir.display()))?
            .path();
        let is_raw = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("raw"));
        if path.is_file() && is_raw {
            cases.push(path);
        }
    }
    cases.sort();
    Ok(cases)
}

fn same_case(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
