//! Plain-text and JSON rendering of a comparison run.

use std::fmt::Write as _;
use std::io::Write as _;

use anyhow::{anyhow, Result};
use tabwriter::TabWriter;

use busdiff_core::LoadRecord;

use crate::driver::{ComparisonRun, ScenarioOutcome};

const RULE: &str = "============================================================";
const SECTION_RULE: &str = "------------------------------------------------------------";

/// Render the report the way the tool prints it: banner, one section per
/// scenario, summary counts, and the case timing table.
pub fn render_plain(run: &ComparisonRun) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "{RULE}")?;
    writeln!(out, " Load comparison across cases")?;
    writeln!(out, "{RULE}")?;
    writeln!(out)?;
    writeln!(out, "BASE case: {}", run.base_name)?;
    writeln!(
        out,
        "Found {} loads at bus {} in BASE.",
        run.base_loads.len(),
        run.bus
    )?;
    writeln!(out)?;

    for scenario in &run.scenarios {
        writeln!(out, "{SECTION_RULE}")?;
        writeln!(out, " BASE vs {}   (bus {})", scenario.name, run.bus)?;
        writeln!(out, "{SECTION_RULE}")?;

        match &scenario.outcome {
            ScenarioOutcome::OpenFailed { error } => {
                writeln!(
                    out,
                    "*** ERROR opening scenario case '{}': {error}",
                    scenario.name
                )?;
                writeln!(out)?;
            }
            ScenarioOutcome::Compared { diff, .. } => {
                if diff.is_unchanged() {
                    writeln!(out, "No load differences at bus {}.", run.bus)?;
                    writeln!(out)?;
                    continue;
                }
                if !diff.changed.is_empty() {
                    writeln!(out, "--- Changed loads ---")?;
                    for pair in &diff.changed {
                        writeln!(
                            out,
                            " ID '{}': BASE P={:.3},Q={:.3},St={}  SCEN P={:.3},Q={:.3},St={}",
                            pair.base.load_id,
                            pair.base.active_power.value(),
                            pair.base.reactive_power.value(),
                            pair.base.status,
                            pair.scenario.active_power.value(),
                            pair.scenario.reactive_power.value(),
                            pair.scenario.status,
                        )?;
                    }
                    writeln!(out)?;
                }
                if !diff.only_base.is_empty() {
                    writeln!(
                        out,
                        "--- Loads only in BASE (missing in {}) ---",
                        scenario.name
                    )?;
                    for load in &diff.only_base {
                        writeln!(out, " {}", load_line(load))?;
                    }
                    writeln!(out)?;
                }
                if !diff.only_scenario.is_empty() {
                    writeln!(out, "--- Loads only in {} (new loads) ---", scenario.name)?;
                    for load in &diff.only_scenario {
                        writeln!(out, " {}", load_line(load))?;
                    }
                    writeln!(out)?;
                }
            }
        }
    }

    writeln!(out, "{RULE}")?;
    writeln!(out, " SUMMARY FOR BUS {}", run.bus)?;
    writeln!(out, "{RULE}")?;
    writeln!(out)?;
    for scenario in &run.scenarios {
        writeln!(out, "{}:", scenario.name)?;
        match &scenario.outcome {
            ScenarioOutcome::OpenFailed { error } => {
                writeln!(out, "  Skipped: could not open ({error})")?;
            }
            ScenarioOutcome::Compared { diff, .. } => {
                writeln!(out, "  Changed loads    : {}", diff.changed.len())?;
                writeln!(out, "  Only in BASE     : {}", diff.only_base.len())?;
                writeln!(out, "  Only in scenario : {}", diff.only_scenario.len())?;
                if !diff.only_scenario.is_empty() {
                    writeln!(out, "  New loads:")?;
                    for load in &diff.only_scenario {
                        writeln!(out, "     {}", load_line(load))?;
                    }
                }
            }
        }
        writeln!(out)?;
    }

    writeln!(out, "{RULE}")?;
    writeln!(out, " CASE LOAD TIMES")?;
    writeln!(out, "{RULE}")?;
    out.push_str(&timing_table(run)?);
    writeln!(out)?;
    writeln!(out, "Total analysis time: {:.3} seconds", run.total_secs)?;
    writeln!(out, "{RULE}")?;

    Ok(out)
}

/// JSON rendering of the whole run.
pub fn render_json(run: &ComparisonRun) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(run)?;
    rendered.push('\n');
    Ok(rendered)
}

fn load_line(load: &LoadRecord) -> String {
    format!(
        "Bus={}, ID='{}', P={}, Q={}, Status={}",
        load.bus,
        load.load_id,
        load.active_power.value(),
        load.reactive_power.value(),
        load.status
    )
}

fn timing_table(run: &ComparisonRun) -> Result<String> {
    let mut tw = TabWriter::new(Vec::new());
    writeln!(tw, "CASE\tOPEN+ENUMERATE")?;
    writeln!(tw, "{}\t{:.3} s", run.base_name, run.base_open_secs)?;
    for scenario in &run.scenarios {
        if let ScenarioOutcome::Compared { open_secs, .. } = &scenario.outcome {
            writeln!(tw, "{}\t{:.3} s", scenario.name, open_secs)?;
        }
    }
    tw.flush()?;
    let bytes = tw
        .into_inner()
        .map_err(|_| anyhow!("flushing timing table"))?;
    Ok(String::from_utf8(bytes)?)
}
