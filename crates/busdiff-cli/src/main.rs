use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use clap_complete::{generate, Shell};
use tabwriter::TabWriter;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use busdiff_cli::cli::{build_cli_command, Cli, Commands, ReportFormat};
use busdiff_cli::{driver, report};
use busdiff_core::CaseLoads;
use busdiff_io::Case;

fn run_compare(
    base: &Path,
    scenarios: &[PathBuf],
    cases_dir: Option<&Path>,
    bus: usize,
    raw_version: u32,
    format: ReportFormat,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let scenario_paths = if scenarios.is_empty() {
        let dir = cases_dir
            .map(Path::to_path_buf)
            .or_else(|| {
                base.parent()
                    .filter(|parent| !parent.as_os_str().is_empty())
                    .map(Path::to_path_buf)
            })
            .unwrap_or_else(|| PathBuf::from("."));
        driver::discover_cases(&dir)?
    } else {
        scenarios.to_vec()
    };

    info!(
        "Comparing {} candidate case(s) against '{}' at bus {}",
        scenario_paths.len(),
        base.display(),
        bus
    );

    let run = driver::run_comparison(base, &scenario_paths, bus, raw_version)?;
    let rendered = match format {
        ReportFormat::Plain => report::render_plain(&run)?,
        ReportFormat::Json => report::render_json(&run)?,
    };

    match out {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("writing report to '{}'", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn run_inspect(case_path: &Path, bus: usize, raw_version: u32) -> anyhow::Result<()> {
    let case = Case::open(case_path, raw_version)
        .with_context(|| format!("opening case '{}'", case_path.display()))?;
    let loads = case.loads_at_bus(bus);

    println!("Case {} (RAW v{})", case_path.display(), case.raw_version());
    println!("  Buses: {}   Loads: {}", case.num_buses(), case.num_loads());
    match case.bus_name(bus) {
        Some(name) => println!("  Bus {bus} '{name}': {} load(s)", loads.len()),
        None => println!("  Bus {bus} (not in case): {} load(s)", loads.len()),
    }
    println!();

    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "ID\tP (MW)\tQ (Mvar)\tSTATUS")?;
    for load in &loads {
        writeln!(
            writer,
            "{}\t{:.3}\t{:.3}\t{}",
            load.load_id,
            load.active_power.value(),
            load.reactive_power.value(),
            load.status
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn generate_completions(shell: Shell, out: Option<&Path>) -> anyhow::Result<()> {
    let mut cmd = build_cli_command();
    if let Some(path) = out {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        generate(shell, &mut cmd, "busdiff-cli", &mut file);
        println!("Wrote {shell:?} completion to {}", path.display());
    } else {
        let stdout = &mut io::stdout();
        generate(shell, &mut cmd, "busdiff-cli", stdout);
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let result = match &cli.command {
        Some(Commands::Compare {
            base,
            bus,
            scenarios,
            cases_dir,
            raw_version,
            format,
            out,
        }) => run_compare(
            base,
            scenarios,
            cases_dir.as_deref(),
            *bus,
            *raw_version,
            *format,
            out.as_deref(),
        ),
        Some(Commands::Inspect {
            case,
            bus,
            raw_version,
        }) => run_inspect(case, *bus, *raw_version),
        Some(Commands::Completions { shell, out }) => generate_completions(*shell, out.as_deref()),
        None => {
            info!("No subcommand provided. Use `busdiff-cli --help` for more information.");
            return;
        }
    };

    match result {
        Ok(()) => info!("Command successful"),
        Err(e) => {
            error!("Command failed: {e:#}");
            std::process::exit(1);
        }
    }
}
