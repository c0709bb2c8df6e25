use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use busdiff_io::DEFAULT_RAW_VERSION;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare the loads at a bus across a BASE case and scenario cases
    Compare {
        /// Path to the BASE RAW case
        #[arg(long)]
        base: PathBuf,

        /// Bus number to compare at
        #[arg(long)]
        bus: usize,

        /// Scenario RAW files; when omitted, every .raw file next to BASE
        /// (or in --cases-dir) is compared
        scenarios: Vec<PathBuf>,

        /// Directory to scan for scenario cases when none are listed
        #[arg(long)]
        cases_dir: Option<PathBuf>,

        /// PSS/E RAW format version
        #[arg(long, default_value_t = DEFAULT_RAW_VERSION)]
        raw_version: u32,

        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Plain)]
        format: ReportFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List the loads one case defines at a bus
    Inspect {
        /// Path to the RAW case
        case: PathBuf,

        /// Bus number
        #[arg(long)]
        bus: usize,

        /// PSS/E RAW format version
        #[arg(long, default_value_t = DEFAULT_RAW_VERSION)]
        raw_version: u32,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ReportFormat {
    Plain,
    Json,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
