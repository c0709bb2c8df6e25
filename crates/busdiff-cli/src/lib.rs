pub mod cli;
pub mod driver;
pub mod report;

pub use cli::{build_cli_command, Cli, Commands, ReportFormat};
pub use driver::{discover_cases, run_comparison, ComparisonRun, ScenarioOutcome, ScenarioReport};
