//! Command line front end
//!
//! `wiring analyze <SNAPSHOT>` runs the analyzer over a JSON or YAML snapshot
//! and prints the report; `wiring codes` lists every diagnostic code. Mapping
//! diagnostics to a failing exit status is host policy, selected with
//! `--fail-on`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use wiring_domain::{DIAGNOSTIC_CODES, Diagnostic, Result, Severity};
use wiring_infrastructure::{AppConfig, ConfigLoader, load_snapshot};
use wiring_validate::{AnalysisReport, Analyzer, Reporter};

/// Command line interface for the wiring analyzer
#[derive(Parser, Debug)]
#[command(name = "wiring")]
#[command(about = "Registration plans and diagnostics for declarative dependency injection")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a declaration snapshot
    Analyze(AnalyzeArgs),
    /// List diagnostic codes with their default severity
    Codes,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Snapshot file (.json, .yaml or .yml)
    pub snapshot: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Lowest severity that makes the command fail
    #[arg(long, value_enum, default_value_t = FailOn::Error)]
    pub fail_on: FailOn,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Error,
    Warning,
    Never,
}

impl FailOn {
    /// True when `diagnostics` should fail the run under this policy
    pub fn fails(self, diagnostics: &[Diagnostic]) -> bool {
        let threshold = match self {
            Self::Error => Severity::Error,
            Self::Warning => Severity::Warning,
            Self::Never => return false,
        };
        diagnostics.iter().any(|d| d.severity <= threshold)
    }
}

/// Rendered command output and whether the run passed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub passed: bool,
}

/// Load configuration from an explicit file or the default locations
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let loader = match path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    loader.load()
}

/// Run one command against an already loaded configuration
pub fn execute(command: &Command, config: &AppConfig) -> Result<Outcome> {
    match command {
        Command::Analyze(args) => analyze(args, config),
        Command::Codes => Ok(Outcome {
            output: render_codes(),
            passed: true,
        }),
    }
}

fn analyze(args: &AnalyzeArgs, config: &AppConfig) -> Result<Outcome> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let analyzer = Analyzer::new(config.analysis.clone())
        .with_diagnostics_config(config.diagnostics.clone());
    let output = analyzer.analyze(&snapshot.declarations)?;

    info!(
        directives = output.plan.len(),
        diagnostics = output.diagnostics.len(),
        "Analysis finished"
    );

    let report = AnalysisReport::new(args.snapshot.display().to_string(), &output);
    let rendered = match args.format {
        OutputFormat::Human => Reporter::to_human_readable(&report),
        OutputFormat::Json => Reporter::to_json(&report),
    };

    Ok(Outcome {
        output: rendered,
        passed: !args.fail_on.fails(&output.diagnostics),
    })
}

fn render_codes() -> String {
    let mut output = String::new();
    for info in DIAGNOSTIC_CODES {
        output.push_str(&format!(
            "{:<8} {:<8} {:<22} {}\n",
            info.code,
            info.severity.to_string(),
            info.category.to_string(),
            info.summary
        ));
    }
    output
}
