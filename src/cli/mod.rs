pub mod output;

use std::{ffi::OsString, path::PathBuf};

use clap::Parser;
use thiserror::Error;

use crate::{
    config::ConfigManager,
    core::{ConvertRequest, ReportManager},
    errors::ReportError,
    utils::build_info,
};

use output::OutputPreferences;

/// Converts a political-funding ledger into a validated flow report.
#[derive(Parser, Debug)]
#[command(name = "funding_report_cli", version = build_info::CLI_VERSION)]
pub struct Cli {
    /// Input dataset. Repeat to merge page-level extracts into one dataset.
    #[arg(short = 'i', long = "input", value_name = "FILE", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Destination of the report JSON.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: PathBuf,

    /// Convert even when validation reports errors.
    #[arg(long)]
    pub ignore_errors: bool,

    /// Repair extracted inputs before validating them.
    #[arg(long)]
    pub repair: bool,

    /// Converter configuration file (also read from `FUNDING_REPORT_CONFIG`).
    #[arg(long, value_name = "FILE", env = "FUNDING_REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress the confirmation line on success.
    #[arg(short, long)]
    pub quiet: bool,
}

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// Usage errors and validation failures have already been printed.
    pub fn is_reported(&self) -> bool {
        matches!(
            self,
            CliError::Usage(_) | CliError::Report(ReportError::ValidationFailed(_))
        )
    }
}

pub fn run_cli() -> Result<(), CliError> {
    run_cli_from(std::env::args_os())
}

pub fn run_cli_from<I, T>(args: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                Err(CliError::Usage(err.to_string()))
            } else {
                Ok(())
            };
        }
    };
    output::set_preferences(OutputPreferences {
        quiet_mode: cli.quiet,
    });

    let build = build_info::current();
    tracing::debug!(
        version = build.version,
        git_hash = build.git_hash,
        built_at = build.timestamp,
        profile = build.profile,
        "starting conversion"
    );

    let config_manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    let mut config = config_manager.load().map_err(ReportError::from)?;
    config.repair_dataset |= cli.repair;
    let manager = ReportManager::new(config);

    let request = ConvertRequest {
        inputs: cli.inputs,
        output: cli.output,
        ignore_errors: cli.ignore_errors,
    };
    let outcome = manager.run(&request, |warning| output::error(warning))?;

    if !outcome.warnings.is_empty() {
        output::info(format!(
            "Ignored {} validation error(s)",
            outcome.warnings.len()
        ));
    }
    output::success(format!(
        "Report written to {}",
        outcome.output.display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_contract_flags() {
        let cli = Cli::try_parse_from([
            "funding_report_cli",
            "-i",
            "in.json",
            "-o",
            "out.json",
            "--ignore-errors",
        ])
        .unwrap();
        assert_eq!(cli.inputs, vec![PathBuf::from("in.json")]);
        assert_eq!(cli.output, PathBuf::from("out.json"));
        assert!(cli.ignore_errors);
        assert!(!cli.quiet);
        assert!(!cli.repair);
    }

    #[test]
    fn repeated_inputs_are_collected_in_order() {
        let cli = Cli::try_parse_from([
            "funding_report_cli",
            "-i",
            "p1.json",
            "-i",
            "p2.json",
            "-o",
            "out.json",
        ])
        .unwrap();
        assert_eq!(
            cli.inputs,
            vec![PathBuf::from("p1.json"), PathBuf::from("p2.json")]
        );
        assert!(!cli.ignore_errors);
    }

    #[test]
    fn output_is_required() {
        assert!(Cli::try_parse_from(["funding_report_cli", "-i", "in.json"]).is_err());
    }

    #[test]
    fn validation_failures_count_as_reported() {
        assert!(CliError::Report(ReportError::ValidationFailed(2)).is_reported());
        assert!(!CliError::Report(ReportError::NoInput).is_reported());
    }
}
