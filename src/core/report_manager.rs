use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::ConverterConfig;
use crate::core::services::{
    ConversionService, MergeService, RepairService, ValidationService, ValidationWarning,
};
use crate::domain::{Dataset, Report};
use crate::errors::{ReportError, Result};
use crate::utils::persistence;

/// One read, validate, convert, write run.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    /// Convert even when validation produced warnings.
    pub ignore_errors: bool,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub warnings: Vec<ValidationWarning>,
    pub output: PathBuf,
    pub report: Report,
}

/// Drives the conversion pipeline between input and output files.
pub struct ReportManager {
    config: ConverterConfig,
}

impl ReportManager {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Reads every input, merges them when there is more than one, and
    /// repairs the result when the configuration asks for it.
    pub fn load_inputs(&self, inputs: &[PathBuf]) -> Result<Value> {
        if inputs.is_empty() {
            return Err(ReportError::NoInput);
        }
        let pages = inputs
            .iter()
            .map(|path| persistence::load_json_from_file(path))
            .collect::<Result<Vec<_>>>()?;
        let merged = MergeService::merge(pages, &self.config)?;
        if self.config.repair_dataset {
            return Ok(RepairService::repair(merged, &self.config));
        }
        Ok(merged)
    }

    pub fn validate(&self, raw: &Value) -> Result<Vec<ValidationWarning>> {
        Ok(ValidationService::validate(raw, &self.config)?)
    }

    pub fn convert(&self, raw: Value) -> Result<Report> {
        let dataset = Dataset::from_value(raw)?;
        Ok(ConversionService::convert(&dataset, &self.config)?)
    }

    pub fn write(&self, report: &Report, path: &Path) -> Result<()> {
        persistence::save_report_to_file(report, path)?;
        tracing::info!(path = %path.display(), "report written");
        Ok(())
    }

    /// Runs the pipeline, handing every warning to `on_warning` as it is found.
    ///
    /// Warnings abort the run with [`ReportError::ValidationFailed`] unless the
    /// request ignores them; structural and aggregation errors always abort.
    pub fn run<F>(&self, request: &ConvertRequest, mut on_warning: F) -> Result<RunOutcome>
    where
        F: FnMut(&ValidationWarning),
    {
        let raw = self.load_inputs(&request.inputs)?;
        let warnings = self.validate(&raw)?;
        for warning in &warnings {
            tracing::debug!(%warning, "validation warning");
            on_warning(warning);
        }
        if !warnings.is_empty() && !request.ignore_errors {
            return Err(ReportError::ValidationFailed(warnings.len()));
        }

        let report = self.convert(raw)?;
        self.write(&report, &request.output)?;
        Ok(RunOutcome {
            warnings,
            output: request.output.clone(),
            report,
        })
    }
}

impl Default for ReportManager {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}
