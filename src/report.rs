use crate::checks::{CheckOutcome, CheckResult};
use crate::config::CheckerParameters;
use crate::errors::CheckerError;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde_derive::Serialize;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub const EXIT_CODE_PASSED: i32 = 0;
pub const EXIT_CODE_FAILED: i32 = 1;
pub const EXIT_CODE_ERROR: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Display for ReportSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} skipped",
            self.passed, self.failed, self.skipped
        )
    }
}

/// Ordered results of one compliance run.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub parameters: CheckerParameters,
    pub execution_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub results: Vec<CheckResult>,
}

impl CheckReport {
    pub fn new(parameters: CheckerParameters, execution_id: Uuid, started_at: DateTime<Utc>) -> Self {
        CheckReport {
            parameters,
            execution_id,
            started_at,
            results: vec![],
        }
    }

    pub fn extend(&mut self, results: Vec<CheckResult>) {
        self.results.extend(results);
    }

    /// Skipped checks don't fail a report on their own, the failed existence check they depend on does.
    pub fn passed(&self) -> bool {
        !self.results.iter().any(CheckResult::is_failed)
    }

    pub fn summary(&self) -> ReportSummary {
        self.results
            .iter()
            .fold(ReportSummary::default(), |mut summary, result| {
                match result.outcome {
                    CheckOutcome::Passed => summary.passed += 1,
                    CheckOutcome::Failed => summary.failed += 1,
                    CheckOutcome::Skipped => summary.skipped += 1,
                };
                summary
            })
    }

    pub fn exit_code(&self) -> i32 {
        match self.passed() {
            true => EXIT_CODE_PASSED,
            false => EXIT_CODE_FAILED,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, CheckerError> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| CheckerError::CannotRenderReport {
                    raw_error_message: e.to_string(),
                })
            }
        }
    }
}

impl Display for CheckReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Check GKE cluster `{}` in project `{}` ({})",
            self.parameters.cluster_name(),
            self.parameters.project_id(),
            self.parameters.location()
        )?;

        for (resource, results) in &self.results.iter().chunk_by(|r| r.resource.clone()) {
            writeln!(f, "  {resource}")?;
            for result in results {
                writeln!(
                    f,
                    "    [{}] {}: expected {} {}, got {}",
                    result.outcome,
                    result.name,
                    result.comparator,
                    result.expected,
                    match &result.actual {
                        Some(actual) => actual.to_string(),
                        None => "<none>".to_string(),
                    }
                )?;
            }
        }

        write!(f, "Summary: {}", self.summary())
    }
}
