//! Validate command implementation
//!
//! Checks the catalog without generating anything.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, ValidationIssue, ValidationReport};
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Build the validation report for a catalog
pub fn validation_report(config: &Config) -> ValidationReport {
    let mut issues: Vec<ValidationIssue> = config
        .validate_slos()
        .into_iter()
        .map(|(uid, err)| ValidationIssue {
            uid,
            message: err.to_string(),
        })
        .collect();

    if let Err(e) = config.validate() {
        issues.push(ValidationIssue {
            uid: "(settings)".to_string(),
            message: e.to_string(),
        });
    }

    ValidationReport {
        checked: config.slos.len(),
        issues,
    }
}

/// Execute the validate command
///
/// Prints the report, then fails if any problem was found.
pub fn run_validate(config: &Config, format: OutputFormat) -> Result<()> {
    let report = validation_report(config);
    print_output(&report, format)?;

    if !report.is_valid() {
        return Err(ConfigError::InvalidValue {
            key: "slo".to_string(),
            message: format!("{} problems found", report.issues.len()),
        }
        .into());
    }

    log::info!("Catalog is valid ({} SLOs)", report.checked);
    Ok(())
}
