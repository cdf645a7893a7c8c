//! List command implementation
//!
//! Lists the SLOs in the catalog.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, SloList, SloListEntry};
use crate::config::Config;
use crate::error::{AppError, Result};

/// Execute the list command
pub fn run_list(config: &Config, format: OutputFormat) -> Result<()> {
    if config.slos.is_empty() {
        return Err(AppError::NoSlosConfigured);
    }

    let slo_list = SloList {
        slos: config.slos.iter().map(SloListEntry::from).collect(),
    };

    print_output(&slo_list, format)?;

    Ok(())
}
