//! Show command implementation
//!
//! Prints a single dashboard document to stdout.

use crate::config::Config;
use crate::domain::unix_now;
use crate::error::{AppError, Result};
use crate::services::Generator;
use std::io::{self, Write};

/// Execute the show command
///
/// The document is always printed as JSON; `--format` does not apply.
pub fn run_show(config: &Config, uid: &str) -> Result<()> {
    let slo = config
        .find(uid)
        .ok_or_else(|| AppError::SloNotFound(uid.to_string()))?;

    let generator = Generator::new(config.dashboard.clone(), unix_now());
    let generated = generator.generate(slo)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", generated.json)?;

    Ok(())
}
