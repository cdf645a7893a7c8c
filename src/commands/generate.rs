//! Generate command implementation
//!
//! Builds every selected dashboard, then writes them. Nothing is written
//! unless every dashboard builds.

use crate::cli::args::{GenerateArgs, OutputFormat};
use crate::cli::output::{print_output, GenerateReport, GeneratedEntry};
use crate::config::Config;
use crate::domain::unix_now;
use crate::error::{AppError, Result};
use crate::services::{DashboardWriter, Generator};

/// Execute the generate command
///
/// `config` already carries the CLI overrides for output directory and
/// dry-run mode.
pub fn run_generate(args: &GenerateArgs, config: &Config, format: OutputFormat) -> Result<()> {
    config.validate()?;

    let problems = config.validate_slos();
    for (uid, err) in &problems {
        log::warn!("{}: {}", uid, err);
    }
    if let Some((_, err)) = problems.into_iter().next() {
        return Err(AppError::Domain(err));
    }

    let generator = Generator::new(config.dashboard.clone(), unix_now());
    let dashboards = generator.generate_all(&config.slos, &args.only)?;

    let writer = DashboardWriter::new(&config.general.output_dir, config.general.dry_run);
    let paths = writer.write_all(&dashboards)?;

    let report = GenerateReport {
        dry_run: writer.is_dry_run(),
        output_dir: writer.output_dir().display().to_string(),
        dashboards: dashboards
            .iter()
            .zip(paths)
            .map(|(d, path)| GeneratedEntry {
                uid: d.uid.clone(),
                kind: d.kind,
                path: path.display().to_string(),
                panels: d.panel_count,
            })
            .collect(),
    };

    log::info!(
        "Generated {} dashboards into {}",
        report.dashboards.len(),
        report.output_dir
    );
    print_output(&report, format)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use std::io::Write;

    const CATALOG: &str = r#"
[[slo]]
kind = "latency"
uid = "lat"
name = "Latency"
target = 0.95
success_query = "good"
total_query = "total"

[[slo]]
kind = "availability"
uid = "av"
name = "Availability"
target = 0.999
success_query = "err"
total_query = "req"
created_at = 1700000000
"#;

    fn config(output_dir: &std::path::Path, dry_run: bool) -> Config {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{CATALOG}").unwrap();
        let path = file.path().to_string_lossy().to_string();

        ConfigBuilder::new()
            .with_file(Some(&path))
            .unwrap()
            .with_dry_run(Some(dry_run))
            .with_output_dir(Some(output_dir.display().to_string()))
            .build()
    }

    fn args(only: &[&str]) -> GenerateArgs {
        GenerateArgs {
            output_dir: None,
            only: only.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_generate_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), false);

        run_generate(&args(&[]), &config, OutputFormat::Compact).unwrap();

        let written = std::fs::read_to_string(dir.path().join("av.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["uid"], "av");
        assert!(dir.path().join("lat.json").exists());
    }

    #[test]
    fn test_generate_only_and_dry_run() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");

        run_generate(&args(&["lat"]), &config(&out, true), OutputFormat::Compact).unwrap();
        assert!(!out.exists());

        run_generate(&args(&["lat"]), &config(&out, false), OutputFormat::Compact).unwrap();
        assert!(out.join("lat.json").exists());
        assert!(!out.join("av.json").exists());
    }

    #[test]
    fn test_generate_rejects_invalid_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path(), false);
        config.slos[0].time_window = "forever".to_string();

        let result = run_generate(&args(&[]), &config, OutputFormat::Compact);
        assert!(matches!(result, Err(AppError::Domain(_))));
        assert!(!dir.path().join("av.json").exists());
    }
}
