//! Dashboard file output
//!
//! Writes each document to a temporary file next to its destination and
//! renames it into place, so a failed run never leaves a truncated file.

use crate::error::OutputError;
use crate::services::GeneratedDashboard;
use std::fs;
use std::path::{Path, PathBuf};

/// Service writing generated dashboards into a directory
pub struct DashboardWriter {
    output_dir: PathBuf,
    dry_run: bool,
}

impl DashboardWriter {
    /// Create a new writer
    pub fn new(output_dir: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            dry_run,
        }
    }

    /// Destination path for a dashboard
    pub fn path_for(&self, dashboard: &GeneratedDashboard) -> PathBuf {
        self.output_dir.join(&dashboard.file_name)
    }

    /// Write one dashboard, returning its path
    pub fn write(&self, dashboard: &GeneratedDashboard) -> Result<PathBuf, OutputError> {
        let path = self.path_for(dashboard);

        if self.dry_run {
            log::info!("DRY RUN: Would write {}", path.display());
            return Ok(path);
        }

        self.ensure_dir()?;
        write_atomic(&path, &dashboard.json)?;
        log::debug!("Wrote {} ({} bytes)", path.display(), dashboard.json.len());

        Ok(path)
    }

    /// Write every dashboard, stopping at the first failure
    pub fn write_all(
        &self,
        dashboards: &[GeneratedDashboard],
    ) -> Result<Vec<PathBuf>, OutputError> {
        dashboards.iter().map(|d| self.write(d)).collect()
    }

    fn ensure_dir(&self) -> Result<(), OutputError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| OutputError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Check if in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<(), OutputError> {
    let tmp = path.with_extension("json.tmp");
    let write_err = |source: std::io::Error| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    fs::write(&tmp, content).map_err(write_err)?;
    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(source));
    }
    Ok(())
}
