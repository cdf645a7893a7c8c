//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::config::SloDefinition;
use crate::domain::SloKind;
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).map_err(io::Error::other)?;
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Catalog entry for display
#[derive(Debug, Clone, Serialize)]
pub struct SloListEntry {
    pub uid: String,
    pub kind: SloKind,
    pub name: String,
    pub target: f64,
    pub time_window: String,
    pub file_name: String,
}

impl From<&SloDefinition> for SloListEntry {
    fn from(slo: &SloDefinition) -> Self {
        Self {
            uid: slo.uid.clone(),
            kind: slo.kind,
            name: slo.name.clone(),
            target: slo.target,
            time_window: slo.time_window.clone(),
            file_name: slo.file_name(),
        }
    }
}

impl TableDisplay for SloListEntry {
    fn to_table(&self) -> String {
        format!(
            "{:<13} {:<48} {:>8} {:>5}  {}",
            self.kind.to_string(),
            self.uid,
            format_percent(self.target),
            self.time_window,
            self.file_name
        )
    }

    fn to_compact(&self) -> String {
        format!("{}:{}", self.kind, self.uid)
    }
}

/// Catalog listing
#[derive(Debug, Clone, Serialize)]
pub struct SloList {
    pub slos: Vec<SloListEntry>,
}

impl TableDisplay for SloList {
    fn to_table(&self) -> String {
        let mut output = format!("SLOs Found: {}\n\n", self.slos.len());
        output.push_str(&format!(
            "{:<13} {:<48} {:>8} {:>5}  {}\n",
            "KIND", "UID", "TARGET", "WIN", "FILE"
        ));

        for slo in &self.slos {
            output.push_str(&slo.to_table());
            output.push('\n');
        }

        output
    }

    fn to_compact(&self) -> String {
        self.slos
            .iter()
            .map(|s| s.to_compact())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One written (or, in dry-run mode, skipped) dashboard
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedEntry {
    pub uid: String,
    pub kind: SloKind,
    pub path: String,
    pub panels: usize,
}

/// Result of a generate run
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub dry_run: bool,
    pub output_dir: String,
    pub dashboards: Vec<GeneratedEntry>,
}

impl TableDisplay for GenerateReport {
    fn to_table(&self) -> String {
        let verb = if self.dry_run { "Would write" } else { "Wrote" };
        let mut output = format!(
            "{} {} dashboards to {}\n",
            verb,
            self.dashboards.len(),
            self.output_dir
        );

        for d in &self.dashboards {
            output.push_str(&format!(
                "  {} ({}, {} panels)\n",
                d.path, d.kind, d.panels
            ));
        }

        output
    }

    fn to_compact(&self) -> String {
        self.dashboards
            .iter()
            .map(|d| d.path.clone())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One catalog problem
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub uid: String,
    pub message: String,
}

/// Result of validating the catalog
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub checked: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

impl TableDisplay for ValidationReport {
    fn to_table(&self) -> String {
        if self.is_valid() {
            return format!("OK: {} SLOs checked, no problems found", self.checked);
        }

        let mut output = format!(
            "{} problems in {} SLOs:\n",
            self.issues.len(),
            self.checked
        );
        for issue in &self.issues {
            output.push_str(&format!("  {}: {}\n", issue.uid, issue.message));
        }
        output
    }

    fn to_compact(&self) -> String {
        if self.is_valid() {
            "ok".to_string()
        } else {
            format!("{} problems", self.issues.len())
        }
    }
}

/// Ratio as a percentage with up to three decimals, e.g. `99.9%`
fn format_percent(ratio: f64) -> String {
    let formatted = format!("{:.3}", ratio * 100.0);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> SloListEntry {
        SloListEntry {
            uid: "checkout-latency".to_string(),
            kind: SloKind::Latency,
            name: "Checkout".to_string(),
            target: 0.95,
            time_window: "28d".to_string(),
            file_name: "checkout-latency.json".to_string(),
        }
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.95), "95%");
        assert_eq!(format_percent(0.999), "99.9%");
        assert_eq!(format_percent(0.9995), "99.95%");
    }

    #[test]
    fn test_list_table() {
        let list = SloList {
            slos: vec![entry()],
        };
        let table = list.to_table();
        assert!(table.starts_with("SLOs Found: 1"));
        assert!(table.contains("checkout-latency.json"));
        assert!(table.contains("95%"));
        assert_eq!(list.to_compact(), "latency:checkout-latency");
    }

    #[test]
    fn test_list_json() {
        let value = serde_json::to_value(SloList {
            slos: vec![entry()],
        })
        .unwrap();
        assert_eq!(value["slos"][0]["kind"], "latency");
        assert_eq!(value["slos"][0]["target"], 0.95);
    }

    #[test]
    fn test_generate_report_dry_run() {
        let report = GenerateReport {
            dry_run: true,
            output_dir: "output".to_string(),
            dashboards: vec![GeneratedEntry {
                uid: "a".to_string(),
                kind: SloKind::Availability,
                path: "output/a.json".to_string(),
                panels: 12,
            }],
        };
        assert!(report.to_table().starts_with("Would write 1 dashboards"));
        assert_eq!(report.to_compact(), "output/a.json");
    }

    #[test]
    fn test_validation_report() {
        let ok = ValidationReport {
            checked: 3,
            issues: Vec::new(),
        };
        assert!(ok.is_valid());
        assert_eq!(ok.to_compact(), "ok");

        let bad = ValidationReport {
            checked: 3,
            issues: vec![ValidationIssue {
                uid: "x".to_string(),
                message: "bad target".to_string(),
            }],
        };
        assert!(!bad.is_valid());
        assert!(bad.to_table().contains("x: bad target"));
    }
}
