//! Dashboard generation service
//!
//! Turns catalog entries into serialized dashboards.

use crate::config::SloDefinition;
use crate::dashboard::DashboardSettings;
use crate::domain::SloKind;
use crate::error::{AppError, BuildError};
use crate::slo::build_dashboard;
use serde::Serialize;

/// A serialized dashboard ready to be written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedDashboard {
    pub uid: String,
    pub kind: SloKind,
    pub file_name: String,
    pub panel_count: usize,
    #[serde(skip)]
    pub json: String,
}

/// Service building dashboards from catalog entries
pub struct Generator {
    settings: DashboardSettings,
    default_created_at: u64,
}

impl Generator {
    /// Create a generator
    ///
    /// `default_created_at` stamps availability entries that carry no
    /// `created_at` of their own.
    pub fn new(settings: DashboardSettings, default_created_at: u64) -> Self {
        Self {
            settings,
            default_created_at,
        }
    }

    /// Build and serialize one dashboard
    pub fn generate(&self, slo: &SloDefinition) -> Result<GeneratedDashboard, BuildError> {
        let created_at = slo.created_at.unwrap_or(self.default_created_at);
        let dashboard = build_dashboard(slo.kind, slo.to_parameters(), &self.settings, created_at);
        let json = dashboard.build_json()?;

        log::info!("Generated {} dashboard '{}'", slo.kind, slo.uid);
        Ok(GeneratedDashboard {
            uid: dashboard.dashboard().uid().to_string(),
            kind: slo.kind,
            file_name: slo.file_name(),
            panel_count: dashboard.dashboard().panels().len(),
            json,
        })
    }

    /// Build every entry, or only those whose uid is in `only`
    ///
    /// # Errors
    /// `NoSlosConfigured` for an empty catalog, `SloNotFound` for a requested
    /// uid that is not in it, and the first build failure otherwise.
    pub fn generate_all(
        &self,
        slos: &[SloDefinition],
        only: &[String],
    ) -> Result<Vec<GeneratedDashboard>, AppError> {
        if slos.is_empty() {
            return Err(AppError::NoSlosConfigured);
        }
        if let Some(missing) = only.iter().find(|uid| !slos.iter().any(|s| &s.uid == *uid)) {
            return Err(AppError::SloNotFound(missing.clone()));
        }

        slos.iter()
            .filter(|slo| only.is_empty() || only.contains(&slo.uid))
            .map(|slo| self.generate(slo).map_err(AppError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(kind: SloKind, uid: &str) -> SloDefinition {
        SloDefinition {
            kind,
            uid: uid.to_string(),
            name: format!("{uid} name"),
            description: String::new(),
            time_window: "28d".to_string(),
            target: 0.99,
            success_query: "good".to_string(),
            total_query: "total".to_string(),
            file_name: None,
            created_at: None,
        }
    }

    fn generator() -> Generator {
        Generator::new(DashboardSettings::default(), 1_700_000_000)
    }

    #[test]
    fn test_generate_one() {
        let generated = generator()
            .generate(&definition(SloKind::Latency, "lat"))
            .unwrap();
        assert_eq!(generated.file_name, "lat.json");
        assert_eq!(generated.panel_count, 12);
        assert!(generated.json.contains("\"uid\": \"lat\""));
    }

    #[test]
    fn test_default_created_at_applied() {
        let generated = generator()
            .generate(&definition(SloKind::Availability, "av"))
            .unwrap();
        assert!(generated.json.contains("< 1700000000"));

        let mut slo = definition(SloKind::Availability, "av");
        slo.created_at = Some(42);
        let generated = generator().generate(&slo).unwrap();
        assert!(generated.json.contains("< 42"));
    }

    #[test]
    fn test_generate_all_filters() {
        let slos = vec![
            definition(SloKind::Latency, "a"),
            definition(SloKind::Availability, "b"),
        ];
        let all = generator().generate_all(&slos, &[]).unwrap();
        assert_eq!(all.len(), 2);

        let only = generator().generate_all(&slos, &["b".to_string()]).unwrap();
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].kind, SloKind::Availability);
    }

    #[test]
    fn test_generate_all_errors() {
        assert!(matches!(
            generator().generate_all(&[], &[]),
            Err(AppError::NoSlosConfigured)
        ));

        let slos = vec![definition(SloKind::Latency, "a")];
        assert!(matches!(
            generator().generate_all(&slos, &["zzz".to_string()]),
            Err(AppError::SloNotFound(uid)) if uid == "zzz"
        ));
    }
}
