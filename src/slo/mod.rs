//! SLO dashboard composition
//!
//! Each SLO kind composes the same five rows (recap, SLI, error budget,
//! burn rate, event rate) from its own query family. Composition happens
//! once, on construction.

mod common;

pub mod availability;
pub mod latency;

pub use availability::AvailabilitySlo;
pub use latency::LatencySlo;

use crate::dashboard::{Dashboard, DashboardSettings};
use crate::domain::{SloKind, SloParameters};
use crate::error::BuildError;

/// A composed SLO dashboard
pub trait SloDashboard {
    /// Parameters the dashboard was built from
    fn params(&self) -> &SloParameters;

    fn kind(&self) -> SloKind;

    /// The composed dashboard
    fn dashboard(&self) -> &Dashboard;

    /// Serialize the dashboard document
    ///
    /// Deterministic: calling it twice yields identical text.
    fn build_json(&self) -> Result<String, BuildError> {
        self.dashboard().to_json()
    }
}

/// Compose the dashboard for `kind`
///
/// `created_at` (unix seconds) only affects availability dashboards.
pub fn build_dashboard(
    kind: SloKind,
    params: SloParameters,
    settings: &DashboardSettings,
    created_at: u64,
) -> Box<dyn SloDashboard> {
    match kind {
        SloKind::Latency => Box::new(LatencySlo::from_parameters(params, settings)),
        SloKind::Availability => Box::new(AvailabilitySlo::from_parameters(
            params, settings, created_at,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SloParameters {
        SloParameters::new("u", "Name", "d", "28d", 0.99, "good", "total")
    }

    #[test]
    fn test_factory_dispatch() {
        let settings = DashboardSettings::default();
        let latency = build_dashboard(SloKind::Latency, params(), &settings, 0);
        assert_eq!(latency.kind(), SloKind::Latency);
        assert!(latency.dashboard().panel("Error Budget Burndown").is_some());

        let availability = build_dashboard(SloKind::Availability, params(), &settings, 0);
        assert_eq!(availability.kind(), SloKind::Availability);
        assert!(availability.dashboard().panel("Error Budget Trend").is_some());
    }

    #[test]
    fn test_settings_flow_into_panels() {
        let settings = DashboardSettings {
            datasource_uid: "local-prom".to_string(),
            ..DashboardSettings::default()
        };
        let slo = build_dashboard(SloKind::Latency, params(), &settings, 0);
        let json = slo.build_json().unwrap();
        assert!(json.contains("local-prom"));
        assert!(!json.contains("grafanacloud-prom"));
    }

    #[test]
    fn test_both_kinds_serialize() {
        let settings = DashboardSettings::default();
        for kind in [SloKind::Latency, SloKind::Availability] {
            let slo = build_dashboard(kind, params(), &settings, 1);
            let value: serde_json::Value =
                serde_json::from_str(&slo.build_json().unwrap()).unwrap();
            assert_eq!(value["uid"], "u");
            assert_eq!(value["panels"].as_array().unwrap().len(), 12);
        }
    }
}
