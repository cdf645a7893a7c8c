//! PromQL query templates
//!
//! Each SLO kind maps its two metric selectors, target and time window onto
//! a fixed family of expressions. Every expression is self-contained: panel
//! targets cannot reference each other, so shared math is repeated inline
//! rather than referenced.

pub mod availability;
pub mod latency;

pub use availability::AvailabilityQueries;
pub use latency::LatencyQueries;

/// Offset applied to ratios that are plotted live, so partially scraped
/// samples do not skew the leading edge.
pub const INGESTION_OFFSET: &str = "2m";

/// Rate window used for smoothed ratios
pub const RATE_WINDOW: &str = "5m";

/// One branch of a multi-window burn-rate alert
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnWindow {
    /// Short window, catches the onset
    pub short: &'static str,
    /// Long window, confirms the burn is sustained
    pub long: &'static str,
    /// Burn rate both windows must reach
    pub factor: f64,
}

/// Page-worthy burn: 2% of a 30 day budget in one hour, or 5% in six hours
pub const FAST_BURN_POLICY: [BurnWindow; 2] = [
    BurnWindow {
        short: "5m",
        long: "1h",
        factor: 14.4,
    },
    BurnWindow {
        short: "30m",
        long: "6h",
        factor: 6.0,
    },
];

/// Ticket-worthy burn: 10% of the budget in a day, or all of it over three days
pub const SLOW_BURN_POLICY: [BurnWindow; 2] = [
    BurnWindow {
        short: "2h",
        long: "24h",
        factor: 3.0,
    },
    BurnWindow {
        short: "6h",
        long: "72h",
        factor: 1.0,
    },
];

/// Query family every SLO dashboard draws from
pub trait SloQueries {
    /// The configured compliance window, e.g. `28d`
    fn window(&self) -> &str;

    /// The configured target ratio
    fn target(&self) -> f64;

    /// Service level indicator in [0, 1] over a short rate window
    fn sli(&self) -> String;

    /// Indicator aggregated over the whole compliance window
    fn sli_over_window(&self) -> String;

    /// 1 when the fast multi-window burn policy fires, else 0
    fn fast_burn_alert(&self) -> String;

    /// 1 when the slow multi-window burn policy fires, else 0
    fn slow_burn_alert(&self) -> String;

    /// Remaining budget fraction, plotted over time
    fn error_budget_trend(&self) -> String;

    /// Remaining budget fraction for the window; negative once breached
    fn remaining_error_budget(&self) -> String;

    /// Burn rate averaged over the dashboard interval
    fn burn_rate(&self) -> String;

    /// Burn rate for the single-value readout
    fn instant_burn_rate(&self) -> String;

    /// Throughput of the total-events metric
    fn event_rate(&self) -> String;

    /// Constant series carrying the window as a `time_period` label
    fn time_window(&self) -> String {
        format!(
            r#"label_replace(vector(1), "time_period", "{}", "", "")"#,
            self.window()
        )
    }

    /// Constant series holding the target ratio
    fn slo_target(&self) -> String {
        format!("vector({})", format_ratio(self.target()))
    }
}

/// Format a ratio with six fixed decimals, the precision used in every template
pub fn format_ratio(value: f64) -> String {
    format!("{value:.6}")
}

/// `(1 - (sli)) / (1 - target)`
pub(crate) fn burn_rate_expr(sli: &str, target: f64) -> String {
    format!("(1 - ({sli})) / (1 - {})", format_ratio(target))
}

/// Compose a multi-window multi-burn-rate alert
///
/// Both windows of a branch must reach the factor (`and`); any branch fires
/// the alert (`or`). Absent series collapse to 0 so the panel never shows
/// "no data".
pub(crate) fn multi_window_alert<F>(policy: &[BurnWindow], target: f64, sli: F) -> String
where
    F: Fn(&str) -> String,
{
    let branches: Vec<String> = policy
        .iter()
        .map(|branch| {
            format!(
                "  (\n    {short} >= {factor}\n    and\n    {long} >= {factor}\n  )",
                short = burn_rate_expr(&sli(branch.short), target),
                long = burn_rate_expr(&sli(branch.long), target),
                factor = branch.factor,
            )
        })
        .collect();

    format!("(\n{}\n) or vector(0)", branches.join("\n  or\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ratio_six_decimals() {
        assert_eq!(format_ratio(0.95), "0.950000");
        assert_eq!(format_ratio(0.999), "0.999000");
        assert_eq!(format_ratio(0.9995), "0.999500");
    }

    #[test]
    fn test_burn_rate_expr() {
        assert_eq!(burn_rate_expr("x", 0.99), "(1 - (x)) / (1 - 0.990000)");
    }

    #[test]
    fn test_multi_window_alert_structure() {
        let expr = multi_window_alert(&FAST_BURN_POLICY, 0.99, |w| format!("sli[{w}]"));

        assert!(expr.starts_with("(\n"));
        assert!(expr.ends_with(") or vector(0)"));
        assert!(expr.contains("(1 - (sli[5m])) / (1 - 0.990000) >= 14.4"));
        assert!(expr.contains("(1 - (sli[1h])) / (1 - 0.990000) >= 14.4"));
        assert!(expr.contains("(1 - (sli[30m])) / (1 - 0.990000) >= 6"));
        assert!(expr.contains("(1 - (sli[6h])) / (1 - 0.990000) >= 6"));
        assert_eq!(expr.matches("\n    and\n").count(), 2);
        assert_eq!(expr.matches("\n  or\n").count(), 1);
    }

    #[test]
    fn test_slow_policy_factors() {
        let factors: Vec<f64> = SLOW_BURN_POLICY.iter().map(|b| b.factor).collect();
        assert_eq!(factors, vec![3.0, 1.0]);
        assert_eq!(SLOW_BURN_POLICY[1].long, "72h");
    }

    #[test]
    fn test_parentheses_balanced() {
        let expr = multi_window_alert(&SLOW_BURN_POLICY, 0.95, |w| format!("(a[{w}]) / (b[{w}])"));
        let opens = expr.matches('(').count();
        let closes = expr.matches(')').count();
        assert_eq!(opens, closes);
    }
}
