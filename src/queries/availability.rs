//! Availability SLO query templates
//!
//! The success selector here counts *failed* requests (e.g. 5xx responses),
//! so the indicator is `(total - failed) / total`.

use super::{
    burn_rate_expr, format_ratio, multi_window_alert, SloQueries, FAST_BURN_POLICY,
    INGESTION_OFFSET, SLOW_BURN_POLICY,
};

/// Query templates for availability SLOs
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityQueries {
    success_metric: String,
    total_metric: String,
    target: f64,
    time_window: String,
}

impl AvailabilityQueries {
    /// Create the templates for one SLO
    pub fn new(
        success_metric: impl Into<String>,
        total_metric: impl Into<String>,
        target: f64,
        time_window: impl Into<String>,
    ) -> Self {
        Self {
            success_metric: success_metric.into(),
            total_metric: total_metric.into(),
            target,
            time_window: time_window.into(),
        }
    }

    /// `((total - failed) or 0 * total) / total` over `range`, with an
    /// optional selector suffix such as ` offset 2m`
    fn ratio(&self, range: &str, suffix: &str) -> String {
        let (failed, total) = (&self.success_metric, &self.total_metric);
        format!(
            "(((sum(rate({total}[{range}]{suffix})) - sum(rate({failed}[{range}]{suffix}) or vector(0))) or 0 * sum(rate({total}[{range}]{suffix}))) / (sum(rate({total}[{range}]{suffix}))))"
        )
    }

    /// Ratio at the dashboard's rate interval, offset for ingestion delay
    fn live_ratio(&self) -> String {
        self.ratio("$__rate_interval", &format!(" offset {INGESTION_OFFSET}"))
    }

    /// Live rate of the total selector
    fn live_total_rate(&self) -> String {
        format!(
            "sum(rate({}[$__rate_interval] offset {INGESTION_OFFSET}))",
            self.total_metric
        )
    }

    /// Raw ratio restricted to samples older than `created_at` (unix seconds)
    ///
    /// Lets the SLI panel show history from before the SLO existed as a
    /// separate series.
    pub fn sli_before_creation(&self, created_at: u64) -> String {
        format!(
            "{} AND timestamp({}) < {created_at}",
            self.live_ratio(),
            self.live_total_rate()
        )
    }

    /// Event rate restricted to samples older than `created_at` (unix seconds)
    pub fn event_rate_before_creation(&self, created_at: u64) -> String {
        let rate = self.live_total_rate();
        format!("{rate} AND timestamp({rate}) < {created_at}")
    }
}

impl SloQueries for AvailabilityQueries {
    fn window(&self) -> &str {
        &self.time_window
    }

    fn target(&self) -> f64 {
        self.target
    }

    fn sli(&self) -> String {
        format!("avg_over_time(({})[$__interval:])", self.live_ratio())
    }

    fn sli_over_window(&self) -> String {
        let (failed, total) = (&self.success_metric, &self.total_metric);
        let window = &self.time_window;
        format!(
            "(sum_over_time((sum(rate({total}[5m])) - sum(rate({failed}[5m]) or vector(0)))[{window}:5m]) / sum_over_time((sum(rate({total}[5m])))[{window}:5m]))"
        )
    }

    fn fast_burn_alert(&self) -> String {
        multi_window_alert(&FAST_BURN_POLICY, self.target, |w| self.ratio(w, ""))
    }

    fn slow_burn_alert(&self) -> String {
        multi_window_alert(&SLOW_BURN_POLICY, self.target, |w| self.ratio(w, ""))
    }

    fn error_budget_trend(&self) -> String {
        let target = format_ratio(self.target);
        format!("({} - {target}) / (1 - {target})", self.sli_over_window())
    }

    fn remaining_error_budget(&self) -> String {
        self.error_budget_trend()
    }

    fn burn_rate(&self) -> String {
        format!(
            "(1 - avg_over_time(({})[$__interval:])) / (1 - {})",
            self.ratio("5m", ""),
            format_ratio(self.target)
        )
    }

    fn instant_burn_rate(&self) -> String {
        burn_rate_expr(&self.ratio("5m", ""), self.target)
    }

    fn event_rate(&self) -> String {
        self.live_total_rate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAILED: &str = r#"http_requests_errors_total{job="api",code=~"5.."}"#;
    const TOTAL: &str = r#"http_requests_total{job="api"}"#;

    fn queries() -> AvailabilityQueries {
        AvailabilityQueries::new(FAILED, TOTAL, 0.999, "28d")
    }

    #[test]
    fn test_ratio_queries_embed_both_metrics() {
        let q = queries();
        let exprs = [
            q.sli(),
            q.sli_over_window(),
            q.fast_burn_alert(),
            q.slow_burn_alert(),
            q.error_budget_trend(),
            q.remaining_error_budget(),
            q.burn_rate(),
            q.instant_burn_rate(),
            q.sli_before_creation(1_700_000_000),
        ];
        for expr in exprs {
            assert!(expr.contains(FAILED), "missing failed metric in {expr}");
            assert!(expr.contains(TOTAL), "missing total metric in {expr}");
        }
    }

    #[test]
    fn test_sli_exact() {
        let q = AvailabilityQueries::new("err", "req", 0.999, "28d");
        assert_eq!(
            q.sli(),
            "avg_over_time(((((sum(rate(req[$__rate_interval] offset 2m)) - sum(rate(err[$__rate_interval] offset 2m) or vector(0))) or 0 * sum(rate(req[$__rate_interval] offset 2m))) / (sum(rate(req[$__rate_interval] offset 2m)))))[$__interval:])"
        );
    }

    #[test]
    fn test_error_budget_uses_subtraction() {
        let q = AvailabilityQueries::new("err", "req", 0.999, "28d");
        let expr = q.error_budget_trend();
        assert!(expr.contains("sum(rate(req[5m])) - sum(rate(err[5m]) or vector(0))"));
        assert!(expr.ends_with("- 0.999000) / (1 - 0.999000)"));
        assert_eq!(expr, q.remaining_error_budget());
    }

    #[test]
    fn test_instant_burn_rate_has_no_interval() {
        let q = queries();
        assert!(!q.instant_burn_rate().contains("$__interval"));
        assert!(q.burn_rate().contains("[$__interval:]"));
        assert!(q.instant_burn_rate().starts_with("(1 - ("));
    }

    #[test]
    fn test_event_rate() {
        let q = AvailabilityQueries::new("err", "req", 0.999, "28d");
        assert_eq!(q.event_rate(), "sum(rate(req[$__rate_interval] offset 2m))");
    }

    #[test]
    fn test_before_creation_gate() {
        let q = AvailabilityQueries::new("err", "req", 0.999, "28d");
        assert_eq!(
            q.event_rate_before_creation(1_700_000_000),
            "sum(rate(req[$__rate_interval] offset 2m)) AND timestamp(sum(rate(req[$__rate_interval] offset 2m))) < 1700000000"
        );
        assert!(q
            .sli_before_creation(42)
            .ends_with("AND timestamp(sum(rate(req[$__rate_interval] offset 2m))) < 42"));
    }

    #[test]
    fn test_alerts_use_unoffset_windows() {
        let expr = queries().fast_burn_alert();
        assert!(!expr.contains("offset"));
        assert!(expr.contains("/ (1 - 0.999000) >= 14.4"));
    }

    #[test]
    fn test_slo_target_precision() {
        assert_eq!(queries().slo_target(), "vector(0.999000)");
        let q = AvailabilityQueries::new("err", "req", 0.9995, "28d");
        assert_eq!(q.slo_target(), "vector(0.999500)");
    }

    #[test]
    fn test_window_change_only_touches_literal() {
        let a = AvailabilityQueries::new("err", "req", 0.999, "28d");
        let b = AvailabilityQueries::new("err", "req", 0.999, "7d");
        assert_eq!(a.time_window().replace("28d", "7d"), b.time_window());
        assert_eq!(a.slo_target(), b.slo_target());
    }
}
