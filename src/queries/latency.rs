//! Latency SLO query templates
//!
//! The success selector counts requests under the latency threshold
//! (a histogram bucket), so the indicator is `good / total` directly.

use super::{
    format_ratio, multi_window_alert, SloQueries, FAST_BURN_POLICY, INGESTION_OFFSET, RATE_WINDOW,
    SLOW_BURN_POLICY,
};

/// Query templates for latency SLOs
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyQueries {
    success_metric: String,
    total_metric: String,
    target: f64,
    time_window: String,
}

impl LatencyQueries {
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

    /// Offset rate of a selector over the default rate window
    fn offset_rate(metric: &str) -> String {
        format!("sum(rate({metric}[{RATE_WINDOW}] offset {INGESTION_OFFSET}))")
    }

    /// Ratio of good to total events over `window`, used by the alert legs
    fn alert_sli(&self, window: &str) -> String {
        let (good, total) = (&self.success_metric, &self.total_metric);
        format!(
            "(((sum(rate({good}[{window}]) or vector(0))) or 0 * sum(rate({total}[{window}]))) / (sum(rate({total}[{window}]))))"
        )
    }

    /// Failing events per scrape step, summed per dashboard interval
    ///
    /// Fed to a client-side cumulative sum; see the burndown transforms.
    pub fn burndown_failure_events(&self) -> String {
        format!(
            "300 * (sum(sum_over_time(rate({total}[5m])[$__interval:5m] offset 1s)) - sum(sum_over_time(rate({good}[5m])[$__interval:5m] offset 1s)))",
            total = self.total_metric,
            good = self.success_metric,
        )
    }

    /// Total events across the selected dashboard range
    pub fn burndown_total_events(&self) -> String {
        format!(
            "300 * sum(sum_over_time(({total} < 1e308)[$__range:5m] @ ${{__to:date:seconds}} offset 1s))",
            total = Self::offset_rate(&self.total_metric),
        )
    }
}

impl SloQueries for LatencyQueries {
    fn window(&self) -> &str {
        &self.time_window
    }

    fn target(&self) -> f64 {
        self.target
    }

    fn sli(&self) -> String {
        let good = Self::offset_rate(&self.success_metric);
        let total = Self::offset_rate(&self.total_metric);
        format!("(({good} or 0 * {total}) / ({total}))")
    }

    fn sli_over_window(&self) -> String {
        let good = Self::offset_rate(&self.success_metric);
        let total = Self::offset_rate(&self.total_metric);
        let window = &self.time_window;
        format!(
            "sum(sum_over_time(({good} or 0 * {total} < 1e308)[{window}:5m])) / sum(sum_over_time(({total} < 1e308)[{window}:5m]))"
        )
    }

    fn fast_burn_alert(&self) -> String {
        multi_window_alert(&FAST_BURN_POLICY, self.target, |w| self.alert_sli(w))
    }

    fn slow_burn_alert(&self) -> String {
        multi_window_alert(&SLOW_BURN_POLICY, self.target, |w| self.alert_sli(w))
    }

    fn error_budget_trend(&self) -> String {
        let target = format_ratio(self.target);
        format!(
            "((sum(sum_over_time(rate({good}[5m])[{window}:4h])) / sum(sum_over_time(rate({total}[5m])[{window}:4h]))) - {target}) / (1 - {target})",
            good = self.success_metric,
            total = self.total_metric,
            window = self.time_window,
        )
    }

    fn remaining_error_budget(&self) -> String {
        let good = Self::offset_rate(&self.success_metric);
        let total = Self::offset_rate(&self.total_metric);
        let window = &self.time_window;
        let target = format_ratio(self.target);
        format!(
            "(sum(sum_over_time(({good} < 1e308)[{window}:5m])) / sum(sum_over_time(({total} < 1e308)[{window}:5m])) - {target}) / (1 - {target})"
        )
    }

    fn burn_rate(&self) -> String {
        let good = Self::offset_rate(&self.success_metric);
        let total = Self::offset_rate(&self.total_metric);
        format!(
            "avg(1 - avg_over_time((({good} / ({total})) < 1e308)[$__interval:])) / (1 - {})",
            format_ratio(self.target)
        )
    }

    fn instant_burn_rate(&self) -> String {
        let good = Self::offset_rate(&self.success_metric);
        let total = Self::offset_rate(&self.total_metric);
        format!(
            "avg(1 - avg_over_time((({good} / {total}) < 1e308)[$__interval:])) / (1 - {})",
            format_ratio(self.target)
        )
    }

    fn event_rate(&self) -> String {
        format!(
            "sum(avg_over_time(({})[$__interval:]))",
            Self::offset_rate(&self.total_metric)
        )
    }
}
