//! Latency SLO dashboard

use super::common::{
    all_fields, budget_thresholds, build_recap_row, burn_rate_thresholds, pass_fail_thresholds,
    remaining_budget_panel, sli_window_panel, BURN_RATE_DESCRIPTION, EVENT_RATE_DESCRIPTION,
    MAIN_WIDTH, ROW_HEIGHT, SIDE_WIDTH,
};
use super::SloDashboard;
use crate::dashboard::{Dashboard, DashboardSettings, GridLayout};
use crate::domain::{SloKind, SloParameters};
use crate::panel::{
    BinaryOperator, DatasourceConfig, Operand, PrometheusQuery, StatOptions, StatPanel, Threshold,
    ThresholdsMode, TimeSeriesPanel, Transformation,
};
use crate::queries::{format_ratio, LatencyQueries, SloQueries};

/// Dashboard for a latency objective
///
/// All panels are composed on construction; the dashboard is never mutated
/// afterwards.
#[derive(Debug, Clone)]
pub struct LatencySlo {
    params: SloParameters,
    queries: LatencyQueries,
    dashboard: Dashboard,
}

impl LatencySlo {
    /// Build with the default dashboard settings
    pub fn new(
        uid: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        time_window: impl Into<String>,
        target: f64,
        success_query: impl Into<String>,
        total_query: impl Into<String>,
    ) -> Self {
        let params = SloParameters::new(
            uid,
            name,
            description,
            time_window,
            target,
            success_query,
            total_query,
        );
        Self::from_parameters(params, &DashboardSettings::default())
    }

    pub fn from_parameters(params: SloParameters, settings: &DashboardSettings) -> Self {
        let queries = LatencyQueries::new(
            &params.success_query,
            &params.total_query,
            params.target,
            &params.time_window,
        );
        let dashboard =
            Dashboard::with_settings(&params.uid, &params.name, &params.description, settings);

        let mut slo = Self {
            params,
            queries,
            dashboard,
        };
        let base = settings.datasource();
        let mut layout = GridLayout::new();
        slo.build_recap_row(&mut layout, &base);
        slo.build_sli_row(&mut layout, &base);
        slo.build_error_budget_row(&mut layout, &base);
        slo.build_burn_rate_row(&mut layout, &base);
        slo.build_event_rate_row(&mut layout, &base);

        log::debug!(
            "Composed latency dashboard '{}' with {} panels",
            slo.params.uid,
            slo.dashboard.panels().len()
        );
        slo
    }

    fn build_recap_row(&mut self, layout: &mut GridLayout, base: &DatasourceConfig) {
        build_recap_row(
            &mut self.dashboard,
            layout,
            &self.params.name,
            &self.queries,
            base,
            StatOptions::standard(all_fields()),
        );
    }

    fn build_sli_row(&mut self, layout: &mut GridLayout, base: &DatasourceConfig) {
        let mut row = layout.row(ROW_HEIGHT);

        let sli = TimeSeriesPanel::new("SLI", "Service level indicator", row.place(MAIN_WIDTH))
            .with_datasource(base.clone().with_unit("percentunit"))
            .with_target(PrometheusQuery::new("custom_sli", self.queries.sli()).with_legend("SLI"))
            .with_thresholds(
                ThresholdsMode::Absolute,
                pass_fail_thresholds(self.params.target),
            );

        let window = sli_window_panel(&self.queries, base, &mut row);
        self.dashboard.with_panel(sli).with_panel(window);
    }

    /// Burndown of the budget across the selected range
    ///
    /// The queries return raw failure and total counts; the cumulative
    /// budget math runs client-side so the curve starts at 100% at the left
    /// edge of whatever range is selected.
    fn build_error_budget_row(&mut self, layout: &mut GridLayout, base: &DatasourceConfig) {
        let mut row = layout.row(ROW_HEIGHT);
        let target = format_ratio(self.params.target);

        let burndown = TimeSeriesPanel::new(
            "Error Budget Burndown",
            "The error budget burndown in the selected time range",
            row.place(MAIN_WIDTH),
        )
        .with_datasource(base.clone().with_unit("percentunit"))
        .with_target(
            PrometheusQuery::new("Failure in Range", self.queries.burndown_failure_events())
                .with_legend("failureEventsInRange"),
        )
        .with_target(
            PrometheusQuery::new("Total Events", self.queries.burndown_total_events())
                .with_legend("totalEvents"),
        )
        .with_transformations(burndown_transformations(&target))
        .with_thresholds(ThresholdsMode::Absolute, budget_thresholds());

        let remaining = remaining_budget_panel(&self.queries, base, &mut row, budget_thresholds());
        self.dashboard.with_panel(burndown).with_panel(remaining);
    }

    fn build_burn_rate_row(&mut self, layout: &mut GridLayout, base: &DatasourceConfig) {
        let mut row = layout.row(ROW_HEIGHT);

        let trend = TimeSeriesPanel::new(
            "Error Budget Burn Rate",
            BURN_RATE_DESCRIPTION,
            row.place(MAIN_WIDTH),
        )
        .with_datasource(base.clone().with_unit("none"))
        .with_target(
            PrometheusQuery::new("custom_burn_rate", self.queries.burn_rate())
                .with_legend("Burn Rate"),
        )
        .with_thresholds(ThresholdsMode::Absolute, burn_rate_thresholds());

        let current = StatPanel::new(
            "Current Burn Rate",
            BURN_RATE_DESCRIPTION,
            row.place(SIDE_WIDTH),
        )
        .with_datasource(base.clone().with_unit("none").with_decimals(2))
        .with_target(PrometheusQuery::new(
            "current_burn_rate",
            self.queries.instant_burn_rate(),
        ))
        .with_thresholds(ThresholdsMode::Absolute, burn_rate_thresholds());

        self.dashboard.with_panel(trend).with_panel(current);
    }

    fn build_event_rate_row(&mut self, layout: &mut GridLayout, base: &DatasourceConfig) {
        let mut row = layout.row(ROW_HEIGHT);

        let events = TimeSeriesPanel::new("Event Rate", EVENT_RATE_DESCRIPTION, row.fill())
            .with_datasource(base.clone().with_unit("reqps"))
            .with_target(
                PrometheusQuery::new("event_rate", self.queries.event_rate())
                    .with_legend("Event Rate"),
            )
            .with_thresholds(
                ThresholdsMode::Absolute,
                vec![Threshold::new("red", 80.0), Threshold::new("green", 0.0)],
            );

        self.dashboard.with_panel(events);
    }
}

/// Cumulative failures against total events, expressed as budget remaining
fn burndown_transformations(target: &str) -> Vec<Transformation> {
    vec![
        Transformation::cumulative_sum("cumulativeFailures", "failureEventsInRange"),
        Transformation::binary(
            "totalRemaining",
            Operand::field("totalEvents"),
            BinaryOperator::Subtract,
            Operand::field("cumulativeFailures"),
            Some(false),
        ),
        Transformation::binary(
            "cumulative sli %",
            Operand::field("totalRemaining"),
            BinaryOperator::Divide,
            Operand::field("totalEvents"),
            Some(false),
        ),
        Transformation::binary(
            "sli - objective",
            Operand::field("cumulative sli %"),
            BinaryOperator::Subtract,
            Operand::fixed(target),
            None,
        ),
        Transformation::binary(
            "error objective",
            Operand::fixed("1"),
            BinaryOperator::Subtract,
            Operand::fixed(target),
            None,
        ),
        Transformation::binary(
            "% error budget remaining",
            Operand::field("sli - objective"),
            BinaryOperator::Divide,
            Operand::field("error objective"),
            Some(true),
        ),
    ]
}

impl SloDashboard for LatencySlo {
    fn params(&self) -> &SloParameters {
        &self.params
    }

    fn kind(&self) -> SloKind {
        SloKind::Latency
    }

    fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }
}
