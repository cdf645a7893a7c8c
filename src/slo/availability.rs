//! Availability SLO dashboard
//!
//! Same five rows as the latency dashboard. The SLI and event-rate panels
//! carry a second series gated on the SLO's creation time, so history from
//! before the objective existed is told apart from what it actually tracked.

use super::common::{
    all_fields, build_recap_row, pass_fail_thresholds, remaining_budget_panel, sli_window_panel,
    BURN_RATE_DESCRIPTION, EVENT_RATE_DESCRIPTION, MAIN_WIDTH, ROW_HEIGHT, SIDE_WIDTH,
};
use super::SloDashboard;
use crate::dashboard::{Dashboard, DashboardSettings, GridLayout};
use crate::domain::{unix_now, SloKind, SloParameters};
use crate::panel::{
    DatasourceConfig, PrometheusQuery, StatOptions, StatPanel, Threshold, ThresholdsMode,
    TimeSeriesPanel,
};
use crate::queries::{AvailabilityQueries, SloQueries};

/// Budget panels: red once spent, green with a fifth or more left
fn budget_thresholds() -> Vec<Threshold> {
    vec![Threshold::new("red", 0.0), Threshold::new("green", 0.2)]
}

/// Dashboard for an availability objective
#[derive(Debug, Clone)]
pub struct AvailabilitySlo {
    params: SloParameters,
    queries: AvailabilityQueries,
    created_at: u64,
    dashboard: Dashboard,
}

impl AvailabilitySlo {
    /// Build with the default dashboard settings, created now
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
        Self::from_parameters(params, &DashboardSettings::default(), unix_now())
    }

    /// Build from parameters
    ///
    /// `created_at` is the SLO's creation time in unix seconds. It is baked
    /// into the "before creation" queries, so rebuilding with the same value
    /// yields the same document.
    pub fn from_parameters(
        params: SloParameters,
        settings: &DashboardSettings,
        created_at: u64,
    ) -> Self {
        let queries = AvailabilityQueries::new(
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
            created_at,
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
            "Composed availability dashboard '{}' with {} panels (created_at {})",
            slo.params.uid,
            slo.dashboard.panels().len(),
            slo.created_at
        );
        slo
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    fn build_recap_row(&mut self, layout: &mut GridLayout, base: &DatasourceConfig) {
        build_recap_row(
            &mut self.dashboard,
            layout,
            &self.params.name,
            &self.queries,
            base,
            StatOptions::reduce(all_fields()),
        );
    }

    fn build_sli_row(&mut self, layout: &mut GridLayout, base: &DatasourceConfig) {
        let mut row = layout.row(ROW_HEIGHT);

        let sli = TimeSeriesPanel::new("SLI", "Service level indicator", row.place(MAIN_WIDTH))
            .with_datasource(base.clone().with_unit("percentunit"))
            .with_target(
                PrometheusQuery::new("custom_sli_avg", self.queries.sli()).with_legend("AVG"),
            )
            .with_target(
                PrometheusQuery::new(
                    "computed_before_creation_time",
                    self.queries.sli_before_creation(self.created_at),
                )
                .with_legend("Before Creation Time"),
            )
            .with_thresholds(
                ThresholdsMode::Absolute,
                pass_fail_thresholds(self.params.target),
            );

        let window = sli_window_panel(&self.queries, base, &mut row);
        self.dashboard.with_panel(sli).with_panel(window);
    }

    fn build_error_budget_row(&mut self, layout: &mut GridLayout, base: &DatasourceConfig) {
        let mut row = layout.row(ROW_HEIGHT);

        let trend = TimeSeriesPanel::new(
            "Error Budget Trend",
            "If error budget is decreasing over time, it means that your service is spending its error budget faster than it's earning it back.\n\nIf error budget is increasing over time, you're not spending too much of your error budget.",
            row.place(MAIN_WIDTH),
        )
        .with_datasource(base.clone().with_unit("percentunit"))
        .with_target(
            PrometheusQuery::new("custom_error_budget_trend", self.queries.error_budget_trend())
                .with_legend("Error Budget"),
        )
        .with_thresholds(ThresholdsMode::Absolute, budget_thresholds());

        let remaining = remaining_budget_panel(&self.queries, base, &mut row, budget_thresholds());
        self.dashboard.with_panel(trend).with_panel(remaining);
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
            PrometheusQuery::new("custom_burn_rate_avg", self.queries.burn_rate())
                .with_legend("AVG"),
        )
        .with_target(
            PrometheusQuery::new("custom_burn_rate_instant", self.queries.instant_burn_rate())
                .with_legend("Instant"),
        );

        let current = StatPanel::new(
            "Current Burn Rate",
            BURN_RATE_DESCRIPTION,
            row.place(SIDE_WIDTH),
        )
        .with_datasource(base.clone().with_unit("none").with_decimals(2))
        .with_target(PrometheusQuery::new(
            "custom_current_burn_rate",
            self.queries.burn_rate(),
        ));

        self.dashboard.with_panel(trend).with_panel(current);
    }

    fn build_event_rate_row(&mut self, layout: &mut GridLayout, base: &DatasourceConfig) {
        let mut row = layout.row(ROW_HEIGHT);

        let events = TimeSeriesPanel::new("Event Rate", EVENT_RATE_DESCRIPTION, row.fill())
            .with_datasource(base.clone().with_unit("reqps"))
            .with_target(
                PrometheusQuery::new("custom_event_rate", self.queries.event_rate())
                    .with_legend("AVG"),
            )
            .with_target(
                PrometheusQuery::new(
                    "custom_event_rate_historical",
                    self.queries.event_rate_before_creation(self.created_at),
                )
                .with_legend("Before Creation"),
            );

        self.dashboard.with_panel(events);
    }
}

impl SloDashboard for AvailabilitySlo {
    fn params(&self) -> &SloParameters {
        &self.params
    }

    fn kind(&self) -> SloKind {
        SloKind::Availability
    }

    fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }
}
