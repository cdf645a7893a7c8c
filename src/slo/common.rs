//! Panels shared by both SLO kinds
//!
//! The recap row is identical for latency and availability dashboards apart
//! from the time-window display options, and a few stat panels only differ
//! in their query text. These helpers build them from any [`SloQueries`].

use crate::dashboard::{Dashboard, GridLayout, Row};
use crate::panel::{
    DatasourceConfig, PrometheusQuery, ReduceOptions, StatOptions, StatPanel, TextPanel,
    Threshold, ThresholdsMode, Transformation, ValueMapping,
};
use crate::queries::SloQueries;

pub(crate) const RECAP_ROW_HEIGHT: u32 = 4;
pub(crate) const ROW_HEIGHT: u32 = 7;

/// Width of the main panel in the SLI, budget and burn-rate rows
pub(crate) const MAIN_WIDTH: u32 = 19;
/// Width of the stat beside it
pub(crate) const SIDE_WIDTH: u32 = 5;

pub(crate) const BURN_RATE_DESCRIPTION: &str = "The burn rate is the rate that this SLO is spending its error budget over last 5 min [0, 1.0]. A 1x burn rate will consume the entire error budget allotted for that period.";

pub(crate) const EVENT_RATE_DESCRIPTION: &str = "Total Rate (for SLIs that compare rate of successful events to rate of total events, this is the latter)";

/// Red below target, green at or above it
pub(crate) fn pass_fail_thresholds(target: f64) -> Vec<Threshold> {
    vec![Threshold::new("red", 0.0), Threshold::new("green", target)]
}

/// Green while the budget lasts, red once it is spent
///
/// The yellow step shares its value with red, so it only shows through when
/// red is removed in the UI.
pub(crate) fn budget_thresholds() -> Vec<Threshold> {
    vec![
        Threshold::new("red", 0.0),
        Threshold::new("yellow", 0.0),
        Threshold::new("green", 0.2),
    ]
}

/// Green under 1x, yellow from 1x, red from 3x
pub(crate) fn burn_rate_thresholds() -> Vec<Threshold> {
    vec![
        Threshold::new("green", 0.0),
        Threshold::new("yellow", 1.0),
        Threshold::new("red", 3.0),
    ]
}

fn alert_datasource(base: &DatasourceConfig) -> DatasourceConfig {
    base.clone().with_unit("short").with_decimals(0)
}

fn fast_burn_panel(
    queries: &dyn SloQueries,
    base: &DatasourceConfig,
    row: &mut Row,
) -> StatPanel {
    StatPanel::new(
        "🚨 Fast Burn Rate Alert",
        "Critical alert when burn rate exceeds fast burn thresholds:\n• 14.4x for 5min AND 1hour\n• 6x for 30min AND 6hour",
        row.place(4),
    )
    .with_datasource(alert_datasource(base))
    .with_target(PrometheusQuery::new("fast_burn_alert", queries.fast_burn_alert()))
    .with_mappings([ValueMapping::alert_state("FIRING")])
}

fn slow_burn_panel(
    queries: &dyn SloQueries,
    base: &DatasourceConfig,
    row: &mut Row,
) -> StatPanel {
    StatPanel::new(
        "⚠️ Slow Burn Rate Alert",
        "Warning alert for slow burn rate:\n• 3x for 2hours AND 24hours\n• 1x for 6hours AND 72hours",
        row.place(4),
    )
    .with_datasource(alert_datasource(base))
    .with_target(PrometheusQuery::new("slow_burn_alert", queries.slow_burn_alert()))
    .with_mappings([ValueMapping::alert_state("CRITICAL")])
}

/// Time-window readout; the label of a constant series becomes the shown value
fn time_window_panel(
    queries: &dyn SloQueries,
    base: &DatasourceConfig,
    row: &mut Row,
    options: StatOptions,
) -> StatPanel {
    StatPanel::new(
        "Time Window",
        "The time window over which the service level objective is being measured over",
        row.place(4),
    )
    .with_datasource(base.clone().with_unit("percentunit").unit_interval())
    .with_target(PrometheusQuery::new("time_window", queries.time_window()))
    .with_options(options)
    .with_transformations(vec![
        Transformation::labels_to_fields_rows(),
        Transformation::organize(
            &["label"],
            &[("label", "time_period"), ("value", "Time Window")],
        ),
    ])
}

fn slo_target_panel(
    queries: &dyn SloQueries,
    base: &DatasourceConfig,
    row: &mut Row,
) -> StatPanel {
    StatPanel::new(
        "SLO",
        "The SLO's Objective value. Always between 0 and 100%",
        row.fill(),
    )
    .with_datasource(
        base.clone()
            .with_unit("percentunit")
            .with_decimals(2)
            .unit_interval(),
    )
    .with_target(PrometheusQuery::new("A", queries.slo_target()))
}

/// Reduce options used by the time-window stat
pub(crate) fn all_fields() -> ReduceOptions {
    ReduceOptions::fields("/.*/")
}

/// Title, both burn alerts, time window and target, left to right
pub(crate) fn build_recap_row(
    dashboard: &mut Dashboard,
    layout: &mut GridLayout,
    name: &str,
    queries: &dyn SloQueries,
    base: &DatasourceConfig,
    time_window_options: StatOptions,
) {
    let mut row = layout.row(RECAP_ROW_HEIGHT);

    dashboard
        .with_panel(TextPanel::new("", format!("# {name}"), row.place(7)))
        .with_panel(fast_burn_panel(queries, base, &mut row))
        .with_panel(slow_burn_panel(queries, base, &mut row))
        .with_panel(time_window_panel(queries, base, &mut row, time_window_options))
        .with_panel(slo_target_panel(queries, base, &mut row));
}

/// Indicator aggregated over the compliance window, colored against target
pub(crate) fn sli_window_panel(
    queries: &dyn SloQueries,
    base: &DatasourceConfig,
    row: &mut Row,
) -> StatPanel {
    let window = queries.window();
    StatPanel::new(
        format!("SLI (last {window})"),
        format!("Service level indicator's value over the last {window}"),
        row.place(SIDE_WIDTH),
    )
    .with_datasource(
        base.clone()
            .with_unit("percentunit")
            .with_decimals(1)
            .unit_interval(),
    )
    .with_target(
        PrometheusQuery::new("custom_sli_28d", queries.sli_over_window()).with_interval("1m"),
    )
    .with_thresholds(ThresholdsMode::Absolute, pass_fail_thresholds(queries.target()))
}

/// Unspent budget over the compliance window
pub(crate) fn remaining_budget_panel(
    queries: &dyn SloQueries,
    base: &DatasourceConfig,
    row: &mut Row,
    thresholds: Vec<Threshold>,
) -> StatPanel {
    StatPanel::new(
        "Remaining Error Budget",
        format!("The unspent error budget over the last {} window", queries.window()),
        row.place(SIDE_WIDTH),
    )
    .with_datasource(
        base.clone()
            .with_unit("percentunit")
            .with_decimals(1)
            .unit_interval(),
    )
    .with_target(PrometheusQuery::new(
        "custom_remaining_error_budget",
        queries.remaining_error_budget(),
    ))
    .with_thresholds(ThresholdsMode::Absolute, thresholds)
}
