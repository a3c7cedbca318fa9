//! End-to-end checks against the sample butchery plan

use pretty_assertions::assert_eq;

use butchery_calculator::capacity::CapacityStatus;
use butchery_calculator::models::{Month, ProductFilter, SeasonalPreset};
use butchery_calculator::{MonthlyCostField, ProductField, Session};

fn approx(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

#[test]
fn brisket_margin_accounts_for_waste() {
    let session = Session::with_sample_data();
    let brisket = session.product("2").unwrap();

    approx(brisket.true_cost(), 20.8778, 0.0001);
    approx(brisket.margin(), 79.1222, 0.01);
}

#[test]
fn sample_plan_uses_under_a_third_of_labor() {
    let dashboard = Session::with_sample_data().dashboard();
    let capacity = &dashboard.capacity;

    assert_eq!(capacity.available_minutes, 5400.0);
    // 80x10 + 10x12 + 10x15 + 10x10 + 10x18 + 10x20
    assert_eq!(capacity.used_minutes, 1550.0);
    assert_eq!(capacity.remaining_minutes, 3850.0);
    approx(capacity.utilization_percent, 28.70, 0.005);
    assert_eq!(capacity.status, CapacityStatus::Comfortable);
}

#[test]
fn five_hour_days_for_eighteen_days() {
    let mut session = Session::new();
    session.set_hours_per_day("5");
    session.set_days_per_month("18");
    assert_eq!(session.dashboard().capacity.available_minutes, 5400.0);
}

#[test]
fn startup_totals_split_paid_and_outstanding() {
    let startup = Session::with_sample_data().dashboard().startup;

    assert_eq!(startup.total_actual, 4800.0 + 2800.0 + 450.0 + 2200.0);
    assert_eq!(startup.paid_total, 8050.0);
    assert_eq!(startup.unpaid_total, 2200.0);
    assert_eq!(startup.total_estimated, 10500.0);
    assert_eq!((startup.paid_count, startup.pending_count), (3, 1));
}

#[test]
fn flat_season_makes_annual_revenue_twelve_baseline_months() {
    let mut session = Session::with_sample_data();
    session.apply_seasonal_preset(SeasonalPreset::Flat);
    let dashboard = session.dashboard();

    assert!(session.seasonal_multipliers().iter().all(|(_, m)| m == 100));
    assert_eq!(dashboard.portfolio.total.revenue, 5800.0);
    assert_eq!(
        dashboard.seasonality.annual_revenue,
        12.0 * dashboard.portfolio.total.revenue
    );
}

#[test]
fn projection_opens_with_startup_debt() {
    let dashboard = Session::with_sample_data().dashboard();
    let points = &dashboard.projection.points;
    let startup = dashboard.startup.total_actual;

    assert_eq!(points.len(), 25);
    assert_eq!(points[0].cumulative_profit, -startup);
    assert_eq!(points[0].label, "Start");

    let jan = dashboard.seasonality.month(Month::Jan).unwrap();
    assert_eq!(points[1].cumulative_profit, -startup + jan.net_profit);
    assert_eq!(points[1].label, "Jan");
    assert_eq!(points[24].label, "Dec");
}

#[test]
fn sample_plan_does_not_cover_opex() {
    let dashboard = Session::with_sample_data().dashboard();
    let p = &dashboard.profitability;

    assert_eq!(dashboard.opex.monthly_total, 16040.0);
    assert_eq!(dashboard.opex.annual_total, 192_480.0);
    assert!(!p.is_profitable);
    approx(p.revenue_shortfall, p.total_operating_expenses - 5800.0, 1e-9);
    assert_eq!(p.months_to_recover_startup, 0.0);
    assert!(p.break_even_units > 0);
    assert_eq!(dashboard.seasonality.loss_months, 12);
    assert_eq!(dashboard.projection.break_even_month(), None);
}

#[test]
fn filter_changes_seasonality_baseline() {
    let mut session = Session::with_sample_data();
    session.set_filter(ProductFilter::Classic);
    let dashboard = session.dashboard();

    assert_eq!(dashboard.portfolio.total.revenue, 800.0);
    let jul = dashboard.seasonality.month(Month::Jul).unwrap();
    assert_eq!(jul.revenue, 800.0 * 150.0 / 100.0);
}

#[test]
fn rankings_follow_the_metrics() {
    let dashboard = Session::with_sample_data().dashboard();

    let efficiency: Vec<&str> = dashboard
        .efficiency_ranking
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    // steak earns most per minute, the loss-making burger least
    assert_eq!(efficiency.first(), Some(&"4"));
    assert_eq!(efficiency.last(), Some(&"1"));

    let contribution: Vec<&str> = dashboard
        .top_contributors
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(contribution, vec!["3", "4", "2", "6", "5", "1"]);
}

#[test]
fn edits_flow_through_to_the_dashboard() {
    let mut session = Session::with_sample_data();
    let before = session.dashboard();

    session.update_product("1", ProductField::SellPrice, "25").unwrap();
    session.update_monthly_cost("1", MonthlyCostField::MonthlyCost, "4000").unwrap();
    let after = session.dashboard();

    assert_eq!(after.portfolio.total.revenue, before.portfolio.total.revenue + 80.0 * 15.0);
    assert_eq!(after.opex.monthly_total, before.opex.monthly_total - 4000.0);
    assert!(after.profitability.monthly_net_profit > before.profitability.monthly_net_profit);
}

#[test]
fn recomputation_is_deterministic() {
    let session = Session::with_sample_data();
    assert_eq!(session.dashboard(), session.dashboard());
}

#[test]
fn huge_inputs_compute_without_overflow() {
    let mut session = Session::with_sample_data();
    session.set_hours_per_day("999999999999");
    session.set_days_per_month("999999999");
    session.update_product("1", ProductField::Units, "9223372036854775807").unwrap();
    session.update_product("1", ProductField::PrepTimeMinutes, "9223372036854775807").unwrap();
    session.set_seasonal_multiplier(Month::Jul, "9223372036854775807");

    let dashboard = session.dashboard();

    approx(dashboard.capacity.available_minutes, 999999999999.0 * 60.0 * 999999999.0, 1e12);
    assert!(dashboard.capacity.used_minutes > 8.5e37);
    assert!(dashboard.capacity.utilization_percent.is_finite());
    assert!(dashboard.portfolio.total.units > 9.2e18);
    assert!(dashboard.portfolio.total.prep_time_minutes.is_finite());
    assert!(dashboard.seasonality.annual_revenue.is_finite());
    assert!(dashboard.projection.final_balance().is_finite());
}

#[test]
fn empty_session_is_all_zero() {
    let dashboard = Session::new().dashboard();

    assert_eq!(dashboard.portfolio.total.revenue, 0.0);
    assert_eq!(dashboard.capacity.utilization_percent, 0.0);
    assert_eq!(dashboard.seasonality.annual_net_profit, 0.0);
    assert_eq!(dashboard.projection.points[0].cumulative_profit, 0.0);
    assert!(dashboard.efficiency_ranking.is_empty());
    assert!(dashboard.top_contributors.is_empty());
}
