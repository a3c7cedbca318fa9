//! Seasonal monthly performance and the 24-month cumulative projection
//!
//! Revenue and cost of goods scale with each month's multiplier; operating
//! expenses do not. The projection repeats the 12-month pattern twice with
//! no ramp-up, starting from the startup investment as a negative balance.

use serde::Serialize;

use crate::aggregate::Totals;
use crate::models::{Month, SeasonalMultipliers};

/// Number of months covered by the cumulative projection
pub const PROJECTION_MONTHS: usize = 24;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthPerformance {
    pub month: Month,
    pub multiplier: i64,
    pub revenue: f64,
    pub cogs: f64,
    pub gross_margin: f64,
    pub operating_expenses: f64,
    pub net_profit: f64,
    /// Baseline utilization scaled by the month's demand
    pub capacity_used: f64,
}

impl MonthPerformance {
    pub fn compute(
        month: Month,
        multiplier: i64,
        baseline: &Totals,
        monthly_opex: f64,
        baseline_utilization: f64,
    ) -> Self {
        let revenue = baseline.revenue * multiplier as f64 / 100.0;
        let cogs = baseline.cost * multiplier as f64 / 100.0;
        let gross_margin = revenue - cogs;

        Self {
            month,
            multiplier,
            revenue,
            cogs,
            gross_margin,
            operating_expenses: monthly_opex,
            net_profit: gross_margin - monthly_opex,
            capacity_used: baseline_utilization * multiplier as f64 / 100.0,
        }
    }
}

/// Twelve months in calendar order
pub fn monthly_series(
    multipliers: &SeasonalMultipliers,
    baseline: &Totals,
    monthly_opex: f64,
    baseline_utilization: f64,
) -> Vec<MonthPerformance> {
    multipliers
        .iter()
        .map(|(month, m)| {
            MonthPerformance::compute(month, m, baseline, monthly_opex, baseline_utilization)
        })
        .collect()
}

/// Annual rollups over the monthly series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalSummary {
    pub months: Vec<MonthPerformance>,
    pub annual_revenue: f64,
    pub annual_cogs: f64,
    pub annual_gross_margin: f64,
    pub annual_opex: f64,
    pub annual_net_profit: f64,
    pub avg_monthly_profit: f64,
    pub best_month: Month,
    pub worst_month: Month,
    /// Cash needed to survive the three weakest months
    pub cash_reserve: f64,
    pub loss_months: usize,
}

impl SeasonalSummary {
    pub fn compute(months: Vec<MonthPerformance>) -> Self {
        let annual_revenue = months.iter().map(|m| m.revenue).sum();
        let annual_cogs = months.iter().map(|m| m.cogs).sum();
        let annual_gross_margin = months.iter().map(|m| m.gross_margin).sum();
        let annual_opex = months.iter().map(|m| m.operating_expenses).sum();
        let annual_net_profit: f64 = months.iter().map(|m| m.net_profit).sum();

        // Strict comparisons keep the first month on ties
        let mut best = months.first();
        let mut worst = months.first();
        for m in &months {
            if best.is_some_and(|b| m.net_profit > b.net_profit) {
                best = Some(m);
            }
            if worst.is_some_and(|w| m.net_profit < w.net_profit) {
                worst = Some(m);
            }
        }
        let best_month = best.map_or(Month::Jan, |m| m.month);
        let worst_month = worst.map_or(Month::Jan, |m| m.month);

        Self {
            annual_revenue,
            annual_cogs,
            annual_gross_margin,
            annual_opex,
            annual_net_profit,
            avg_monthly_profit: annual_net_profit / 12.0,
            best_month,
            worst_month,
            cash_reserve: cash_reserve(&months),
            loss_months: months.iter().filter(|m| m.net_profit < 0.0).count(),
            months,
        }
    }

    pub fn month(&self, month: Month) -> Option<&MonthPerformance> {
        self.months.iter().find(|m| m.month == month)
    }
}

/// Sum of the losses in the three worst months, as a positive amount
pub fn cash_reserve(months: &[MonthPerformance]) -> f64 {
    let mut profits: Vec<f64> = months.iter().map(|m| m.net_profit).collect();
    profits.sort_by(|a, b| a.total_cmp(b));
    profits
        .iter()
        .take(3)
        .map(|p| p.min(0.0))
        .sum::<f64>()
        .abs()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionPoint {
    /// 0 is the opening balance, 1..=24 are operating months
    pub month: usize,
    pub label: String,
    pub net_profit: f64,
    pub cumulative_profit: f64,
    /// Reference line, always 0
    pub break_even: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub points: Vec<ProjectionPoint>,
}

impl Projection {
    /// `months` must be the 12-month series in calendar order
    pub fn compute(months: &[MonthPerformance], startup_total: f64) -> Self {
        let mut points = Vec::with_capacity(PROJECTION_MONTHS + 1);
        let mut cumulative = -startup_total;

        points.push(ProjectionPoint {
            month: 0,
            label: "Start".to_string(),
            net_profit: 0.0,
            cumulative_profit: cumulative,
            break_even: 0.0,
        });

        if !months.is_empty() {
            for i in 1..=PROJECTION_MONTHS {
                let m = &months[(i - 1) % months.len()];
                cumulative += m.net_profit;
                points.push(ProjectionPoint {
                    month: i,
                    label: m.month.to_string(),
                    net_profit: m.net_profit,
                    cumulative_profit: cumulative,
                    break_even: 0.0,
                });
            }
        }

        Self { points }
    }

    /// First month at which the startup investment has been earned back
    pub fn break_even_month(&self) -> Option<usize> {
        self.points
            .iter()
            .find(|p| p.cumulative_profit >= 0.0)
            .map(|p| p.month)
    }

    pub fn final_balance(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.cumulative_profit)
    }
}
