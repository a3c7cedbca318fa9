//! Startup investment and operating expense rollups, and the monthly
//! profitability picture built from them

use serde::Serialize;

use crate::aggregate::Totals;
use crate::models::{CostType, MonthlyCost, StartupCost};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StartupSummary {
    pub total_actual: f64,
    pub total_estimated: f64,
    /// Positive when the actual spend overran the estimate
    pub variance: f64,
    pub paid_total: f64,
    pub unpaid_total: f64,
    pub paid_count: usize,
    pub pending_count: usize,
}

impl StartupSummary {
    pub fn compute(costs: &[StartupCost]) -> Self {
        let total_actual: f64 = costs.iter().map(|c| c.actual_cost).sum();
        let total_estimated: f64 = costs.iter().map(|c| c.estimated_cost).sum();
        let paid_total: f64 = costs.iter().filter(|c| c.paid).map(|c| c.actual_cost).sum();
        let paid_count = costs.iter().filter(|c| c.paid).count();

        Self {
            total_actual,
            total_estimated,
            variance: total_actual - total_estimated,
            paid_total,
            unpaid_total: total_actual - paid_total,
            paid_count,
            pending_count: costs.len() - paid_count,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OpexSummary {
    pub monthly_total: f64,
    pub annual_total: f64,
    pub fixed_total: f64,
    pub variable_total: f64,
    pub fixed_count: usize,
    pub variable_count: usize,
}

impl OpexSummary {
    pub fn compute(costs: &[MonthlyCost]) -> Self {
        let mut summary = OpexSummary::default();
        for cost in costs {
            summary.monthly_total += cost.monthly_cost;
            summary.annual_total += cost.annual_cost();
            match cost.cost_type {
                CostType::Fixed => {
                    summary.fixed_total += cost.monthly_cost;
                    summary.fixed_count += 1;
                }
                CostType::Variable => {
                    summary.variable_total += cost.monthly_cost;
                    summary.variable_count += 1;
                }
            }
        }
        summary
    }
}

/// Baseline month without seasonality: does the business cover its costs?
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfitabilityOverview {
    pub revenue: f64,
    pub gross_margin: f64,
    pub margin_percent: f64,
    /// Operating expenses plus cost of goods
    pub total_operating_expenses: f64,
    pub monthly_net_profit: f64,
    pub is_profitable: bool,
    /// Extra monthly revenue needed to break even, 0 when profitable
    pub revenue_shortfall: f64,
    /// 0 when the business does not make a monthly profit
    pub months_to_recover_startup: f64,
    pub break_even_units: u64,
}

impl ProfitabilityOverview {
    pub fn compute(baseline: &Totals, opex: &OpexSummary, startup: &StartupSummary) -> Self {
        let total_operating_expenses = opex.monthly_total + baseline.cost;
        let monthly_net_profit = baseline.revenue - total_operating_expenses;
        let months_to_recover_startup = if monthly_net_profit > 0.0 {
            startup.total_actual / monthly_net_profit
        } else {
            0.0
        };

        Self {
            revenue: baseline.revenue,
            gross_margin: baseline.margin,
            margin_percent: baseline.margin_percent(),
            total_operating_expenses,
            monthly_net_profit,
            is_profitable: monthly_net_profit >= 0.0,
            revenue_shortfall: if monthly_net_profit < 0.0 {
                -monthly_net_profit
            } else {
                0.0
            },
            months_to_recover_startup,
            break_even_units: baseline.break_even_units(opex.monthly_total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn startup(actual: f64, estimated: f64, paid: bool) -> StartupCost {
        StartupCost {
            actual_cost: actual,
            estimated_cost: estimated,
            paid,
            ..StartupCost::new("s")
        }
    }

    fn monthly(cost: f64, cost_type: CostType) -> MonthlyCost {
        MonthlyCost {
            monthly_cost: cost,
            cost_type,
            ..MonthlyCost::new("m")
        }
    }

    #[test]
    fn test_startup_summary() {
        let costs = vec![
            startup(4800.0, 5000.0, true),
            startup(2800.0, 3000.0, true),
            startup(450.0, 500.0, true),
            startup(2200.0, 2000.0, false),
        ];
        let summary = StartupSummary::compute(&costs);
        assert_eq!(summary.total_actual, 10250.0);
        assert_eq!(summary.total_estimated, 10500.0);
        assert_eq!(summary.variance, -250.0);
        assert_eq!(summary.paid_total, 8050.0);
        assert_eq!(summary.unpaid_total, 2200.0);
        assert_eq!(summary.paid_count, 3);
        assert_eq!(summary.pending_count, 1);
    }

    #[test]
    fn test_opex_split_by_type() {
        let costs = vec![
            monthly(8000.0, CostType::Fixed),
            monthly(800.0, CostType::Variable),
            monthly(400.0, CostType::Fixed),
        ];
        let summary = OpexSummary::compute(&costs);
        assert_eq!(summary.monthly_total, 9200.0);
        assert_eq!(summary.annual_total, 110_400.0);
        assert_eq!(summary.fixed_total, 8400.0);
        assert_eq!(summary.variable_total, 800.0);
        assert_eq!((summary.fixed_count, summary.variable_count), (2, 1));
    }

    #[test]
    fn test_loss_making_overview() {
        let baseline = Totals {
            revenue: 5000.0,
            cost: 1000.0,
            margin: 4000.0,
            units: 100.0,
            prep_time_minutes: 0.0,
        };
        let opex = OpexSummary::compute(&[monthly(6000.0, CostType::Fixed)]);
        let overview = ProfitabilityOverview::compute(&baseline, &opex, &StartupSummary::default());

        assert_eq!(overview.total_operating_expenses, 7000.0);
        assert_eq!(overview.monthly_net_profit, -2000.0);
        assert!(!overview.is_profitable);
        assert_eq!(overview.revenue_shortfall, 2000.0);
        assert_eq!(overview.months_to_recover_startup, 0.0);
        assert_eq!(overview.margin_percent, 80.0);
        // 6000 / 40 per unit
        assert_eq!(overview.break_even_units, 150);
    }

    #[test]
    fn test_profitable_overview_recovers_startup() {
        let baseline = Totals {
            revenue: 10_000.0,
            cost: 2_000.0,
            margin: 8_000.0,
            units: 200.0,
            prep_time_minutes: 0.0,
        };
        let opex = OpexSummary::compute(&[monthly(3000.0, CostType::Fixed)]);
        let startup = StartupSummary::compute(&[startup(10_000.0, 10_000.0, false)]);
        let overview = ProfitabilityOverview::compute(&baseline, &opex, &startup);

        assert!(overview.is_profitable);
        assert_eq!(overview.monthly_net_profit, 5_000.0);
        assert_eq!(overview.revenue_shortfall, 0.0);
        assert_eq!(overview.months_to_recover_startup, 2.0);
    }
}
