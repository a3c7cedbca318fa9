//! Plain-text rendering of dashboard panels

use std::fmt;

use crate::capacity::{CapacityReport, CapacityStatus};
use crate::costs::{OpexSummary, StartupSummary};
use crate::economics::ProductMetrics;
use crate::seasonality::{Projection, SeasonalSummary};
use crate::session::Dashboard;

/// Euro amount with `.` thousands and `,` decimal separators, e.g. `-€1.234,50`
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}€{grouped},{cents}")
}

fn status_label(status: CapacityStatus) -> &'static str {
    match status {
        CapacityStatus::Comfortable => "ok",
        CapacityStatus::Caution => "caution: above 90%",
        CapacityStatus::Impossible => "impossible: more work than hours",
    }
}

/// Headline figures for the baseline month
pub fn format_summary(dashboard: &Dashboard) -> String {
    let p = &dashboard.profitability;
    let portfolio = &dashboard.portfolio;
    let mut output = String::new();

    output.push_str(&format!("=== Break-even Status ({:?} products) ===\n", portfolio.filter));
    output.push_str(&format!("Revenue:             {}\n", format_currency(p.revenue)));
    output.push_str(&format!(
        "Gross margin:        {} ({:.1}%)\n",
        format_currency(p.gross_margin),
        p.margin_percent
    ));
    output.push_str(&format!(
        "Operating expenses:  {}\n",
        format_currency(p.total_operating_expenses)
    ));
    output.push_str(&format!(
        "Net profit:          {}\n",
        format_currency(p.monthly_net_profit)
    ));
    output.push_str(&format!(
        "Startup investment:  {}\n",
        format_currency(dashboard.startup.total_actual)
    ));

    if p.is_profitable {
        if p.months_to_recover_startup > 0.0 {
            output.push_str(&format!(
                "Profitable. Startup recovered in {:.1} months\n",
                p.months_to_recover_startup
            ));
        } else {
            output.push_str("Profitable.\n");
        }
    } else {
        output.push_str(&format!(
            "Not profitable. Need {} more revenue or lower costs\n",
            format_currency(p.revenue_shortfall)
        ));
    }
    if p.break_even_units > 0 {
        output.push_str(&format!(
            "Break-even volume: {} units/month (planned {:.0})\n",
            p.break_even_units, portfolio.total.units
        ));
    }

    output.push('\n');
    output.push_str("Classic vs Pitmaster:\n");
    for (label, totals) in [("Classic", &portfolio.classic), ("Pitmaster", &portfolio.pitmaster)] {
        output.push_str(&format!(
            "  {:<10} revenue {:>14}  COGS {:>14}  margin {:>14}  {:.0} units, {:.0} min, {}/unit\n",
            label,
            format_currency(totals.revenue),
            format_currency(totals.cost),
            format_currency(totals.margin),
            totals.units,
            totals.prep_time_minutes,
            format_currency(totals.avg_margin_per_unit())
        ));
    }

    output
}

/// A ranked product table
pub fn format_product_table(title: &str, metrics: &[ProductMetrics]) -> String {
    let mut output = String::new();
    output.push_str(&format!("=== {} ===\n", title));

    if metrics.is_empty() {
        output.push_str("No products.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<30} {:>12} {:>12} {:>10} {:>12} {:>6} {:>14}\n",
        "Product", "True cost", "Margin", "Units/h", "€/min", "Units", "Contribution"
    ));
    output.push_str(&format!("{}\n", "-".repeat(102)));
    for m in metrics {
        output.push_str(&format!(
            "{:<30} {:>12} {:>12} {:>10.2} {:>12} {:>6} {:>14}\n",
            m.name,
            format_currency(m.true_cost),
            format_currency(m.margin_per_unit),
            m.units_per_hour,
            format_currency(m.margin_per_minute),
            m.units,
            format_currency(m.total_margin_contribution)
        ));
    }

    output
}

impl fmt::Display for CapacityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Labor Capacity ===")?;
        writeln!(f, "Available: {:.0} min", self.available_minutes)?;
        writeln!(f, "Planned:   {:.0} min", self.used_minutes)?;
        writeln!(f, "Remaining: {:.0} min", self.remaining_minutes)?;
        writeln!(
            f,
            "Utilization: {:.1}% ({})",
            self.utilization_percent,
            status_label(self.status)
        )
    }
}

impl fmt::Display for SeasonalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Seasonality ===")?;
        writeln!(
            f,
            "{:<5} {:>5} {:>14} {:>14} {:>14} {:>14} {:>9}",
            "Month", "%", "Revenue", "COGS", "Margin", "Net profit", "Capacity"
        )?;
        writeln!(f, "{}", "-".repeat(81))?;
        for m in &self.months {
            writeln!(
                f,
                "{:<5} {:>5} {:>14} {:>14} {:>14} {:>14} {:>8.1}%",
                m.month.to_string(),
                m.multiplier,
                format_currency(m.revenue),
                format_currency(m.cogs),
                format_currency(m.gross_margin),
                format_currency(m.net_profit),
                m.capacity_used
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Annual revenue:     {}", format_currency(self.annual_revenue))?;
        writeln!(f, "Annual net profit:  {}", format_currency(self.annual_net_profit))?;
        writeln!(f, "Avg monthly profit: {}", format_currency(self.avg_monthly_profit))?;
        writeln!(f, "Best month:  {}", self.best_month)?;
        writeln!(f, "Worst month: {}", self.worst_month)?;
        if self.loss_months > 0 {
            writeln!(
                f,
                "Warning: loses money in {} months. Keep {} in reserve for the three weakest.",
                self.loss_months,
                format_currency(self.cash_reserve)
            )?;
        }

        Ok(())
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== 24-Month Profit Projection ===")?;
        for p in &self.points {
            writeln!(
                f,
                "{:>3} {:<5} {:>14} {:>16}",
                p.month,
                p.label,
                format_currency(p.net_profit),
                format_currency(p.cumulative_profit)
            )?;
        }
        match self.break_even_month() {
            Some(month) => writeln!(f, "Startup investment earned back in month {}", month),
            None => writeln!(f, "Startup investment not earned back within 24 months"),
        }
    }
}

impl fmt::Display for StartupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Startup Costs ===")?;
        writeln!(f, "Total investment: {}", format_currency(self.total_actual))?;
        writeln!(
            f,
            "Estimated:        {} (variance {})",
            format_currency(self.total_estimated),
            format_currency(self.variance)
        )?;
        writeln!(
            f,
            "Paid:             {} ({} items)",
            format_currency(self.paid_total),
            self.paid_count
        )?;
        writeln!(
            f,
            "Outstanding:      {} ({} items)",
            format_currency(self.unpaid_total),
            self.pending_count
        )
    }
}

impl fmt::Display for OpexSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Monthly Operating Costs ===")?;
        writeln!(f, "Total:    {}/month", format_currency(self.monthly_total))?;
        writeln!(f, "Annual:   {}", format_currency(self.annual_total))?;
        writeln!(
            f,
            "Fixed:    {} ({} items)",
            format_currency(self.fixed_total),
            self.fixed_count
        )?;
        writeln!(
            f,
            "Variable: {} ({} items)",
            format_currency(self.variable_total),
            self.variable_count
        )
    }
}
