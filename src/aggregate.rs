//! Portfolio-level sums over the product collection

use serde::Serialize;

use crate::economics;
use crate::models::{Category, Product, ProductFilter};

/// Revenue, cost of goods and labor summed over a set of products
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub revenue: f64,
    pub cost: f64,
    pub margin: f64,
    /// Planned units, summed as floats so large inputs cannot overflow
    pub units: f64,
    pub prep_time_minutes: f64,
}

impl Totals {
    pub fn compute<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let mut totals = Totals::default();
        for p in products {
            totals.revenue += p.sell_price * p.units as f64;
            totals.cost += economics::true_cost(p) * p.units as f64;
            totals.units += p.units as f64;
            totals.prep_time_minutes += p.prep_time_minutes as f64 * p.units as f64;
        }
        totals.margin = totals.revenue - totals.cost;
        totals
    }

    /// Blended gross margin per unit sold, 0 when nothing is sold
    pub fn avg_margin_per_unit(&self) -> f64 {
        if self.units > 0.0 {
            self.margin / self.units
        } else {
            0.0
        }
    }

    /// Gross margin as a percentage of revenue, 0 without revenue
    pub fn margin_percent(&self) -> f64 {
        if self.revenue > 0.0 {
            self.margin / self.revenue * 100.0
        } else {
            0.0
        }
    }

    /// Units needed each month to cover `monthly_opex` at the current blend
    pub fn break_even_units(&self, monthly_opex: f64) -> u64 {
        let avg = self.avg_margin_per_unit();
        if monthly_opex > 0.0 && avg > 0.0 {
            (monthly_opex / avg).ceil() as u64
        } else {
            0
        }
    }
}

/// Filtered totals plus the Classic/Pitmaster split of the same set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub filter: ProductFilter,
    pub total: Totals,
    pub classic: Totals,
    pub pitmaster: Totals,
}

impl PortfolioSummary {
    pub fn compute(products: &[Product], filter: ProductFilter) -> Self {
        let selected: Vec<&Product> = products.iter().filter(|p| filter.matches(p)).collect();

        Self {
            filter,
            total: Totals::compute(selected.iter().copied()),
            classic: Totals::compute(selected.iter().copied().filter(|p| p.category == Category::Classic)),
            pitmaster: Totals::compute(
                selected.iter().copied().filter(|p| p.category == Category::Pitmaster),
            ),
        }
    }

    pub fn for_category(&self, category: Category) -> &Totals {
        match category {
            Category::Classic => &self.classic,
            Category::Pitmaster => &self.pitmaster,
        }
    }
}
