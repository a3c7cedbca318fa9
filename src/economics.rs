//! Per-product unit economics
//!
//! Margins are per unit: `sell_price - true_cost`. Product weight is carried
//! on the record but does not scale the cost.

use serde::Serialize;

use crate::models::{Category, Product};

/// Waste above this is clamped before computing the true cost, so a 100%
/// waste entry yields a very large cost instead of a division by zero.
pub const MAX_WASTE_PERCENTAGE: f64 = 99.99;

/// Waste percentage actually used in cost calculations
pub fn effective_waste(product: &Product) -> f64 {
    product.waste_percentage.min(MAX_WASTE_PERCENTAGE)
}

/// Purchase cost inflated for trim and cooking loss
pub fn true_cost(product: &Product) -> f64 {
    product.base_cost_price / (1.0 - effective_waste(product) / 100.0)
}

pub fn margin_per_unit(product: &Product) -> f64 {
    product.sell_price - true_cost(product)
}

/// Units one person can prepare in an hour, 0 without a prep time
pub fn units_per_hour(product: &Product) -> f64 {
    if product.prep_time_minutes > 0 {
        60.0 / product.prep_time_minutes as f64
    } else {
        0.0
    }
}

pub fn margin_per_minute(product: &Product) -> f64 {
    if product.prep_time_minutes > 0 {
        margin_per_unit(product) / product.prep_time_minutes as f64
    } else {
        0.0
    }
}

pub fn margin_per_hour(product: &Product) -> f64 {
    margin_per_minute(product) * 60.0
}

pub fn hourly_profit_potential(product: &Product) -> f64 {
    units_per_hour(product) * margin_per_unit(product)
}

/// Units that would fit in the month if all labor went to this product
pub fn max_monthly_sales(product: &Product, available_minutes: f64) -> f64 {
    if product.prep_time_minutes > 0 {
        (available_minutes / product.prep_time_minutes as f64).floor()
    } else {
        0.0
    }
}

/// Margin earned if the whole month's labor went to this product
pub fn monthly_sales_potential(product: &Product, available_minutes: f64) -> f64 {
    max_monthly_sales(product, available_minutes) * margin_per_unit(product)
}

pub fn total_margin_contribution(product: &Product) -> f64 {
    margin_per_unit(product) * product.units as f64
}

/// All derived figures for one product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductMetrics {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub prep_time_minutes: i64,
    pub units: i64,
    pub true_cost: f64,
    pub margin_per_unit: f64,
    pub units_per_hour: f64,
    pub margin_per_minute: f64,
    pub margin_per_hour: f64,
    pub hourly_profit_potential: f64,
    pub max_monthly_sales: f64,
    pub monthly_sales_potential: f64,
    pub total_margin_contribution: f64,
}

impl ProductMetrics {
    pub fn compute(product: &Product, available_minutes: f64) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category,
            prep_time_minutes: product.prep_time_minutes,
            units: product.units,
            true_cost: true_cost(product),
            margin_per_unit: margin_per_unit(product),
            units_per_hour: units_per_hour(product),
            margin_per_minute: margin_per_minute(product),
            margin_per_hour: margin_per_hour(product),
            hourly_profit_potential: hourly_profit_potential(product),
            max_monthly_sales: max_monthly_sales(product, available_minutes),
            monthly_sales_potential: monthly_sales_potential(product, available_minutes),
            total_margin_contribution: total_margin_contribution(product),
        }
    }

    pub fn compute_all(products: &[Product], available_minutes: f64) -> Vec<Self> {
        products
            .iter()
            .map(|p| Self::compute(p, available_minutes))
            .collect()
    }
}
