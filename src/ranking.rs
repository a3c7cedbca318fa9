//! Orderings of product metrics for the ranking panels
//!
//! All sorts are stable, so products with equal keys keep collection order.

use crate::economics::ProductMetrics;

/// Number of products shown in the contribution panel
pub const TOP_CONTRIBUTORS: usize = 10;

fn sorted_descending(metrics: &[ProductMetrics], key: impl Fn(&ProductMetrics) -> f64) -> Vec<ProductMetrics> {
    let mut ranked = metrics.to_vec();
    ranked.sort_by(|a, b| key(b).total_cmp(&key(a)));
    ranked
}

/// Best margin per minute of labor first
pub fn efficiency_ranking(metrics: &[ProductMetrics]) -> Vec<ProductMetrics> {
    sorted_descending(metrics, |m| m.margin_per_minute)
}

/// Largest total monthly margin first, truncated to `limit`
pub fn top_by_contribution(metrics: &[ProductMetrics], limit: usize) -> Vec<ProductMetrics> {
    let mut ranked = sorted_descending(metrics, |m| m.total_margin_contribution);
    ranked.truncate(limit);
    ranked
}

/// Highest margin per unit first
pub fn performance_ranking(metrics: &[ProductMetrics]) -> Vec<ProductMetrics> {
    sorted_descending(metrics, |m| m.margin_per_unit)
}
