//! Labor capacity: planned prep time against available minutes

use serde::Serialize;

use crate::models::{CapacityConfig, Product};

/// Utilization above this is flagged as a caution
pub const CAUTION_UTILIZATION: f64 = 90.0;
/// Utilization above this cannot be staffed
pub const IMPOSSIBLE_UTILIZATION: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CapacityStatus {
    Comfortable,
    Caution,
    Impossible,
}

impl CapacityStatus {
    pub fn from_utilization(percent: f64) -> Self {
        if percent > IMPOSSIBLE_UTILIZATION {
            CapacityStatus::Impossible
        } else if percent > CAUTION_UTILIZATION {
            CapacityStatus::Caution
        } else {
            CapacityStatus::Comfortable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapacityReport {
    pub available_minutes: f64,
    pub used_minutes: f64,
    /// Negative when more labor is planned than available
    pub remaining_minutes: f64,
    pub utilization_percent: f64,
    pub status: CapacityStatus,
}

impl CapacityReport {
    /// Always computed over every product, regardless of the portfolio filter
    pub fn compute(config: &CapacityConfig, products: &[Product]) -> Self {
        let available_minutes = config.available_minutes();
        let used_minutes: f64 = products
            .iter()
            .map(|p| p.prep_time_minutes as f64 * p.units as f64)
            .sum();
        let utilization_percent = if available_minutes > 0.0 {
            used_minutes / available_minutes * 100.0
        } else {
            0.0
        };

        Self {
            available_minutes,
            used_minutes,
            remaining_minutes: available_minutes - used_minutes,
            utilization_percent,
            status: CapacityStatus::from_utilization(utilization_percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(prep: i64, units: i64) -> Product {
        Product {
            prep_time_minutes: prep,
            units,
            ..Product::new("p")
        }
    }

    #[test]
    fn test_utilization() {
        let products = vec![product(10, 80), product(12, 10), product(15, 10)];
        let report = CapacityReport::compute(&CapacityConfig::default(), &products);
        assert_eq!(report.available_minutes, 5400.0);
        assert_eq!(report.used_minutes, 1070.0);
        assert_eq!(report.remaining_minutes, 4330.0);
        assert!((report.utilization_percent - 1070.0 / 54.0).abs() < 1e-9);
        assert_eq!(report.status, CapacityStatus::Comfortable);
    }

    #[test]
    fn test_overcommitted_capacity_goes_negative() {
        let config = CapacityConfig {
            hours_per_day: 1,
            days_per_month: 1,
        };
        let report = CapacityReport::compute(&config, &[product(10, 7)]);
        assert_eq!(report.remaining_minutes, -10.0);
        assert_eq!(report.status, CapacityStatus::Impossible);
    }

    #[test]
    fn test_zero_supply_has_zero_utilization() {
        let config = CapacityConfig {
            hours_per_day: 0,
            days_per_month: 18,
        };
        let report = CapacityReport::compute(&config, &[product(10, 5)]);
        assert_eq!(report.utilization_percent, 0.0);
        assert_eq!(report.remaining_minutes, -50.0);
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(CapacityStatus::from_utilization(90.0), CapacityStatus::Comfortable);
        assert_eq!(CapacityStatus::from_utilization(90.5), CapacityStatus::Caution);
        assert_eq!(CapacityStatus::from_utilization(100.0), CapacityStatus::Caution);
        assert_eq!(CapacityStatus::from_utilization(100.1), CapacityStatus::Impossible);
    }
}
