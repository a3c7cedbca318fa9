//! Property tests for the calculation invariants

use proptest::prelude::*;

use butchery_calculator::aggregate::PortfolioSummary;
use butchery_calculator::economics::{self, MAX_WASTE_PERCENTAGE};
use butchery_calculator::models::{Category, Product, ProductFilter, SeasonalPreset};
use butchery_calculator::{MonthlyCostField, Session};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

fn arb_product() -> impl Strategy<Value = Product> {
    (
        prop::bool::ANY,
        0.0..200.0f64,
        0.0..95.0f64,
        0i64..60,
        0.0..300.0f64,
        0i64..500,
    )
        .prop_map(|(pitmaster, cost, waste, prep, price, units)| Product {
            category: if pitmaster {
                Category::Pitmaster
            } else {
                Category::Classic
            },
            base_cost_price: cost,
            waste_percentage: waste,
            prep_time_minutes: prep,
            sell_price: price,
            units,
            ..Product::new("p")
        })
}

proptest! {
    /// Category partitions add up to the unfiltered totals.
    #[test]
    fn category_split_is_additive(products in prop::collection::vec(arb_product(), 0..20)) {
        let summary = PortfolioSummary::compute(&products, ProductFilter::All);
        let (total, classic, pitmaster) = (summary.total, summary.classic, summary.pitmaster);

        prop_assert!(close(total.revenue, classic.revenue + pitmaster.revenue));
        prop_assert!(close(total.cost, classic.cost + pitmaster.cost));
        prop_assert!(close(total.margin, classic.margin + pitmaster.margin));
        prop_assert_eq!(total.units, classic.units + pitmaster.units);
        prop_assert_eq!(total.prep_time_minutes, classic.prep_time_minutes + pitmaster.prep_time_minutes);
    }

    /// Undoing the waste inflation gives back the purchase cost.
    #[test]
    fn true_cost_round_trips(cost in 0.0..1_000_000.0f64, waste in 0.0..MAX_WASTE_PERCENTAGE) {
        let product = Product {
            base_cost_price: cost,
            waste_percentage: waste,
            ..Product::new("p")
        };
        let recovered = economics::true_cost(&product) * (1.0 - waste / 100.0);
        prop_assert!(close(recovered, cost), "{} vs {}", recovered, cost);
    }

    /// Without a prep time there is no throughput.
    #[test]
    fn zero_prep_time_has_zero_throughput(mut product in arb_product()) {
        product.prep_time_minutes = 0;
        prop_assert_eq!(economics::units_per_hour(&product), 0.0);
        prop_assert_eq!(economics::margin_per_minute(&product), 0.0);
    }

    /// Annual cost always follows the last monthly edit.
    #[test]
    fn annual_cost_follows_monthly_edits(edits in prop::collection::vec("[0-9]{0,6}(\\.[0-9]{1,2})?|[a-z]{1,4}", 1..5)) {
        let mut session = Session::new();
        let id = session.add_monthly_cost();
        for edit in &edits {
            session.update_monthly_cost(&id, MonthlyCostField::MonthlyCost, edit).unwrap();
            let cost = &session.monthly_costs()[0];
            prop_assert_eq!(cost.annual_cost(), 12.0 * cost.monthly_cost);
        }
    }

    /// Annual revenue is the baseline weighted by the multipliers.
    #[test]
    fn seasonal_revenue_matches_multiplier_sum(
        products in prop::collection::vec(arb_product(), 1..10),
        flat in prop::bool::ANY,
    ) {
        let mut session = Session::new();
        for product in products {
            session.insert_product(product);
        }
        if flat {
            session.apply_seasonal_preset(SeasonalPreset::Flat);
        }
        let dashboard = session.dashboard();
        let expected = dashboard.portfolio.total.revenue
            * session.seasonal_multipliers().sum() / 100.0;
        prop_assert!(close(dashboard.seasonality.annual_revenue, expected));
    }

    /// The dashboard is a pure function of the session.
    #[test]
    fn dashboard_is_idempotent(products in prop::collection::vec(arb_product(), 0..10)) {
        let mut session = Session::with_sample_data();
        for product in products {
            session.insert_product(product);
        }
        prop_assert_eq!(session.dashboard(), session.dashboard());
    }
}
