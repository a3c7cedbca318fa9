//! The editable record store and the derived dashboard
//!
//! A `Session` owns every input of the calculator. Edits go through the
//! mutators below, which coerce raw field text the same way the input
//! widgets do. `Session::dashboard` recomputes every derived view from the
//! current records; nothing is cached between calls.

use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, warn};

use crate::aggregate::PortfolioSummary;
use crate::capacity::CapacityReport;
use crate::costs::{OpexSummary, ProfitabilityOverview, StartupSummary};
use crate::economics::{self, ProductMetrics};
use crate::error::{Result, SessionError};
use crate::input::{parse_flag, parse_integer, parse_number};
use crate::models::{
    CapacityConfig, Category, CostType, MeatType, Month, MonthlyCost, Product, ProductFilter,
    SeasonalMultipliers, SeasonalPreset, StartupCost,
};
use crate::ranking;
use crate::seasonality::{self, Projection, SeasonalSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Category,
    MeatType,
    Weight,
    BaseCostPrice,
    WastePercentage,
    PrepTimeMinutes,
    SellPrice,
    Units,
}

impl FromStr for ProductField {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace(['_', '-', ' '], "").as_str() {
            "name" => Ok(ProductField::Name),
            "category" => Ok(ProductField::Category),
            "meattype" => Ok(ProductField::MeatType),
            "weight" | "weightkg" => Ok(ProductField::Weight),
            "basecostprice" | "costprice" | "cost" => Ok(ProductField::BaseCostPrice),
            "wastepercentage" | "waste" => Ok(ProductField::WastePercentage),
            "preptimeminutes" | "preptime" => Ok(ProductField::PrepTimeMinutes),
            "sellprice" | "price" => Ok(ProductField::SellPrice),
            "units" => Ok(ProductField::Units),
            _ => Err(SessionError::unknown_field("product", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupCostField {
    Category,
    Item,
    EstimatedCost,
    ActualCost,
    Paid,
    Notes,
}

impl FromStr for StartupCostField {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace(['_', '-', ' '], "").as_str() {
            "category" => Ok(StartupCostField::Category),
            "item" => Ok(StartupCostField::Item),
            "estimatedcost" | "estimated" => Ok(StartupCostField::EstimatedCost),
            "actualcost" | "actual" => Ok(StartupCostField::ActualCost),
            "paid" => Ok(StartupCostField::Paid),
            "notes" => Ok(StartupCostField::Notes),
            _ => Err(SessionError::unknown_field("startup cost", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthlyCostField {
    Category,
    Item,
    MonthlyCost,
    CostType,
    Notes,
}

impl FromStr for MonthlyCostField {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace(['_', '-', ' '], "").as_str() {
            "category" => Ok(MonthlyCostField::Category),
            "item" => Ok(MonthlyCostField::Item),
            "monthlycost" | "monthly" => Ok(MonthlyCostField::MonthlyCost),
            "type" | "costtype" => Ok(MonthlyCostField::CostType),
            "notes" => Ok(MonthlyCostField::Notes),
            _ => Err(SessionError::unknown_field("monthly cost", s)),
        }
    }
}

/// Every derived view, computed from one snapshot of the session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub portfolio: PortfolioSummary,
    pub startup: StartupSummary,
    pub opex: OpexSummary,
    pub profitability: ProfitabilityOverview,
    pub capacity: CapacityReport,
    pub seasonality: SeasonalSummary,
    pub projection: Projection,
    pub products: Vec<ProductMetrics>,
    pub efficiency_ranking: Vec<ProductMetrics>,
    pub top_contributors: Vec<ProductMetrics>,
    pub performance_ranking: Vec<ProductMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    products: Vec<Product>,
    startup_costs: Vec<StartupCost>,
    monthly_costs: Vec<MonthlyCost>,
    capacity: CapacityConfig,
    seasonal: SeasonalMultipliers,
    filter: ProductFilter,
    #[serde(skip)]
    next_id: u64,
}

impl Session {
    /// Empty collections with default capacity and the BBQ season curve
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn startup_costs(&self) -> &[StartupCost] {
        &self.startup_costs
    }

    pub fn monthly_costs(&self) -> &[MonthlyCost] {
        &self.monthly_costs
    }

    pub fn capacity(&self) -> &CapacityConfig {
        &self.capacity
    }

    pub fn seasonal_multipliers(&self) -> &SeasonalMultipliers {
        &self.seasonal
    }

    pub fn filter(&self) -> ProductFilter {
        self.filter
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    fn generate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let id = self.next_id.to_string();
            let taken = self.products.iter().any(|p| p.id == id)
                || self.startup_costs.iter().any(|c| c.id == id)
                || self.monthly_costs.iter().any(|c| c.id == id);
            if !taken {
                return id;
            }
        }
    }

    // ---- products ----

    pub fn add_product(&mut self) -> String {
        let id = self.generate_id();
        debug!(%id, "adding product");
        self.products.push(Product::new(id.clone()));
        id
    }

    /// Insert a fully specified product, keeping its id
    pub fn insert_product(&mut self, product: Product) {
        debug!(id = %product.id, name = %product.name, "inserting product");
        self.products.push(product);
    }

    /// Apply raw field text to a product. Returns `Ok(false)` when no product
    /// has this id.
    pub fn update_product(&mut self, id: &str, field: ProductField, value: &str) -> Result<bool> {
        let Some(product) = self.products.iter_mut().find(|p| p.id == id) else {
            debug!(%id, ?field, "update for unknown product ignored");
            return Ok(false);
        };

        match field {
            ProductField::Name => product.name = value.to_string(),
            ProductField::Category => product.category = parse_choice::<Category>(value)?,
            ProductField::MeatType => product.meat_type = parse_choice::<MeatType>(value)?,
            ProductField::Weight => product.weight_kg = parse_number(value),
            ProductField::BaseCostPrice => product.base_cost_price = parse_number(value),
            ProductField::WastePercentage => {
                product.waste_percentage = parse_number(value);
                if product.waste_percentage > economics::MAX_WASTE_PERCENTAGE {
                    warn!(
                        %id,
                        waste = product.waste_percentage,
                        "waste above {}% is clamped",
                        economics::MAX_WASTE_PERCENTAGE
                    );
                }
            }
            ProductField::PrepTimeMinutes => product.prep_time_minutes = parse_integer(value),
            ProductField::SellPrice => product.sell_price = parse_number(value),
            ProductField::Units => product.units = parse_integer(value),
        }
        debug!(%id, ?field, margin = product.margin(), "product updated");
        Ok(true)
    }

    pub fn delete_product(&mut self, id: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        before != self.products.len()
    }

    // ---- startup costs ----

    pub fn add_startup_cost(&mut self) -> String {
        let id = self.generate_id();
        debug!(%id, "adding startup cost");
        self.startup_costs.push(StartupCost::new(id.clone()));
        id
    }

    pub fn insert_startup_cost(&mut self, cost: StartupCost) {
        self.startup_costs.push(cost);
    }

    pub fn update_startup_cost(
        &mut self,
        id: &str,
        field: StartupCostField,
        value: &str,
    ) -> Result<bool> {
        let Some(cost) = self.startup_costs.iter_mut().find(|c| c.id == id) else {
            debug!(%id, ?field, "update for unknown startup cost ignored");
            return Ok(false);
        };

        match field {
            StartupCostField::Category => cost.category = value.to_string(),
            StartupCostField::Item => cost.item = value.to_string(),
            StartupCostField::EstimatedCost => cost.estimated_cost = parse_number(value),
            StartupCostField::ActualCost => cost.actual_cost = parse_number(value),
            StartupCostField::Paid => cost.paid = parse_flag(value),
            StartupCostField::Notes => cost.notes = value.to_string(),
        }
        debug!(%id, ?field, "startup cost updated");
        Ok(true)
    }

    pub fn delete_startup_cost(&mut self, id: &str) -> bool {
        let before = self.startup_costs.len();
        self.startup_costs.retain(|c| c.id != id);
        before != self.startup_costs.len()
    }

    // ---- monthly costs ----

    pub fn add_monthly_cost(&mut self) -> String {
        let id = self.generate_id();
        debug!(%id, "adding monthly cost");
        self.monthly_costs.push(MonthlyCost::new(id.clone()));
        id
    }

    pub fn insert_monthly_cost(&mut self, cost: MonthlyCost) {
        self.monthly_costs.push(cost);
    }

    pub fn update_monthly_cost(
        &mut self,
        id: &str,
        field: MonthlyCostField,
        value: &str,
    ) -> Result<bool> {
        let Some(cost) = self.monthly_costs.iter_mut().find(|c| c.id == id) else {
            debug!(%id, ?field, "update for unknown monthly cost ignored");
            return Ok(false);
        };

        match field {
            MonthlyCostField::Category => cost.category = value.to_string(),
            MonthlyCostField::Item => cost.item = value.to_string(),
            MonthlyCostField::MonthlyCost => cost.monthly_cost = parse_number(value),
            MonthlyCostField::CostType => cost.cost_type = parse_choice::<CostType>(value)?,
            MonthlyCostField::Notes => cost.notes = value.to_string(),
        }
        debug!(%id, ?field, annual = cost.annual_cost(), "monthly cost updated");
        Ok(true)
    }

    pub fn delete_monthly_cost(&mut self, id: &str) -> bool {
        let before = self.monthly_costs.len();
        self.monthly_costs.retain(|c| c.id != id);
        before != self.monthly_costs.len()
    }

    // ---- configuration ----

    pub fn set_seasonal_multiplier(&mut self, month: Month, value: &str) {
        let percentage = parse_integer(value);
        debug!(%month, percentage, "seasonal multiplier set");
        self.seasonal.set(month, percentage);
    }

    pub fn apply_seasonal_preset(&mut self, preset: SeasonalPreset) {
        debug!(?preset, "applying seasonal preset");
        self.seasonal.apply_preset(preset);
    }

    pub fn set_hours_per_day(&mut self, value: &str) {
        self.capacity.hours_per_day = parse_integer(value);
    }

    pub fn set_days_per_month(&mut self, value: &str) {
        self.capacity.days_per_month = parse_integer(value);
    }

    pub fn set_filter(&mut self, filter: ProductFilter) {
        self.filter = filter;
    }

    /// Recompute every derived view from the current records
    pub fn dashboard(&self) -> Dashboard {
        let portfolio = PortfolioSummary::compute(&self.products, self.filter);
        let startup = StartupSummary::compute(&self.startup_costs);
        let opex = OpexSummary::compute(&self.monthly_costs);
        let profitability = ProfitabilityOverview::compute(&portfolio.total, &opex, &startup);
        let capacity = CapacityReport::compute(&self.capacity, &self.products);

        let months = seasonality::monthly_series(
            &self.seasonal,
            &portfolio.total,
            opex.monthly_total,
            capacity.utilization_percent,
        );
        let projection = Projection::compute(&months, startup.total_actual);
        let seasonality = SeasonalSummary::compute(months);

        let products = ProductMetrics::compute_all(&self.products, capacity.available_minutes);
        let efficiency_ranking = ranking::efficiency_ranking(&products);
        let top_contributors = ranking::top_by_contribution(&products, ranking::TOP_CONTRIBUTORS);
        let performance_ranking = ranking::performance_ranking(&products);

        debug!(
            products = self.products.len(),
            net_profit = profitability.monthly_net_profit,
            utilization = capacity.utilization_percent,
            "dashboard recomputed"
        );

        Dashboard {
            portfolio,
            startup,
            opex,
            profitability,
            capacity,
            seasonality,
            projection,
            products,
            efficiency_ranking,
            top_contributors,
            performance_ranking,
        }
    }

    /// The butchery's opening plan: six products, four startup purchases
    /// and seven recurring costs
    pub fn with_sample_data() -> Self {
        let mut session = Session::new();

        let products = [
            ("1", "IERS Classic Burger", Category::Classic, MeatType::Beef, 3.2, 15.45, 10, 10.0, 80),
            ("2", "IERS Pitmaster Brisket", Category::Pitmaster, MeatType::Beef, 1.0, 18.79, 12, 100.0, 10),
            ("3", "IERS Pitmaster Ribs", Category::Pitmaster, MeatType::Pork, 6.0, 13.8, 15, 100.0, 10),
            ("4", "IERS Pitmaster Steak", Category::Pitmaster, MeatType::Beef, 2.5, 15.55, 10, 100.0, 10),
            ("5", "IERS Pitmaster Lamb", Category::Pitmaster, MeatType::Beef, 2.5, 41.0, 18, 100.0, 10),
            ("6", "IERS Pitmaster Pulled Pork", Category::Pitmaster, MeatType::Pork, 3.7, 29.7, 20, 100.0, 10),
        ];
        for (id, name, category, meat_type, weight_kg, cost, prep, price, units) in products {
            session.insert_product(Product {
                id: id.to_string(),
                name: name.to_string(),
                category,
                meat_type,
                weight_kg,
                base_cost_price: cost,
                waste_percentage: 10.0,
                prep_time_minutes: prep,
                sell_price: price,
                units,
            });
        }

        let startup = [
            ("1", "Equipment", "Smoker", 5000.0, 4800.0, true, "Main cooking equipment"),
            ("2", "Equipment", "Refrigeration", 3000.0, 2800.0, true, "Walk-in cooler"),
            ("3", "Licensing", "Business License", 500.0, 450.0, true, "Annual renewal"),
            ("4", "Setup", "Initial Inventory", 2000.0, 2200.0, false, "First stock order"),
        ];
        for (id, category, item, estimated, actual, paid, notes) in startup {
            session.insert_startup_cost(StartupCost {
                id: id.to_string(),
                category: category.to_string(),
                item: item.to_string(),
                estimated_cost: estimated,
                actual_cost: actual,
                paid,
                notes: notes.to_string(),
            });
        }

        let monthly = [
            ("1", "Space", "Rent", 8000.0, CostType::Fixed, "Commercial kitchen space"),
            ("2", "Labor", "Butcher/Chef salary", 6000.0, CostType::Fixed, "Monthly salary"),
            ("3", "Utilities", "Electric & Gas", 800.0, CostType::Variable, "Smoker operation"),
            ("4", "Marketing", "Digital Ads", 500.0, CostType::Variable, "Social media & online"),
            ("5", "Insurance", "Business Insurance", 400.0, CostType::Fixed, "General liability"),
            ("6", "Supplies", "Packaging", 300.0, CostType::Variable, "Boxes, labels, bags"),
            ("7", "Supplies", "Cleaning Supplies", 40.0, CostType::Variable, "Sanitizers, cloths"),
        ];
        for (id, category, item, cost, cost_type, notes) in monthly {
            session.insert_monthly_cost(MonthlyCost {
                id: id.to_string(),
                category: category.to_string(),
                item: item.to_string(),
                monthly_cost: cost,
                cost_type,
                notes: notes.to_string(),
            });
        }

        session
    }
}

fn parse_choice<T: FromStr<Err = SessionError>>(value: &str) -> Result<T> {
    value.parse::<T>().inspect_err(|e| warn!("rejected edit: {e}"))
}
