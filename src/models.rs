//! Data models for products, cost lines and planning configuration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Classic,
    Pitmaster,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeatType {
    Beef,
    Pork,
    Poultry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostType {
    Fixed,
    Variable,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Classic => write!(f, "Classic"),
            Category::Pitmaster => write!(f, "Pitmaster"),
        }
    }
}

impl FromStr for Category {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Category::Classic),
            "pitmaster" => Ok(Category::Pitmaster),
            _ => Err(SessionError::invalid_choice("category", s)),
        }
    }
}

impl fmt::Display for MeatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeatType::Beef => write!(f, "Beef"),
            MeatType::Pork => write!(f, "Pork"),
            MeatType::Poultry => write!(f, "Poultry"),
        }
    }
}

impl FromStr for MeatType {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beef" => Ok(MeatType::Beef),
            "pork" => Ok(MeatType::Pork),
            "poultry" => Ok(MeatType::Poultry),
            _ => Err(SessionError::invalid_choice("meat type", s)),
        }
    }
}

impl fmt::Display for CostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostType::Fixed => write!(f, "Fixed"),
            CostType::Variable => write!(f, "Variable"),
        }
    }
}

impl FromStr for CostType {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(CostType::Fixed),
            "variable" => Ok(CostType::Variable),
            _ => Err(SessionError::invalid_choice("cost type", s)),
        }
    }
}

/// A sellable product with its purchase, waste and labor figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub meat_type: MeatType,
    pub weight_kg: f64, // Informational, does not enter the margin
    pub base_cost_price: f64,
    pub waste_percentage: f64, // 0-100, share of raw input lost
    pub prep_time_minutes: i64,
    pub sell_price: f64,
    pub units: i64, // Planned monthly sales volume
}

impl Product {
    /// A blank product as created by the "add" action
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: "New Product".to_string(),
            category: Category::Classic,
            meat_type: MeatType::Beef,
            weight_kg: 1.0,
            base_cost_price: 0.0,
            waste_percentage: 10.0,
            prep_time_minutes: 10,
            sell_price: 0.0,
            units: 0,
        }
    }

    /// Cost per unit after inflating the purchase price for waste
    pub fn true_cost(&self) -> f64 {
        crate::economics::true_cost(self)
    }

    /// Gross profit per unit, always derived from the current fields
    pub fn margin(&self) -> f64 {
        crate::economics::margin_per_unit(self)
    }
}

/// One-time investment line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupCost {
    pub id: String,
    pub category: String,
    pub item: String,
    pub estimated_cost: f64,
    pub actual_cost: f64,
    pub paid: bool,
    pub notes: String,
}

impl StartupCost {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: String::new(),
            item: String::new(),
            estimated_cost: 0.0,
            actual_cost: 0.0,
            paid: false,
            notes: String::new(),
        }
    }
}

/// Recurring operating expense line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCost {
    pub id: String,
    pub category: String,
    pub item: String,
    pub monthly_cost: f64,
    pub cost_type: CostType,
    pub notes: String,
}

impl MonthlyCost {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: String::new(),
            item: String::new(),
            monthly_cost: 0.0,
            cost_type: CostType::Fixed,
            notes: String::new(),
        }
    }

    pub fn annual_cost(&self) -> f64 {
        self.monthly_cost * 12.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Zero-based position in the calendar year
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Month {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const FULL_NAMES: [&str; 12] = [
            "january", "february", "march", "april", "may", "june", "july", "august",
            "september", "october", "november", "december",
        ];

        let key = s.trim().to_ascii_lowercase();
        Month::ALL
            .iter()
            .copied()
            .find(|m| {
                key == m.short_name().to_ascii_lowercase() || key == FULL_NAMES[m.index()]
            })
            .ok_or_else(|| SessionError::UnknownMonth(s.to_string()))
    }
}

/// Named bulk settings for the seasonal curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonalPreset {
    /// Every month at 100% of baseline
    Flat,
    /// Barbecue demand: slow winter, summer peak
    Bbq,
}

impl SeasonalPreset {
    pub fn percentages(self) -> [i64; 12] {
        match self {
            SeasonalPreset::Flat => [100; 12],
            SeasonalPreset::Bbq => [70, 70, 85, 100, 120, 140, 150, 145, 120, 100, 80, 90],
        }
    }
}

/// Demand multiplier per calendar month, as a percentage of baseline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalMultipliers {
    percentages: [i64; 12],
}

impl SeasonalMultipliers {
    pub fn from_preset(preset: SeasonalPreset) -> Self {
        Self {
            percentages: preset.percentages(),
        }
    }

    pub fn get(&self, month: Month) -> i64 {
        self.percentages[month.index()]
    }

    pub fn set(&mut self, month: Month, percentage: i64) {
        self.percentages[month.index()] = percentage;
    }

    pub fn apply_preset(&mut self, preset: SeasonalPreset) {
        self.percentages = preset.percentages();
    }

    /// Months and their multipliers in calendar order
    pub fn iter(&self) -> impl Iterator<Item = (Month, i64)> + '_ {
        Month::ALL.iter().map(|&m| (m, self.get(m)))
    }

    pub fn sum(&self) -> f64 {
        self.percentages.iter().map(|&p| p as f64).sum()
    }
}

impl Default for SeasonalMultipliers {
    fn default() -> Self {
        Self::from_preset(SeasonalPreset::Bbq)
    }
}

/// Labor supply settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityConfig {
    pub hours_per_day: i64,
    pub days_per_month: i64,
}

impl CapacityConfig {
    /// Minutes of preparation labor per month (Kees units)
    pub fn available_minutes(&self) -> f64 {
        self.hours_per_day as f64 * 60.0 * self.days_per_month as f64
    }
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            hours_per_day: 5,
            days_per_month: 18,
        }
    }
}

/// Restricts which products enter the portfolio aggregates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductFilter {
    #[default]
    All,
    Classic,
    Pitmaster,
}

impl ProductFilter {
    pub fn matches(self, product: &Product) -> bool {
        match self {
            ProductFilter::All => true,
            ProductFilter::Classic => product.category == Category::Classic,
            ProductFilter::Pitmaster => product.category == Category::Pitmaster,
        }
    }
}
