//! Butchery break-even calculator
//!
//! Turns per-product cost, price and prep-time records, startup purchases
//! and recurring costs into break-even, profitability, labor capacity,
//! seasonality and product ranking views. Everything lives in memory in a
//! [`Session`](session::Session); each call to `Session::dashboard`
//! recomputes the derived figures from scratch.

pub mod aggregate;
pub mod capacity;
pub mod costs;
pub mod economics;
pub mod error;
pub mod input;
pub mod models;
pub mod ranking;
pub mod report;
pub mod seasonality;
pub mod session;

pub use error::SessionError;
pub use session::{Dashboard, MonthlyCostField, ProductField, Session, StartupCostField};
