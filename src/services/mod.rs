//! Business logic services.
//!
//! - [`ShoppingService`]: the date-scoped shopping list state manager
//! - [`search`]: purchase history ranking and search outcomes
//! - [`DashboardService`]: the home dashboard's shopping card

mod dashboard_service;
pub mod search;
mod shopping_service;

pub use dashboard_service::{DashboardService, ShoppingSummary};
pub use search::SearchOutcome;
pub use shopping_service::{AddOutcome, DeleteOutcome, ShoppingService, ShoppingSettings};
