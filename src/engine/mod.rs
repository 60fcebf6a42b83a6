//! Inventory reservation and availability engine.
//!
//! Everything here is plain data-in, data-out except [`InventoryLedger`], which reads and
//! writes the inventory store. Serialization of concurrent callers is the job of
//! [`crate::actors::OrderService`], not of this module.

mod availability;
mod ledger;
mod recipe_index;
mod reservation;
mod validation;

pub use availability::check_availability;
pub use ledger::{InventoryLedger, StockSnapshot};
pub use recipe_index::RecipeIndex;
pub use reservation::{compute_reservations, line_usage, IngredientTotals, ReservationTable};
pub use validation::validate_draft;

/// Slack for float noise when comparing stock quantities.
pub const STOCK_EPSILON: f64 = 1e-9;

/// True when `required` cannot be covered by `available`.
pub fn exceeds(required: f64, available: f64) -> bool {
    required > available + STOCK_EPSILON
}
