use super::{exceeds, IngredientTotals, RecipeIndex, ReservationTable, StockSnapshot};
use crate::domain::OrderLineItem;
use crate::error::OrderError;
use tracing::{debug, warn};

/// Admission control for a candidate order.
///
/// Walks line items in declared order, then each recipe's ingredients in declared order, and
/// fails on the first ingredient whose requirement exceeds `stock − reserved`. Requirements of
/// earlier lines in the same order count against later lines for the same ingredient. An
/// ingredient absent from `stock` fails with [`OrderError::IngredientNotFound`].
pub fn check_availability(
    items: &[OrderLineItem],
    index: &RecipeIndex,
    stock: &StockSnapshot,
    reserved: &ReservationTable,
) -> Result<(), OrderError> {
    let mut pending = IngredientTotals::default();

    for item in items {
        for ingredient in index.ingredients_for(&item.product_id)? {
            let id = ingredient.ingredient_id.as_str();
            let on_hand = stock
                .get(id)
                .ok_or_else(|| OrderError::IngredientNotFound(id.to_string()))?;

            let required = ingredient.quantity * f64::from(item.quantity);
            let available = on_hand - reserved.get(id) - pending.get(id);

            if exceeds(required, available) {
                warn!(
                    product_id = %item.product_id,
                    ingredient_id = id,
                    required,
                    available,
                    "Insufficient stock for order line"
                );
                return Err(OrderError::InsufficientStock {
                    ingredient_id: id.to_string(),
                    required,
                    available,
                });
            }
            pending.add(id, required);
        }
    }

    debug!(ingredients = pending.len(), "Availability check passed");
    Ok(())
}
