use super::RecipeIndex;
use crate::domain::{Order, OrderLineItem};
use crate::error::OrderError;
use std::collections::HashMap;

/// Per-ingredient quantities in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientTotals {
    entries: Vec<(String, f64)>,
    positions: HashMap<String, usize>,
}

/// Quantity of each ingredient committed to Open orders. Derived on demand, never stored.
pub type ReservationTable = IngredientTotals;

impl IngredientTotals {
    pub fn add(&mut self, ingredient_id: &str, quantity: f64) {
        match self.positions.get(ingredient_id) {
            Some(&pos) => self.entries[pos].1 += quantity,
            None => {
                self.positions
                    .insert(ingredient_id.to_string(), self.entries.len());
                self.entries.push((ingredient_id.to_string(), quantity));
            }
        }
    }

    /// Total for `ingredient_id`, zero if it was never added.
    pub fn get(&self, ingredient_id: &str) -> f64 {
        self.positions
            .get(ingredient_id)
            .map_or(0.0, |&pos| self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(id, qty)| (id.as_str(), *qty))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn add_lines(&mut self, items: &[OrderLineItem], index: &RecipeIndex) -> Result<(), OrderError> {
        for item in items {
            for ingredient in index.ingredients_for(&item.product_id)? {
                self.add(
                    &ingredient.ingredient_id,
                    ingredient.quantity * f64::from(item.quantity),
                );
            }
        }
        Ok(())
    }
}

/// Ingredients consumed by `items`, summed per ingredient.
pub fn line_usage(items: &[OrderLineItem], index: &RecipeIndex) -> Result<IngredientTotals, OrderError> {
    let mut usage = IngredientTotals::default();
    usage.add_lines(items, index)?;
    Ok(usage)
}

/// Sums the ingredient needs of every Open order in `orders`.
///
/// Closed orders are skipped. A line pointing at a product missing from the menu fails the
/// whole computation rather than under-reserving.
pub fn compute_reservations(orders: &[Order], index: &RecipeIndex) -> Result<ReservationTable, OrderError> {
    let mut reserved = ReservationTable::default();
    for order in orders.iter().filter(|o| o.is_open()) {
        reserved.add_lines(&order.items, index)?;
    }
    Ok(reserved)
}
