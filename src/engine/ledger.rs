use super::{exceeds, IngredientTotals};
use crate::domain::IngredientStock;
use crate::error::OrderError;
use crate::store::InventoryStore;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Point-in-time view of stored ingredient quantities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockSnapshot {
    quantities: HashMap<String, f64>,
}

impl StockSnapshot {
    pub fn from_stock(stock: &[IngredientStock]) -> Self {
        Self {
            quantities: stock
                .iter()
                .map(|s| (s.ingredient_id.clone(), s.quantity))
                .collect(),
        }
    }

    pub fn get(&self, ingredient_id: &str) -> Option<f64> {
        self.quantities.get(ingredient_id).copied()
    }
}

/// Authoritative ingredient stock, backed by an [`InventoryStore`].
#[derive(Clone)]
pub struct InventoryLedger {
    store: Arc<dyn InventoryStore>,
}

impl InventoryLedger {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    pub async fn snapshot(&self) -> Result<StockSnapshot, OrderError> {
        let stock = self.store.all_stock().await?;
        Ok(StockSnapshot::from_stock(&stock))
    }

    /// Subtracts every quantity in `deductions` and saves the full stock set.
    ///
    /// All subtractions are checked before anything is written; if one ingredient is missing
    /// or would go negative, nothing is saved.
    #[instrument(skip(self, deductions), fields(ingredients = deductions.len()))]
    pub async fn apply_deductions(&self, deductions: &IngredientTotals) -> Result<(), OrderError> {
        let mut stock = self.store.all_stock().await?;
        let positions: HashMap<String, usize> = stock
            .iter()
            .enumerate()
            .map(|(pos, s)| (s.ingredient_id.clone(), pos))
            .collect();

        for (ingredient_id, required) in deductions.iter() {
            let pos = *positions
                .get(ingredient_id)
                .ok_or_else(|| OrderError::IngredientNotFound(ingredient_id.to_string()))?;
            let entry = &mut stock[pos];
            if exceeds(required, entry.quantity) {
                warn!(
                    ingredient_id,
                    required,
                    available = entry.quantity,
                    "Deduction rejected"
                );
                return Err(OrderError::InsufficientStock {
                    ingredient_id: ingredient_id.to_string(),
                    required,
                    available: entry.quantity,
                });
            }
            entry.quantity = (entry.quantity - required).max(0.0);
        }

        if let Err(e) = self.store.save_stock(stock).await {
            error!(error = %e, "Saving inventory failed");
            return Err(e.into());
        }
        info!("Deductions applied");
        Ok(())
    }

    /// Adds `credits` back onto stock, undoing an earlier [`apply_deductions`](Self::apply_deductions).
    #[instrument(skip(self, credits), fields(ingredients = credits.len()))]
    pub async fn restore(&self, credits: &IngredientTotals) -> Result<(), OrderError> {
        let mut stock = self.store.all_stock().await?;
        for (ingredient_id, quantity) in credits.iter() {
            match stock.iter_mut().find(|s| s.ingredient_id == ingredient_id) {
                Some(entry) => entry.quantity += quantity,
                None => warn!(ingredient_id, "Ingredient vanished before restore"),
            }
        }
        self.store.save_stock(stock).await?;
        info!("Stock restored");
        Ok(())
    }
}
