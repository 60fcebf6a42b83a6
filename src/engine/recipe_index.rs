use crate::domain::{Recipe, RecipeIngredient};
use crate::error::OrderError;
use crate::store::MenuStore;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Product id → ingredient requirements, built from one menu snapshot.
///
/// A recipe with an ingredient quantity that is not a positive finite number is kept out of the
/// lookup table; asking for it fails with [`OrderError::InvalidRecipe`] instead of feeding a
/// non-positive requirement into the stock math.
#[derive(Debug, Clone, Default)]
pub struct RecipeIndex {
    recipes: HashMap<String, Vec<RecipeIngredient>>,
    rejected: HashMap<String, RecipeIngredient>,
}

impl RecipeIndex {
    pub fn from_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let mut index = Self::default();
        for recipe in recipes {
            let bad = recipe
                .ingredients
                .iter()
                .find(|i| !(i.quantity.is_finite() && i.quantity > 0.0));
            match bad {
                Some(ingredient) => {
                    warn!(
                        product_id = %recipe.product_id,
                        ingredient_id = %ingredient.ingredient_id,
                        quantity = ingredient.quantity,
                        "Recipe has a non-positive ingredient quantity"
                    );
                    index
                        .rejected
                        .insert(recipe.product_id, ingredient.clone());
                }
                None => {
                    index.recipes.insert(recipe.product_id, recipe.ingredients);
                }
            }
        }
        index
    }

    pub async fn load(menu: &dyn MenuStore) -> Result<Self, OrderError> {
        let recipes = menu.all_recipes().await?;
        debug!(recipe_count = recipes.len(), "Recipe index loaded");
        Ok(Self::from_recipes(recipes))
    }

    pub fn ingredients_for(&self, product_id: &str) -> Result<&[RecipeIngredient], OrderError> {
        if let Some(bad) = self.rejected.get(product_id) {
            return Err(OrderError::InvalidRecipe {
                product_id: product_id.to_string(),
                ingredient_id: bad.ingredient_id.clone(),
                quantity: bad.quantity,
            });
        }
        self.recipes
            .get(product_id)
            .map(Vec::as_slice)
            .ok_or_else(|| OrderError::ProductNotFound(product_id.to_string()))
    }
}
