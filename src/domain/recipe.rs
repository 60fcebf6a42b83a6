use serde::{Deserialize, Serialize};

/// One ingredient requirement of a recipe, per unit of product sold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub ingredient_id: String,
    pub quantity: f64,
}

/// Represents a menu product and the ingredients it consumes.
///
/// The ingredient list keeps the menu's declared order; admission checks walk it in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub product_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    pub ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    pub fn new(product_id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            description: String::new(),
            price,
            ingredients: Vec::new(),
        }
    }

    /// Appends an ingredient requirement, keeping declaration order.
    pub fn with_ingredient(mut self, ingredient_id: impl Into<String>, quantity: f64) -> Self {
        self.ingredients.push(RecipeIngredient {
            ingredient_id: ingredient_id.into(),
            quantity,
        });
        self
    }
}
