use serde::{Deserialize, Serialize};

/// Stored quantity of a single ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientStock {
    pub ingredient_id: String,
    #[serde(default)]
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl IngredientStock {
    pub fn new(
        ingredient_id: impl Into<String>,
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            ingredient_id: ingredient_id.into(),
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}
