//! Database models for recipe-ingredient associations.

use crate::types::IngredientId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-link attributes carried by an association. A `None` price means the
/// ingredient is not costed and is excluded from cost sums.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssociationAttrs {
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub price: Option<f64>,
    pub preparation: Option<String>,
}

/// An association row joined with the ingredient's dictionary name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecipeIngredientDBResponse {
    pub ingredient_id: IngredientId,
    pub name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub price: Option<f64>,
    pub preparation: Option<String>,
}
