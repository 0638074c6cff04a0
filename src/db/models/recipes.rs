//! Database models for recipes and recipe lifecycle requests.

use crate::db::models::associations::AssociationAttrs;
use crate::types::{IngredientId, RecipeId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database response for a recipe row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecipeDBResponse {
    pub id: RecipeId,
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub servings: Option<i64>,
    pub prep_minutes: i64,
    pub cook_minutes: i64,
    pub created_at: DateTime<Utc>,
}

/// Reference to an ingredient that already exists in the dictionary,
/// attached to a recipe at creation time.
#[derive(Debug, Clone)]
pub struct ExistingIngredientRef {
    pub ingredient_id: IngredientId,
    pub attrs: AssociationAttrs,
}

/// A not-yet-resolved ingredient attached to a recipe at creation time.
/// The name is resolved through the dictionary inside the creation
/// transaction; blank names are skipped.
#[derive(Debug, Clone)]
pub struct NewIngredientInput {
    pub name: String,
    pub attrs: AssociationAttrs,
}

/// Database request for creating a recipe together with its associations.
#[derive(Debug, Clone, Default)]
pub struct RecipeCreateDBRequest {
    pub title: String,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub servings: Option<i64>,
    pub prep_minutes: i64,
    pub cook_minutes: i64,
    pub existing_ingredients: Vec<ExistingIngredientRef>,
    pub new_ingredients: Vec<NewIngredientInput>,
}

/// Database request for updating a recipe's own fields. Minutes below zero
/// are clamped to zero on write; `servings` stays nullable.
#[derive(Debug, Clone, Default)]
pub struct RecipeUpdateDBRequest {
    pub title: String,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub servings: Option<i64>,
    pub prep_minutes: i64,
    pub cook_minutes: i64,
}
