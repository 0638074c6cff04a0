//! Database models for filtered search results and report aggregates.

use crate::types::RecipeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A recipe decorated with its per-recipe derived values.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecipeSummaryDBResponse {
    pub id: RecipeId,
    pub title: String,
    pub cuisine: Option<String>,
    pub prep_minutes: i64,
    pub cook_minutes: i64,
    pub created_at: DateTime<Utc>,
    /// Count of associations for this recipe
    pub ingredient_count: i64,
    /// Sum of non-null association prices; 0 when none are costed
    pub total_cost: f64,
}

/// Cross-set averages over a filtered recipe set. All values are 0 for an
/// empty set, never NULL or NaN.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecipeStatsDBResponse {
    pub avg_prep_minutes: f64,
    pub avg_cook_minutes: f64,
    pub avg_ingredient_count: f64,
    pub avg_total_cost: f64,
}
