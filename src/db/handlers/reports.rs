//! Filtered search and aggregate reporting over recipes.
//!
//! Both entry points share one filter vocabulary: present fields become
//! conjunctive predicates, absent fields constrain nothing. The listing and
//! the aggregates therefore always describe the same recipe set for the same
//! filter.

use crate::db::models::reports::{RecipeStatsDBResponse, RecipeSummaryDBResponse};
use crate::errors::Result;
use crate::types::{IngredientId, UserId};
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use tracing::instrument;

/// Conjunctive recipe filter. Every populated field must hold for a recipe
/// to be included; an empty filter selects everything.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub owner_id: Option<UserId>,
    /// Inclusive lower bound on the creation date
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the creation date
    pub date_to: Option<NaiveDate>,
    /// Exact cuisine match
    pub cuisine: Option<String>,
    /// Case-insensitive substring match on title or description
    pub free_text: Option<String>,
    /// Recipe must contain this dictionary entry
    pub ingredient_id: Option<IngredientId>,
}

impl RecipeFilter {
    /// Append this filter's predicates to a query whose WHERE clause is
    /// already open. The recipes table must be aliased `r`.
    fn apply(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        if let Some(owner_id) = self.owner_id {
            builder.push(" AND r.user_id = ").push_bind(owner_id);
        }
        if let Some(date_from) = self.date_from {
            builder
                .push(" AND DATE(r.created_at) >= DATE(")
                .push_bind(date_from)
                .push(")");
        }
        if let Some(date_to) = self.date_to {
            builder
                .push(" AND DATE(r.created_at) <= DATE(")
                .push_bind(date_to)
                .push(")");
        }
        if let Some(cuisine) = &self.cuisine {
            builder.push(" AND r.cuisine = ").push_bind(cuisine.clone());
        }
        if let Some(free_text) = &self.free_text {
            let pattern = format!("%{free_text}%");
            builder
                .push(" AND (r.title LIKE ")
                .push_bind(pattern.clone())
                .push(" OR r.description LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(ingredient_id) = self.ingredient_id {
            builder
                .push(" AND EXISTS (SELECT 1 FROM recipe_ingredients ri WHERE ri.recipe_id = r.id AND ri.ingredient_id = ")
                .push_bind(ingredient_id)
                .push(")");
        }
    }
}

pub struct Reports<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Reports<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// List the recipes matching a filter, newest first, each decorated with
    /// its ingredient count and total cost.
    #[instrument(skip(self), err)]
    pub async fn list(&mut self, filter: &RecipeFilter) -> Result<Vec<RecipeSummaryDBResponse>> {
        let mut builder = QueryBuilder::new(
            r#"
            SELECT r.id, r.title, r.cuisine, r.prep_minutes, r.cook_minutes, r.created_at,
                (SELECT COUNT(*) FROM recipe_ingredients ri WHERE ri.recipe_id = r.id) AS ingredient_count,
                (SELECT COALESCE(SUM(ri.price), 0.0) FROM recipe_ingredients ri WHERE ri.recipe_id = r.id) AS total_cost
            FROM recipes r
            WHERE 1=1
            "#,
        );
        filter.apply(&mut builder);
        builder.push(" ORDER BY r.created_at DESC, r.id DESC");

        let summaries = builder
            .build_query_as::<RecipeSummaryDBResponse>()
            .fetch_all(&mut *self.db)
            .await?;

        Ok(summaries)
    }

    /// Aggregate averages over the filtered set. An empty set yields zeros
    /// across the board.
    #[instrument(skip(self), err)]
    pub async fn stats(&mut self, filter: &RecipeFilter) -> Result<RecipeStatsDBResponse> {
        let mut builder = QueryBuilder::new(
            r#"
            WITH per_recipe AS (
                SELECT r.prep_minutes, r.cook_minutes,
                    (SELECT COUNT(*) FROM recipe_ingredients ri WHERE ri.recipe_id = r.id) AS ingredient_count,
                    (SELECT COALESCE(SUM(ri.price), 0.0) FROM recipe_ingredients ri WHERE ri.recipe_id = r.id) AS total_cost
                FROM recipes r
                WHERE 1=1
            "#,
        );
        filter.apply(&mut builder);
        builder.push(
            r#"
            )
            SELECT
                COALESCE(AVG(prep_minutes), 0.0) AS avg_prep_minutes,
                COALESCE(AVG(cook_minutes), 0.0) AS avg_cook_minutes,
                COALESCE(AVG(ingredient_count), 0.0) AS avg_ingredient_count,
                COALESCE(AVG(total_cost), 0.0) AS avg_total_cost
            FROM per_recipe
            "#,
        );

        let stats = builder
            .build_query_as::<RecipeStatsDBResponse>()
            .fetch_one(&mut *self.db)
            .await?;

        Ok(stats)
    }

    /// Distinct cuisines currently in use, for populating filter choices.
    #[instrument(skip(self), err)]
    pub async fn distinct_cuisines(&mut self) -> Result<Vec<String>> {
        let cuisines: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT cuisine FROM recipes WHERE cuisine IS NOT NULL ORDER BY cuisine",
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(cuisines)
    }
}
