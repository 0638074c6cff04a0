//! Repository for recipe-ingredient associations.
//!
//! An association is keyed by `(recipe_id, ingredient_id)`; writing the same
//! pair again replaces the attributes in place rather than producing a
//! second row.

use crate::db::models::associations::{AssociationAttrs, RecipeIngredientDBResponse};
use crate::errors::Result;
use crate::types::{IngredientId, RecipeId};
use sqlx::SqliteConnection;
use tracing::instrument;

pub struct RecipeIngredients<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> RecipeIngredients<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Attach an ingredient to a recipe, or replace the existing link's
    /// attributes if the pair is already present.
    #[instrument(skip(self, attrs), err)]
    pub async fn upsert(
        &mut self,
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
        attrs: &AssociationAttrs,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity, unit, price, preparation)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (recipe_id, ingredient_id) DO UPDATE SET
                quantity = excluded.quantity,
                unit = excluded.unit,
                price = excluded.price,
                preparation = excluded.preparation
            "#,
        )
        .bind(recipe_id)
        .bind(ingredient_id)
        .bind(attrs.quantity)
        .bind(attrs.unit.as_deref())
        .bind(attrs.price)
        .bind(attrs.preparation.as_deref())
        .execute(&mut *self.db)
        .await?;

        Ok(())
    }

    /// Detach an ingredient from a recipe. Returns false when the pair was
    /// not linked; the dictionary entry is left alone either way.
    #[instrument(skip(self), err)]
    pub async fn remove(
        &mut self,
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
    ) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = ? AND ingredient_id = ?")
                .bind(recipe_id)
                .bind(ingredient_id)
                .execute(&mut *self.db)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List a recipe's associations joined with their dictionary names,
    /// ordered by name.
    #[instrument(skip(self), err)]
    pub async fn list_for_recipe(
        &mut self,
        recipe_id: RecipeId,
    ) -> Result<Vec<RecipeIngredientDBResponse>> {
        let rows = sqlx::query_as::<_, RecipeIngredientDBResponse>(
            r#"
            SELECT ri.ingredient_id, i.name, ri.quantity, ri.unit, ri.price, ri.preparation
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = ?
            ORDER BY i.name
            "#,
        )
        .bind(recipe_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rows)
    }

    /// Sum of the recipe's non-null association prices. A recipe with no
    /// costed ingredients totals 0.
    #[instrument(skip(self), err)]
    pub async fn total_cost(&mut self, recipe_id: RecipeId) -> Result<f64> {
        let total: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(price), 0.0) FROM recipe_ingredients WHERE recipe_id = ?",
        )
        .bind(recipe_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(total)
    }
}
