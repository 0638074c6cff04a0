//! Repository for the recipe lifecycle.
//!
//! Every multi-row mutation here runs inside a single transaction: either
//! all of its rows land or none do. Mutations on an existing recipe pass the
//! ownership guard before touching anything.

use crate::db::handlers::associations::RecipeIngredients;
use crate::db::handlers::ingredients::Ingredients;
use crate::db::handlers::ownership::require_owner;
use crate::db::models::associations::AssociationAttrs;
use crate::db::models::recipes::{RecipeCreateDBRequest, RecipeDBResponse, RecipeUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::{IngredientId, RecipeId, UserId};
use chrono::Utc;
use sqlx::{Connection, SqliteConnection};
use tracing::instrument;

pub struct Recipes<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Recipes<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Create a recipe together with its initial ingredient associations.
    ///
    /// Existing dictionary references are verified before linking; an unknown
    /// id aborts the whole creation, including the recipe row itself. New
    /// ingredient names are resolved through the dictionary inside the same
    /// transaction; blank new names are skipped rather than rejected.
    #[instrument(skip(self, request), fields(title = %request.title), err)]
    pub async fn create(
        &mut self,
        user_id: UserId,
        request: &RecipeCreateDBRequest,
    ) -> Result<RecipeDBResponse> {
        let title = request.title.trim();
        if title.is_empty() {
            return Err(Error::validation("recipe title must not be empty"));
        }

        let mut tx = self.db.begin().await?;

        let recipe = sqlx::query_as::<_, RecipeDBResponse>(
            r#"
            INSERT INTO recipes (user_id, title, description, cuisine, servings, prep_minutes, cook_minutes, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, title, description, cuisine, servings, prep_minutes, cook_minutes, created_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(request.description.as_deref())
        .bind(request.cuisine.as_deref())
        .bind(request.servings)
        .bind(request.prep_minutes.max(0))
        .bind(request.cook_minutes.max(0))
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        for existing in &request.existing_ingredients {
            if Ingredients::new(&mut tx)
                .get_by_id(existing.ingredient_id)
                .await?
                .is_none()
            {
                return Err(Error::NotFound {
                    resource: "ingredient",
                    id: existing.ingredient_id,
                });
            }
            RecipeIngredients::new(&mut tx)
                .upsert(recipe.id, existing.ingredient_id, &existing.attrs)
                .await?;
        }

        for input in &request.new_ingredients {
            if input.name.trim().is_empty() {
                continue;
            }
            let ingredient_id = Ingredients::new(&mut tx).resolve(&input.name).await?;
            RecipeIngredients::new(&mut tx)
                .upsert(recipe.id, ingredient_id, &input.attrs)
                .await?;
        }

        tx.commit().await?;

        Ok(recipe)
    }

    #[instrument(skip(self), err)]
    pub async fn get(&mut self, recipe_id: RecipeId) -> Result<Option<RecipeDBResponse>> {
        let recipe = sqlx::query_as::<_, RecipeDBResponse>(
            r#"
            SELECT id, user_id, title, description, cuisine, servings, prep_minutes, cook_minutes, created_at
            FROM recipes
            WHERE id = ?
            "#,
        )
        .bind(recipe_id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(recipe)
    }

    /// List a user's recipes, newest first.
    #[instrument(skip(self), err)]
    pub async fn list_for_user(&mut self, user_id: UserId) -> Result<Vec<RecipeDBResponse>> {
        let recipes = sqlx::query_as::<_, RecipeDBResponse>(
            r#"
            SELECT id, user_id, title, description, cuisine, servings, prep_minutes, cook_minutes, created_at
            FROM recipes
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(recipes)
    }

    /// Replace a recipe's own fields. Associations are untouched; negative
    /// minute values are clamped to zero.
    #[instrument(skip(self, request), err)]
    pub async fn update(
        &mut self,
        recipe_id: RecipeId,
        actor: UserId,
        request: &RecipeUpdateDBRequest,
    ) -> Result<RecipeDBResponse> {
        let title = request.title.trim();
        if title.is_empty() {
            return Err(Error::validation("recipe title must not be empty"));
        }

        require_owner(self.db, recipe_id, actor).await?;

        let recipe = sqlx::query_as::<_, RecipeDBResponse>(
            r#"
            UPDATE recipes
            SET title = ?, description = ?, cuisine = ?, servings = ?, prep_minutes = ?, cook_minutes = ?
            WHERE id = ?
            RETURNING id, user_id, title, description, cuisine, servings, prep_minutes, cook_minutes, created_at
            "#,
        )
        .bind(title)
        .bind(request.description.as_deref())
        .bind(request.cuisine.as_deref())
        .bind(request.servings)
        .bind(request.prep_minutes.max(0))
        .bind(request.cook_minutes.max(0))
        .bind(recipe_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(recipe)
    }

    /// Delete a recipe and everything scoped to it: associations first, then
    /// steps, then the recipe row. Dictionary entries survive.
    #[instrument(skip(self), err)]
    pub async fn delete(&mut self, recipe_id: RecipeId, actor: UserId) -> Result<()> {
        require_owner(self.db, recipe_id, actor).await?;

        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = ?")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM steps WHERE recipe_id = ?")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM recipes WHERE id = ?")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Attach an ingredient by name, resolving it through the dictionary
    /// inside the same transaction as the link write.
    #[instrument(skip(self, attrs), err)]
    pub async fn add_ingredient(
        &mut self,
        recipe_id: RecipeId,
        actor: UserId,
        name: &str,
        attrs: &AssociationAttrs,
    ) -> Result<IngredientId> {
        require_owner(self.db, recipe_id, actor).await?;

        let mut tx = self.db.begin().await?;

        let ingredient_id = Ingredients::new(&mut tx).resolve(name).await?;
        RecipeIngredients::new(&mut tx)
            .upsert(recipe_id, ingredient_id, attrs)
            .await?;

        tx.commit().await?;

        Ok(ingredient_id)
    }

    /// Detach an ingredient from a recipe the actor owns. Returns false when
    /// the pair was not linked.
    #[instrument(skip(self), err)]
    pub async fn remove_ingredient(
        &mut self,
        recipe_id: RecipeId,
        actor: UserId,
        ingredient_id: IngredientId,
    ) -> Result<bool> {
        require_owner(self.db, recipe_id, actor).await?;

        RecipeIngredients::new(self.db)
            .remove(recipe_id, ingredient_id)
            .await
    }
}
