//! Repository for the shared ingredient dictionary.
//!
//! The dictionary owns the deduplicated set of ingredient names. Entries are
//! shared across recipes and are never deleted implicitly by recipe
//! operations.

use crate::db::errors::DbError;
use crate::db::models::ingredients::IngredientDBResponse;
use crate::errors::{Error, Result};
use crate::types::IngredientId;
use sqlx::{Connection, SqliteConnection};
use tracing::instrument;

pub struct Ingredients<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Ingredients<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Resolve a name to a dictionary id, inserting the entry if absent.
    ///
    /// The name is trimmed first; matching is exact and case-sensitive
    /// against the stored trimmed name. The insert-if-absent-then-lookup
    /// sequence is idempotent under the unique index on `ingredients.name`:
    /// losing a race to a concurrent resolve of the same new name surfaces as
    /// a unique violation, which is recovered by re-looking up the winner's
    /// row.
    #[instrument(skip(self), err)]
    pub async fn resolve(&mut self, name: &str) -> Result<IngredientId> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::validation("ingredient name must not be empty"));
        }

        if let Some(id) = self.lookup(trimmed).await? {
            return Ok(id);
        }

        let inserted: std::result::Result<i64, sqlx::Error> =
            sqlx::query_scalar("INSERT INTO ingredients (name) VALUES (?) RETURNING id")
                .bind(trimmed)
                .fetch_one(&mut *self.db)
                .await;

        match inserted {
            Ok(id) => Ok(id),
            Err(err) => match DbError::from(err) {
                // Lost the insert race; the winner's row exists now
                DbError::UniqueViolation { .. } => match self.lookup(trimmed).await? {
                    Some(id) => Ok(id),
                    None => Err(Error::Conflict {
                        message: format!("ingredient {trimmed:?} conflicted but is not present"),
                    }),
                },
                other => Err(Error::from(other)),
            },
        }
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_id(&mut self, id: IngredientId) -> Result<Option<IngredientDBResponse>> {
        let ingredient =
            sqlx::query_as::<_, IngredientDBResponse>("SELECT id, name FROM ingredients WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *self.db)
                .await?;

        Ok(ingredient)
    }

    /// List the whole dictionary, ordered by name ascending.
    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<IngredientDBResponse>> {
        let ingredients = sqlx::query_as::<_, IngredientDBResponse>(
            "SELECT id, name FROM ingredients ORDER BY name",
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(ingredients)
    }

    /// Rename a dictionary entry. The new name is trimmed; a duplicate name
    /// surfaces as a conflict.
    #[instrument(skip(self, name), err)]
    pub async fn rename(&mut self, id: IngredientId, name: &str) -> Result<IngredientDBResponse> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::validation("ingredient name must not be empty"));
        }

        let ingredient = sqlx::query_as::<_, IngredientDBResponse>(
            "UPDATE ingredients SET name = ? WHERE id = ? RETURNING id, name",
        )
        .bind(trimmed)
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(Error::NotFound {
            resource: "ingredient",
            id,
        })?;

        Ok(ingredient)
    }

    /// Delete a dictionary entry together with every association that
    /// references it. Recipes themselves are untouched.
    #[instrument(skip(self), err)]
    pub async fn delete(&mut self, id: IngredientId) -> Result<bool> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM recipe_ingredients WHERE ingredient_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM ingredients WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    async fn lookup(&mut self, trimmed: &str) -> Result<Option<IngredientId>> {
        let id: Option<i64> = sqlx::query_scalar("SELECT id FROM ingredients WHERE name = ?")
            .bind(trimmed)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::SqlitePool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_resolve_creates_entry_once(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut dict = Ingredients::new(&mut conn);

        let first = dict.resolve("Tomato").await.unwrap();
        let second = dict.resolve("Tomato").await.unwrap();
        assert_eq!(first, second);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredients")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_resolve_trims_surrounding_whitespace(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut dict = Ingredients::new(&mut conn);

        let first = dict.resolve("Tomato").await.unwrap();
        let second = dict.resolve("  Tomato  ").await.unwrap();
        assert_eq!(first, second);

        let stored = dict.get_by_id(first).await.unwrap().unwrap();
        assert_eq!(stored.name, "Tomato");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_resolve_is_case_sensitive(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut dict = Ingredients::new(&mut conn);

        let lower = dict.resolve("tomato").await.unwrap();
        let upper = dict.resolve("Tomato").await.unwrap();
        assert_ne!(lower, upper);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_resolve_rejects_blank_name(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut dict = Ingredients::new(&mut conn);

        let err = dict.resolve("   ").await.unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredients")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_orders_by_name(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut dict = Ingredients::new(&mut conn);

        dict.resolve("Salt").await.unwrap();
        dict.resolve("Basil").await.unwrap();
        dict.resolve("Tomato").await.unwrap();

        let names: Vec<String> = dict.list().await.unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Basil", "Salt", "Tomato"]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_rename_conflicts_with_existing_name(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut dict = Ingredients::new(&mut conn);

        let salt = dict.resolve("Salt").await.unwrap();
        dict.resolve("Pepper").await.unwrap();

        let err = dict.rename(salt, "Pepper").await.unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));

        let renamed = dict.rename(salt, " Sea Salt ").await.unwrap();
        assert_eq!(renamed.name, "Sea Salt");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_missing_entry_is_noop(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut dict = Ingredients::new(&mut conn);

        assert!(!dict.delete(42).await.unwrap());
    }
}
