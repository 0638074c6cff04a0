//! Ownership guard shared by every recipe mutation.

use crate::db::models::recipes::RecipeDBResponse;
use crate::errors::{Error, Result};
use crate::types::{RecipeId, UserId};
use sqlx::SqliteConnection;
use tracing::instrument;

/// Load a recipe and verify the actor owns it.
///
/// A missing recipe is a not-found error; a recipe owned by someone else is a
/// permission error that names the actor. Every mutation path runs this guard
/// before touching any row.
#[instrument(skip(db), err)]
pub async fn require_owner(
    db: &mut SqliteConnection,
    recipe_id: RecipeId,
    actor: UserId,
) -> Result<RecipeDBResponse> {
    let recipe = sqlx::query_as::<_, RecipeDBResponse>(
        r#"
        SELECT id, user_id, title, description, cuisine, servings, prep_minutes, cook_minutes, created_at
        FROM recipes
        WHERE id = ?
        "#,
    )
    .bind(recipe_id)
    .fetch_optional(&mut *db)
    .await?
    .ok_or(Error::NotFound {
        resource: "recipe",
        id: recipe_id,
    })?;

    if recipe.user_id != actor {
        return Err(Error::PermissionDenied {
            resource: "recipe",
            id: recipe_id,
            actor,
        });
    }

    Ok(recipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_recipe, create_test_user};
    use sqlx::SqlitePool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_owner_passes_guard(pool: SqlitePool) {
        let user = create_test_user(&pool, "alice").await;
        let recipe = create_test_recipe(&pool, user.id, "Soup", None).await;

        let mut conn = pool.acquire().await.unwrap();
        let loaded = require_owner(&mut conn, recipe.id, user.id).await.unwrap();
        assert_eq!(loaded.id, recipe.id);
        assert_eq!(loaded.title, "Soup");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_non_owner_is_denied(pool: SqlitePool) {
        let alice = create_test_user(&pool, "alice").await;
        let mallory = create_test_user(&pool, "mallory").await;
        let recipe = create_test_recipe(&pool, alice.id, "Soup", None).await;

        let mut conn = pool.acquire().await.unwrap();
        let err = require_owner(&mut conn, recipe.id, mallory.id).await.unwrap_err();
        assert!(matches!(
            err,
            Error::PermissionDenied { resource: "recipe", .. }
        ));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_missing_recipe_is_not_found(pool: SqlitePool) {
        let user = create_test_user(&pool, "alice").await;

        let mut conn = pool.acquire().await.unwrap();
        let err = require_owner(&mut conn, 999, user.id).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "recipe", .. }));
    }
}
