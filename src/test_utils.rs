//! Shared helpers for database tests.

use crate::db::handlers::recipes::Recipes;
use crate::db::handlers::users::Users;
use crate::db::models::recipes::{RecipeCreateDBRequest, RecipeDBResponse};
use crate::db::models::users::{UserCreateDBRequest, UserDBResponse};
use crate::types::{RecipeId, UserId};
use sqlx::SqlitePool;

pub async fn create_test_user(pool: &SqlitePool, username: &str) -> UserDBResponse {
    let mut conn = pool.acquire().await.expect("acquire connection");
    Users::new(&mut conn)
        .create(&UserCreateDBRequest {
            username: username.to_string(),
            password_hash: "test-hash".to_string(),
        })
        .await
        .expect("create test user")
}

pub async fn create_test_recipe(
    pool: &SqlitePool,
    user_id: UserId,
    title: &str,
    cuisine: Option<&str>,
) -> RecipeDBResponse {
    let mut conn = pool.acquire().await.expect("acquire connection");
    Recipes::new(&mut conn)
        .create(
            user_id,
            &RecipeCreateDBRequest {
                title: title.to_string(),
                cuisine: cuisine.map(ToString::to_string),
                ..Default::default()
            },
        )
        .await
        .expect("create test recipe")
}

pub async fn add_test_step(pool: &SqlitePool, recipe_id: RecipeId, position: i64, body: &str) {
    sqlx::query("INSERT INTO steps (recipe_id, position, body) VALUES (?, ?, ?)")
        .bind(recipe_id)
        .bind(position)
        .bind(body)
        .execute(pool)
        .await
        .expect("insert test step");
}
