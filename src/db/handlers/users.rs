//! Repository for user accounts.

use crate::db::models::users::{UserCreateDBRequest, UserDBResponse};
use crate::errors::{Error, Result};
use crate::types::UserId;
use chrono::Utc;
use sqlx::{Connection, SqliteConnection};
use tracing::instrument;

pub struct Users<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Users<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Create an account. The username is trimmed; a duplicate surfaces as a
    /// conflict.
    #[instrument(skip(self, request), fields(username = %request.username), err)]
    pub async fn create(&mut self, request: &UserCreateDBRequest) -> Result<UserDBResponse> {
        let username = request.username.trim();
        if username.is_empty() {
            return Err(Error::validation("username must not be empty"));
        }

        let user = sqlx::query_as::<_, UserDBResponse>(
            r#"
            INSERT INTO users (username, password_hash, created_at)
            VALUES (?, ?, ?)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(&request.password_hash)
        .bind(Utc::now())
        .fetch_one(&mut *self.db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_id(&mut self, id: UserId) -> Result<Option<UserDBResponse>> {
        let user = sqlx::query_as::<_, UserDBResponse>(
            "SELECT id, username, password_hash, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_username(&mut self, username: &str) -> Result<Option<UserDBResponse>> {
        let user = sqlx::query_as::<_, UserDBResponse>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self, username), err)]
    pub async fn update_username(&mut self, id: UserId, username: &str) -> Result<UserDBResponse> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(Error::validation("username must not be empty"));
        }

        let user = sqlx::query_as::<_, UserDBResponse>(
            "UPDATE users SET username = ? WHERE id = ? RETURNING id, username, password_hash, created_at",
        )
        .bind(trimmed)
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(Error::NotFound {
            resource: "user",
            id,
        })?;

        Ok(user)
    }

    #[instrument(skip(self, password_hash), err)]
    pub async fn update_password_hash(
        &mut self,
        id: UserId,
        password_hash: &str,
    ) -> Result<UserDBResponse> {
        let user = sqlx::query_as::<_, UserDBResponse>(
            "UPDATE users SET password_hash = ? WHERE id = ? RETURNING id, username, password_hash, created_at",
        )
        .bind(password_hash)
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(Error::NotFound {
            resource: "user",
            id,
        })?;

        Ok(user)
    }

    /// Delete an account and everything it owns: associations of its recipes,
    /// their steps, the recipes, then the user row. Dictionary entries
    /// survive since they are shared.
    #[instrument(skip(self), err)]
    pub async fn delete(&mut self, id: UserId) -> Result<bool> {
        let mut tx = self.db.begin().await?;

        sqlx::query(
            "DELETE FROM recipe_ingredients WHERE recipe_id IN (SELECT id FROM recipes WHERE user_id = ?)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM steps WHERE recipe_id IN (SELECT id FROM recipes WHERE user_id = ?)")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM recipes WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
