//! # larder: Transactional Recipe Catalog Data Layer
//!
//! `larder` is the persistence core of a multi-user recipe catalog. It owns
//! the schema, the transactional lifecycle of recipes and their ingredient
//! associations, a deduplicating ingredient dictionary shared by all users,
//! and a composable filter engine that backs both search listings and
//! aggregate reports.
//!
//! ## Overview
//!
//! Users own recipes; recipes reference ingredients through a link table that
//! carries per-recipe attributes (quantity, unit, price, preparation notes).
//! Ingredient names live in a single shared dictionary: attaching "Tomato" to
//! two different recipes produces one dictionary row and two links. Because a
//! recipe spans rows in several tables, every multi-row mutation runs inside
//! one transaction so that no partial recipe is ever observable.
//!
//! ### Core Components
//!
//! The **database layer** ([`db`]) uses the repository pattern. Each entity
//! has a handler that borrows a live connection and exposes typed operations:
//! [`db::handlers::users::Users`] for accounts,
//! [`db::handlers::ingredients::Ingredients`] for the dictionary,
//! [`db::handlers::recipes::Recipes`] for the recipe lifecycle,
//! [`db::handlers::associations::RecipeIngredients`] for the link table, and
//! [`db::handlers::reports::Reports`] for filtered search and aggregates.
//! Recipe mutations pass the ownership guard in
//! [`db::handlers::ownership`] before touching any row.
//!
//! The **error taxonomy** ([`errors`]) classifies every failure into
//! validation, not-found, permission, conflict, or database outcomes so
//! callers can map them to user-facing responses without inspecting store
//! internals.
//!
//! ## Usage
//!
//! ```no_run
//! use larder::db::handlers::recipes::Recipes;
//! use larder::db::models::recipes::RecipeCreateDBRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = larder::Config::load("config.yaml")?;
//!     let pool = larder::connect(&config).await?;
//!
//!     let mut conn = pool.acquire().await?;
//!     let recipe = Recipes::new(&mut conn)
//!         .create(
//!             1,
//!             &RecipeCreateDBRequest {
//!                 title: "Tomato Soup".into(),
//!                 ..Default::default()
//!             },
//!         )
//!         .await?;
//!     println!("created recipe {}", recipe.id);
//!     Ok(())
//! }
//! ```

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

pub mod config;
pub mod db;
pub mod errors;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use errors::{Error, Result};

/// Embedded schema migrations, applied on connect.
pub fn migrator() -> Migrator {
    sqlx::migrate!("./migrations")
}

/// Open the pool described by the configuration and bring the schema up to
/// date. Foreign key enforcement is always on.
pub async fn connect(config: &Config) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.pool.max_connections)
        .acquire_timeout(Duration::from_secs(config.pool.acquire_timeout_seconds))
        .connect_with(options)
        .await?;

    migrator().run(&pool).await?;
    info!(url = %config.database.url, "database ready");

    Ok(pool)
}
