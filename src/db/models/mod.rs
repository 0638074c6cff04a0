//! Database record models matching table schemas.
//!
//! Each model struct corresponds to a database table row (deriving
//! `sqlx::FromRow` for query results) or to a `*DBRequest` carrying the data
//! for an insert or update. Database models are distinct from whatever
//! presentation types a caller builds on top of them, so storage and
//! presentation can evolve independently.

pub mod associations;
pub mod ingredients;
pub mod recipes;
pub mod reports;
pub mod users;
