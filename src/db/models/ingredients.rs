//! Database models for the shared ingredient dictionary.

use crate::types::IngredientId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A dictionary entry. Names are stored trimmed and deduplicated by an exact
/// case-sensitive match.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IngredientDBResponse {
    pub id: IngredientId,
    pub name: String,
}
