//! Common type definitions.
//!
//! All entity identifiers are SQLite integer rowids wrapped in type aliases:
//!
//! - [`UserId`]: account identifier
//! - [`RecipeId`]: recipe identifier
//! - [`IngredientId`]: dictionary entry identifier
//! - [`StepId`]: preparation step identifier

// Type aliases for IDs
pub type UserId = i64;
pub type RecipeId = i64;
pub type IngredientId = i64;
pub type StepId = i64;
