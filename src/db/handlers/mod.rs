//! Repositories over the recipe store.
//!
//! Each repository borrows a live connection for the duration of a call and
//! opens its own transaction when an operation spans multiple rows. Handlers
//! never hold state beyond the borrowed connection.

pub mod associations;
pub mod ingredients;
pub mod ownership;
pub mod recipes;
pub mod reports;
pub mod users;
