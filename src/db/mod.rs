//! Database layer: typed models, repositories, and store error
//! classification.

pub mod errors;
pub mod handlers;
pub mod models;
