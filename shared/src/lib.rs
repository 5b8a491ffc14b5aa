//! Shared types and core logic for the Agri Planting Advisor
//!
//! This crate contains the domain models, the forecast aggregation and
//! the planting suitability core used by the backend. Nothing in here
//! performs I/O; everything is deterministic given its inputs.

pub mod forecast;
pub mod models;
pub mod planting;
pub mod types;

pub use models::*;
pub use types::*;
