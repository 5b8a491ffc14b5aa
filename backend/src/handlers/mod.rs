//! HTTP handlers for the Agri Planting Advisor

pub mod harvest;
pub mod health;
pub mod planting;

pub use harvest::*;
pub use health::*;
pub use planting::*;
