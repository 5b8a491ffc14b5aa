//! Domain models for the Agri Planting Advisor

mod crop;
mod recommendation;
mod rules;
mod weather;

pub use crop::*;
pub use recommendation::*;
pub use rules::*;
pub use weather::*;
