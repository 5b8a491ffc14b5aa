//! Business logic services for the Agri Planting Advisor

pub mod harvest;
pub mod planting;

pub use harvest::HarvestService;
pub use planting::PlantingService;
