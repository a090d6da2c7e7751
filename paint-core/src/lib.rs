pub mod calculations;
pub mod catalog;
pub mod models;

pub use catalog::{CatalogError, CatalogTable, PricingCatalog, reference_catalog};
pub use models::*;
