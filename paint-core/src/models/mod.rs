mod catalog_entry;
mod cost;
mod estimate_result;
mod selection;

pub use catalog_entry::{CatalogEntry, Dimension, StepBundle};
pub use cost::{CostCalculation, DiscountConfig, DiscountType, WorkItem};
pub use estimate_result::{EstimateResult, LineItem};
pub use selection::EstimateSelection;
