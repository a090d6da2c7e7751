//! Pricing calculators.
//!
//! Every calculator is a pure function of its inputs and the borrowed
//! catalog or configuration: drywall SKU estimates, customer-expectation
//! adjustments, the discount/fee pipeline and area-based painting.

pub mod common;
pub mod discount;
pub mod estimate;
pub mod expectations;
pub mod painting;
pub mod sku;

pub use discount::{
    CostCalculator, CostConfig, CostConfigError, FeeBasis, calculate_costs,
    validate_discount_value,
};
pub use estimate::{EstimateCalculator, compute_estimate, required_missing};
pub use expectations::{
    BudgetRange, BudgetStatus, ExpectationOption, Expectations, Slider, adjusted_cost,
    budget_status,
};
pub use painting::{
    PaintingCalculator, PaintingError, PaintingJob, PaintingRates, PaintingResult, Placement,
    ProductionEntry, ProductionLog, Surface,
};
pub use sku::build_sku;
