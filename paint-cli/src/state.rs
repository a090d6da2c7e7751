//! In-memory session state for one estimating run.
//!
//! The session holds the user's inputs only. Every derived figure is
//! recomputed from them on request, so nothing can go stale.

use paint_core::calculations::{
    BudgetStatus, CostCalculator, EstimateCalculator, Expectations, adjusted_cost, budget_status,
};
use paint_core::{
    CostCalculation, DiscountConfig, EstimateResult, EstimateSelection, PricingCatalog, WorkItem,
};
use rust_decimal::Decimal;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EstimateSession<'a> {
    catalog: &'a PricingCatalog,
    costs: CostCalculator,

    /// Current drywall repair selection.
    pub selection: EstimateSelection,
    pub expectations: Expectations,

    /// Cost pipeline inputs.
    pub work_items: Vec<WorkItem>,
    pub discount: DiscountConfig,
}

impl<'a> EstimateSession<'a> {
    pub fn new(
        catalog: &'a PricingCatalog,
        costs: CostCalculator,
    ) -> Self {
        Self {
            catalog,
            costs,
            selection: EstimateSelection::default(),
            expectations: Expectations::default(),
            work_items: Vec::new(),
            discount: DiscountConfig::default(),
        }
    }

    pub fn catalog(&self) -> &'a PricingCatalog {
        self.catalog
    }

    pub fn estimate(&self) -> EstimateResult {
        EstimateCalculator::new(self.catalog).calculate(&self.selection)
    }

    /// Adjusts `base`, or the current estimate total when `base` is `None`.
    pub fn adjusted(
        &self,
        base: Option<Decimal>,
    ) -> (Decimal, Decimal, BudgetStatus) {
        let base = base.unwrap_or_else(|| self.estimate().total);
        let adjusted = adjusted_cost(base, &self.expectations);
        let status = budget_status(adjusted, self.expectations.budget.as_ref());
        (base, adjusted, status)
    }

    /// Adds the current estimate to the work items as a single line titled
    /// with its SKU. Does nothing while the selection is incomplete.
    pub fn add_estimate_to_work_items(&mut self) -> bool {
        let estimate = self.estimate();
        if estimate.required_missing {
            debug!(sku = %estimate.sku, "incomplete estimate not added");
            return false;
        }
        self.work_items.push(WorkItem::new(estimate.sku, estimate.total));
        true
    }

    pub fn costs(&self) -> CostCalculation {
        self.costs.calculate(&self.work_items, &self.discount)
    }

    /// Clears all inputs for starting fresh.
    pub fn clear(&mut self) {
        self.selection = EstimateSelection::default();
        self.expectations = Expectations::default();
        self.work_items.clear();
        self.discount = DiscountConfig::default();
    }
}
