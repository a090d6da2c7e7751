use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single display line of an estimate breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub title: String,
    pub description: String,
    pub amount: Decimal,
}

/// Derived drywall estimate. Never persisted; recomputed on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub sku: String,
    pub bundle_id: String,
    /// Quantity actually used, after clamping.
    pub quantity: i64,
    pub labor_subtotal: Decimal,
    pub modifiers_total: Decimal,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    /// Labor line, one line per resolved modifier, then the tax line.
    pub items: Vec<LineItem>,
    /// True while any required dimension is unset or unknown. A result with
    /// this flag set is a live preview, not a final quote.
    pub required_missing: bool,
}
