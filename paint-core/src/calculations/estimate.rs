//! Drywall repair estimate calculator.
//!
//! The estimate is recomputed from scratch on every selection change and is
//! total: a half-filled selection still yields a renderable
//! result, with unset or unknown ids contributing nothing.
//!
//! # Calculation Order
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Quantity, clamped to at least 1 |
//! | 2    | Base cost from the size band (0 if unset) |
//! | 3    | Repair adder from the repair type (0 if unset) |
//! | 4    | Multiplier: orientation × access × finish × paint scope × protection (1.0 each if unset) |
//! | 5    | Labor subtotal: round((base + adder) × multiplier × quantity) |
//! | 6    | Modifiers total: Σ modifier amounts × quantity (not multiplied) |
//! | 7    | Subtotal: labor + modifiers |
//! | 8    | Tax: round(subtotal × tax rate) |
//! | 9    | Total: subtotal + tax |
//!
//! Rounding is to whole currency units, halves away from zero. Every sum and
//! product saturates at `Decimal::MAX`.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paint_core::calculations::EstimateCalculator;
//! use paint_core::{Dimension, EstimateSelection, reference_catalog};
//!
//! let selection = EstimateSelection::default()
//!     .with(Dimension::RepairType, "T2")
//!     .with(Dimension::Size, "S1")
//!     .with(Dimension::Orientation, "O1")
//!     .with(Dimension::Access, "A1")
//!     .with(Dimension::Finish, "F1")
//!     .with(Dimension::PaintScope, "P0")
//!     .with(Dimension::Protection, "C1")
//!     .with_quantity(3);
//!
//! let result = EstimateCalculator::new(reference_catalog()).calculate(&selection);
//!
//! assert_eq!(result.labor_subtotal, dec!(1650));
//! assert_eq!(result.tax, dec!(136));
//! assert_eq!(result.total, dec!(1786));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{round_whole, saturating_sum};
use crate::calculations::sku::build_sku;
use crate::catalog::{PricingCatalog, reference_catalog};
use crate::models::{CatalogEntry, Dimension, EstimateResult, EstimateSelection, LineItem};

/// Dimensions whose entries contribute a multiplier.
const MULTIPLIER_DIMENSIONS: [Dimension; 5] = [
    Dimension::Orientation,
    Dimension::Access,
    Dimension::Finish,
    Dimension::PaintScope,
    Dimension::Protection,
];

/// Calculator for drywall repair estimates over a borrowed catalog.
#[derive(Debug, Clone, Copy)]
pub struct EstimateCalculator<'a> {
    catalog: &'a PricingCatalog,
}

impl<'a> EstimateCalculator<'a> {
    pub fn new(catalog: &'a PricingCatalog) -> Self {
        Self { catalog }
    }

    /// Computes the estimate for the current selection. Never fails or
    /// panics; oversized amounts saturate at `Decimal::MAX`.
    pub fn calculate(
        &self,
        selection: &EstimateSelection,
    ) -> EstimateResult {
        let quantity = selection.effective_quantity();
        if quantity != selection.quantity {
            debug!(raw = selection.quantity, "quantity clamped to 1");
        }
        let qty = Decimal::from(quantity);

        let repair = self.resolve(selection, Dimension::RepairType);
        let size = self.resolve(selection, Dimension::Size);

        let base = size.map_or(Decimal::ZERO, |e| e.amount);
        let repair_adder = repair.map_or(Decimal::ZERO, |e| e.amount);
        let multiplier = self.multiplier(selection);

        let labor_subtotal = round_whole(
            base.saturating_add(repair_adder)
                .saturating_mul(multiplier)
                .saturating_mul(qty),
        );

        let modifiers = self.resolve_modifiers(selection);
        let modifiers_total =
            saturating_sum(modifiers.iter().map(|m| m.amount)).saturating_mul(qty);

        let subtotal = labor_subtotal.saturating_add(modifiers_total);
        let tax = round_whole(subtotal.saturating_mul(self.catalog.tax_rate()));
        let total = subtotal.saturating_add(tax);
        if total == Decimal::MAX {
            warn!(quantity, "estimate total saturated at the decimal maximum");
        }

        let bundle_id = self
            .resolve(selection, Dimension::PaintScope)
            .and_then(|scope| scope.bundle.clone())
            .unwrap_or_else(|| self.catalog.fallback_bundle().to_string());

        let mut items = Vec::with_capacity(modifiers.len() + 2);
        items.push(self.labor_line(selection, quantity, repair, size, labor_subtotal));
        items.extend(modifiers.iter().map(|modifier| LineItem {
            title: modifier.label.clone(),
            description: format!("{} × {}", modifier.id, quantity),
            amount: modifier.amount.saturating_mul(qty),
        }));
        items.push(self.tax_line(subtotal, tax));

        EstimateResult {
            sku: build_sku(selection),
            bundle_id,
            quantity,
            labor_subtotal,
            modifiers_total,
            subtotal,
            tax,
            total,
            items,
            required_missing: self.required_missing(selection),
        }
    }

    /// True when any required dimension is unset or not in the catalog.
    pub fn required_missing(
        &self,
        selection: &EstimateSelection,
    ) -> bool {
        Dimension::REQUIRED.iter().any(|&dimension| {
            self.catalog
                .lookup(dimension, selection.get(dimension))
                .is_none()
        })
    }

    /// Product of the multiplicative dimensions; unset ones count as 1.0.
    fn multiplier(
        &self,
        selection: &EstimateSelection,
    ) -> Decimal {
        MULTIPLIER_DIMENSIONS
            .iter()
            .map(|&dimension| {
                self.resolve(selection, dimension)
                    .map_or(Decimal::ONE, |e| e.multiplier)
            })
            .fold(Decimal::ONE, |acc, multiplier| acc.saturating_mul(multiplier))
    }

    fn resolve(
        &self,
        selection: &EstimateSelection,
        dimension: Dimension,
    ) -> Option<&'a CatalogEntry> {
        let id = selection.get(dimension)?;
        let entry = self.catalog.lookup(dimension, Some(id));
        if entry.is_none() {
            warn!(%dimension, id, "unknown catalog id, treated as unset");
        }
        entry
    }

    fn resolve_modifiers(
        &self,
        selection: &EstimateSelection,
    ) -> Vec<&'a CatalogEntry> {
        selection
            .modifiers
            .iter()
            .filter_map(|id| {
                let entry = self.catalog.lookup(Dimension::Modifier, Some(id.trim()));
                if entry.is_none() {
                    warn!(id = %id, "unknown modifier id, ignored");
                }
                entry
            })
            .collect()
    }

    fn labor_line(
        &self,
        selection: &EstimateSelection,
        quantity: i64,
        repair: Option<&CatalogEntry>,
        size: Option<&CatalogEntry>,
        amount: Decimal,
    ) -> LineItem {
        let repair_label = repair.map_or("Unspecified repair", |e| e.label.as_str());
        let size_label = size.map_or("unspecified size", |e| e.label.as_str());

        let details: Vec<&str> = MULTIPLIER_DIMENSIONS
            .iter()
            .filter_map(|&dimension| self.resolve_quiet(selection, dimension))
            .map(|e| e.label.as_str())
            .collect();
        let mut description = details.join(", ");
        let notes = selection.notes.trim();
        if !notes.is_empty() {
            if !description.is_empty() {
                description.push_str("; ");
            }
            description.push_str(notes);
        }

        LineItem {
            title: format!("{quantity} × {repair_label} ({size_label})"),
            description,
            amount,
        }
    }

    fn tax_line(
        &self,
        subtotal: Decimal,
        tax: Decimal,
    ) -> LineItem {
        let percent = (self.catalog.tax_rate() * Decimal::ONE_HUNDRED).normalize();
        LineItem {
            title: "Tax (estimate)".to_string(),
            description: format!("{percent}% of {subtotal}"),
            amount: tax,
        }
    }

    fn resolve_quiet(
        &self,
        selection: &EstimateSelection,
        dimension: Dimension,
    ) -> Option<&'a CatalogEntry> {
        self.catalog.lookup(dimension, selection.get(dimension))
    }
}

/// Computes an estimate against the built-in reference catalog.
pub fn compute_estimate(selection: &EstimateSelection) -> EstimateResult {
    EstimateCalculator::new(reference_catalog()).calculate(selection)
}

/// Whether a selection is still incomplete against the reference catalog.
pub fn required_missing(selection: &EstimateSelection) -> bool {
    EstimateCalculator::new(reference_catalog()).required_missing(selection)
}
