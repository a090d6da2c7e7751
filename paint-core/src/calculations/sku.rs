//! SKU composition for drywall repair selections.
//!
//! A SKU is the selection's ids joined by spaces in a fixed dimension order:
//!
//! | Position | Dimension    | Placeholder |
//! |----------|--------------|-------------|
//! | 1        | Repair type  | `T?`        |
//! | 2        | Size         | `S?`        |
//! | 3        | Orientation  | `O?`        |
//! | 4        | Access       | `A?`        |
//! | 5        | Finish       | `F?`        |
//! | 6        | Paint scope  | `P?`        |
//! | 7        | Modifiers    | omitted when none selected |
//! | 8        | Protection   | `C?`        |
//!
//! Modifiers render as `(W1,W2)`, sorted by id so the SKU does not depend on
//! the order in which they were picked.
//!
//! # Example
//!
//! ```
//! use paint_core::calculations::build_sku;
//! use paint_core::{Dimension, EstimateSelection};
//!
//! let selection = EstimateSelection::default()
//!     .with(Dimension::RepairType, "T2")
//!     .with(Dimension::Size, "S1")
//!     .with(Dimension::Modifier, "W2")
//!     .with(Dimension::Modifier, "W1");
//!
//! assert_eq!(build_sku(&selection), "T2 S1 O? A? F? P? (W1,W2) C?");
//! ```

use crate::models::{Dimension, EstimateSelection};

/// Composes the SKU string for a selection. Never fails.
pub fn build_sku(selection: &EstimateSelection) -> String {
    let mut tokens: Vec<String> = Vec::with_capacity(Dimension::REQUIRED.len() + 1);

    for dimension in Dimension::REQUIRED {
        if dimension == Dimension::Protection {
            if let Some(modifiers) = modifier_token(selection) {
                tokens.push(modifiers);
            }
        }
        tokens.push(dimension_token(selection, dimension));
    }

    tokens.join(" ")
}

fn dimension_token(
    selection: &EstimateSelection,
    dimension: Dimension,
) -> String {
    match selection.get(dimension) {
        Some(id) => id.to_string(),
        None => format!("{}?", dimension.sku_prefix()),
    }
}

fn modifier_token(selection: &EstimateSelection) -> Option<String> {
    // BTreeSet iteration is already lexicographic.
    let ids: Vec<&str> = selection
        .modifiers
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .collect();

    if ids.is_empty() {
        None
    } else {
        Some(format!("({})", ids.join(",")))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn full_selection() -> EstimateSelection {
        EstimateSelection::default()
            .with(Dimension::RepairType, "T2")
            .with(Dimension::Size, "S1")
            .with(Dimension::Orientation, "O1")
            .with(Dimension::Access, "A1")
            .with(Dimension::Finish, "F1")
            .with(Dimension::PaintScope, "P0")
            .with(Dimension::Protection, "C1")
    }

    #[test]
    fn empty_selection_is_all_placeholders() {
        let sku = build_sku(&EstimateSelection::default());

        assert_eq!(sku, "T? S? O? A? F? P? C?");
    }

    #[test]
    fn full_selection_without_modifiers_omits_modifier_token() {
        let sku = build_sku(&full_selection());

        assert_eq!(sku, "T2 S1 O1 A1 F1 P0 C1");
    }

    #[test]
    fn modifiers_sit_between_paint_scope_and_protection() {
        let selection = full_selection().with(Dimension::Modifier, "W3");

        assert_eq!(build_sku(&selection), "T2 S1 O1 A1 F1 P0 (W3) C1");
    }

    #[test]
    fn modifier_order_does_not_depend_on_selection_order() {
        let forward = full_selection()
            .with(Dimension::Modifier, "W1")
            .with(Dimension::Modifier, "W2");
        let reverse = full_selection()
            .with(Dimension::Modifier, "W2")
            .with(Dimension::Modifier, "W1");

        assert_eq!(build_sku(&forward), build_sku(&reverse));
        assert!(build_sku(&forward).contains("(W1,W2)"));
    }

    #[test]
    fn partial_selection_mixes_ids_and_placeholders() {
        let selection = EstimateSelection::default()
            .with(Dimension::Size, "S3")
            .with(Dimension::Finish, "F2");

        assert_eq!(build_sku(&selection), "T? S3 O? A? F2 P? C?");
    }

    #[test]
    fn unknown_ids_are_emitted_verbatim() {
        let selection = EstimateSelection::default().with(Dimension::RepairType, "T99");

        assert!(build_sku(&selection).starts_with("T99 "));
    }

    #[test]
    fn blank_modifier_ids_are_skipped() {
        let selection = full_selection().with(Dimension::Modifier, "");

        assert_eq!(build_sku(&selection), "T2 S1 O1 A1 F1 P0 C1");
    }
}
