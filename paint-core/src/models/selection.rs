use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Dimension;

/// The user's current choices for a drywall repair estimate.
///
/// Any required dimension may still be unset while the form is being filled
/// in. Modifiers are kept in a sorted set, so selection order never matters
/// and duplicates cannot occur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateSelection {
    pub repair_type: Option<String>,
    pub size: Option<String>,
    pub orientation: Option<String>,
    pub access: Option<String>,
    pub finish: Option<String>,
    pub paint_scope: Option<String>,
    pub protection: Option<String>,
    pub modifiers: BTreeSet<String>,
    /// Raw quantity as entered; see [`EstimateSelection::effective_quantity`].
    pub quantity: i64,
    pub notes: String,
}

impl Default for EstimateSelection {
    fn default() -> Self {
        Self {
            repair_type: None,
            size: None,
            orientation: None,
            access: None,
            finish: None,
            paint_scope: None,
            protection: None,
            modifiers: BTreeSet::new(),
            quantity: 1,
            notes: String::new(),
        }
    }
}

impl EstimateSelection {
    /// Returns the selected id for a single-choice dimension.
    ///
    /// Blank ids are reported as unset. Always `None` for
    /// [`Dimension::Modifier`]; use `modifiers` for those.
    pub fn get(
        &self,
        dimension: Dimension,
    ) -> Option<&str> {
        let slot = match dimension {
            Dimension::RepairType => &self.repair_type,
            Dimension::Size => &self.size,
            Dimension::Orientation => &self.orientation,
            Dimension::Access => &self.access,
            Dimension::Finish => &self.finish,
            Dimension::PaintScope => &self.paint_scope,
            Dimension::Protection => &self.protection,
            Dimension::Modifier => return None,
        };
        slot.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// Sets (or clears, with `None`) a single-choice dimension.
    /// Setting [`Dimension::Modifier`] adds the id to the modifier set instead.
    pub fn set(
        &mut self,
        dimension: Dimension,
        id: Option<String>,
    ) {
        let slot = match dimension {
            Dimension::RepairType => &mut self.repair_type,
            Dimension::Size => &mut self.size,
            Dimension::Orientation => &mut self.orientation,
            Dimension::Access => &mut self.access,
            Dimension::Finish => &mut self.finish,
            Dimension::PaintScope => &mut self.paint_scope,
            Dimension::Protection => &mut self.protection,
            Dimension::Modifier => {
                if let Some(id) = id {
                    self.modifiers.insert(id);
                }
                return;
            }
        };
        *slot = id;
    }

    /// Builder form of [`EstimateSelection::set`].
    pub fn with(
        mut self,
        dimension: Dimension,
        id: impl Into<String>,
    ) -> Self {
        self.set(dimension, Some(id.into()));
        self
    }

    pub fn with_quantity(
        mut self,
        quantity: i64,
    ) -> Self {
        self.quantity = quantity;
        self
    }

    /// Quantity clamped to a minimum of one.
    pub fn effective_quantity(&self) -> i64 {
        self.quantity.max(1)
    }

    /// Toggles a modifier on or off, mirroring a checkbox.
    pub fn toggle_modifier(
        &mut self,
        id: &str,
    ) {
        if !self.modifiers.remove(id) {
            self.modifiers.insert(id.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_selection_is_empty_with_quantity_one() {
        let selection = EstimateSelection::default();

        for dimension in Dimension::REQUIRED {
            assert_eq!(selection.get(dimension), None);
        }
        assert!(selection.modifiers.is_empty());
        assert_eq!(selection.quantity, 1);
    }

    #[test]
    fn blank_ids_read_as_unset() {
        let selection = EstimateSelection::default().with(Dimension::Size, "   ");

        assert_eq!(selection.get(Dimension::Size), None);
    }

    #[test]
    fn effective_quantity_clamps_to_one() {
        assert_eq!(EstimateSelection::default().with_quantity(0).effective_quantity(), 1);
        assert_eq!(EstimateSelection::default().with_quantity(-7).effective_quantity(), 1);
        assert_eq!(EstimateSelection::default().with_quantity(4).effective_quantity(), 4);
    }

    #[test]
    fn with_modifier_adds_to_set() {
        let selection = EstimateSelection::default()
            .with(Dimension::Modifier, "W2")
            .with(Dimension::Modifier, "W1")
            .with(Dimension::Modifier, "W2");

        let ids: Vec<&str> = selection.modifiers.iter().map(String::as_str).collect();
        assert_eq!(ids, vec!["W1", "W2"]);
    }

    #[test]
    fn toggle_modifier_adds_then_removes() {
        let mut selection = EstimateSelection::default();

        selection.toggle_modifier("W3");
        assert!(selection.modifiers.contains("W3"));

        selection.toggle_modifier("W3");
        assert!(selection.modifiers.is_empty());
    }

    #[test]
    fn set_none_clears_dimension() {
        let mut selection = EstimateSelection::default().with(Dimension::Finish, "F2");

        selection.set(Dimension::Finish, None);

        assert_eq!(selection.get(Dimension::Finish), None);
    }
}
