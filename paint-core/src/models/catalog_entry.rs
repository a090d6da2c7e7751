use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog dimension. Every entry belongs to exactly one dimension and its
/// `id` is unique within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    RepairType,
    Size,
    Orientation,
    Access,
    Finish,
    PaintScope,
    Protection,
    Modifier,
}

impl Dimension {
    /// Single-choice dimensions in SKU order. Modifiers are rendered between
    /// `PaintScope` and `Protection` but are not part of this list.
    pub const REQUIRED: [Dimension; 7] = [
        Self::RepairType,
        Self::Size,
        Self::Orientation,
        Self::Access,
        Self::Finish,
        Self::PaintScope,
        Self::Protection,
    ];

    pub const ALL: [Dimension; 8] = [
        Self::RepairType,
        Self::Size,
        Self::Orientation,
        Self::Access,
        Self::Finish,
        Self::PaintScope,
        Self::Protection,
        Self::Modifier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RepairType => "repair_type",
            Self::Size => "size",
            Self::Orientation => "orientation",
            Self::Access => "access",
            Self::Finish => "finish",
            Self::PaintScope => "paint_scope",
            Self::Protection => "protection",
            Self::Modifier => "modifier",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "repair_type" => Some(Self::RepairType),
            "size" => Some(Self::Size),
            "orientation" => Some(Self::Orientation),
            "access" => Some(Self::Access),
            "finish" => Some(Self::Finish),
            "paint_scope" => Some(Self::PaintScope),
            "protection" => Some(Self::Protection),
            "modifier" => Some(Self::Modifier),
            _ => None,
        }
    }

    /// The id prefix used by this dimension; unset dimensions render in the
    /// SKU as `"<prefix>?"`.
    pub fn sku_prefix(&self) -> &'static str {
        match self {
            Self::RepairType => "T",
            Self::Size => "S",
            Self::Orientation => "O",
            Self::Access => "A",
            Self::Finish => "F",
            Self::PaintScope => "P",
            Self::Protection => "C",
            Self::Modifier => "W",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::RepairType => "Repair type",
            Self::Size => "Size",
            Self::Orientation => "Orientation",
            Self::Access => "Access",
            Self::Finish => "Finish",
            Self::PaintScope => "Paint scope",
            Self::Protection => "Protection",
            Self::Modifier => "Modifier",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a catalog table.
///
/// How `amount` is read depends on the dimension: the base cost for a size
/// band, the flat adder for a repair type, the flat add-on for a modifier.
/// It is ignored for the purely multiplicative dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub label: String,
    #[serde(default = "default_multiplier")]
    pub multiplier: Decimal,
    #[serde(default)]
    pub amount: Decimal,
    /// Step bundle reference; only meaningful for paint scopes.
    #[serde(default)]
    pub bundle: Option<String>,
}

fn default_multiplier() -> Decimal {
    Decimal::ONE
}

impl CatalogEntry {
    /// An entry with a neutral multiplier and no amount.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            multiplier: Decimal::ONE,
            amount: Decimal::ZERO,
            bundle: None,
        }
    }

    pub fn with_multiplier(
        mut self,
        multiplier: Decimal,
    ) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_amount(
        mut self,
        amount: Decimal,
    ) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_bundle(
        mut self,
        bundle: impl Into<String>,
    ) -> Self {
        self.bundle = Some(bundle.into());
        self
    }
}

/// A named checklist of work steps attached to a paint scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepBundle {
    pub id: String,
    pub label: String,
    pub steps: Vec<String>,
}
