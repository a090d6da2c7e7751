//! Customer-expectation cost adjustment.
//!
//! Four independent sliders each select one option from a fixed, ordered
//! list. Their multipliers compound:
//!
//! ```text
//! adjusted = base × material × velocity × detail × warranty
//! ```
//!
//! An optional budget range is compared against the adjusted cost. The
//! comparison is advisory and never changes the price.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paint_core::calculations::{Expectations, adjusted_cost};
//!
//! let expectations = Expectations {
//!     material_quality: 2, // Premium, 1.20
//!     velocity: 3,         // Rush, 1.30
//!     ..Expectations::default()
//! };
//!
//! assert_eq!(adjusted_cost(dec!(1000), &expectations), dec!(1560.00));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;

/// One position on a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectationOption {
    pub label: &'static str,
    pub multiplier: Decimal,
}

const fn option(
    label: &'static str,
    multiplier: Decimal,
) -> ExpectationOption {
    ExpectationOption { label, multiplier }
}

pub const MATERIAL_QUALITY_OPTIONS: [ExpectationOption; 4] = [
    option("Economy", dec!(0.85)),
    option("Standard", dec!(1.00)),
    option("Premium", dec!(1.20)),
    option("Luxury", dec!(1.45)),
];

pub const VELOCITY_OPTIONS: [ExpectationOption; 4] = [
    option("Flexible", dec!(0.95)),
    option("Standard", dec!(1.00)),
    option("Expedited", dec!(1.15)),
    option("Rush", dec!(1.30)),
];

pub const PROJECT_DETAIL_OPTIONS: [ExpectationOption; 4] = [
    option("Basic", dec!(0.90)),
    option("Standard", dec!(1.00)),
    option("Detailed", dec!(1.15)),
    option("Meticulous", dec!(1.35)),
];

pub const WORKMANSHIP_OPTIONS: [ExpectationOption; 4] = [
    option("6 months", dec!(1.00)),
    option("12 months", dec!(1.05)),
    option("24 months", dec!(1.10)),
    option("36 months", dec!(1.18)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slider {
    MaterialQuality,
    Velocity,
    ProjectDetails,
    WorkmanshipMonths,
}

impl Slider {
    pub const ALL: [Slider; 4] = [
        Self::MaterialQuality,
        Self::Velocity,
        Self::ProjectDetails,
        Self::WorkmanshipMonths,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::MaterialQuality => "Material quality",
            Self::Velocity => "Velocity",
            Self::ProjectDetails => "Project details",
            Self::WorkmanshipMonths => "Workmanship warranty",
        }
    }

    pub fn options(&self) -> &'static [ExpectationOption] {
        match self {
            Self::MaterialQuality => &MATERIAL_QUALITY_OPTIONS,
            Self::Velocity => &VELOCITY_OPTIONS,
            Self::ProjectDetails => &PROJECT_DETAIL_OPTIONS,
            Self::WorkmanshipMonths => &WORKMANSHIP_OPTIONS,
        }
    }

    /// Option at `index`; indices past the end clamp to the last option.
    pub fn option_at(
        &self,
        index: usize,
    ) -> &'static ExpectationOption {
        let options = self.options();
        &options[index.min(options.len() - 1)]
    }
}

/// Inclusive budget range stated by the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: Decimal,
    pub max: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    NotSet,
    Below,
    Within,
    Above,
}

impl BudgetStatus {
    pub fn is_out_of_budget(&self) -> bool {
        matches!(self, Self::Below | Self::Above)
    }
}

/// Slider positions plus the optional budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expectations {
    pub material_quality: usize,
    pub velocity: usize,
    pub project_details: usize,
    pub workmanship_months: usize,
    pub budget: Option<BudgetRange>,
}

impl Default for Expectations {
    /// Every slider on its neutral (1.00) option.
    fn default() -> Self {
        Self {
            material_quality: 1,
            velocity: 1,
            project_details: 1,
            workmanship_months: 0,
            budget: None,
        }
    }
}

impl Expectations {
    pub fn index(
        &self,
        slider: Slider,
    ) -> usize {
        match slider {
            Slider::MaterialQuality => self.material_quality,
            Slider::Velocity => self.velocity,
            Slider::ProjectDetails => self.project_details,
            Slider::WorkmanshipMonths => self.workmanship_months,
        }
    }

    pub fn selected(
        &self,
        slider: Slider,
    ) -> &'static ExpectationOption {
        slider.option_at(self.index(slider))
    }

    /// Product of the four selected multipliers.
    pub fn combined_multiplier(&self) -> Decimal {
        Slider::ALL
            .iter()
            .map(|&slider| self.selected(slider).multiplier)
            .fold(Decimal::ONE, |acc, m| acc.saturating_mul(m))
    }
}

/// Applies the expectation multipliers to a base cost, rounded to cents.
/// Saturates at the `Decimal` bounds.
pub fn adjusted_cost(
    base_cost: Decimal,
    expectations: &Expectations,
) -> Decimal {
    round_half_up(base_cost.saturating_mul(expectations.combined_multiplier()))
}

/// Compares an adjusted cost with an inclusive budget range.
///
/// A range given with `min > max` is read with its bounds swapped.
pub fn budget_status(
    adjusted: Decimal,
    budget: Option<&BudgetRange>,
) -> BudgetStatus {
    let Some(budget) = budget else {
        return BudgetStatus::NotSet;
    };
    let (low, high) = if budget.min <= budget.max {
        (budget.min, budget.max)
    } else {
        (budget.max, budget.min)
    };

    if adjusted < low {
        BudgetStatus::Below
    } else if adjusted > high {
        BudgetStatus::Above
    } else {
        BudgetStatus::Within
    }
}
