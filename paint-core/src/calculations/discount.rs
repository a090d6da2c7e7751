//! Discount, profit, tax and fee pipeline for a list of work items.
//!
//! # Pipeline
//!
//! | Step | Value | Computation |
//! |------|-------|-------------|
//! | 1 | subtotal | Σ work item costs |
//! | 2 | discount amount | subtotal × value / 100, or the flat value (clamped first) |
//! | 3 | total after discount | subtotal − discount |
//! | 4 | profit | total after discount × profit margin % |
//! | 5 | total with profit | total after discount + profit |
//! | 6 | taxes | total with profit × tax % |
//! | 7 | payment / company fees | fee base × fee % |
//! | 8 | total with taxes | total with profit + taxes + fees |
//!
//! The fee base is the total with profit, or that plus taxes, depending on
//! [`FeeBasis`]. Each monetary step is rounded half-up to cents.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paint_core::calculations::{CostCalculator, CostConfig};
//! use paint_core::{DiscountConfig, WorkItem};
//!
//! let items = vec![
//!     WorkItem::new("Walls", dec!(600)),
//!     WorkItem::new("Trim", dec!(400)),
//! ];
//!
//! let calculator = CostCalculator::new(CostConfig::default()).unwrap();
//! let costs = calculator.calculate(&items, &DiscountConfig::percentage(dec!(10)));
//!
//! assert_eq!(costs.discount_amount, dec!(100.00));
//! assert_eq!(costs.total_with_profit, dec!(1080.00));
//! assert_eq!(costs.total_with_taxes, dec!(1201.50));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{clamp, round_half_up, saturating_sum};
use crate::models::{CostCalculation, DiscountConfig, DiscountType, WorkItem};

/// Errors raised when validating a [`CostConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CostConfigError {
    #[error("{field} must be between 0 and 100, got {value}")]
    InvalidPercent { field: &'static str, value: Decimal },
}

/// Which running total the payment and company fees are charged on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeBasis {
    #[default]
    TotalWithProfit,
    TotalWithTax,
}

/// Business percentages for the pipeline. All values are percents (8.25
/// means 8.25%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    pub profit_margin_percent: Decimal,
    pub tax_rate_percent: Decimal,
    pub payment_fee_percent: Decimal,
    pub company_fee_percent: Decimal,
    pub fee_basis: FeeBasis,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            profit_margin_percent: dec!(20),
            tax_rate_percent: dec!(8.25),
            payment_fee_percent: dec!(3),
            company_fee_percent: dec!(0),
            fee_basis: FeeBasis::TotalWithProfit,
        }
    }
}

impl CostConfig {
    /// Validates that every percentage lies in `[0, 100]`.
    ///
    /// # Errors
    ///
    /// Returns [`CostConfigError::InvalidPercent`] naming the first field out
    /// of range.
    pub fn validate(&self) -> Result<(), CostConfigError> {
        let fields = [
            ("profit_margin_percent", self.profit_margin_percent),
            ("tax_rate_percent", self.tax_rate_percent),
            ("payment_fee_percent", self.payment_fee_percent),
            ("company_fee_percent", self.company_fee_percent),
        ];
        for (field, value) in fields {
            if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
                return Err(CostConfigError::InvalidPercent { field, value });
            }
        }
        Ok(())
    }
}

/// Clamps a raw discount value into its valid range.
///
/// Percentages are limited to `[0, 100]`; flat amounts to `[0, subtotal]`
/// (a negative subtotal allows no discount at all).
///
/// ```
/// use rust_decimal_macros::dec;
/// use paint_core::DiscountType;
/// use paint_core::calculations::validate_discount_value;
///
/// assert_eq!(validate_discount_value(dec!(110), DiscountType::Percentage, dec!(1000)), dec!(100));
/// assert_eq!(validate_discount_value(dec!(1500), DiscountType::Amount, dec!(1000)), dec!(1000));
/// assert_eq!(validate_discount_value(dec!(-5), DiscountType::Amount, dec!(1000)), dec!(0));
/// ```
pub fn validate_discount_value(
    value: Decimal,
    discount_type: DiscountType,
    subtotal: Decimal,
) -> Decimal {
    let max = match discount_type {
        DiscountType::Percentage => Decimal::ONE_HUNDRED,
        DiscountType::Amount => subtotal.max(Decimal::ZERO),
    };
    clamp(value, Decimal::ZERO, max)
}

/// Runs the cost pipeline with a validated configuration.
#[derive(Debug, Clone)]
pub struct CostCalculator {
    config: CostConfig,
}

impl CostCalculator {
    /// # Errors
    ///
    /// Returns [`CostConfigError`] if the configuration is out of range.
    pub fn new(config: CostConfig) -> Result<Self, CostConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CostConfig {
        &self.config
    }

    /// Computes every field of the pipeline. Never fails or panics; oversized
    /// amounts saturate at the `Decimal` bounds.
    pub fn calculate(
        &self,
        work_items: &[WorkItem],
        discount: &DiscountConfig,
    ) -> CostCalculation {
        let subtotal = round_half_up(saturating_sum(work_items.iter().map(|item| item.cost)));

        let discount_amount = self.discount_amount(subtotal, discount);
        let total_after_discount = round_half_up(subtotal.saturating_sub(discount_amount));

        let profit_amount = percent_of(total_after_discount, self.config.profit_margin_percent);
        let total_with_profit = round_half_up(total_after_discount.saturating_add(profit_amount));

        let taxes_to_pay = percent_of(total_with_profit, self.config.tax_rate_percent);

        let fee_base = match self.config.fee_basis {
            FeeBasis::TotalWithProfit => total_with_profit,
            FeeBasis::TotalWithTax => total_with_profit.saturating_add(taxes_to_pay),
        };
        let payment_system_fee = percent_of(fee_base, self.config.payment_fee_percent);
        let company_fees_total = percent_of(fee_base, self.config.company_fee_percent);

        let total_with_taxes = round_half_up(saturating_sum([
            total_with_profit,
            taxes_to_pay,
            payment_system_fee,
            company_fees_total,
        ]));

        CostCalculation {
            subtotal,
            discount_amount,
            total_after_discount,
            profit_amount,
            total_with_profit,
            taxes_to_pay,
            payment_system_fee,
            company_fees_total,
            total_with_taxes,
        }
    }

    fn discount_amount(
        &self,
        subtotal: Decimal,
        discount: &DiscountConfig,
    ) -> Decimal {
        let value = validate_discount_value(discount.value, discount.discount_type, subtotal);
        if value != discount.value {
            debug!(
                raw = %discount.value,
                clamped = %value,
                kind = discount.discount_type.as_str(),
                "discount value clamped"
            );
        }

        let amount = match discount.discount_type {
            DiscountType::Percentage => percent_of(subtotal, value),
            DiscountType::Amount => round_half_up(value),
        };
        // Rounding a percentage of a negative subtotal must not go below zero.
        clamp(amount, Decimal::ZERO, subtotal.max(Decimal::ZERO))
    }
}

/// Runs the pipeline with [`CostConfig::default`].
pub fn calculate_costs(
    work_items: &[WorkItem],
    discount: &DiscountConfig,
) -> CostCalculation {
    CostCalculator {
        config: CostConfig::default(),
    }
    .calculate(work_items, discount)
}

fn percent_of(
    amount: Decimal,
    percent: Decimal,
) -> Decimal {
    round_half_up(amount.saturating_mul(percent / Decimal::ONE_HUNDRED))
}
