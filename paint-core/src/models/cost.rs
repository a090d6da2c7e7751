use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    #[default]
    Percentage,
    Amount,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Amount => "amount",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "percentage" => Some(Self::Percentage),
            "amount" => Some(Self::Amount),
            _ => None,
        }
    }
}

/// Discount applied to a list of work items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiscountConfig {
    pub discount_type: DiscountType,
    pub value: Decimal,
    /// Transient editing flag; never read by the pricing code.
    #[serde(default, skip_serializing)]
    pub is_editing: bool,
}

impl DiscountConfig {
    pub fn percentage(value: Decimal) -> Self {
        Self {
            discount_type: DiscountType::Percentage,
            value,
            is_editing: false,
        }
    }

    pub fn amount(value: Decimal) -> Self {
        Self {
            discount_type: DiscountType::Amount,
            value,
            is_editing: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub title: String,
    pub cost: Decimal,
}

impl WorkItem {
    pub fn new(
        title: impl Into<String>,
        cost: Decimal,
    ) -> Self {
        Self {
            title: title.into(),
            cost,
        }
    }
}

/// Result of the discount, profit, tax and fee pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCalculation {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub total_after_discount: Decimal,
    pub profit_amount: Decimal,
    pub total_with_profit: Decimal,
    pub taxes_to_pay: Decimal,
    pub payment_system_fee: Decimal,
    pub company_fees_total: Decimal,
    pub total_with_taxes: Decimal,
}
