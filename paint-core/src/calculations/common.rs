//! Common utility functions for pricing calculations.
//!
//! This module provides shared functionality used across the calculators,
//! including rounding and currency display.
//!
//! Calculator arithmetic saturates at [`Decimal::MAX`] and [`Decimal::MIN`]
//! instead of panicking, so oversized catalog or work item amounts still
//! produce a result.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, halves away from zero. Every step of the cost pipeline
/// goes through this.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paint_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(68.62185)), dec!(68.62));
/// assert_eq!(round_half_up(dec!(103.125)), dec!(103.13));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to the nearest whole currency unit, halves away from zero.
///
/// Drywall SKU estimates carry no cents.
///
/// ```
/// use rust_decimal_macros::dec;
/// use paint_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(45.375)), dec!(45));
/// assert_eq!(round_whole(dec!(45.5)), dec!(46));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps `value` into `[min, max]`. If `max < min`, `min` wins.
pub fn clamp(
    value: Decimal,
    min: Decimal,
    max: Decimal,
) -> Decimal {
    value.min(max).max(min)
}

/// Sums amounts, saturating at the `Decimal` bounds instead of overflowing.
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use paint_core::calculations::common::saturating_sum;
///
/// assert_eq!(saturating_sum([dec!(600), dec!(400.50)]), dec!(1000.50));
/// assert_eq!(saturating_sum([Decimal::MAX, dec!(1)]), Decimal::MAX);
/// ```
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, value| acc.saturating_add(value))
}

/// Formats an amount as US dollars with thousands separators.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paint_core::calculations::common::format_usd;
///
/// assert_eq!(format_usd(dec!(1786), 0), "$1,786");
/// assert_eq!(format_usd(dec!(1234567.891), 2), "$1,234,567.89");
/// assert_eq!(format_usd(dec!(-5), 2), "-$5.00");
/// ```
pub fn format_usd(
    amount: Decimal,
    fraction_digits: u32,
) -> String {
    let rounded =
        amount.round_dp_with_strategy(fraction_digits, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let magnitude = rounded.abs();

    let whole = magnitude.trunc().to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (position, digit) in whole.chars().enumerate() {
        if position > 0 && (whole.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push('$');
    out.push_str(&grouped);

    if fraction_digits > 0 {
        let fraction = (magnitude - magnitude.trunc())
            .round_dp(fraction_digits)
            .to_string();
        // "0.5" -> "5", then pad to the requested width.
        let digits = fraction.split_once('.').map(|(_, d)| d).unwrap_or("");
        out.push('.');
        out.push_str(digits);
        for _ in digits.len()..fraction_digits as usize {
            out.push('0');
        }
    }

    out
}
