//! Cent rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to whole cents, halves away from zero.
///
/// Every amount that appears on a paystub or tax form passes through this
/// function, so the same value always rounds the same way.
///
/// # Example
///
/// ```
/// use caregiver_payroll::calculation::round2;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round2(Decimal::from_str("254.2").unwrap()), Decimal::from_str("254.20").unwrap());
/// assert_eq!(round2(Decimal::from_str("0.005").unwrap()), Decimal::from_str("0.01").unwrap());
/// assert_eq!(round2(Decimal::from_str("0.0049").unwrap()), Decimal::ZERO);
/// ```
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
