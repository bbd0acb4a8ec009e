//! Differential wage computation.
//!
//! Converts classified hours into paystub line items. Weekend and holiday
//! rates scale the base rate by their configured multipliers; overtime is
//! always time-and-a-half of the base rate, whatever day it was worked.

use rust_decimal::Decimal;

use crate::models::{HoursByType, WageLineItem, WagesByType};

use super::round2;

/// Fixed overtime multiplier (150% of the base rate).
pub const OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Computes wage line items for each pay category.
///
/// Each subtotal is rounded to cents individually, so
/// [`WagesByType::gross_wages`] can differ by a few cents from rounding the
/// exact sum. Each line must reconcile on its own on the paystub.
///
/// # Example
///
/// ```
/// use caregiver_payroll::calculation::compute_wages;
/// use caregiver_payroll::models::HoursByType;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let hours = HoursByType {
///     weekend: Decimal::new(16, 0),
///     ..Default::default()
/// };
/// let wages = compute_wages(
///     &hours,
///     Decimal::new(20, 0),
///     Decimal::new(2, 0),
///     Decimal::from_str("1.5").unwrap(),
/// );
///
/// assert_eq!(wages.weekend.rate, Decimal::new(30, 0));
/// assert_eq!(wages.weekend.subtotal, Decimal::from_str("480.00").unwrap());
/// assert_eq!(wages.gross_wages(), Decimal::from_str("480.00").unwrap());
/// ```
pub fn compute_wages(
    hours: &HoursByType,
    base_rate: Decimal,
    holiday_multiplier: Decimal,
    weekend_multiplier: Decimal,
) -> WagesByType {
    WagesByType {
        regular: WageLineItem::new(hours.regular, base_rate),
        weekend: WageLineItem::new(hours.weekend, round2(base_rate * weekend_multiplier)),
        holiday: WageLineItem::new(hours.holiday, round2(base_rate * holiday_multiplier)),
        overtime: WageLineItem::new(hours.overtime, round2(base_rate * OVERTIME_MULTIPLIER)),
    }
}
