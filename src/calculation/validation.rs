//! Input validation at the engine boundary.
//!
//! Malformed inputs are rejected with [`EngineError::InvalidInput`] before
//! any calculation runs, so a bad value never turns into a misleading
//! number on a paystub.

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollInput, W4Information};

/// Most hours a single time entry may record.
pub const MAX_ENTRY_HOURS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Highest accepted base hourly rate.
pub const MAX_HOURLY_RATE: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Highest accepted weekend or holiday multiplier.
pub const MAX_RATE_MULTIPLIER: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Highest accepted dollar amount (wages, withholding, W-4 figures).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Fails if `value` is negative.
pub fn ensure_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        warn!(field = %field, value = %value, "Rejected negative input");
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }
    Ok(())
}

/// Fails if `value` is negative or greater than `max`.
pub fn ensure_within(field: &str, value: Decimal, max: Decimal) -> EngineResult<()> {
    ensure_non_negative(field, value)?;
    if value > max {
        warn!(field = %field, value = %value, max = %max, "Rejected out-of-range input");
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not exceed {}, got {}", max, value),
        });
    }
    Ok(())
}

/// Validates a payroll input: hours, rates, multipliers and optional amounts
/// must all be non-negative and within their ceilings, and the caregiver id
/// must be present.
///
/// # Example
///
/// ```
/// use caregiver_payroll::calculation::validate_payroll_input;
/// use caregiver_payroll::models::{PayrollInput, TimeEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput::new(
///     "cg_001",
///     vec![TimeEntry::new(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(), Decimal::new(-1, 0))],
///     Decimal::new(20, 0),
///     Decimal::new(2, 0),
///     Decimal::new(15, 1),
/// );
///
/// let err = validate_payroll_input(&input).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "Invalid input 'time_entries[0].hours': must not be negative, got -1"
/// );
/// ```
pub fn validate_payroll_input(input: &PayrollInput) -> EngineResult<()> {
    if input.caregiver_id.trim().is_empty() {
        warn!("Rejected payroll input without caregiver id");
        return Err(EngineError::InvalidInput {
            field: "caregiver_id".to_string(),
            message: "must not be empty".to_string(),
        });
    }

    for (i, entry) in input.time_entries.iter().enumerate() {
        ensure_within(
            &format!("time_entries[{}].hours", i),
            entry.hours,
            MAX_ENTRY_HOURS,
        )?;
    }

    ensure_within("base_hourly_rate", input.base_hourly_rate, MAX_HOURLY_RATE)?;
    ensure_within(
        "holiday_multiplier",
        input.holiday_multiplier,
        MAX_RATE_MULTIPLIER,
    )?;
    ensure_within(
        "weekend_multiplier",
        input.weekend_multiplier,
        MAX_RATE_MULTIPLIER,
    )?;

    if let Some(amount) = input.federal_withholding_amount {
        ensure_within("federal_withholding_amount", amount, MAX_AMOUNT)?;
    }
    if let Some(ytd) = input.ytd_wages_before {
        ensure_within("ytd_wages_before", ytd, MAX_AMOUNT)?;
    }

    Ok(())
}

/// Validates W-4 dollar amounts are non-negative and within [`MAX_AMOUNT`].
pub fn validate_w4(w4: &W4Information) -> EngineResult<()> {
    ensure_within("w4.dependents_amount", w4.dependents_amount, MAX_AMOUNT)?;
    ensure_within("w4.other_income", w4.other_income, MAX_AMOUNT)?;
    ensure_within("w4.deductions", w4.deductions, MAX_AMOUNT)?;
    ensure_within("w4.extra_withholding", w4.extra_withholding, MAX_AMOUNT)?;
    Ok(())
}
