//! Payroll input model.
//!
//! This module defines [`PayrollInput`], everything the orchestrator needs
//! to calculate one caregiver's pay for one pay period.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TimeEntry;

/// Input to a single caregiver payroll calculation.
///
/// Year-to-date wages come from the caller's persistence layer; the engine
/// keeps no state between calls.
///
/// # Example
///
/// ```
/// use caregiver_payroll::models::PayrollInput;
///
/// let json = r#"{
///     "caregiver_id": "cg_001",
///     "time_entries": [{"date": "2025-03-10", "hours": "8"}],
///     "base_hourly_rate": "20.00",
///     "holiday_multiplier": "2.0",
///     "weekend_multiplier": "1.5"
/// }"#;
/// let input: PayrollInput = serde_json::from_str(json).unwrap();
/// assert!(!input.disable_overtime);
/// assert_eq!(input.ytd_wages_before, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// Identifier of the caregiver being paid.
    pub caregiver_id: String,
    /// Hours worked during the pay period.
    pub time_entries: Vec<TimeEntry>,
    /// Base hourly rate for regular hours.
    pub base_hourly_rate: Decimal,
    /// Multiplier applied to the base rate for holiday hours.
    pub holiday_multiplier: Decimal,
    /// Multiplier applied to the base rate for weekend hours.
    pub weekend_multiplier: Decimal,
    /// Pre-computed or manually entered federal income tax withholding.
    #[serde(default)]
    pub federal_withholding_amount: Option<Decimal>,
    /// Wages already paid to this caregiver earlier in the calendar year.
    #[serde(default)]
    pub ytd_wages_before: Option<Decimal>,
    /// Treat every hour as straight time (live-in or exempt arrangements).
    #[serde(default)]
    pub disable_overtime: bool,
}

impl PayrollInput {
    /// Creates an input with no withholding, no prior wages and overtime enabled.
    pub fn new(
        caregiver_id: impl Into<String>,
        time_entries: Vec<TimeEntry>,
        base_hourly_rate: Decimal,
        holiday_multiplier: Decimal,
        weekend_multiplier: Decimal,
    ) -> Self {
        Self {
            caregiver_id: caregiver_id.into(),
            time_entries,
            base_hourly_rate,
            holiday_multiplier,
            weekend_multiplier,
            federal_withholding_amount: None,
            ytd_wages_before: None,
            disable_overtime: false,
        }
    }

    /// Total hours across all time entries.
    pub fn total_entry_hours(&self) -> Decimal {
        self.time_entries.iter().map(|e| e.hours).sum()
    }
}
