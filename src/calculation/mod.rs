//! Calculation logic for the payroll engine.
//!
//! This module contains every calculation the engine performs: day type
//! lookup, two-pass hours classification, differential wages, statutory
//! payroll taxes, federal withholding estimation, and the payroll
//! orchestrator that composes them. All functions are pure over their input
//! and borrowed configuration.

mod day_type;
mod federal_withholding;
mod hours_classifier;
mod payroll;
mod rounding;
mod statutory_tax;
mod validation;
mod wages;

pub use day_type::{DayTypeLookup, HolidayCalendar, resolve_day_type};
pub use federal_withholding::{
    FederalWithholdingEstimator, HigherWithholdingSchedule, IgnoreMultipleJobs,
    MultipleJobsPolicy, progressive_tax,
};
pub use hours_classifier::{
    DEFAULT_DAILY_OVERTIME_THRESHOLD, DEFAULT_WEEKLY_OVERTIME_THRESHOLD, apply_daily_overtime,
    apply_weekly_overtime, classify,
};
pub use payroll::{
    MINIMUM_WAGE_NOT_MET, OVERTIME_EXCLUDED_FROM_RATE_CHECK, PayrollContext,
    calculate_multi_caregiver_payroll, calculate_payroll,
};
pub use rounding::round2;
pub use statutory_tax::{calculate_taxes, capped_tax, taxable_wages_under_cap, uncapped_tax};
pub use validation::{
    MAX_AMOUNT, MAX_ENTRY_HOURS, MAX_HOURLY_RATE, MAX_RATE_MULTIPLIER, ensure_non_negative,
    ensure_within, validate_payroll_input, validate_w4,
};
pub use wages::{OVERTIME_MULTIPLIER, compute_wages};
