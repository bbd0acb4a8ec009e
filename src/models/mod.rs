//! Core data models for the caregiver payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod holiday;
mod payroll_input;
mod payroll_result;
mod time_entry;
mod w4;

pub use holiday::Holiday;
pub use payroll_input::PayrollInput;
pub use payroll_result::{
    AuditStep, AuditTrace, AuditWarning, HoursByType, PayrollResult, TaxCalculation,
    WageLineItem, WagesByType,
};
pub use time_entry::{DayType, TimeEntry};
pub use w4::{FilingStatus, PayFrequency, W4Information, WithholdingResult};
