//! Payroll and tax calculation engine for household caregivers.
//!
//! This crate turns a caregiver's time entries for one pay period into a
//! paystub: hours classified into regular, weekend, holiday and overtime
//! buckets, differential wages, statutory payroll taxes for both employee
//! and employer, and net pay. A federal withholding estimator based on the
//! caregiver's W-4 is provided alongside.
//!
//! Tax rates and withholding tables are versioned per tax year and loaded
//! from YAML by [`config::ConfigLoader`], or built directly by the caller.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
