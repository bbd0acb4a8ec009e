//! Configuration loading and management for the caregiver payroll engine.
//!
//! This module provides functionality to load jurisdiction settings and
//! per-year tax tables from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use caregiver_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/colorado").unwrap();
//! println!("Loaded jurisdiction: {}", config.jurisdiction().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BracketSchedules, FederalWithholdingTable, JurisdictionConfig, MinimumWageBasis,
    OvertimeRules, PayrollConfig, StandardDeductions, TaxBracket, TaxRates, TaxYearConfig,
};
