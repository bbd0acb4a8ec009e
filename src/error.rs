//! Error types for the caregiver payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading tax tables or
//! calculating payroll.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Calculations never fail for well-formed inputs. Errors are raised at the
/// boundary: when configuration cannot be loaded, or when an input violates
/// the engine's contract (negative hours, negative rates and so on).
///
/// # Example
///
/// ```
/// use caregiver_payroll::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/jurisdiction.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/jurisdiction.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but contains inconsistent values.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },

    /// No tax tables were loaded for the requested year.
    #[error("Tax tables not found for year {year}")]
    TaxYearNotFound {
        /// The requested tax year.
        year: i32,
    },

    /// A calculation input violated the engine's contract.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// Path of the offending field (e.g. `time_entries[2].hours`).
        field: String,
        /// A description of what made the input invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
