//! Holiday model.
//!
//! This module contains the [`Holiday`] type used by the default calendar
//! to recognise paid holidays.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A holiday on which caregiver hours are paid at the holiday multiplier.
///
/// # Example
///
/// ```
/// use caregiver_payroll::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
///     name: "Independence Day".to_string(),
/// };
/// assert_eq!(holiday.name, "Independence Day");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday (e.g., "Thanksgiving Day").
    pub name: String,
}
