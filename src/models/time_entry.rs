//! Time entry model and day classification types.
//!
//! This module defines the [`TimeEntry`] struct and [`DayType`] enum used to
//! record hours worked by a caregiver on a given calendar date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The pay category of a calendar day.
///
/// Weekend and holiday hours are paid at differential rates; regular hours
/// are paid at the base rate and count toward the weekly overtime threshold.
///
/// # Example
///
/// ```
/// use caregiver_payroll::models::DayType;
///
/// let day_type: DayType = serde_json::from_str("\"holiday\"").unwrap();
/// assert_eq!(day_type, DayType::Holiday);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// An ordinary working day paid at the base rate.
    Regular,
    /// Saturday or Sunday, paid at the weekend multiplier.
    Weekend,
    /// A recognised holiday, paid at the holiday multiplier.
    Holiday,
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Regular => write!(f, "regular"),
            DayType::Weekend => write!(f, "weekend"),
            DayType::Holiday => write!(f, "holiday"),
        }
    }
}

/// Hours worked on a single calendar date.
///
/// When `day_type_override` is set it takes precedence over the calendar
/// lookup, letting an employer mark e.g. a family-agreed holiday.
///
/// # Example
///
/// ```
/// use caregiver_payroll::models::{DayType, TimeEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let entry = TimeEntry {
///     date: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
///     hours: Decimal::new(80, 1),
///     day_type_override: Some(DayType::Holiday),
/// };
/// assert_eq!(entry.day_type_override, Some(DayType::Holiday));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// The calendar date the hours were worked.
    pub date: NaiveDate,
    /// Hours worked on that date.
    pub hours: Decimal,
    /// Explicit day type, bypassing the calendar.
    #[serde(default)]
    pub day_type_override: Option<DayType>,
}

impl TimeEntry {
    /// Creates an entry without a day type override.
    pub fn new(date: NaiveDate, hours: Decimal) -> Self {
        Self {
            date,
            hours,
            day_type_override: None,
        }
    }
}
