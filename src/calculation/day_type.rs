//! Day type lookup.
//!
//! The holiday/weekend calendar is an external collaborator: the engine only
//! asks it which [`DayType`] a date has. This module defines that seam as the
//! [`DayTypeLookup`] trait and provides [`HolidayCalendar`], a default
//! implementation that treats Saturdays and Sundays as weekend days and a
//! configured list of dates as holidays.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::{DayType, Holiday, TimeEntry};

/// Resolves the pay category of a calendar date.
///
/// Implemented for any `Fn(NaiveDate) -> DayType`, so tests and callers with
/// their own calendar service can pass a closure.
pub trait DayTypeLookup: Send + Sync {
    /// Returns the day type for `date`.
    fn day_type(&self, date: NaiveDate) -> DayType;
}

impl<F> DayTypeLookup for F
where
    F: Fn(NaiveDate) -> DayType + Send + Sync,
{
    fn day_type(&self, date: NaiveDate) -> DayType {
        self(date)
    }
}

/// Weekend-by-weekday calendar with an explicit holiday list.
///
/// Holidays take precedence over weekends, so a holiday falling on a
/// Saturday is paid at the holiday rate.
///
/// # Example
///
/// ```
/// use caregiver_payroll::calculation::{DayTypeLookup, HolidayCalendar};
/// use caregiver_payroll::models::{DayType, Holiday};
/// use chrono::NaiveDate;
///
/// let calendar = HolidayCalendar::new(vec![Holiday {
///     date: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
///     name: "Independence Day".to_string(),
/// }]);
///
/// assert_eq!(calendar.day_type(NaiveDate::from_ymd_opt(2025, 7, 4).unwrap()), DayType::Holiday);
/// assert_eq!(calendar.day_type(NaiveDate::from_ymd_opt(2025, 7, 5).unwrap()), DayType::Weekend);
/// assert_eq!(calendar.day_type(NaiveDate::from_ymd_opt(2025, 7, 7).unwrap()), DayType::Regular);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    holidays: Vec<Holiday>,
}

impl HolidayCalendar {
    /// Creates a calendar recognising the given holidays.
    pub fn new(holidays: Vec<Holiday>) -> Self {
        Self { holidays }
    }

    /// Returns the holiday on `date`, if any.
    pub fn holiday_on(&self, date: NaiveDate) -> Option<&Holiday> {
        self.holidays.iter().find(|h| h.date == date)
    }
}

impl DayTypeLookup for HolidayCalendar {
    fn day_type(&self, date: NaiveDate) -> DayType {
        if self.holiday_on(date).is_some() {
            return DayType::Holiday;
        }
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => DayType::Weekend,
            _ => DayType::Regular,
        }
    }
}

/// Resolves an entry's day type: its override if present, else the calendar.
pub fn resolve_day_type(entry: &TimeEntry, calendar: &dyn DayTypeLookup) -> DayType {
    entry
        .day_type_override
        .unwrap_or_else(|| calendar.day_type(entry.date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn christmas_calendar() -> HolidayCalendar {
        HolidayCalendar::new(vec![Holiday {
            date: make_date("2027-12-25"),
            name: "Christmas Day".to_string(),
        }])
    }

    // ==========================================================================
    // DT-001: weekdays are regular
    // ==========================================================================
    #[test]
    fn test_dt_001_weekday_is_regular() {
        // 2025-03-10 is a Monday, 2025-03-14 a Friday
        let calendar = HolidayCalendar::default();
        assert_eq!(calendar.day_type(make_date("2025-03-10")), DayType::Regular);
        assert_eq!(calendar.day_type(make_date("2025-03-14")), DayType::Regular);
    }

    // ==========================================================================
    // DT-002: Saturday and Sunday are weekend
    // ==========================================================================
    #[test]
    fn test_dt_002_saturday_and_sunday_are_weekend() {
        let calendar = HolidayCalendar::default();
        assert_eq!(calendar.day_type(make_date("2025-03-08")), DayType::Weekend);
        assert_eq!(calendar.day_type(make_date("2025-03-09")), DayType::Weekend);
    }

    // ==========================================================================
    // DT-003: holiday on a Saturday is a holiday
    // ==========================================================================
    #[test]
    fn test_dt_003_holiday_beats_weekend() {
        // 2027-12-25 is a Saturday
        let calendar = christmas_calendar();
        assert_eq!(calendar.day_type(make_date("2027-12-25")), DayType::Holiday);
        assert_eq!(
            calendar.holiday_on(make_date("2027-12-25")).unwrap().name,
            "Christmas Day"
        );
    }

    #[test]
    fn test_override_takes_precedence() {
        let calendar = christmas_calendar();
        let mut entry = TimeEntry::new(make_date("2027-12-25"), Decimal::ONE);
        entry.day_type_override = Some(DayType::Regular);

        assert_eq!(resolve_day_type(&entry, &calendar), DayType::Regular);
    }

    #[test]
    fn test_without_override_uses_calendar() {
        let calendar = christmas_calendar();
        let entry = TimeEntry::new(make_date("2027-12-25"), Decimal::ONE);

        assert_eq!(resolve_day_type(&entry, &calendar), DayType::Holiday);
    }

    #[test]
    fn test_closure_is_a_lookup() {
        let everything_is_a_holiday = |_: NaiveDate| DayType::Holiday;
        let entry = TimeEntry::new(make_date("2025-03-10"), Decimal::ONE);

        assert_eq!(
            resolve_day_type(&entry, &everything_is_a_holiday),
            DayType::Holiday
        );
    }
}
