//! Hours classification and overtime detection.
//!
//! Worked hours are bucketed by day type and overtime is derived in two
//! independent sequential passes:
//!
//! 1. **Daily pass**: hours beyond the daily threshold on a single entry are
//!    overtime; the entry's contribution to its day-type bucket is capped.
//! 2. **Weekly pass**: regular hours beyond the weekly threshold move from
//!    the regular bucket into overtime.
//!
//! The two triggers are additive, not "whichever yields more". Entries are
//! assumed to belong to one workweek; this module does not partition them.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::OvertimeRules;
use crate::models::{DayType, HoursByType, TimeEntry};

use super::day_type::{DayTypeLookup, resolve_day_type};

/// Default daily overtime threshold in hours.
pub const DEFAULT_DAILY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Default weekly overtime threshold in hours.
pub const DEFAULT_WEEKLY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Classifies time entries into regular, weekend, holiday and overtime hours.
///
/// With `disable_overtime` set, every hour stays in its day-type bucket.
///
/// # Examples
///
/// ## Weekly overtime
///
/// ```
/// use caregiver_payroll::calculation::{classify, HolidayCalendar};
/// use caregiver_payroll::config::OvertimeRules;
/// use caregiver_payroll::models::TimeEntry;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// // Monday 2025-03-10 through Friday 2025-03-14, 9 hours each
/// let entries: Vec<TimeEntry> = (10..=14)
///     .map(|d| TimeEntry::new(NaiveDate::from_ymd_opt(2025, 3, d).unwrap(), Decimal::new(9, 0)))
///     .collect();
///
/// let hours = classify(&entries, false, &OvertimeRules::default(), &HolidayCalendar::default());
/// assert_eq!(hours.regular, Decimal::new(40, 0));
/// assert_eq!(hours.overtime, Decimal::new(5, 0));
/// ```
///
/// ## Daily overtime
///
/// ```
/// use caregiver_payroll::calculation::{classify, HolidayCalendar};
/// use caregiver_payroll::config::OvertimeRules;
/// use caregiver_payroll::models::TimeEntry;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let entries = vec![TimeEntry::new(
///     NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     Decimal::new(13, 0),
/// )];
///
/// let hours = classify(&entries, false, &OvertimeRules::default(), &HolidayCalendar::default());
/// assert_eq!(hours.regular, Decimal::new(12, 0));
/// assert_eq!(hours.overtime, Decimal::ONE);
/// ```
pub fn classify(
    entries: &[TimeEntry],
    disable_overtime: bool,
    rules: &OvertimeRules,
    calendar: &dyn DayTypeLookup,
) -> HoursByType {
    let daily = apply_daily_overtime(entries, disable_overtime, rules, calendar);
    apply_weekly_overtime(daily, disable_overtime, rules)
}

/// First pass: buckets each entry by day type and splits off daily overtime.
///
/// Only the hours landing in the regular bucket count toward the weekly
/// non-overtime total used by [`apply_weekly_overtime`].
pub fn apply_daily_overtime(
    entries: &[TimeEntry],
    disable_overtime: bool,
    rules: &OvertimeRules,
    calendar: &dyn DayTypeLookup,
) -> HoursByType {
    let threshold = rules.daily_threshold_hours;
    let mut hours = HoursByType::default();

    for entry in entries {
        let day_type = resolve_day_type(entry, calendar);

        let (straight, overtime) = if !disable_overtime && entry.hours > threshold {
            (threshold, entry.hours - threshold)
        } else {
            (entry.hours, Decimal::ZERO)
        };

        match day_type {
            DayType::Regular => hours.regular += straight,
            DayType::Weekend => hours.weekend += straight,
            DayType::Holiday => hours.holiday += straight,
        }
        hours.overtime += overtime;
    }

    debug!(
        regular = %hours.regular,
        weekend = %hours.weekend,
        holiday = %hours.holiday,
        daily_overtime = %hours.overtime,
        "Applied daily overtime rule"
    );

    hours
}

/// Second pass: moves regular hours beyond the weekly threshold to overtime.
pub fn apply_weekly_overtime(
    hours: HoursByType,
    disable_overtime: bool,
    rules: &OvertimeRules,
) -> HoursByType {
    let threshold = rules.weekly_threshold_hours;
    if disable_overtime || hours.regular <= threshold {
        return hours;
    }

    let excess = hours.regular - threshold;
    debug!(
        weekly_regular = %hours.regular,
        threshold = %threshold,
        moved_to_overtime = %excess,
        "Applied weekly overtime rule"
    );

    HoursByType {
        regular: threshold,
        overtime: hours.overtime + excess,
        ..hours
    }
}
