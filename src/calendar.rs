//! Calendar-to-linear-time conversion and Gregorian helpers.
//!
//! Converts a calendar value into a monotonically increasing minute count via
//! the standard proleptic-Gregorian Julian-Day-Number formula
//! (<https://en.wikipedia.org/wiki/Julian_day#Julian_day_number_calculation>),
//! so two dates can be compared and subtracted as plain integers without any
//! calendar-aware arithmetic. Exact for the whole supported year range.

use crate::CalendarDateTime;
use std::cmp::Ordering;

/// Minutes in one civil day.
pub const MINUTES_PER_DAY: u64 = 24 * 60;

/// Julian Day Number for a proleptic-Gregorian calendar date.
///
/// Integer divisions truncate toward zero, which the formula relies on for
/// the January/February "month 13/14 of the previous year" adjustment.
pub fn julian_day_number(year: u16, month: u8, day: u8) -> i64 {
    let y = i64::from(year);
    let m = i64::from(month);
    let d = i64::from(day);

    // -1 for January/February, 0 for all other months
    let a = (m - 14) / 12;

    (1461 * (y + 4800 + a)) / 4 + (367 * (m - 2 - 12 * a)) / 12
        - (3 * ((y + 4900 + a) / 100)) / 4
        + d
        - 32075
}

/// Minutes since the Julian-day epoch for a calendar value.
///
/// Strictly monotonic: later calendar values always map to larger minute
/// counts, including across month and year boundaries.
pub fn linear_minutes(dt: CalendarDateTime) -> u64 {
    let days = julian_day_number(dt.year, dt.month, dt.day) as u64;
    days * MINUTES_PER_DAY + u64::from(dt.hour) * 60 + u64::from(dt.minute)
}

/// Total-order comparison of two calendar values by their linear time base.
pub fn compare(a: CalendarDateTime, b: CalendarDateTime) -> Ordering {
    linear_minutes(a).cmp(&linear_minutes(b))
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in a month. Out-of-range months are a caller error; 30
/// keeps the day wraparound sane if one slips through.
pub fn days_in_month(month: u8, year: u16) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dt(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> CalendarDateTime {
        CalendarDateTime {
            year,
            month,
            day,
            hour,
            minute,
        }
    }

    #[test]
    fn known_julian_day_numbers() {
        // Reference values from the Julian-day literature
        assert_eq!(julian_day_number(2000, 1, 1), 2_451_545);
        assert_eq!(julian_day_number(2025, 1, 1), 2_460_677);
        assert_eq!(julian_day_number(1858, 11, 17), 2_400_001);
    }

    #[test]
    fn year_boundary_is_adjacent() {
        // Dec 31 23:59 of year Y is exactly one minute before Jan 1 00:00 of Y+1
        let before = dt(2024, 12, 31, 23, 59);
        let after = dt(2025, 1, 1, 0, 0);
        assert_eq!(linear_minutes(after) - linear_minutes(before), 1);
        assert_eq!(compare(before, after), Ordering::Less);
    }

    #[test]
    fn month_boundary_is_adjacent() {
        let before = dt(2025, 2, 28, 23, 59);
        let after = dt(2025, 3, 1, 0, 0);
        assert_eq!(linear_minutes(after) - linear_minutes(before), 1);
    }

    #[test]
    fn leap_day_counts() {
        // 2024 is a leap year, so Feb 28 -> Mar 1 spans two days
        let feb28 = dt(2024, 2, 28, 0, 0);
        let mar1 = dt(2024, 3, 1, 0, 0);
        assert_eq!(
            linear_minutes(mar1) - linear_minutes(feb28),
            2 * MINUTES_PER_DAY
        );
    }

    #[test]
    fn compare_is_reflexive_and_antisymmetric() {
        let a = dt(2025, 7, 2, 12, 0);
        let b = dt(2025, 7, 2, 12, 1);
        assert_eq!(compare(a, a), Ordering::Equal);
        assert_eq!(compare(a, b), Ordering::Less);
        assert_eq!(compare(b, a), Ordering::Greater);
    }

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2025));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn days_in_month_table() {
        assert_eq!(days_in_month(1, 2025), 31);
        assert_eq!(days_in_month(4, 2025), 30);
        assert_eq!(days_in_month(2, 2025), 28);
        assert_eq!(days_in_month(2, 2024), 29);
        assert_eq!(days_in_month(12, 2025), 31);
    }

    proptest! {
        /// Linear-time ordering agrees with lexicographic calendar intuition
        /// for all valid calendar values.
        #[test]
        fn compare_matches_field_order(
            y1 in 1970u16..2200,
            mo1 in 1u8..=12,
            d1 in 1u8..=28,
            h1 in 0u8..24,
            mi1 in 0u8..60,
            y2 in 1970u16..2200,
            mo2 in 1u8..=12,
            d2 in 1u8..=28,
            h2 in 0u8..24,
            mi2 in 0u8..60,
        ) {
            let a = dt(y1, mo1, d1, h1, mi1);
            let b = dt(y2, mo2, d2, h2, mi2);
            let field_order = (y1, mo1, d1, h1, mi1).cmp(&(y2, mo2, d2, h2, mi2));
            prop_assert_eq!(compare(a, b), field_order);
        }
    }
}
