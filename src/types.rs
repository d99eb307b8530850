use crate::CalendarError;
use crate::consts::{
    CYCLE_BASE_YEAR, DAYS_IN_MONTH, ESFAND, ESFAND_DAYS_LEAP, GRAND_CYCLE_YEARS, LEAP_DENOMINATOR,
    LEAP_NUMERATOR, LEAP_PHASE, MAX_DAY, MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A Persian year guaranteed to be in the range `MIN_YEAR..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's within `MIN_YEAR..=MAX_YEAR`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` if the value is out of range.
    pub fn new(value: i32) -> Result<Self, CalendarError> {
        u16::try_from(value)
            .ok()
            .filter(|v| (MIN_YEAR..=MAX_YEAR).contains(v))
            .and_then(NonZeroU16::new)
            .map(Self)
            .ok_or(CalendarError::InvalidYear(value))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// Whether Esfand of this year has 30 days
    #[inline]
    pub fn is_leap(self) -> bool {
        is_leap_year(i32::from(self.get()))
    }
}

impl TryFrom<u16> for Year {
    type Error = CalendarError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(i32::from(value))
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, CalendarError> {
        let non_zero = NonZeroU8::new(value).ok_or(CalendarError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(CalendarError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to be valid for a given year and month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating it against the length of the given month
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the value is 0, past the end of the month,
    /// or `month` itself is out of range.
    pub fn new(value: u8, year: i32, month: u8) -> Result<Self, CalendarError> {
        let invalid = CalendarError::InvalidDate {
            year,
            month,
            day: value,
        };
        let max_day = month_length(year, month).map_err(|_| invalid.clone())?;
        NonZeroU8::new(value)
            .filter(|_| value <= max_day)
            .map(Self)
            .ok_or(invalid)
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Without year/month context only the absolute bounds can be checked
        Some(value)
            .filter(|v| (MIN_DAY..=MAX_DAY).contains(v))
            .and_then(NonZeroU8::new)
            .map(Self)
            .ok_or(CalendarError::InvalidDate {
                year: 0,
                month: 0,
                day: value,
            })
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Helper functions

/// Position of `year` inside its 2820-year grand cycle, in `474..3294`.
pub(crate) const fn cycle_year(year: i64) -> i64 {
    let base = if year >= 0 { year - CYCLE_BASE_YEAR } else { year - CYCLE_BASE_YEAR + 1 };
    CYCLE_BASE_YEAR + base.rem_euclid(GRAND_CYCLE_YEARS)
}

/// Leap status under the 2820-year arithmetic cycle.
///
/// A year is leap when the leap-day accumulator `floor((e * 682 - 110) / 2816)`
/// steps between its start and the next year's start, which is the same as
/// `((e + 1) * 682 - 110) mod 2816 < 682` for the cycle-relative year `e`.
pub const fn is_leap_year(year: i32) -> bool {
    let e = cycle_year(year as i64);
    ((e + 1) * LEAP_NUMERATOR - LEAP_PHASE).rem_euclid(LEAP_DENOMINATOR) < LEAP_NUMERATOR
}

/// Number of days in the given month, without range-checking the year.
///
/// # Errors
/// Returns `CalendarError::InvalidMonth` if `month` is not in `1..=12`.
pub fn month_length(year: i32, month: u8) -> Result<u8, CalendarError> {
    if month == 0 || month > MAX_MONTH {
        return Err(CalendarError::InvalidMonth(month));
    }
    Ok(days_in_month(year, month))
}

pub(crate) const fn days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == ESFAND && is_leap_year(year) {
        ESFAND_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Number of days in the given year (365 or 366)
pub const fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) { 366 } else { 365 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_new_valid() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(1403).is_ok());
        assert!(Year::new(9999).is_ok());
    }

    #[test]
    fn test_year_new_invalid() {
        for value in [0, -1, 10000, i32::MAX] {
            let result = Year::new(value);
            assert!(
                matches!(result, Err(CalendarError::InvalidYear(v)) if v == value),
                "Year {value} should be rejected"
            );
        }
    }

    #[test]
    fn test_year_try_from_and_into_u16() {
        let year: Year = 1403u16.try_into().expect("1403 is a valid year");
        assert_eq!(year.get(), 1403);
        let value: u16 = year.into();
        assert_eq!(value, 1403);

        let result: Result<Year, _> = 0u16.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_year_display_and_ordering() {
        let y1 = Year::new(1399).expect("valid year");
        let y2 = Year::new(1403).expect("valid year");
        assert_eq!(y2.to_string(), "1403");
        assert!(y1 < y2);
    }

    #[test]
    fn test_year_serde() {
        let year = Year::new(1403).expect("valid year");
        let json = serde_json::to_string(&year).expect("serialize year");
        assert_eq!(json, "1403");
        let parsed: Year = serde_json::from_str(&json).expect("deserialize year");
        assert_eq!(year, parsed);

        let result: Result<Year, _> = serde_json::from_str("10000");
        assert!(result.is_err());
    }

    #[test]
    fn test_month_new() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
        assert!(matches!(Month::new(0), Err(CalendarError::InvalidMonth(0))));
        assert!(matches!(Month::new(13), Err(CalendarError::InvalidMonth(13))));
    }

    #[test]
    fn test_day_new() {
        // Farvardin - 31 days
        assert!(Day::new(31, 1403, 1).is_ok());
        assert!(Day::new(32, 1403, 1).is_err());

        // Mehr - 30 days
        assert!(Day::new(30, 1403, 7).is_ok());
        assert!(Day::new(31, 1403, 7).is_err());

        // Esfand, common year
        assert!(Day::new(29, 1403, 12).is_ok());
        assert!(Day::new(30, 1403, 12).is_err());

        // Esfand, leap year
        assert!(Day::new(30, 1404, 12).is_ok());
        assert!(Day::new(31, 1404, 12).is_err());

        assert!(matches!(Day::new(0, 1403, 1), Err(CalendarError::InvalidDate { .. })));
        assert!(matches!(Day::new(1, 1403, 13), Err(CalendarError::InvalidDate { month: 13, .. })));
    }

    #[test]
    fn test_day_new_error_fields() {
        let result = Day::new(32, 1403, 2);
        assert!(matches!(
            result,
            Err(CalendarError::InvalidDate {
                year: 1403,
                month: 2,
                day: 32
            })
        ));
    }

    #[test]
    fn test_day_try_from_u8_bounds() {
        struct TestCase {
            value: u8,
            valid: bool,
        }

        let cases = [
            TestCase { value: 0, valid: false },
            TestCase { value: 1, valid: true },
            TestCase { value: 31, valid: true },
            TestCase { value: 32, valid: false },
            TestCase { value: u8::MAX, valid: false },
        ];

        for case in &cases {
            let result = Day::try_from(case.value);
            if case.valid {
                assert_eq!(result.map(Day::get), Ok(case.value));
            } else {
                assert_eq!(
                    result,
                    Err(CalendarError::InvalidDate { year: 0, month: 0, day: case.value }),
                    "Day {}",
                    case.value
                );
            }
        }
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:    i32,
            is_leap: bool,
        }

        let cases = [
            TestCase { year: 1391, is_leap: true },
            TestCase { year: 1395, is_leap: true },
            TestCase { year: 1399, is_leap: true },
            TestCase { year: 1400, is_leap: false },
            TestCase { year: 1402, is_leap: false },
            TestCase { year: 1403, is_leap: false },
            TestCase { year: 1404, is_leap: true },
            TestCase { year: 1408, is_leap: true },
            TestCase { year: 1412, is_leap: true },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {}: expected {}",
                case.year,
                if case.is_leap { "leap year" } else { "common year" }
            );
        }
    }

    #[test]
    fn test_leap_year_agrees_with_esfand_length() {
        for year in 1..=3000 {
            assert_eq!(
                is_leap_year(year),
                days_in_month(year, ESFAND) == ESFAND_DAYS_LEAP,
                "Year {year}"
            );
        }
    }

    #[test]
    fn test_month_lengths_sum_to_year_length() {
        for year in 1..=3000 {
            let total: u16 = (1..=MAX_MONTH).map(|m| u16::from(days_in_month(year, m))).sum();
            let expected = if is_leap_year(year) { 366 } else { 365 };
            assert_eq!(total, expected, "Year {year}");
            assert_eq!(days_in_year(year), expected);
        }
    }

    #[test]
    fn test_leap_years_per_grand_cycle() {
        // 683 leap years in every 2820-year cycle
        let leaps = (475..475 + 2820).filter(|&y| is_leap_year(y)).count();
        assert_eq!(leaps, 683);
    }

    #[test]
    fn test_month_length_rejects_bad_month() {
        assert!(matches!(month_length(1403, 0), Err(CalendarError::InvalidMonth(0))));
        assert!(matches!(month_length(1403, 13), Err(CalendarError::InvalidMonth(13))));
        assert_eq!(month_length(1403, 6).ok(), Some(31));
        assert_eq!(month_length(1403, 11).ok(), Some(30));
    }
}
