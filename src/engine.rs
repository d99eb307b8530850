//! Persian <-> Gregorian conversion through Julian Day Numbers.
//!
//! Both calendars are mapped onto the JDN day count, so every conversion is a
//! pair of pure integer functions and nothing depends on host calendar quirks.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::CalendarError;
use crate::consts::{
    CYCLE_BASE_YEAR, FIRST_HALF_DAYS, GRAND_CYCLE_DAYS, GRAND_CYCLE_YEARS,
    LEAP_DENOMINATOR, LEAP_NUMERATOR, LEAP_PHASE, MAX_MONTH, MAX_YEAR, MEHR, MIN_YEAR,
    PERSIAN_EPOCH_JDN,
};
use crate::types::{cycle_year, days_in_month};

/// The host library's proleptic Gregorian date.
pub type GregorianDate = NaiveDate;

/// JDN of 1 Farvardin 475, the first day of a grand cycle.
const CYCLE_START_JDN: i64 = persian_to_jdn(CYCLE_BASE_YEAR + 1, 1, 1);

/// JDN of 1 Farvardin `MIN_YEAR`.
pub const MIN_SUPPORTED_JDN: i64 = persian_to_jdn(MIN_YEAR as i64, 1, 1);

/// JDN of the last day of `MAX_YEAR`.
pub const MAX_SUPPORTED_JDN: i64 = persian_to_jdn(MAX_YEAR as i64 + 1, 1, 1) - 1;

/// Days from 1 Farvardin to the first day of `month`.
const fn days_before_month(month: u8) -> i64 {
    let m = month as i64;
    if m <= MEHR as i64 { (m - 1) * 31 } else { (m - 1) * 30 + 6 }
}

/// Julian Day Number of a Persian date. Does not validate its input.
pub const fn persian_to_jdn(year: i64, month: u8, day: u8) -> i64 {
    let base = if year >= 0 { year - CYCLE_BASE_YEAR } else { year - CYCLE_BASE_YEAR + 1 };
    let e = cycle_year(year);
    day as i64
        + days_before_month(month)
        + (e * LEAP_NUMERATOR - LEAP_PHASE).div_euclid(LEAP_DENOMINATOR)
        + (e - 1) * 365
        + base.div_euclid(GRAND_CYCLE_YEARS) * GRAND_CYCLE_DAYS
        + PERSIAN_EPOCH_JDN
}

/// Persian (year, month, day) containing the given Julian Day Number.
///
/// Years before 1 skip zero, so the day before 1 Farvardin 1 is in year -1.
/// Day numbers within a few billion years of the epoch are handled; callers
/// taking untrusted input should check against the supported range first, as
/// [`PersianDate::from_jdn`](crate::PersianDate::from_jdn) does.
pub const fn jdn_to_persian(jdn: i64) -> (i64, u8, u8) {
    let since_cycle_start = jdn - CYCLE_START_JDN;
    let cycle = since_cycle_start.div_euclid(GRAND_CYCLE_DAYS);
    let day_in_cycle = since_cycle_start.rem_euclid(GRAND_CYCLE_DAYS);

    let year_in_cycle = if day_in_cycle == GRAND_CYCLE_DAYS - 1 {
        GRAND_CYCLE_YEARS
    } else {
        let aux1 = day_in_cycle / 366;
        let aux2 = day_in_cycle % 366;
        (2134 * aux1 + 2816 * aux2 + 2815) / 1_028_522 + aux1 + 1
    };

    let mut year = year_in_cycle + GRAND_CYCLE_YEARS * cycle + CYCLE_BASE_YEAR;
    if year <= 0 {
        year -= 1;
    }

    let day_of_year = jdn - persian_to_jdn(year, 1, 1) + 1;
    let month = if day_of_year <= FIRST_HALF_DAYS {
        (day_of_year + 30) / 31
    } else {
        (day_of_year - 6 + 29) / 30
    };
    let day = jdn - persian_to_jdn(year, month as u8, 1) + 1;

    (year, month as u8, day as u8)
}

/// Julian Day Number of a proleptic Gregorian date.
pub const fn gregorian_to_jdn(year: i64, month: u8, day: u8) -> i64 {
    let a = (14 - month as i64) / 12;
    let y = year + 4800 - a;
    let m = month as i64 + 12 * a - 3;
    day as i64 + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
        - 32045
}

/// Proleptic Gregorian (year, month, day) of a Julian Day Number.
pub const fn jdn_to_gregorian(jdn: i64) -> (i64, u8, u8) {
    let a = jdn + 32044;
    let b = (4 * a + 3).div_euclid(146_097);
    let c = a - (146_097 * b).div_euclid(4);
    let d = (4 * c + 3) / 1461;
    let e = c - 1461 * d / 4;
    let m = (5 * e + 2) / 153;

    let day = e - (153 * m + 2) / 5 + 1;
    let month = m + 3 - 12 * (m / 10);
    let year = 100 * b + d - 4800 + m / 10;
    (year, month as u8, day as u8)
}

/// Julian Day Number of a host Gregorian date.
pub fn jdn_of(date: GregorianDate) -> i64 {
    // chrono months and days are 1-based and fit in u8
    gregorian_to_jdn(i64::from(date.year()), date.month() as u8, date.day() as u8)
}

/// Host Gregorian date of a Julian Day Number, if chrono can represent it.
pub fn gregorian_of(jdn: i64) -> Option<GregorianDate> {
    let (year, month, day) = jdn_to_gregorian(jdn);
    let year = i32::try_from(year).ok()?;
    NaiveDate::from_ymd_opt(year, u32::from(month), u32::from(day))
}

/// Checks month and day ranges of a Persian triple.
///
/// # Errors
/// Returns `CalendarError::InvalidDate` if the month is not in `1..=12` or the day
/// is outside `1..=month_length(year, month)`.
pub fn validate(year: i32, month: u8, day: u8) -> Result<(), CalendarError> {
    if month == 0 || month > MAX_MONTH || day == 0 || day > days_in_month(year, month) {
        return Err(CalendarError::InvalidDate { year, month, day });
    }
    Ok(())
}

/// Gregorian date of a Persian date.
///
/// # Errors
/// Returns `CalendarError::InvalidDate` for out-of-range month/day, and
/// `CalendarError::InvalidYear` when the result falls outside chrono's range.
pub fn to_gregorian(year: i32, month: u8, day: u8) -> Result<GregorianDate, CalendarError> {
    validate(year, month, day)?;
    gregorian_of(persian_to_jdn(i64::from(year), month, day)).ok_or(CalendarError::InvalidYear(year))
}

/// Persian (year, month, day) of a Gregorian date.
pub fn from_gregorian(date: GregorianDate) -> (i32, u8, u8) {
    let (year, month, day) = jdn_to_persian(jdn_of(date));
    // chrono years stay within +-262143, so the Persian year fits in i32
    (year as i32, month, day)
}

/// Day of the week of a Persian date.
///
/// # Errors
/// Same as [`to_gregorian`].
pub fn day_of_week(year: i32, month: u8, day: u8) -> Result<Weekday, CalendarError> {
    to_gregorian(year, month, day).map(|date| date.weekday())
}
