mod consts;
pub mod constraints;
pub mod engine;
mod grid;
mod names;
mod prelude;
mod range;
#[cfg(test)]
mod test_utils;
mod types;

pub use chrono::Weekday;
pub use consts::*;
pub use constraints::{ConstraintsConfig, DateConstraints, DateConstraintsBuilder};
pub use engine::GregorianDate;
pub use grid::{MonthCell, YearMonth, build_month_cells, weekday_headers};
pub use names::{DateFormat, Digits, MonthStyle, from_persian_digits, month_name, to_persian_digits, weekday_name};
pub use range::PersianDateRange;
pub use types::{Day, Month, Year, days_in_year, is_leap_year, month_length};

use crate::prelude::*;
use chrono::{Datelike, Days, NaiveDate};
use std::str::FromStr;
use types::days_in_month;

/// A validated date in the Persian (Solar Hijri) calendar.
///
/// Ordering is chronological, which for a valid date is the same as comparing
/// `(year, month, day)` lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct PersianDate {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Year outside `MIN_YEAR..=MAX_YEAR`, or a conversion landing outside it
    #[error("Invalid year: {0} (must be {min}-{max})", min = MIN_YEAR, max = MAX_YEAR)]
    InvalidYear(i32),
    /// Month number outside 1-12
    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(u8),
    /// Month or day that does not exist in the given year
    #[error("Invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u8, day: u8 },
    /// Range whose start is after its end
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: PersianDate, end: PersianDate },
    /// Text or configuration that cannot be interpreted
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),
    /// Empty or whitespace-only input
    #[error("Empty date string")]
    EmptyInput,
}

impl PersianDate {
    /// Creates a date, failing if the day does not exist in that month and year.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` for years outside `MIN_YEAR..=MAX_YEAR` and
    /// `CalendarError::InvalidDate` for an out-of-range month or day.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        let year_typed = Year::new(year)?;
        engine::validate(year, month, day)?;
        Ok(Self {
            year:  year_typed,
            month: Month::new(month).map_err(|_| CalendarError::InvalidDate { year, month, day })?,
            day:   Day::new(day, year, month)?,
        })
    }

    /// Persian date of a Gregorian date.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` if the date is before 1 Farvardin 1 or after
    /// the end of `MAX_YEAR`.
    pub fn from_gregorian(date: GregorianDate) -> Result<Self, CalendarError> {
        let (year, month, day) = engine::from_gregorian(date);
        Self::new(year, month, day)
    }

    /// Persian date of a Julian Day Number.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` if the day falls outside `MIN_YEAR..=MAX_YEAR`.
    pub fn from_jdn(jdn: i64) -> Result<Self, CalendarError> {
        if jdn < engine::MIN_SUPPORTED_JDN {
            return Err(CalendarError::InvalidYear(i32::from(MIN_YEAR) - 1));
        }
        if jdn > engine::MAX_SUPPORTED_JDN {
            return Err(CalendarError::InvalidYear(i32::from(MAX_YEAR) + 1));
        }
        let (year, month, day) = engine::jdn_to_persian(jdn);
        let year = i32::try_from(year).map_err(|_| CalendarError::InvalidYear(i32::from(MAX_YEAR) + 1))?;
        Self::new(year, month, day)
    }

    /// The current local date.
    ///
    /// # Errors
    /// Only fails if the system clock is set outside the supported years.
    pub fn today() -> Result<Self, CalendarError> {
        Self::from_gregorian(chrono::Local::now().date_naive())
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// Returns `(year, month, day)`
    pub const fn to_tuple(&self) -> (i32, u8, u8) {
        (self.year.get() as i32, self.month.get(), self.day.get())
    }

    pub const fn to_jdn(&self) -> i64 {
        engine::persian_to_jdn(self.year.get() as i64, self.month.get(), self.day.get())
    }

    pub fn to_gregorian(&self) -> GregorianDate {
        // Years MIN_YEAR..=MAX_YEAR map to Gregorian 622..=10621, inside chrono's range
        engine::gregorian_of(self.to_jdn()).unwrap_or(NaiveDate::MIN)
    }

    pub fn day_of_week(&self) -> Weekday {
        self.to_gregorian().weekday()
    }

    /// Position in the year, 1 for 1 Farvardin up to 365 or 366.
    pub const fn day_of_year(&self) -> u16 {
        let month = self.month.get() as u16;
        let before = if month <= MEHR as u16 { (month - 1) * 31 } else { (month - 1) * 30 + 6 };
        before + self.day.get() as u16
    }

    pub fn is_leap_year(&self) -> bool {
        self.year.is_leap()
    }

    pub fn month_length(&self) -> u8 {
        days_in_month(i32::from(self.year.get()), self.month.get())
    }

    /// Moves `days` forward (or backward when negative) through the host calendar.
    /// Returns `None` when the result is outside `MIN_YEAR..=MAX_YEAR`.
    pub fn plus_days(&self, days: i64) -> Option<Self> {
        let gregorian = self.to_gregorian();
        let moved = if days >= 0 {
            gregorian.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            gregorian.checked_sub_days(Days::new(days.unsigned_abs()))
        }?;
        Self::from_gregorian(moved).ok()
    }

    pub fn minus_days(&self, days: i64) -> Option<Self> {
        self.plus_days(days.checked_neg()?)
    }

    /// The following day, if representable
    pub fn succ(&self) -> Option<Self> {
        self.plus_days(1)
    }

    /// The preceding day, if representable
    pub fn pred(&self) -> Option<Self> {
        self.plus_days(-1)
    }

    /// Signed number of days from `a` to `b`; positive when `b` is later.
    pub fn days_between(a: &Self, b: &Self) -> i64 {
        b.to_gregorian().signed_duration_since(a.to_gregorian()).num_days()
    }

    /// Moves by whole months, clamping the day to the target month's length
    /// (31 Shahrivar + 1 month = 30 Mehr).
    pub fn plus_months(&self, months: i32) -> Option<Self> {
        let index = i64::from(self.year.get()) * 12 + i64::from(self.month.get() - 1) + i64::from(months);
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = u8::try_from(index.rem_euclid(12) + 1).ok()?;
        let day = self.day.get().min(days_in_month(year, month));
        Self::new(year, month, day).ok()
    }

    /// Moves by whole years, mapping 30 Esfand onto 29 Esfand in common years.
    pub fn plus_years(&self, years: i32) -> Option<Self> {
        self.plus_months(years.checked_mul(12)?)
    }

    pub fn first_day_of_month(&self) -> Self {
        Self {
            day: Day::new(MIN_DAY, i32::from(self.year.get()), self.month.get()).unwrap_or(self.day),
            ..*self
        }
    }

    pub fn last_day_of_month(&self) -> Self {
        let year = i32::from(self.year.get());
        let month = self.month.get();
        Self {
            day: Day::new(days_in_month(year, month), year, month).unwrap_or(self.day),
            ..*self
        }
    }
}

impl FromStr for PersianDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = from_persian_digits(s.trim());
        if normalized.is_empty() {
            return Err(CalendarError::EmptyInput);
        }

        let has_hyphen = normalized.contains(DATE_SEPARATOR);
        let has_slash = normalized.contains(ALT_DATE_SEPARATOR);
        let separator = match (has_hyphen, has_slash) {
            (true, true) => {
                return Err(CalendarError::InvalidFormat(format!(
                    "Mixed delimiters ({DATE_SEPARATOR} and {ALT_DATE_SEPARATOR})"
                )));
            }
            (true, false) => DATE_SEPARATOR,
            (false, true) => ALT_DATE_SEPARATOR,
            (false, false) => {
                return Err(CalendarError::InvalidFormat(format!(
                    "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD: {s}"
                )));
            }
        };

        let parts: Vec<&str> = normalized.split(separator).map(str::trim).collect();
        match parts.as_slice() {
            [year, month, day] => {
                let year = year
                    .parse::<i32>()
                    .map_err(|_| CalendarError::InvalidFormat((*year).to_owned()))?;
                let month = Self::parse_u8(month)?;
                let day = Self::parse_u8(day)?;
                Self::new(year, month, day)
            }
            _ => Err(CalendarError::InvalidFormat(format!(
                "Expected 2 {separator} separators, found {}",
                parts.len() - 1
            ))),
        }
    }
}

impl PersianDate {
    fn parse_u8(s: &str) -> Result<u8, CalendarError> {
        s.parse::<u8>()
            .map_err(|_| CalendarError::InvalidFormat(s.to_owned()))
    }
}

impl TryFrom<GregorianDate> for PersianDate {
    type Error = CalendarError;

    fn try_from(value: GregorianDate) -> Result<Self, Self::Error> {
        Self::from_gregorian(value)
    }
}

impl From<PersianDate> for GregorianDate {
    fn from(date: PersianDate) -> Self {
        date.to_gregorian()
    }
}

impl TryFrom<(i32, u8, u8)> for PersianDate {
    type Error = CalendarError;

    fn try_from(value: (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

impl serde::Serialize for PersianDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for PersianDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
