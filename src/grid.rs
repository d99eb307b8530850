//! Month grid layout for calendar views.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::prelude::*;
use crate::types::days_in_month;
use crate::{CalendarError, DAYS_PER_WEEK, MIN_DAY, Month, PersianDate, Year};

/// One slot of a month view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MonthCell {
    /// Padding before the first day of the month
    Empty,
    Day { date: PersianDate, weekday: Weekday },
}

impl MonthCell {
    pub const fn date(&self) -> Option<PersianDate> {
        match self {
            Self::Day { date, .. } => Some(*date),
            Self::Empty => None,
        }
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// A month of a specific year, the unit a picker pages through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}", "year.get()", "month.get()")]
pub struct YearMonth {
    year:  Year,
    month: Month,
}

impl YearMonth {
    /// # Errors
    /// Returns `CalendarError::InvalidYear` or `CalendarError::InvalidMonth`.
    pub fn new(year: i32, month: u8) -> Result<Self, CalendarError> {
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
        })
    }

    pub const fn of(date: &PersianDate) -> Self {
        Self {
            year:  date.year_typed(),
            month: date.month_typed(),
        }
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub fn length(&self) -> u8 {
        days_in_month(i32::from(self.year.get()), self.month.get())
    }

    /// # Errors
    /// Never fails for a `YearMonth` built through [`YearMonth::new`] or [`YearMonth::of`].
    pub fn first_day(&self) -> Result<PersianDate, CalendarError> {
        PersianDate::new(i32::from(self.year.get()), self.month.get(), MIN_DAY)
    }

    /// # Errors
    /// Never fails for a `YearMonth` built through [`YearMonth::new`] or [`YearMonth::of`].
    pub fn last_day(&self) -> Result<PersianDate, CalendarError> {
        PersianDate::new(i32::from(self.year.get()), self.month.get(), self.length())
    }

    pub fn contains(&self, date: &PersianDate) -> bool {
        *self == Self::of(date)
    }

    /// Shifts by whole months; `None` past the supported years.
    pub fn plus_months(&self, months: i32) -> Option<Self> {
        let index = i64::from(self.year.get()) * 12 + i64::from(self.month.get() - 1) + i64::from(months);
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = u8::try_from(index.rem_euclid(12) + 1).ok()?;
        Self::new(year, month).ok()
    }

    pub fn next(&self) -> Option<Self> {
        self.plus_months(1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.plus_months(-1)
    }

    /// Leading blanks followed by one cell per day, for weeks starting on `week_start`.
    ///
    /// # Errors
    /// Propagates date construction failures, which cannot occur for a valid `YearMonth`.
    pub fn cells(&self, week_start: Weekday) -> Result<Vec<MonthCell>, CalendarError> {
        let first = self.first_day()?;
        let first_weekday = first.day_of_week();
        let offset = (first_weekday.num_days_from_monday() + u32::from(DAYS_PER_WEEK)
            - week_start.num_days_from_monday())
            % u32::from(DAYS_PER_WEEK);
        let length = self.length();
        trace!(month = %self, %first_weekday, %week_start, offset, length, "building month cells");

        let mut cells = Vec::with_capacity(offset as usize + usize::from(length));
        cells.extend((0..offset).map(|_| MonthCell::Empty));

        let mut weekday = first_weekday;
        for day in MIN_DAY..=length {
            let date = PersianDate::new(i32::from(self.year.get()), self.month.get(), day)?;
            cells.push(MonthCell::Day { date, weekday });
            weekday = weekday.succ();
        }
        Ok(cells)
    }
}

/// Cells of one month view. See [`YearMonth::cells`].
///
/// # Errors
/// Returns `CalendarError::InvalidYear` or `CalendarError::InvalidMonth` for an
/// unsupported year or a month outside `1..=12`.
pub fn build_month_cells(year: i32, month: u8, week_start: Weekday) -> Result<Vec<MonthCell>, CalendarError> {
    YearMonth::new(year, month)?.cells(week_start)
}

/// The seven weekdays in column order for weeks starting on `week_start`.
pub fn weekday_headers(week_start: Weekday) -> [Weekday; 7] {
    let mut next = week_start;
    std::array::from_fn(|_| {
        let current = next;
        next = next.succ();
        current
    })
}
