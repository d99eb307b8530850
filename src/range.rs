use std::{cmp::Ordering, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{CalendarError, PersianDate, RANGE_SEPARATOR, prelude::*};

/// An inclusive span of Persian dates, as picked by a range picker.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct PersianDateRange {
    start: PersianDate,
    end:   PersianDate,
}

impl PersianDateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidRange` if start > end.
    pub fn new(start: PersianDate, end: PersianDate) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering a single day
    pub const fn single(date: PersianDate) -> Self {
        Self { start: date, end: date }
    }

    pub const fn start(&self) -> PersianDate {
        self.start
    }

    pub const fn end(&self) -> PersianDate {
        self.end
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (PersianDate, PersianDate) {
        (self.start, self.end)
    }

    pub fn contains(&self, date: &PersianDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Checks if this range shares at least one day with another range
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Checks if this range is completely contained within another range
    pub fn is_within(&self, other: &Self) -> bool {
        other.start <= self.start && self.end <= other.end
    }

    /// Number of days in the range, counting both ends.
    pub fn length_in_days(&self) -> i64 {
        PersianDate::days_between(&self.start, &self.end) + 1
    }

    /// Iterates every day of the range in order.
    pub fn days(&self) -> impl Iterator<Item = PersianDate> + '_ {
        std::iter::successors(Some(self.start), move |date| {
            date.succ().filter(|next| *next <= self.end)
        })
    }
}

impl FromStr for PersianDateRange {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // Dates inside a range must use '-' so the single '/' splits start and end
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(CalendarError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    CalendarError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;

                let start = start_str.trim().parse::<PersianDate>()?;
                let end = end_str.trim().parse::<PersianDate>()?;

                Self::new(start, end)
            },
            _ => Err(CalendarError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl PartialOrd for PersianDateRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PersianDateRange {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare start dates first, then end dates
        match self.start.cmp(&other.start) {
            Ordering::Equal => self.end.cmp(&other.end),
            ord => ord,
        }
    }
}

impl Serialize for PersianDateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PersianDateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::persian;

    #[test]
    fn test_new_range_cases() {
        struct TestCase {
            start:          (i32, u8, u8),
            end:            (i32, u8, u8),
            should_succeed: bool,
            description:    &'static str,
        }

        let cases = [
            TestCase {
                start:          (1403, 1, 1),
                end:            (1403, 1, 10),
                should_succeed: true,
                description:    "valid range (start < end)",
            },
            TestCase {
                start:          (1403, 2, 1),
                end:            (1403, 1, 31),
                should_succeed: false,
                description:    "invalid range (start > end)",
            },
            TestCase {
                start:          (1403, 1, 1),
                end:            (1403, 1, 1),
                should_succeed: true,
                description:    "equal dates (start == end)",
            },
        ];

        for case in &cases {
            let start = persian(case.start.0, case.start.1, case.start.2);
            let end = persian(case.end.0, case.end.1, case.end.2);
            let range = PersianDateRange::new(start, end);

            if case.should_succeed {
                assert!(range.is_ok(), "Expected success for: {}", case.description);
            } else {
                assert!(
                    matches!(range, Err(CalendarError::InvalidRange { .. })),
                    "Expected failure for: {}",
                    case.description
                );
            }
        }
    }

    #[test]
    fn test_accessors() {
        let start = persian(1403, 1, 1);
        let end = persian(1403, 3, 1);
        let range = PersianDateRange::new(start, end).expect("failed to construct range for accessor test");

        assert_eq!(range.start(), start);
        assert_eq!(range.end(), end);
        assert_eq!(range.dates(), (start, end));
    }

    #[test]
    fn test_contains() {
        let range = PersianDateRange::new(persian(1403, 1, 1), persian(1403, 1, 10))
            .expect("failed to construct range for contains test");

        assert!(range.contains(&persian(1403, 1, 1)));
        assert!(range.contains(&persian(1403, 1, 5)));
        assert!(range.contains(&persian(1403, 1, 10)));
        assert!(!range.contains(&persian(1402, 12, 29)));
        assert!(!range.contains(&persian(1403, 1, 11)));
    }

    #[test]
    fn test_overlaps_and_is_within() {
        let outer = PersianDateRange::new(persian(1403, 1, 1), persian(1403, 6, 31))
            .expect("failed to construct outer range");
        let inner = PersianDateRange::new(persian(1403, 2, 1), persian(1403, 2, 15))
            .expect("failed to construct inner range");
        let later = PersianDateRange::new(persian(1403, 7, 1), persian(1403, 8, 1))
            .expect("failed to construct later range");
        let touching = PersianDateRange::single(persian(1403, 6, 31));

        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
        assert!(!outer.overlaps(&later));
        assert!(outer.overlaps(&touching));

        assert!(inner.is_within(&outer));
        assert!(!outer.is_within(&inner));
        assert!(!later.is_within(&outer));
    }

    #[test]
    fn test_length_and_days() {
        let range = PersianDateRange::new(persian(1403, 12, 27), persian(1404, 1, 2))
            .expect("failed to construct year-crossing range");

        assert_eq!(range.length_in_days(), 5);
        let days: Vec<String> = range.days().map(|d| d.to_string()).collect();
        assert_eq!(
            days,
            ["1403-12-27", "1403-12-28", "1403-12-29", "1404-01-01", "1404-01-02"]
        );

        assert_eq!(PersianDateRange::single(persian(1403, 1, 1)).length_in_days(), 1);
        assert_eq!(PersianDateRange::single(persian(1403, 1, 1)).days().count(), 1);
    }

    #[test]
    fn test_display_and_parse() {
        let range = PersianDateRange::new(persian(1403, 1, 1), persian(1403, 1, 10))
            .expect("failed to construct range for display test");
        assert_eq!(range.to_string(), "1403-01-01/1403-01-10");

        let parsed = "1403-01-01/1403-01-10"
            .parse::<PersianDateRange>()
            .expect("failed to parse range");
        assert_eq!(parsed, range);
    }

    #[test]
    fn test_parse_errors() {
        let result = "1403-01-10/1403-01-01".parse::<PersianDateRange>();
        assert!(matches!(result, Err(CalendarError::InvalidRange { .. })));

        let err = "1403-01-01".parse::<PersianDateRange>().expect_err("expected missing separator error");
        assert!(err.to_string().contains("No range separator found"));

        let err = "1403/01/01/1403/01/10"
            .parse::<PersianDateRange>()
            .expect_err("expected too many separators error");
        assert!(err.to_string().contains("expected 1, found 5"));
    }

    #[test]
    fn test_ordering() {
        let range1 = PersianDateRange::new(persian(1403, 1, 1), persian(1403, 1, 10)).expect("range1");
        let range2 = PersianDateRange::new(persian(1403, 1, 1), persian(1403, 1, 20)).expect("range2");
        let range3 = PersianDateRange::new(persian(1403, 1, 2), persian(1403, 1, 3)).expect("range3");

        assert!(range1 < range2);
        assert!(range2 < range3);
    }

    #[test]
    fn test_serde_string_format() {
        let range = PersianDateRange::new(persian(1403, 1, 1), persian(1403, 1, 10))
            .expect("failed to construct range for serde test");

        let json = serde_json::to_string(&range).expect("failed to serialize range to JSON");
        assert_eq!(json, r#""1403-01-01/1403-01-10""#);

        let parsed: PersianDateRange = serde_json::from_str(&json).expect("failed to deserialize range from JSON");
        assert_eq!(range, parsed);
    }
}
