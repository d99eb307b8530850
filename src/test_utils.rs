//! Constructors shared by unit tests.

use chrono::NaiveDate;

use crate::PersianDate;

pub fn persian(year: i32, month: u8, day: u8) -> PersianDate {
    PersianDate::new(year, month, day).expect("valid persian date in test")
}

pub fn gregorian(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid gregorian date in test")
}
