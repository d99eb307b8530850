//! Month and weekday names, digit sets and explicit-format rendering.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::PersianDate;
use crate::consts::MAX_MONTH;

const MONTH_NAMES_LATIN: [&str; 12] = [
    "Farvardin",
    "Ordibehesht",
    "Khordad",
    "Tir",
    "Mordad",
    "Shahrivar",
    "Mehr",
    "Aban",
    "Azar",
    "Dey",
    "Bahman",
    "Esfand",
];

const MONTH_NAMES_PERSIAN: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Extended Arabic-Indic digits as used in Persian text
const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];
/// Arabic-Indic digits, accepted on input only
const ARABIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Script used for month and weekday names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthStyle {
    /// Numeric month, `1403-01-05`
    #[default]
    Numeric,
    /// Latin transliteration, `5 Farvardin 1403`
    Latin,
    /// Persian script, `5 فروردین 1403`
    Persian,
}

/// Digit set used when rendering numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Digits {
    #[default]
    Ascii,
    Persian,
}

/// Rendering options passed explicitly to [`PersianDate::format_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFormat {
    pub month_style: MonthStyle,
    pub digits:      Digits,
}

/// Name of a month (1-12). Returns `None` for any other number.
pub fn month_name(month: u8, style: MonthStyle) -> Option<&'static str> {
    if month == 0 || month > MAX_MONTH {
        return None;
    }
    let index = usize::from(month - 1);
    match style {
        MonthStyle::Latin | MonthStyle::Numeric => Some(MONTH_NAMES_LATIN[index]),
        MonthStyle::Persian => Some(MONTH_NAMES_PERSIAN[index]),
    }
}

/// Name of a weekday, in Persian script or Latin transliteration.
pub const fn weekday_name(weekday: Weekday, style: MonthStyle) -> &'static str {
    match style {
        MonthStyle::Persian => match weekday {
            Weekday::Sat => "شنبه",
            Weekday::Sun => "یکشنبه",
            Weekday::Mon => "دوشنبه",
            Weekday::Tue => "سه‌شنبه",
            Weekday::Wed => "چهارشنبه",
            Weekday::Thu => "پنجشنبه",
            Weekday::Fri => "جمعه",
        },
        MonthStyle::Latin | MonthStyle::Numeric => match weekday {
            Weekday::Sat => "Shanbeh",
            Weekday::Sun => "Yekshanbeh",
            Weekday::Mon => "Doshanbeh",
            Weekday::Tue => "Seshanbeh",
            Weekday::Wed => "Chaharshanbeh",
            Weekday::Thu => "Panjshanbeh",
            Weekday::Fri => "Jomeh",
        },
    }
}

/// Replaces ASCII digits with Persian digits, leaving everything else intact.
pub fn to_persian_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => PERSIAN_DIGITS[d as usize],
            _ => c,
        })
        .collect()
}

/// Replaces Persian and Arabic-Indic digits with ASCII digits.
pub fn from_persian_digits(s: &str) -> String {
    s.chars()
        .map(|c| {
            PERSIAN_DIGITS
                .iter()
                .position(|&p| p == c)
                .or_else(|| ARABIC_DIGITS.iter().position(|&a| a == c))
                .and_then(|d| char::from_digit(d as u32, 10))
                .unwrap_or(c)
        })
        .collect()
}

impl PersianDate {
    /// Renders the date with explicit month style and digit set.
    pub fn format_with(&self, format: &DateFormat) -> String {
        let text = match month_name(self.month(), format.month_style) {
            Some(name) if format.month_style != MonthStyle::Numeric => {
                format!("{} {name} {}", self.day(), self.year())
            }
            _ => self.to_string(),
        };
        match format.digits {
            Digits::Ascii => text,
            Digits::Persian => to_persian_digits(&text),
        }
    }

    /// Full weekday + date label, e.g. `Chaharshanbeh 1 Farvardin 1403`.
    pub fn long_label(&self, format: &DateFormat) -> String {
        let style = match format.month_style {
            MonthStyle::Numeric => MonthStyle::Latin,
            style => style,
        };
        let date = self.format_with(&DateFormat {
            month_style: style,
            digits:      format.digits,
        });
        format!("{} {date}", weekday_name(self.day_of_week(), style))
    }
}
