use chrono::Weekday;

/// Minimum valid Persian year (inclusive)
pub const MIN_YEAR: u16 = 1;
/// Maximum valid Persian year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (Esfand)
pub const MAX_MONTH: u8 = 12;

/// Longest month length
pub const MAX_DAY: u8 = 31;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for Farvardin
pub const FARVARDIN: u8 = 1;
/// Month number for Mehr, the first 30-day month
pub const MEHR: u8 = 7;
/// Month number for Esfand
pub const ESFAND: u8 = 12;

/// Days in Esfand for leap years
pub const ESFAND_DAYS_LEAP: u8 = 30;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// Esfand shows 29 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // Farvardin
    31, // Ordibehesht
    31, // Khordad
    31, // Tir
    31, // Mordad
    31, // Shahrivar
    30, // Mehr
    30, // Aban
    30, // Azar
    30, // Dey
    30, // Bahman
    29, // Esfand (non-leap, adjusted by is_leap_year check)
];

/// Day of year on which Shahrivar ends (six 31-day months)
pub(crate) const FIRST_HALF_DAYS: i64 = 186;

/// Years in one grand leap cycle
pub(crate) const GRAND_CYCLE_YEARS: i64 = 2820;
/// Days in one grand leap cycle
pub(crate) const GRAND_CYCLE_DAYS: i64 = 1_029_983;
/// Year the grand cycles are counted from
pub(crate) const CYCLE_BASE_YEAR: i64 = 474;
/// Leap-day numerator per year of the cycle
pub(crate) const LEAP_NUMERATOR: i64 = 682;
/// Leap-day denominator per year of the cycle
pub(crate) const LEAP_DENOMINATOR: i64 = 2816;
/// Phase shift of the leap-day accumulator
pub(crate) const LEAP_PHASE: i64 = 110;

/// Julian Day Number of the day before 1 Farvardin 1.
/// Pins 1 Farvardin 1403 to 2024-03-20.
pub const PERSIAN_EPOCH_JDN: i64 = 1_948_320;

/// Days probed on each side of the anchor by `DateConstraints::nearest_valid`
pub const NEAREST_SEARCH_HORIZON: u32 = 4000;

/// Conventional first day of the week in Iran
pub const DEFAULT_WEEK_START: Weekday = Weekday::Sat;

/// Days in a week
pub const DAYS_PER_WEEK: u8 = 7;

/// Date component separator (ISO-like format)
pub const DATE_SEPARATOR: char = '-';
/// Alternative date separator common in Persian writing
pub const ALT_DATE_SEPARATOR: char = '/';
/// Range separator
pub const RANGE_SEPARATOR: char = '/';
