/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Minimum valid year (the year-zero origin of the tick counter)
pub const MIN_YEAR: u16 = 0;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Minimum valid month (January)
pub const MIN_MONTH: u8 = 1;

/// Tick value of the earliest representable month (year 0, January)
pub const MIN_TICKS: i64 = 1;

/// Tick value of the latest representable month (year 9999, December)
pub const MAX_TICKS: i64 = 120_000;

/// Months in a year, the tick radix
pub const MONTHS_PER_YEAR: i64 = 12;

/// Months in a quarter
pub const MONTHS_PER_QUARTER: u8 = 3;

/// Factor separating the year and month parts of a dot tag (`year*100+month`)
pub const DOT_YEAR_FACTOR: i64 = 100;

/// Format applied by `Display` and `to_string()`
pub const DEFAULT_FORMAT: &str = "yyyy/mm";
