mod axis;
mod consts;
mod format;
mod prelude;

pub use axis::{AxisIter, MonthlyAxis};
pub use consts::*;

use crate::prelude::*;
use chrono::{Datelike, Local, NaiveDate};
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// A calendar month: an immutable (year, month) pair with no day or
/// time-of-day component, suited to billing periods, reporting periods,
/// and other monthly cycles.
///
/// Two derived encodings drive the API: the `dot` tag (`year*100+month`,
/// the human-readable "201801" shape) and the `ticks` counter
/// (`year*12+month`, a linear ordinal used for arithmetic and ordering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Into)]
pub struct Monthly {
    year:  u16,
    month: u8,
}

/// Error type for month construction, parsing, formatting, and comparison.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonthlyError {
    /// A year, month, or tick value fell outside its valid domain.
    #[error("{component} must be between {min} and {max}, got {value}")]
    OutOfRange {
        component: &'static str,
        value:     i64,
        min:       i64,
        max:       i64,
    },

    /// A dot tag decoded to an out-of-range year or month.
    #[error("invalid dot value {0}, expected a year-month tag such as 201801")]
    InvalidDot(i64),

    /// String parse input was empty.
    #[error("input string is empty")]
    EmptyInput,

    /// String parse input contained no digit runs.
    #[error("no numeric tokens in {0:?}, expected something like \"2018/01\"")]
    NoNumericTokens(String),

    /// A format string held neither a year nor a month token.
    #[error("format {0:?} contains no year or month token")]
    BadFormat(String),

    /// A comparison operand was required but absent.
    #[error("comparison operand is missing")]
    NullArgument,

    /// A comparison operand had an unsupported type.
    #[error("comparison operand must be a Monthly or a calendar date")]
    InvalidComparisonType,
}

// --- helpers for bounds / validation ---

fn check_year(year: i64) -> Result<u16, MonthlyError> {
    match u16::try_from(year) {
        Ok(y) if y <= MAX_YEAR => Ok(y),
        _ => Err(MonthlyError::OutOfRange {
            component: "year",
            value:     year,
            min:       i64::from(MIN_YEAR),
            max:       i64::from(MAX_YEAR),
        }),
    }
}

fn check_month(month: i64) -> Result<u8, MonthlyError> {
    match u8::try_from(month) {
        Ok(m) if (MIN_MONTH..=MAX_MONTH).contains(&m) => Ok(m),
        _ => Err(MonthlyError::OutOfRange {
            component: "month",
            value:     month,
            min:       i64::from(MIN_MONTH),
            max:       i64::from(MAX_MONTH),
        }),
    }
}

/// Tick ordinal of any calendar date's (year, month) pair.
fn date_ticks<D: Datelike>(date: &D) -> i64 {
    i64::from(date.year()) * MONTHS_PER_YEAR + i64::from(date.month())
}

impl Monthly {
    /// The earliest representable month: year 0, January.
    pub const MIN: Self = Self { year: MIN_YEAR, month: MIN_MONTH };

    /// The latest representable month: year 9999, December.
    pub const MAX: Self = Self { year: MAX_YEAR, month: MAX_MONTH };

    /// Creates a new month from validated parts.
    ///
    /// # Errors
    /// Returns `MonthlyError::OutOfRange` if `year > 9999` or
    /// `month` is not in `1..=12`.
    pub fn new(year: u16, month: u8) -> Result<Self, MonthlyError> {
        let year = check_year(i64::from(year))?;
        let month = check_month(i64::from(month))?;
        Ok(Self { year, month })
    }

    /// Internal constructor for parts already known to be valid.
    pub(crate) const fn from_parts(year: u16, month: u8) -> Self {
        debug_assert!(year <= MAX_YEAR);
        debug_assert!(month >= MIN_MONTH && month <= MAX_MONTH);
        Self { year, month }
    }

    /// Decodes a dot tag (`year*100+month`, e.g. `201801`).
    ///
    /// The decode is purely arithmetic: `from_dot(3)` is year 0, March.
    ///
    /// # Errors
    /// Returns `MonthlyError::InvalidDot` if the decoded year or month is
    /// out of range.
    pub fn from_dot(dot: i64) -> Result<Self, MonthlyError> {
        match (check_year(dot / DOT_YEAR_FACTOR), check_month(dot % DOT_YEAR_FACTOR)) {
            (Ok(year), Ok(month)) => Ok(Self { year, month }),
            _ => Err(MonthlyError::InvalidDot(dot)),
        }
    }

    /// Decodes a tick ordinal (months counted from the year-zero origin;
    /// year 0 January is tick 1, year 9999 December is tick 120000).
    ///
    /// # Errors
    /// Returns `MonthlyError::OutOfRange` if `ticks` is not in `1..=120000`.
    pub fn from_ticks(ticks: i64) -> Result<Self, MonthlyError> {
        if !(MIN_TICKS..=MAX_TICKS).contains(&ticks) {
            return Err(MonthlyError::OutOfRange {
                component: "ticks",
                value:     ticks,
                min:       MIN_TICKS,
                max:       MAX_TICKS,
            });
        }
        Ok(Self::from_ticks_unchecked(ticks))
    }

    /// Tick decode without the range check, for ticks already proven valid.
    pub(crate) const fn from_ticks_unchecked(ticks: i64) -> Self {
        debug_assert!(ticks >= MIN_TICKS && ticks <= MAX_TICKS);
        let month = ticks % MONTHS_PER_YEAR;
        Self {
            year:  ((ticks - 1) / MONTHS_PER_YEAR) as u16,
            month: if month == 0 { MAX_MONTH } else { month as u8 },
        }
    }

    /// Extracts the (year, month) pair of any calendar date, discarding the
    /// day and any finer granularity.
    ///
    /// # Errors
    /// Returns `MonthlyError::OutOfRange` if the date's year is negative or
    /// beyond 9999 (chrono dates reach both).
    pub fn from_date<D: Datelike>(date: &D) -> Result<Self, MonthlyError> {
        let year = check_year(i64::from(date.year()))?;
        let month = check_month(i64::from(date.month()))?;
        Ok(Self { year, month })
    }

    /// The month containing today's date, per the local clock.
    pub fn current() -> Self {
        // The clock year always falls inside the supported 0..=9999 domain.
        Self::from_date(&Local::now().date_naive()).unwrap_or(Self::MAX)
    }

    /// Returns the year, `0..=9999`.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the month, `1..=12`.
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// The dot tag: `year*100 + month`.
    ///
    /// Not zero-padded to six digits; year 0 November is just `11`.
    #[inline]
    pub const fn dot(&self) -> i64 {
        self.year as i64 * DOT_YEAR_FACTOR + self.month as i64
    }

    /// The tick ordinal: `year*12 + month`, always in `1..=120000`.
    #[inline]
    pub const fn ticks(&self) -> i64 {
        self.year as i64 * MONTHS_PER_YEAR + self.month as i64
    }

    /// The quarter this month falls in, `1..=4`.
    #[inline]
    pub const fn quarter(&self) -> u8 {
        (self.month - 1) / MONTHS_PER_QUARTER + 1
    }

    /// The month one tick earlier.
    ///
    /// # Errors
    /// Returns `MonthlyError::OutOfRange` when called on [`Monthly::MIN`].
    pub fn previous(&self) -> Result<Self, MonthlyError> {
        Self::from_ticks(self.ticks() - 1)
    }

    /// The month one tick later.
    ///
    /// # Errors
    /// Returns `MonthlyError::OutOfRange` when called on [`Monthly::MAX`].
    pub fn next(&self) -> Result<Self, MonthlyError> {
        Self::from_ticks(self.ticks() + 1)
    }

    /// January of the same year.
    pub const fn first(&self) -> Self {
        Self::from_parts(self.year, MIN_MONTH)
    }

    /// December of the same year.
    pub const fn last(&self) -> Self {
        Self::from_parts(self.year, MAX_MONTH)
    }

    /// Shifts by a signed number of months.
    ///
    /// # Errors
    /// Returns `MonthlyError::OutOfRange` if the resulting tick leaves
    /// `1..=120000`.
    pub fn add_months(&self, months: i64) -> Result<Self, MonthlyError> {
        Self::from_ticks(self.ticks().saturating_add(months))
    }

    /// Shifts by a signed number of years.
    ///
    /// # Errors
    /// Returns `MonthlyError::OutOfRange` if the resulting tick leaves
    /// `1..=120000`; the check runs in tick space, so the error reports the
    /// tick bound.
    pub fn add_years(&self, years: i64) -> Result<Self, MonthlyError> {
        self.add_months(years.saturating_mul(MONTHS_PER_YEAR))
    }

    /// Signed month difference: `self.ticks() - other.ticks()`.
    pub const fn span_months(&self, other: Self) -> i64 {
        self.ticks() - other.ticks()
    }

    /// Signed month difference against any calendar date's (year, month).
    pub fn span_months_date<D: Datelike>(&self, date: &D) -> i64 {
        self.ticks() - date_ticks(date)
    }

    /// Renders with the case-insensitive tokens `yyyy`, `yy`, `mm`, `m`,
    /// longest match first. The year prints at its natural width, padded to
    /// two digits only below year 10; `yy` keeps the last two digits.
    ///
    /// Substitution runs on a lowercased copy of the format string, so
    /// literal ASCII letters come out lowercased too. This quirk is kept
    /// for output compatibility.
    ///
    /// # Errors
    /// Returns `MonthlyError::BadFormat` if `format` holds neither a year
    /// nor a month token.
    pub fn format(&self, format: &str) -> Result<String, MonthlyError> {
        crate::format::format_tokens(*self, format)
    }

    /// Dynamically-typed equality against an optional operand.
    ///
    /// Supports `Monthly` and `chrono::NaiveDate` operands; a date compares
    /// equal when its (year, month) pair matches.
    ///
    /// # Errors
    /// Returns `MonthlyError::NullArgument` when `other` is `None` and
    /// `MonthlyError::InvalidComparisonType` for any other operand type.
    pub fn eq_value(&self, other: Option<&dyn Any>) -> Result<bool, MonthlyError> {
        let Some(other) = other else {
            return Err(MonthlyError::NullArgument);
        };
        if let Some(monthly) = other.downcast_ref::<Self>() {
            return Ok(self == monthly);
        }
        if let Some(date) = other.downcast_ref::<NaiveDate>() {
            return Ok(self == date);
        }
        Err(MonthlyError::InvalidComparisonType)
    }
}

impl FromStr for Monthly {
    type Err = MonthlyError;

    /// Parses from the digit runs of `s`; every non-digit character is a
    /// delimiter. One run is read as a dot tag (`"3"` is year 0, March);
    /// with two or more runs the first two are year and month and the rest
    /// are ignored, so `"2018/01"`, `"2018年01月"`, and `"2018@01/01"` all
    /// parse to 2018 January.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(MonthlyError::EmptyInput);
        }
        let runs = digit_runs(s);
        match runs.as_slice() {
            [] => Err(MonthlyError::NoNumericTokens(s.to_owned())),
            [dot] => Self::from_dot(run_value(dot)),
            [year, month, ..] => {
                let year = check_year(run_value(year))?;
                let month = check_month(run_value(month))?;
                Ok(Self { year, month })
            }
        }
    }
}

/// Maximal runs of ASCII digits, left to right.
fn digit_runs(s: &str) -> Vec<&str> {
    s.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .collect()
}

/// Numeric value of one digit run, leading zeros stripped.
fn run_value(digits: &str) -> i64 {
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        return 0;
    }
    // A run too long for i64 cannot fit any component domain either; the
    // saturated stand-in still fails the same range checks.
    stripped.parse::<i64>().unwrap_or(i64::MAX)
}

impl TryFrom<i64> for Monthly {
    type Error = MonthlyError;

    /// The integer is read as a dot tag (`201801`), never as ticks.
    fn try_from(dot: i64) -> Result<Self, Self::Error> {
        Self::from_dot(dot)
    }
}

impl TryFrom<NaiveDate> for Monthly {
    type Error = MonthlyError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_date(&date)
    }
}

impl PartialOrd for Monthly {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Monthly {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ticks().cmp(&other.ticks())
    }
}

impl Hash for Monthly {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equal ticks must hash identically; the full-width ordinal goes
        // through the hasher's own integer mixing.
        self.ticks().hash(state);
    }
}

impl PartialEq<NaiveDate> for Monthly {
    fn eq(&self, other: &NaiveDate) -> bool {
        self.ticks() == date_ticks(other)
    }
}

impl PartialEq<Monthly> for NaiveDate {
    fn eq(&self, other: &Monthly) -> bool {
        other == self
    }
}

impl Add<i64> for Monthly {
    type Output = Self;

    /// # Panics
    /// Panics if the shifted month leaves the representable range; an
    /// out-of-range result from month arithmetic is a logic error, not bad
    /// input. Use [`Monthly::add_months`] for a fallible variant.
    fn add(self, months: i64) -> Self {
        match self.add_months(months) {
            Ok(shifted) => shifted,
            Err(err) => panic!("{err}"),
        }
    }
}

impl Sub<i64> for Monthly {
    type Output = Self;

    /// # Panics
    /// Panics if the shifted month leaves the representable range. Use
    /// [`Monthly::add_months`] with a negated count for a fallible variant.
    fn sub(self, months: i64) -> Self {
        match Self::from_ticks(self.ticks().saturating_sub(months)) {
            Ok(shifted) => shifted,
            Err(err) => panic!("{err}"),
        }
    }
}

impl Sub for Monthly {
    type Output = i64;

    fn sub(self, other: Self) -> i64 {
        self.span_months(other)
    }
}

impl Sub<NaiveDate> for Monthly {
    type Output = i64;

    fn sub(self, date: NaiveDate) -> i64 {
        self.span_months_date(&date)
    }
}

impl AddAssign<i64> for Monthly {
    fn add_assign(&mut self, months: i64) {
        *self = *self + months;
    }
}

impl SubAssign<i64> for Monthly {
    fn sub_assign(&mut self, months: i64) {
        *self = *self - months;
    }
}

impl fmt::Display for Monthly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format(DEFAULT_FORMAT) {
            Ok(text) => f.write_str(&text),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl serde::Serialize for Monthly {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Monthly {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
