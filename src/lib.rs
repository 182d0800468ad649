//! Calendar grid layout and day selection.
//!
//! The crate is split leaf-first: [`LocaleProvider`] turns a locale tag into
//! weekday labels and a first day of week, [`Grid`] lays out a month as rows of
//! seven [`Cell`]s, [`SelectionMachine`] owns the selected dates and processes
//! click, column and drag intents, and [`CalendarView`] translates raw input
//! events into those intents and produces renderable cell descriptors.

mod config;
mod consts;
mod grid;
mod locale;
mod month;
mod prelude;
mod selection;
mod types;
mod view;

pub use config::{CalendarConfig, ConfigError};
pub use consts::*;
pub use grid::{Cell, Grid, GridLayout, GridPos, SpanShape};
pub use locale::{Locale, LocaleError, LocaleLabels, LocaleProvider};
pub use month::{MonthRange, RangeError, YearMonth};
pub use selection::{
    DragMode, DragSession, Intent, SelectionMachine, SelectionSet, State, Transition,
};
pub use types::{Day, Month, Weekday, Year, days_in_month, is_leap_year};
pub use view::{CalendarView, CellView, HeaderView, InputEvent, Key, RenderedCalendar};

use crate::prelude::*;
use std::str::FromStr;
use types::weekday_of;

/// Days from 0000-03-01 to 1970-01-01 in the proleptic Gregorian calendar.
const UNIX_EPOCH_SHIFT: i64 = 719_468;
const DAYS_PER_ERA: i64 = 146_097;
const SECONDS_PER_DAY: u64 = 86_400;

/// A concrete calendar day.
///
/// Ordering follows the calendar: year, then month, then day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}-{}-{:02}", "year", "month", "day.get()")]
pub struct Date {
    year: Year,
    month: Month,
    day: Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Invalid weekday index: {_0} (must be 0-6)")]
    InvalidWeekday(u8),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl Date {
    /// Creates a date from raw components.
    ///
    /// # Errors
    /// Returns the `ParseError` of the first component that is out of range.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year: Year::new(year)?,
            month: Month::new(month)?,
            day: Day::new(day, year, month)?,
        })
    }

    /// Creates a date from already validated year and month.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if `day` does not exist in that month.
    pub fn from_parts(year: Year, month: Month, day: u8) -> Result<Self, ParseError> {
        let day = Day::new(day, year.get(), month.get())?;
        Ok(Self { year, month, day })
    }

    pub(crate) const fn from_valid(year: Year, month: Month, day: Day) -> Self {
        Self { year, month, day }
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

    /// The month this date belongs to.
    pub const fn year_month(&self) -> YearMonth {
        YearMonth::from_parts(self.year, self.month)
    }

    pub const fn weekday(&self) -> Weekday {
        weekday_of(self.year(), self.month(), self.day())
    }

    /// The current UTC date from the system clock.
    pub fn today() -> Self {
        let secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let days = i64::try_from(secs / SECONDS_PER_DAY).unwrap_or_default();
        Self::from_days(days).unwrap_or(Self::from_valid(
            Year::EPOCH,
            Month::JANUARY,
            Day::FIRST,
        ))
    }

    /// Days since 1970-01-01 (negative before the epoch).
    pub fn to_days(&self) -> i64 {
        let (y, m, d) = (
            i64::from(self.year()),
            i64::from(self.month()),
            i64::from(self.day()),
        );
        let y = if m <= 2 { y - 1 } else { y };
        let era = y.div_euclid(400);
        let yoe = y - era * 400;
        let mp = (m + 9) % 12;
        let doy = (153 * mp + 2) / 5 + d - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * DAYS_PER_ERA + doe - UNIX_EPOCH_SHIFT
    }

    /// Inverse of [`Date::to_days`]. Returns `None` outside `0001-01-01..=9999-12-31`.
    pub fn from_days(days: i64) -> Option<Self> {
        let z = days.checked_add(UNIX_EPOCH_SHIFT)?;
        let era = z.div_euclid(DAYS_PER_ERA);
        let doe = z - era * DAYS_PER_ERA;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let d = doy - (153 * mp + 2) / 5 + 1;
        let m = if mp < 10 { mp + 3 } else { mp - 9 };
        let y = yoe + era * 400 + i64::from(m <= 2);

        let year = u16::try_from(y).ok()?;
        let month = u8::try_from(m).ok()?;
        let day = u8::try_from(d).ok()?;
        Self::new(year, month, day).ok()
    }

    /// Shifts the date by `delta` days. Returns `None` if the result leaves the supported range.
    pub fn add_days(&self, delta: i64) -> Option<Self> {
        Self::from_days(self.to_days().checked_add(delta)?)
    }

    /// The following day, rolling over month and year ends.
    pub fn succ(&self) -> Option<Self> {
        self.add_days(1)
    }

    /// The preceding day, rolling back over month and year starts.
    pub fn pred(&self) -> Option<Self> {
        self.add_days(-1)
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD: {trimmed}"
            )));
        };

        Self::new(parse_u16(year)?, parse_u8(month)?, parse_u8(day)?)
    }
}

/// Helper to parse u16 with better error messages
pub(crate) fn parse_u16(s: &str) -> Result<u16, ParseError> {
    s.trim()
        .parse::<u16>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

/// Helper to parse u8 with better error messages
pub(crate) fn parse_u8(s: &str) -> Result<u8, ParseError> {
    s.trim()
        .parse::<u8>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

impl serde::Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
