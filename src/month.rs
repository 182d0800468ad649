use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    DATE_SEPARATOR, DECEMBER, Date, Day, JANUARY, Month, ParseError, RANGE_SEPARATOR, Year,
    days_in_month, parse_u8, parse_u16, prelude::*,
};

/// A calendar month, as chosen by the month selector (`YYYY-MM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}")]
pub struct YearMonth {
    year:  Year,
    month: Month,
}

impl YearMonth {
    /// # Errors
    /// Returns `ParseError::InvalidYear` or `ParseError::InvalidMonth` for out-of-range parts.
    pub fn new(year: u16, month: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
        })
    }

    pub const fn from_parts(year: Year, month: Month) -> Self {
        Self { year, month }
    }

    /// The month of today's UTC date.
    pub fn current() -> Self {
        Date::today().year_month()
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Number of days in this month.
    pub const fn days(&self) -> u8 {
        days_in_month(self.year(), self.month())
    }

    /// Builds the date of `day` within this month.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the month has no such day.
    pub fn date(&self, day: u8) -> Result<Date, ParseError> {
        Date::from_parts(self.year, self.month, day)
    }

    pub const fn first_day(&self) -> Date {
        Date::from_valid(self.year, self.month, Day::FIRST)
    }

    pub const fn last_day(&self) -> Date {
        Date::from_valid(self.year, self.month, Day::last_of(self.year(), self.month()))
    }

    pub fn contains(&self, date: &Date) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// The following month. Returns `None` past December of `MAX_YEAR`.
    pub fn next(&self) -> Option<Self> {
        if self.month() == DECEMBER {
            Self::new(self.year().checked_add(1)?, JANUARY).ok()
        } else {
            Self::new(self.year(), self.month() + 1).ok()
        }
    }

    /// The preceding month. Returns `None` before January of year 1.
    pub fn prev(&self) -> Option<Self> {
        if self.month() == JANUARY {
            Self::new(self.year().checked_sub(1)?, DECEMBER).ok()
        } else {
            Self::new(self.year(), self.month() - 1).ok()
        }
    }
}

impl FromStr for YearMonth {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let Some((year, month)) = trimmed.split_once(DATE_SEPARATOR) else {
            return Err(ParseError::InvalidFormat(format!(
                "expected YYYY{DATE_SEPARATOR}MM: {trimmed}"
            )));
        };
        if month.contains(DATE_SEPARATOR) {
            return Err(ParseError::InvalidFormat(format!(
                "expected YYYY{DATE_SEPARATOR}MM: {trimmed}"
            )));
        }

        Self::new(parse_u16(year)?, parse_u8(month)?)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Inclusive range of months the calendar may navigate to.
/// The start month must be less than or equal to the end month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct MonthRange {
    start: YearMonth,
    end:   YearMonth,
}

/// Error type for month range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start month is after end month.
    #[error("Invalid month range: start ({start}) is after end ({end})")]
    InvalidRange { start: YearMonth, end: YearMonth },

    /// Error parsing a month component.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),

    /// The month's grid would need filler days outside 0001-01-01..=9999-12-31.
    #[error("Month {month} cannot be laid out within the supported calendar range")]
    Unrepresentable { month: YearMonth },
}

impl MonthRange {
    /// Creates a new month range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: YearMonth, end: YearMonth) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> YearMonth {
        self.start
    }

    pub const fn end(&self) -> YearMonth {
        self.end
    }

    pub fn contains(&self, month: &YearMonth) -> bool {
        self.start <= *month && *month <= self.end
    }

    /// Pulls `month` to the nearest bound if it falls outside the range.
    pub fn clamp(&self, month: YearMonth) -> YearMonth {
        month.clamp(self.start, self.end)
    }
}

impl FromStr for MonthRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start, end) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!(
                        "Separator '{RANGE_SEPARATOR}' not found despite count == 1"
                    ))
                })?;
                Self::new(start.parse()?, end.parse()?)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for MonthRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
