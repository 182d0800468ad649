/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;
/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

pub const JANUARY: u8 = 1;
pub const FEBRUARY: u8 = 2;
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Days per month for a common year, indexed by month number (index 0 unused)
pub const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
pub(crate) const CENTURY_CYCLE: u16 = 100;
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Number of columns in every grid row
pub const DAYS_PER_WEEK: usize = 7;
/// Row count of a grid built with `GridLayout::SixWeeks`
pub const MAX_WEEK_ROWS: usize = 6;

/// Separator between year, month and day in `YYYY-MM-DD` and `YYYY-MM`
pub const DATE_SEPARATOR: char = '-';
/// Separator between the two months of a `MonthRange`
pub const RANGE_SEPARATOR: char = '/';

/// Heading shown above the grid unless configured otherwise
pub const DEFAULT_HEADING: &str = "Demo of calendar component";
/// Locale used when a tag is missing or unknown
pub const DEFAULT_LOCALE: &str = "en";
