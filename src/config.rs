use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_HEADING, DEFAULT_LOCALE, GridLayout, MonthRange, RangeError, SpanShape, YearMonth};

/// Settings for a [`crate::CalendarView`], usually read from a TOML file.
///
/// ```toml
/// heading = "Team availability"
/// initial_month = "2020-12"
/// locale = "fr-CA"
/// layout = "six_weeks"
/// span_shape = "linear"
/// bounds = "2020-01/2021-12"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarConfig {
    /// Text of the heading rendered above the grid.
    #[serde(default = "default_heading")]
    pub heading: String,

    /// Month shown first. Defaults to the current month.
    #[serde(default)]
    pub initial_month: Option<YearMonth>,

    /// Locale tag for weekday labels and first day of week.
    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default)]
    pub layout: GridLayout,

    #[serde(default)]
    pub span_shape: SpanShape,

    /// Months the view may navigate to.
    #[serde(default)]
    pub bounds: Option<MonthRange>,
}

fn default_heading() -> String {
    DEFAULT_HEADING.to_string()
}
fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            heading: default_heading(),
            initial_month: None,
            locale: default_locale(),
            layout: GridLayout::default(),
            span_shape: SpanShape::default(),
            bounds: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse calendar config")]
    Parse(#[from] toml::de::Error),

    #[error("initial month {month} is outside bounds {bounds}")]
    InitialMonthOutOfBounds { month: YearMonth, bounds: MonthRange },

    #[error(transparent)]
    Range(#[from] RangeError),
}

impl CalendarConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` for malformed TOML or unknown keys, and
    /// `ConfigError::InitialMonthOutOfBounds` for inconsistent months.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML file.
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`CalendarConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let toml_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&toml_str)
    }

    /// # Errors
    /// Returns `ConfigError::InitialMonthOutOfBounds` if an explicit initial
    /// month lies outside the configured bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let (Some(month), Some(bounds)) = (self.initial_month, self.bounds) {
            if !bounds.contains(&month) {
                return Err(ConfigError::InitialMonthOutOfBounds { month, bounds });
            }
        }
        Ok(())
    }

    /// The month to open on: the configured one, or today's clamped to bounds.
    pub fn start_month(&self) -> YearMonth {
        let month = self.initial_month.unwrap_or_else(YearMonth::current);
        self.bounds.map_or(month, |bounds| bounds.clamp(month))
    }
}
