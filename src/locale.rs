use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{DAYS_PER_WEEK, DEFAULT_LOCALE, Weekday};

/// A language tag with an optional region, e.g. `fr` or `fr-CA`.
///
/// The language subtag is stored lowercase and the region uppercase, so
/// `FR_ca` and `fr-CA` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region:   Option<String>,
}

/// Error type for locale tag parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
    #[error("Empty locale tag")]
    Empty,

    #[error("Invalid language subtag '{0}' (expected 2-3 letters)")]
    InvalidLanguage(String),

    #[error("Invalid region subtag '{0}' (expected 2 letters or 3 digits)")]
    InvalidRegion(String),

    #[error("Unexpected subtag '{subtag}' in locale tag '{tag}'")]
    UnexpectedSubtag { tag: String, subtag: String },
}

impl Locale {
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Canonical tag form, `language` or `language-REGION`.
    pub fn tag(&self) -> String {
        self.to_string()
    }

    fn language_only(language: &str) -> Self {
        Self {
            language: language.to_owned(),
            region:   None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(region) = &self.region {
            write!(f, "-{region}")?;
        }
        Ok(())
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::language_only(DEFAULT_LOCALE)
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LocaleError::Empty);
        }

        let mut subtags = trimmed.split(['-', '_']);
        let language = subtags.next().unwrap_or_default();
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(LocaleError::InvalidLanguage(language.to_owned()));
        }

        let mut region = None;
        for subtag in subtags {
            let is_script = subtag.len() == 4 && subtag.chars().all(|c| c.is_ascii_alphabetic());
            let is_region = (subtag.len() == 2 && subtag.chars().all(|c| c.is_ascii_alphabetic()))
                || (subtag.len() == 3 && subtag.chars().all(|c| c.is_ascii_digit()));

            if is_script && region.is_none() {
                // Script subtags (e.g. `Latn`) do not affect weekday labels.
                continue;
            }
            if is_region && region.is_none() {
                region = Some(subtag.to_ascii_uppercase());
                continue;
            }
            if region.is_none() && subtag.len() <= 3 {
                return Err(LocaleError::InvalidRegion(subtag.to_owned()));
            }
            return Err(LocaleError::UnexpectedSubtag {
                tag:    trimmed.to_owned(),
                subtag: subtag.to_owned(),
            });
        }

        Ok(Self {
            language: language.to_ascii_lowercase(),
            region,
        })
    }
}

impl Serialize for Locale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Weekday abbreviations of one language in canonical Sunday-first order,
/// plus the first day of week used when the tag carries no known region.
struct LanguageEntry {
    language:  &'static str,
    labels:    [&'static str; DAYS_PER_WEEK],
    first_day: Weekday,
}

const LANGUAGES: &[LanguageEntry] = &[
    LanguageEntry {
        language:  "en",
        labels:    ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
        first_day: Weekday::SUNDAY,
    },
    LanguageEntry {
        language:  "fr",
        labels:    ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
        first_day: Weekday::MONDAY,
    },
    LanguageEntry {
        language:  "de",
        labels:    ["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."],
        first_day: Weekday::MONDAY,
    },
    LanguageEntry {
        language:  "es",
        labels:    ["dom.", "lun.", "mar.", "mié.", "jue.", "vie.", "sáb."],
        first_day: Weekday::MONDAY,
    },
    LanguageEntry {
        language:  "pt",
        labels:    ["dom.", "seg.", "ter.", "qua.", "qui.", "sex.", "sáb."],
        first_day: Weekday::SUNDAY,
    },
    LanguageEntry {
        language:  "it",
        labels:    ["dom", "lun", "mar", "mer", "gio", "ven", "sab"],
        first_day: Weekday::MONDAY,
    },
    LanguageEntry {
        language:  "nl",
        labels:    ["zo", "ma", "di", "wo", "do", "vr", "za"],
        first_day: Weekday::MONDAY,
    },
];

/// First day of week by region. Regions missing here use the language default.
const REGION_FIRST_DAY: &[(&str, Weekday)] = &[
    ("US", Weekday::SUNDAY),
    ("CA", Weekday::SUNDAY),
    ("MX", Weekday::SUNDAY),
    ("BR", Weekday::SUNDAY),
    ("JP", Weekday::SUNDAY),
    ("IL", Weekday::SUNDAY),
    ("PH", Weekday::SUNDAY),
    ("GB", Weekday::MONDAY),
    ("IE", Weekday::MONDAY),
    ("AU", Weekday::MONDAY),
    ("FR", Weekday::MONDAY),
    ("BE", Weekday::MONDAY),
    ("CH", Weekday::MONDAY),
    ("LU", Weekday::MONDAY),
    ("DE", Weekday::MONDAY),
    ("AT", Weekday::MONDAY),
    ("ES", Weekday::MONDAY),
    ("PT", Weekday::MONDAY),
    ("IT", Weekday::MONDAY),
    ("NL", Weekday::MONDAY),
];

/// Display data for one resolved locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleLabels {
    /// The locale the labels were resolved from (after any fallback).
    pub locale:    Locale,
    pub first_day: Weekday,
    /// Weekday abbreviations in display order, starting at `first_day`.
    pub labels:    [&'static str; DAYS_PER_WEEK],
}

impl LocaleLabels {
    /// The labels in canonical Sunday-first order.
    pub fn canonical_labels(&self) -> [&'static str; DAYS_PER_WEEK] {
        let mut canonical = [""; DAYS_PER_WEEK];
        for (column, label) in self.labels.iter().enumerate() {
            canonical[self.first_day.nth_after(column).index()] = *label;
        }
        canonical
    }

    /// Label shown above `column`, if the column exists.
    pub fn label(&self, column: usize) -> Option<&'static str> {
        self.labels.get(column).copied()
    }
}

/// Maps locale tags to weekday labels and first-day-of-week conventions.
///
/// Lookups never fail: a tag that does not parse, or names a language
/// without a label table, resolves to the default `en` locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleProvider;

impl LocaleProvider {
    pub const fn new() -> Self {
        Self
    }

    /// Resolves a raw tag such as `fr-ca`.
    pub fn labels_for(&self, tag: &str) -> LocaleLabels {
        match tag.parse::<Locale>() {
            Ok(locale) => self.resolve(&locale),
            Err(err) => {
                warn!(tag, error = %err, "unparseable locale tag, using default");
                self.fallback()
            },
        }
    }

    /// Resolves an already parsed locale.
    pub fn resolve(&self, locale: &Locale) -> LocaleLabels {
        let Some(entry) = find_language(locale.language()) else {
            warn!(locale = %locale, "no weekday labels for language, using default");
            return self.fallback();
        };

        let region_first_day = locale.region().and_then(|region| {
            let found = REGION_FIRST_DAY
                .iter()
                .find(|(code, _)| *code == region)
                .map(|(_, first_day)| *first_day);
            if found.is_none() {
                debug!(region, "unknown region, using language default first day");
            }
            found
        });

        let resolved = if region_first_day.is_some() {
            locale.clone()
        } else {
            Locale::language_only(entry.language)
        };
        build_labels(entry, resolved, region_first_day.unwrap_or(entry.first_day))
    }

    /// Whether `tag` resolves to its own label table rather than the fallback.
    pub fn supports(&self, tag: &str) -> bool {
        tag.parse::<Locale>()
            .is_ok_and(|locale| find_language(locale.language()).is_some())
    }

    fn fallback(&self) -> LocaleLabels {
        let locale = Locale::default();
        let entry = find_language(locale.language()).unwrap_or(&LANGUAGES[0]);
        let first_day = entry.first_day;
        build_labels(entry, locale, first_day)
    }
}

fn find_language(language: &str) -> Option<&'static LanguageEntry> {
    LANGUAGES.iter().find(|entry| entry.language == language)
}

fn build_labels(entry: &LanguageEntry, locale: Locale, first_day: Weekday) -> LocaleLabels {
    let mut labels = [""; DAYS_PER_WEEK];
    for (column, label) in labels.iter_mut().enumerate() {
        *label = entry.labels[first_day.nth_after(column).index()];
    }
    LocaleLabels {
        locale,
        first_day,
        labels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale_tags() {
        struct TestCase {
            input:    &'static str,
            language: &'static str,
            region:   Option<&'static str>,
        }

        let cases = [
            TestCase {
                input:    "fr",
                language: "fr",
                region:   None,
            },
            TestCase {
                input:    "fr-ca",
                language: "fr",
                region:   Some("CA"),
            },
            TestCase {
                input:    "FR_ca",
                language: "fr",
                region:   Some("CA"),
            },
            TestCase {
                input:    "en-Latn-GB",
                language: "en",
                region:   Some("GB"),
            },
            TestCase {
                input:    "es-419",
                language: "es",
                region:   Some("419"),
            },
        ];

        for case in &cases {
            let locale = case.input.parse::<Locale>().unwrap();
            assert_eq!(locale.language(), case.language, "language of {}", case.input);
            assert_eq!(locale.region(), case.region, "region of {}", case.input);
        }
    }

    #[test]
    fn test_parse_rejects_malformed_tags() {
        assert!(matches!("".parse::<Locale>(), Err(LocaleError::Empty)));
        assert!(matches!("f".parse::<Locale>(), Err(LocaleError::InvalidLanguage(_))));
        assert!(matches!("fr-C".parse::<Locale>(), Err(LocaleError::InvalidRegion(_))));
        assert!(matches!(
            "fr-CA-QC".parse::<Locale>(),
            Err(LocaleError::UnexpectedSubtag { .. })
        ));
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!("fr_ca".parse::<Locale>().unwrap().to_string(), "fr-CA");
        assert_eq!(Locale::default().to_string(), "en");
    }

    #[test]
    fn test_french_france_starts_monday() {
        let labels = LocaleProvider::new().labels_for("fr");
        assert_eq!(labels.first_day, Weekday::MONDAY);
        assert_eq!(labels.labels[0], "lun.");
        assert_eq!(labels.labels[6], "dim.");

        let labels = LocaleProvider::new().labels_for("fr-FR");
        assert_eq!(labels.labels[0], "lun.");
    }

    #[test]
    fn test_french_canada_starts_sunday() {
        let labels = LocaleProvider::new().labels_for("fr-ca");
        assert_eq!(labels.first_day, Weekday::SUNDAY);
        assert_eq!(labels.labels[0], "dim.");
        assert_eq!(labels.locale.to_string(), "fr-CA");
    }

    #[test]
    fn test_regional_variants_share_canonical_labels() {
        let provider = LocaleProvider::new();
        let france = provider.labels_for("fr-FR");
        let canada = provider.labels_for("fr-CA");
        assert_ne!(france.labels, canada.labels);
        assert_eq!(france.canonical_labels(), canada.canonical_labels());
    }

    #[test]
    fn test_unknown_region_uses_language_default() {
        let labels = LocaleProvider::new().labels_for("de-XY");
        assert_eq!(labels.first_day, Weekday::MONDAY);
        assert_eq!(labels.labels[0], "Mo.");
        assert_eq!(labels.locale.to_string(), "de");
    }

    #[test]
    fn test_region_overrides_language_default() {
        let provider = LocaleProvider::new();
        assert_eq!(provider.labels_for("en").first_day, Weekday::SUNDAY);
        assert_eq!(provider.labels_for("en-GB").first_day, Weekday::MONDAY);
        assert_eq!(provider.labels_for("es").first_day, Weekday::MONDAY);
        assert_eq!(provider.labels_for("es-MX").first_day, Weekday::SUNDAY);
        assert_eq!(provider.labels_for("pt-PT").first_day, Weekday::MONDAY);
    }

    #[test]
    fn test_unknown_and_malformed_tags_fall_back() {
        let provider = LocaleProvider::new();
        for tag in ["xx", "", "not a tag", "zz-ZZ"] {
            let labels = provider.labels_for(tag);
            assert_eq!(labels.first_day, Weekday::SUNDAY, "fallback for {tag:?}");
            assert_eq!(labels.labels[0], "Sun", "fallback for {tag:?}");
            assert_eq!(labels.locale, Locale::default());
        }
        assert!(!provider.supports("xx"));
        assert!(provider.supports("nl-BE"));
    }

    #[test]
    fn test_label_lookup() {
        let labels = LocaleProvider::new().labels_for("en");
        assert_eq!(labels.label(3), Some("Wed"));
        assert_eq!(labels.label(7), None);
    }

    #[test]
    fn test_locale_serde() {
        let locale: Locale = serde_json::from_str(r#""fr-ca""#).unwrap();
        assert_eq!(serde_json::to_string(&locale).unwrap(), r#""fr-CA""#);
    }
}
