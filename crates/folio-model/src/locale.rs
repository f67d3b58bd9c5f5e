//! Locales and locale-scoped paths.
//!
//! The first locale of a [`LocaleSet`] is the default locale. Its output is
//! written to the site root; every other locale renders into a
//! subdirectory named after its code.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::ModelError;

static LOCALE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:default|[a-z]{2,3}(?:[_-](?:[A-Za-z]{2}|[0-9]{3}))?)$").unwrap()
});

/// A locale code such as `en`, `fr_CA` or the placeholder `default`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SiteLocale(String);

impl SiteLocale {
    /// Placeholder code for the build's default language.
    pub const DEFAULT: &'static str = "default";

    /// Parse and validate a locale code.
    pub fn parse(code: &str) -> Result<Self, ModelError> {
        let code = code.trim();
        if !LOCALE_RE.is_match(code) {
            return Err(ModelError::InvalidLocale(code.to_owned()));
        }
        Ok(Self(code.to_owned()))
    }

    /// The `default` placeholder locale.
    #[must_use]
    pub fn default_locale() -> Self {
        Self(Self::DEFAULT.to_owned())
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Two-letter language used for message lookup.
    ///
    /// The `default` placeholder resolves to English.
    #[must_use]
    pub fn language(&self) -> &str {
        if self.0 == Self::DEFAULT {
            return "en";
        }
        self.0.split(['_', '-']).next().unwrap_or(&self.0)
    }
}

impl fmt::Display for SiteLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered set of locales requested for a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet {
    locales: Vec<SiteLocale>,
}

impl LocaleSet {
    /// Build a locale set from configured codes.
    ///
    /// Duplicates are dropped with a warning. An empty list yields the
    /// single `default` locale.
    pub fn parse<S: AsRef<str>>(codes: &[S]) -> Result<Self, ModelError> {
        let mut locales: Vec<SiteLocale> = Vec::with_capacity(codes.len());
        for code in codes {
            let locale = SiteLocale::parse(code.as_ref())?;
            if locales.contains(&locale) {
                tracing::warn!(locale = %locale, "Locale listed twice, ignoring duplicate");
                continue;
            }
            locales.push(locale);
        }
        if locales.is_empty() {
            locales.push(SiteLocale::default_locale());
        }
        Ok(Self { locales })
    }

    /// Locale whose output is written without a path prefix.
    #[must_use]
    pub fn default_locale(&self) -> &SiteLocale {
        // parse() never yields an empty set
        &self.locales[0]
    }

    #[must_use]
    pub fn is_default(&self, locale: &SiteLocale) -> bool {
        self.default_locale() == locale
    }

    pub fn iter(&self) -> impl Iterator<Item = &SiteLocale> {
        self.locales.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Look up a locale by its path prefix, ignoring the default locale.
    #[must_use]
    pub fn by_prefix(&self, prefix: &str) -> Option<&SiteLocale> {
        self.locales
            .iter()
            .skip(1)
            .find(|locale| locale.code() == prefix)
    }

    /// Output directory for `locale`: the root for the default, `root/<code>` otherwise.
    #[must_use]
    pub fn output_dir(&self, root: &Path, locale: &SiteLocale) -> PathBuf {
        if self.is_default(locale) {
            root.to_path_buf()
        } else {
            root.join(locale.code())
        }
    }

    /// Path prefix used in URLs for `locale`, `None` for the default.
    #[must_use]
    pub fn path_prefix<'a>(&self, locale: &'a SiteLocale) -> Option<&'a str> {
        (!self.is_default(locale)).then(|| locale.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_valid_codes() {
        for code in ["default", "en", "fr_CA", "pt-BR", "es_419", "fil"] {
            assert!(SiteLocale::parse(code).is_ok(), "{code} should be valid");
        }
    }

    #[test]
    fn test_parse_invalid_codes() {
        for code in ["", "EN", "fr/ca", "../etc", "english"] {
            let err = SiteLocale::parse(code).unwrap_err();
            assert!(matches!(err, ModelError::InvalidLocale(_)), "{code}");
        }
    }

    #[test]
    fn test_language() {
        assert_eq!(SiteLocale::default_locale().language(), "en");
        assert_eq!(SiteLocale::parse("fr_CA").unwrap().language(), "fr");
        assert_eq!(SiteLocale::parse("de").unwrap().language(), "de");
    }

    #[test]
    fn test_first_locale_is_default() {
        let set = LocaleSet::parse(&["en", "fr", "de"]).unwrap();
        assert_eq!(set.default_locale().code(), "en");
        assert!(set.is_default(&SiteLocale::parse("en").unwrap()));
        assert!(!set.is_default(&SiteLocale::parse("fr").unwrap()));
    }

    #[test]
    fn test_duplicates_dropped() {
        let set = LocaleSet::parse(&["default", "fr", "fr"]).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_empty_yields_default() {
        let set = LocaleSet::parse::<&str>(&[]).unwrap();
        assert_eq!(set.default_locale(), &SiteLocale::default_locale());
    }

    #[test]
    fn test_output_dirs_one_unprefixed() {
        let set = LocaleSet::parse(&["default", "fr", "de"]).unwrap();
        let root = Path::new("/out");
        let dirs: Vec<PathBuf> = set.iter().map(|l| set.output_dir(root, l)).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/out"),
                PathBuf::from("/out/fr"),
                PathBuf::from("/out/de")
            ]
        );
        assert_eq!(dirs.iter().filter(|d| d.as_path() == root).count(), 1);
    }

    #[test]
    fn test_by_prefix_skips_default() {
        let set = LocaleSet::parse(&["en", "fr"]).unwrap();
        assert_eq!(set.by_prefix("fr").map(SiteLocale::code), Some("fr"));
        assert!(set.by_prefix("en").is_none());
        assert!(set.by_prefix("css").is_none());
    }
}
