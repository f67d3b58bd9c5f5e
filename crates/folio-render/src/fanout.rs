//! Per-locale repetition of the render pass.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use folio_model::{LocaleSet, SiteLocale};

use crate::RenderError;

/// Progress of one locale pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderPhase {
    NotStarted,
    DiscoveringDocuments,
    RenderingDocuments,
    RenderingReports,
    /// Second discovery over the generated-site directory, after reports ran.
    RenderingGeneratedDocs,
    Done,
}

impl RenderPhase {
    /// The phase that follows this one. `Done` is terminal.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::NotStarted => Self::DiscoveringDocuments,
            Self::DiscoveringDocuments => Self::RenderingDocuments,
            Self::RenderingDocuments => Self::RenderingReports,
            Self::RenderingReports => Self::RenderingGeneratedDocs,
            Self::RenderingGeneratedDocs | Self::Done => Self::Done,
        }
    }
}

impl fmt::Display for RenderPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "not started",
            Self::DiscoveringDocuments => "discovering documents",
            Self::RenderingDocuments => "rendering documents",
            Self::RenderingReports => "rendering reports",
            Self::RenderingGeneratedDocs => "rendering generated documents",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Tracks the phase of a locale pass and logs each transition.
#[derive(Debug)]
pub(crate) struct PhaseTracker<'a> {
    locale: &'a SiteLocale,
    phase: RenderPhase,
}

impl<'a> PhaseTracker<'a> {
    pub(crate) fn new(locale: &'a SiteLocale) -> Self {
        Self {
            locale,
            phase: RenderPhase::NotStarted,
        }
    }

    pub(crate) fn advance(&mut self) -> RenderPhase {
        self.phase = self.phase.next();
        tracing::debug!(locale = %self.locale, phase = %self.phase, "Render phase");
        self.phase
    }

    #[cfg(test)]
    pub(crate) fn phase(&self) -> RenderPhase {
        self.phase
    }
}

/// Runs a render function once per locale, default locale first.
#[derive(Debug, Clone, Copy)]
pub struct LocaleFanOut<'a> {
    locales: &'a LocaleSet,
}

impl<'a> LocaleFanOut<'a> {
    #[must_use]
    pub fn new(locales: &'a LocaleSet) -> Self {
        Self { locales }
    }

    /// Create each locale's output directory under `output_root` and call
    /// `render` with it.
    ///
    /// The default locale renders into `output_root` itself, every other
    /// locale into `output_root/<code>`. The first error stops the fan-out.
    pub fn for_each_locale<T, E, F>(&self, output_root: &Path, mut render: F) -> Result<Vec<T>, E>
    where
        F: FnMut(&SiteLocale, PathBuf) -> Result<T, E>,
        E: From<RenderError>,
    {
        let mut results = Vec::with_capacity(self.locales.len());
        for locale in self.locales.iter() {
            if self.locales.is_default(locale) {
                tracing::info!("Rendering site for default locale");
            } else {
                tracing::info!("Rendering site for locale '{locale}'");
            }
            let output_dir = self.locales.output_dir(output_root, locale);
            fs::create_dir_all(&output_dir).map_err(|e| RenderError::io(&output_dir, e))?;
            results.push(render(locale, output_dir)?);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_phase_order() {
        let locale = SiteLocale::default_locale();
        let mut tracker = PhaseTracker::new(&locale);
        let mut seen = vec![tracker.phase()];
        while tracker.phase() != RenderPhase::Done {
            seen.push(tracker.advance());
        }
        assert_eq!(
            seen,
            vec![
                RenderPhase::NotStarted,
                RenderPhase::DiscoveringDocuments,
                RenderPhase::RenderingDocuments,
                RenderPhase::RenderingReports,
                RenderPhase::RenderingGeneratedDocs,
                RenderPhase::Done,
            ]
        );
        assert_eq!(RenderPhase::Done.next(), RenderPhase::Done);
    }

    #[test]
    fn test_one_output_tree_per_locale() {
        let tmp = tempfile::tempdir().unwrap();
        let locales = LocaleSet::parse(&["en", "fr", "de"]).unwrap();

        let dirs = LocaleFanOut::new(&locales)
            .for_each_locale(tmp.path(), |locale, dir| {
                Ok::<_, RenderError>((locale.code().to_owned(), dir))
            })
            .unwrap();

        assert_eq!(
            dirs,
            vec![
                ("en".to_owned(), tmp.path().to_path_buf()),
                ("fr".to_owned(), tmp.path().join("fr")),
                ("de".to_owned(), tmp.path().join("de")),
            ]
        );
        assert!(tmp.path().join("fr").is_dir());
        assert!(tmp.path().join("de").is_dir());
    }

    #[test]
    fn test_error_stops_fan_out() {
        let tmp = tempfile::tempdir().unwrap();
        let locales = LocaleSet::parse(&["en", "fr", "de"]).unwrap();
        let mut visited = Vec::new();

        let result = LocaleFanOut::new(&locales).for_each_locale(tmp.path(), |locale, dir| {
            visited.push(locale.code().to_owned());
            if locale.code() == "fr" {
                return Err(RenderError::io(
                    dir,
                    std::io::Error::other("disk full"),
                ));
            }
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(visited, vec!["en".to_owned(), "fr".to_owned()]);
    }
}
