//! Preview state.
//!
//! Shared, read-only state for all request handlers. Every locale's
//! documents are registered once at startup; pages are rendered per request.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio_model::{LocaleSet, Project, SiteLocale};
use folio_render::{PreparedLocale, SitePipeline};
use percent_encoding::percent_decode_str;

use crate::error::ServerError;

/// What a request path resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub locale: SiteLocale,
    /// Output name within the locale, e.g. `guide/index.html`.
    pub output_name: String,
}

/// State shared across all handlers.
pub struct PreviewState {
    pub(crate) pipeline: SitePipeline,
    locales: LocaleSet,
    /// Prepared locales, in the order of `locales`.
    prepared: Vec<PreparedLocale>,
    web_root: PathBuf,
}

impl PreviewState {
    /// Register the documents of every locale of `project`.
    ///
    /// Resources and external reports are written to `web_root`.
    pub fn prepare(
        project: &Arc<Project>,
        pipeline: SitePipeline,
        web_root: &Path,
    ) -> Result<Self, ServerError> {
        let locales = pipeline.locales(project)?;
        let prepared = locales
            .iter()
            .map(|locale| pipeline.prepare_locale(project, &locales, locale, web_root))
            .collect::<Result<Vec<_>, _>>()?;
        for p in &prepared {
            tracing::info!(
                locale = %p.context.locale,
                documents = p.documents.len(),
                "Prepared documents"
            );
        }
        Ok(Self {
            pipeline,
            locales,
            prepared,
            web_root: web_root.to_path_buf(),
        })
    }

    #[must_use]
    pub fn web_root(&self) -> &Path {
        &self.web_root
    }

    /// Prepared documents of `locale`.
    #[must_use]
    pub fn prepared(&self, locale: &SiteLocale) -> Option<&PreparedLocale> {
        self.locales
            .iter()
            .position(|l| l == locale)
            .and_then(|i| self.prepared.get(i))
    }

    /// Resolve a request path.
    ///
    /// Directory paths get `index.html` appended. A leading `<locale>/`
    /// selects that locale; anything else belongs to the default locale.
    #[must_use]
    pub fn resolve(&self, path: &str) -> RequestTarget {
        let decoded = percent_decode_str(path).decode_utf8_lossy();
        let mut path = decoded.trim_start_matches('/').to_owned();
        if path.is_empty() || path.ends_with('/') {
            path.push_str("index.html");
        }

        if let Some((prefix, rest)) = path.split_once('/')
            && let Some(locale) = self.locales.by_prefix(prefix)
        {
            return RequestTarget {
                locale: locale.clone(),
                output_name: rest.to_owned(),
            };
        }
        RequestTarget {
            locale: self.locales.default_locale().clone(),
            output_name: path,
        }
    }
}
