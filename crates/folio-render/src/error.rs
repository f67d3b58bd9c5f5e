//! Rendering errors.

use std::path::PathBuf;

use folio_model::ModelError;

/// Errors that abort a render pass.
///
/// Per-report failures are not represented here: they are collected in the
/// pass summary and the pass continues.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Project or site model could not be loaded.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Reading a source or writing output failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A skin or source template failed to render.
    #[error("Template error in {name}: {source}")]
    Template {
        name: String,
        source: minijinja::Error,
    },

    /// A module exclude pattern is not a valid glob.
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },

    /// `site.publish_date` is not an RFC 3339 timestamp.
    #[error("Invalid publish date '{value}': {source}")]
    InvalidPublishDate {
        value: String,
        source: chrono::ParseError,
    },
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
