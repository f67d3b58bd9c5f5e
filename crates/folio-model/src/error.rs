//! Error types for model loading and assembly.

use std::path::PathBuf;

use folio_config::ConfigError;

/// Errors raised while loading projects or assembling site models.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Project configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Site descriptor is not valid YAML or has unknown fields.
    #[error("Invalid site descriptor {}: {source}", .path.display())]
    Descriptor {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Reading a descriptor or project directory failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Locale code is malformed.
    #[error("Invalid locale '{0}'")]
    InvalidLocale(String),

    /// URL could not be parsed.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    /// A project is its own ancestor.
    #[error("Project parent cycle detected at {}", .0.display())]
    ProjectCycle(PathBuf),
}
