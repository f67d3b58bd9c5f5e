//! Staging and deployment errors.

use std::path::PathBuf;

/// Error returned when staging or deploying a site.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The project has no `[distribution] site_url`.
    #[error("Missing site information in the distribution section of project '{0}'")]
    MissingDistribution(String),

    /// The deployment URL uses a scheme without a transport.
    #[error("Unsupported deployment transport for '{0}': use file:// or s3://")]
    UnsupportedTransport(String),

    /// The deployment URL could not be parsed.
    #[error("Invalid deployment URL '{0}'")]
    InvalidUrl(String),

    /// The rendered site to copy does not exist.
    #[error("Site directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("S3 error: {0}")]
    S3(String),
}

impl DeployError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
