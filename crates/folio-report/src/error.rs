//! Report error types.

/// Error returned by a report implementation.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The report ran and failed.
    #[error("{0}")]
    Generation(String),

    /// I/O failure while producing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The report's runtime is missing or cannot be loaded.
    ///
    /// Reports raising this are skipped with a warning instead of failing.
    #[error("{0}")]
    Unavailable(String),
}

/// A report that failed during a site build, with the generator's identity.
#[derive(Debug, thiserror::Error)]
pub enum ReportFailure {
    /// The report returned an error.
    #[error("Error generating {plugin}:{goal} report")]
    Generation {
        plugin: String,
        goal: String,
        #[source]
        source: ReportError,
    },

    /// The report panicked.
    #[error("Error generating {plugin}:{goal} report: {message}")]
    Panicked {
        plugin: String,
        goal: String,
        message: String,
    },
}

impl ReportFailure {
    /// `plugin:goal` of the failed report.
    #[must_use]
    pub fn identity(&self) -> String {
        match self {
            Self::Generation { plugin, goal, .. } | Self::Panicked { plugin, goal, .. } => {
                format!("{plugin}:{goal}")
            }
        }
    }
}
