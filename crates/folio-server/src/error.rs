//! Error types for the preview server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_render::RenderError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Preparing or rendering a page failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// The report behind the requested page failed.
    #[error("Report error: {0}")]
    Report(String),

    /// A render task panicked or was cancelled.
    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Invalid listen address.
    #[error("Invalid address {0}")]
    Address(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("{self}");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
