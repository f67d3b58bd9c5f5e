//! Preview server for Folio sites.
//!
//! ```text
//! Browser ──HTTP──► axum fallback handler
//!                        │
//!                        ├─► RequestTarget (locale + output name)
//!                        │       │
//!                        │       └─► mapped document ──► SitePipeline::render_document
//!                        │
//!                        └─► web root (ServeDir): resources, external reports
//! ```
//!
//! Documents are registered once at startup and rendered on every request,
//! so edits to existing pages show up on reload.

mod error;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use folio_model::Project;
use folio_render::SitePipeline;

pub use error::ServerError;
pub use state::{PreviewState, RequestTarget};

/// Create the application router.
pub fn create_router(state: Arc<PreviewState>) -> Router {
    Router::new()
        .fallback(handlers::serve)
        .with_state(state)
}

/// Serve `project` on `host:port` until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the documents cannot be prepared or the server fails
/// to start.
pub async fn run_server(
    project: Arc<Project>,
    pipeline: SitePipeline,
    host: &str,
    port: u16,
) -> Result<(), ServerError> {
    let addr = SocketAddr::from_str(&format!("{host}:{port}"))
        .map_err(|_| ServerError::Address(format!("{host}:{port}")))?;

    let web_root = tempfile::Builder::new().prefix("folio-preview").tempdir()?;
    tracing::debug!(web_root = %web_root.path().display(), "Preparing preview");
    let root = web_root.path().to_path_buf();
    let state =
        tokio::task::spawn_blocking(move || PreviewState::prepare(&project, pipeline, &root))
            .await??;
    let app = create_router(Arc::new(state));

    tracing::info!(address = %addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    drop(web_root);
    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
