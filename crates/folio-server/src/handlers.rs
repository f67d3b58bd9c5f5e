//! Page handler.
//!
//! Mapped documents are rendered on request. Anything else is served from
//! the web root, which holds resources and externally generated reports.

use std::fs;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::response::{IntoResponse, Response};
use folio_render::UnitOutput;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::error::ServerError;
use crate::state::{PreviewState, RequestTarget};

/// Serve a request path.
pub(crate) async fn serve(
    State(state): State<Arc<PreviewState>>,
    req: Request<Body>,
) -> Result<Response, ServerError> {
    let path = req.uri().path().to_owned();
    let target = state.resolve(&path);

    let render_state = Arc::clone(&state);
    let render_target = target.clone();
    let rendered =
        tokio::task::spawn_blocking(move || render(&render_state, &path, &render_target))
            .await??;

    if let Some(html) = rendered {
        let mime = mime_guess::from_path(&target.output_name).first_or_octet_stream();
        return Ok(([(header::CONTENT_TYPE, mime.as_ref())], html).into_response());
    }

    let Ok(response) = ServeDir::new(state.web_root()).oneshot(req).await;
    Ok(response.into_response())
}

/// Render the document at `target`, or `None` when the path is not mapped
/// or the page is served from the web root.
fn render(
    state: &PreviewState,
    path: &str,
    target: &RequestTarget,
) -> Result<Option<String>, ServerError> {
    let Some(prepared) = state.prepared(&target.locale) else {
        return Ok(None);
    };
    let Some(unit) = prepared.documents.get(&target.output_name) else {
        return Ok(None);
    };
    tracing::info!("{path} -> {} ({})", unit.describe(), target.locale);

    match state
        .pipeline
        .render_document(unit, &prepared.documents, &prepared.context)?
    {
        UnitOutput::Pages(pages) => {
            let mut pages = pages.into_iter();
            let Some(page) = pages.next() else {
                return Ok(None);
            };
            // Auxiliary report pages are served as files.
            for aux in pages {
                let file = prepared.context.output_dir.join(&aux.output_name);
                if let Some(parent) = file.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&file, aux.html)?;
            }
            Ok(Some(page.html))
        }
        UnitOutput::External | UnitOutput::Skipped => Ok(None),
        UnitOutput::Failed(failure) => Err(ServerError::Report(failure.to_string())),
    }
}
