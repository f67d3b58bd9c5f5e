//! CLI error types.

use folio_config::ConfigError;
use folio_deploy::DeployError;
use folio_model::ModelError;
use folio_render::RenderError;
use folio_server::ServerError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Model(#[from] ModelError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Deploy(#[from] DeployError),

    #[error("{0}")]
    Server(#[from] ServerError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),
}
