//! `folio run` command implementation.

use std::sync::Arc;

use clap::Args;
use folio_config::Config;
use folio_render::SitePipeline;
use folio_server::run_server;

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the run command.
#[derive(Args)]
pub(crate) struct RunArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(long)]
    port: Option<u16>,
}

impl RunArgs {
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let mut settings = self.project.settings();
        settings.host = self.host;
        settings.port = self.port;

        let config = Config::load_project(&self.project.project, Some(&settings))?;
        let reactor = self.project.load_reactor(settings)?;
        let Some(project) = reactor.execution_root() else {
            return Ok(());
        };

        output.info(&format!(
            "Starting preview of {} on http://{}:{}/",
            project.name, config.server.host, config.server.port
        ));
        output.info(&format!(
            "Source directory: {}",
            project.site.site_dir.display()
        ));

        run_server(
            Arc::clone(project),
            SitePipeline::new(),
            &config.server.host,
            config.server.port,
        )
        .await?;
        Ok(())
    }
}
