//! `folio deploy` command implementation.

use clap::Args;
use folio_config::Config;
use folio_deploy::{DeployOutcome, Deployer};

use super::ProjectArgs;
use super::site::render_reactor;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the deploy command.
#[derive(Args)]
pub(crate) struct DeployArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Deploy the already rendered site without rendering it again.
    #[arg(long)]
    no_render: bool,
}

impl DeployArgs {
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let settings = self.project.settings();
        let config = Config::load_project(&self.project.project, Some(&settings))?;

        let reactor = self.project.load_reactor(settings)?;
        if !self.no_render {
            render_reactor(&reactor, &output)?;
        }

        let deployer = Deployer::new(config.deploy.s3);
        for project in reactor.projects() {
            match deployer.deploy(project).await? {
                DeployOutcome::Deployed { target, files } => output.success(&format!(
                    "Deployed {} ({files} files) to {target}",
                    project.name
                )),
                DeployOutcome::Skipped => {
                    output.info(&format!("Skipped deployment of {}", project.name));
                }
            }
        }
        Ok(())
    }
}
