//! `folio stage` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_deploy::{StageOutcome, Stager, staging_dir};

use super::ProjectArgs;
use super::site::render_reactor;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the stage command.
#[derive(Args)]
pub(crate) struct StageArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Staging directory (default: <build dir>/staging of the execution root).
    #[arg(short, long)]
    staging_dir: Option<PathBuf>,
}

impl StageArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let mut settings = self.project.settings();
        settings.staging_dir = self.staging_dir;

        let reactor = self.project.load_reactor(settings)?;
        render_reactor(&reactor, &output)?;

        let Some(root) = reactor.execution_root() else {
            return Ok(());
        };
        let stager = Stager::new(staging_dir(root));
        for project in reactor.projects() {
            match stager.stage(project, root)? {
                StageOutcome::Staged { target, files } => output.info(&format!(
                    "Staged {} ({files} files) to {}",
                    project.name,
                    target.display()
                )),
                StageOutcome::Skipped => output.info(&format!("Skipped staging {}", project.name)),
            }
        }

        output.success(&format!(
            "Site staged to {}",
            stager.staging_dir().display()
        ));
        Ok(())
    }
}
