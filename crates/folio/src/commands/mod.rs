//! CLI command implementations.

mod deploy;
mod effective_site;
mod run;
mod site;
mod stage;

use std::path::PathBuf;

use clap::Args;
use folio_config::CliSettings;
use folio_model::Reactor;

pub(crate) use deploy::DeployArgs;
pub(crate) use effective_site::EffectiveSiteArgs;
pub(crate) use run::RunArgs;
pub(crate) use site::SiteArgs;
pub(crate) use stage::StageArgs;

use crate::error::CliError;

/// Options shared by every command.
#[derive(Args, Debug)]
pub(crate) struct ProjectArgs {
    /// Project directory or its folio.toml.
    #[arg(short, long, default_value = ".")]
    pub project: PathBuf,

    /// Locales to render, comma separated (overrides config).
    #[arg(short, long, value_delimiter = ',')]
    pub locales: Option<Vec<String>>,

    /// Skip report generation.
    #[arg(long)]
    pub no_reports: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ProjectArgs {
    /// CLI settings to apply to every loaded project.
    pub(crate) fn settings(&self) -> CliSettings {
        CliSettings {
            locales: self.locales.clone(),
            generate_reports: self.no_reports.then_some(false),
            ..CliSettings::default()
        }
    }

    /// Load the project and all of its modules.
    pub(crate) fn load_reactor(&self, settings: CliSettings) -> Result<Reactor, CliError> {
        let reactor = Reactor::load(&self.project, Some(settings))?;
        if reactor.projects().is_empty() {
            return Err(CliError::Validation(format!(
                "No project found at {}",
                self.project.display()
            )));
        }
        Ok(reactor)
    }
}
