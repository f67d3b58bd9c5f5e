//! `folio effective-site` command implementation.

use clap::Args;
use console::Term;
use folio_model::{LocaleSet, SiteLocale, SiteModelAssembler};
use folio_render::SitePipeline;

use super::ProjectArgs;
use crate::error::CliError;

/// Arguments for the effective-site command.
#[derive(Args)]
pub(crate) struct EffectiveSiteArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Locale of the site model (default: the first configured locale).
    #[arg(long)]
    locale: Option<String>,
}

impl EffectiveSiteArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let reactor = self.project.load_reactor(self.project.settings())?;
        let Some(project) = reactor.execution_root() else {
            return Ok(());
        };

        let locales = SitePipeline::new().locales(project)?;
        let locale = select_locale(&locales, self.locale.as_deref())?;
        let model = SiteModelAssembler.assemble(project, &locales, &locale)?;
        let yaml = serde_yaml::to_string(&model)
            .map_err(|e| CliError::Validation(format!("Failed to serialize site model: {e}")))?;

        Term::stdout().write_str(&yaml)?;
        Ok(())
    }
}

/// The locale named `code`, or the default locale.
fn select_locale(locales: &LocaleSet, code: Option<&str>) -> Result<SiteLocale, CliError> {
    let Some(code) = code else {
        return Ok(locales.default_locale().clone());
    };
    locales
        .iter()
        .find(|l| l.code() == code)
        .cloned()
        .ok_or_else(|| CliError::Validation(format!("Locale '{code}' is not configured")))
}
