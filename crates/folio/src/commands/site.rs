//! `folio site` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_model::Reactor;
use folio_render::SitePipeline;

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the site command.
#[derive(Args)]
pub(crate) struct SiteArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output directory of the rendered site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Skip the sitemap page.
    #[arg(long)]
    no_sitemap: bool,
}

impl SiteArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let mut settings = self.project.settings();
        let overridden = self.output_dir.is_some();
        settings.output_dir = self.output_dir;
        settings.generate_sitemap = self.no_sitemap.then_some(false);

        let reactor = self.project.load_reactor(settings)?;
        if overridden && shares_output_dir(&reactor) {
            return Err(CliError::Validation(
                "--output-dir cannot be used with a multi-module project".to_owned(),
            ));
        }
        render_reactor(&reactor, &output)
    }
}

/// Whether two projects of the reactor would render into the same directory.
fn shares_output_dir(reactor: &Reactor) -> bool {
    let projects = reactor.projects();
    projects.iter().enumerate().any(|(i, a)| {
        projects[i + 1..]
            .iter()
            .any(|b| a.site.output_dir == b.site.output_dir)
    })
}

/// Render the site of every project in the reactor.
///
/// Report failures are listed as warnings; they do not fail the build.
pub(crate) fn render_reactor(reactor: &Reactor, output: &Output) -> Result<(), CliError> {
    let pipeline = SitePipeline::new();
    for project in reactor.projects() {
        output.heading(&format!("Project: {}", project.name));
        let report = pipeline.render(project)?;
        if report.skipped {
            output.info("Skipped (site.skip)");
            continue;
        }

        for (locale, failure) in report.failures() {
            output.warning(&format!("Report failed ({locale}): {failure}"));
        }
        output.success(&format!(
            "Rendered {} pages in {} locale(s) to {}",
            report.pages(),
            report.locales.len(),
            project.site.output_dir.display()
        ));
    }
    Ok(())
}
