//! Reports backed by external programs.
//!
//! The program runs in the project directory with these variables set:
//!
//! - `FOLIO_LOCALE`: locale code of the pass
//! - `FOLIO_PROJECT_DIR`: project base directory
//! - `FOLIO_OUTPUT_DIR`: locale output directory
//! - `FOLIO_PAGES_DIR`: directory for auxiliary pages (multi-page reports)
//!
//! Standard output becomes the body of the main page. Every `*.html` file left
//! in `FOLIO_PAGES_DIR` becomes an auxiliary page of the same name.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::process::{Command, Output};

use folio_config::ReportConfig;
use folio_model::{ReportCategory, SiteLocale};

use crate::ReportError;
use crate::report::{MultiPageReport, ReportContext, ReportDescriptor, SinglePageReport};
use crate::sink::{Sink, SinkFactory};

/// A report generated by running a configured command.
#[derive(Debug, Clone)]
pub struct CommandReport {
    output_name: String,
    name: Option<String>,
    description: Option<String>,
    names: BTreeMap<String, String>,
    descriptions: BTreeMap<String, String>,
    category: ReportCategory,
    command: Vec<String>,
    external: bool,
    requires: Vec<String>,
}

impl CommandReport {
    #[must_use]
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            output_name: config.output_name.clone(),
            name: config.name.clone(),
            description: config.description.clone(),
            names: config.names.clone(),
            descriptions: config.descriptions.clone(),
            category: config.category,
            command: config.command.clone(),
            external: config.external,
            requires: config.requires.clone(),
        }
    }

    fn run(&self, ctx: &ReportContext<'_>, pages_dir: Option<&Path>) -> Result<Output, ReportError> {
        let Some((program, args)) = self.command.split_first() else {
            return Err(ReportError::Generation("empty command".to_owned()));
        };

        let mut command = Command::new(program);
        command
            .args(args)
            .current_dir(&ctx.project.base_dir)
            .env("FOLIO_LOCALE", ctx.locale.code())
            .env("FOLIO_PROJECT_DIR", &ctx.project.base_dir)
            .env("FOLIO_OUTPUT_DIR", ctx.output_dir);
        if let Some(dir) = pages_dir {
            command.env("FOLIO_PAGES_DIR", dir);
        }

        tracing::debug!(program = %program, "Running report command");
        let output = command.output().map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                ReportError::Unavailable(format!("program '{program}' not found"))
            } else {
                ReportError::Io(err)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReportError::Generation(format!(
                "'{}' failed with {}: {}",
                self.command.join(" "),
                output.status,
                stderr.trim()
            )));
        }
        Ok(output)
    }

    fn fill_main(&self, sink: &mut Sink, output: &Output, locale: &SiteLocale) {
        if self.external {
            return;
        }
        sink.set_title(&self.name(locale));
        sink.raw(&String::from_utf8_lossy(&output.stdout));
    }
}

fn localized<'a>(
    map: &'a BTreeMap<String, String>,
    locale: &SiteLocale,
) -> Option<&'a String> {
    map.get(locale.code()).or_else(|| map.get(locale.language()))
}

impl ReportDescriptor for CommandReport {
    fn output_name(&self) -> &str {
        &self.output_name
    }

    fn name(&self, locale: &SiteLocale) -> String {
        localized(&self.names, locale)
            .or(self.name.as_ref())
            .unwrap_or(&self.output_name)
            .clone()
    }

    fn description(&self, locale: &SiteLocale) -> String {
        localized(&self.descriptions, locale)
            .or(self.description.as_ref())
            .cloned()
            .unwrap_or_default()
    }

    fn category(&self) -> ReportCategory {
        self.category
    }

    fn is_external(&self) -> bool {
        self.external
    }

    fn can_generate(&self, ctx: &ReportContext<'_>) -> Result<bool, ReportError> {
        Ok(self
            .requires
            .iter()
            .all(|file| ctx.project.base_dir.join(file).exists()))
    }
}

impl SinglePageReport for CommandReport {
    fn generate(&self, sink: &mut Sink, ctx: &ReportContext<'_>) -> Result<(), ReportError> {
        let output = self.run(ctx, None)?;
        self.fill_main(sink, &output, ctx.locale);
        Ok(())
    }
}

impl MultiPageReport for CommandReport {
    fn generate(
        &self,
        sink: &mut Sink,
        factory: &mut dyn SinkFactory,
        ctx: &ReportContext<'_>,
    ) -> Result<(), ReportError> {
        let pages_dir = tempfile::tempdir()?;
        let output = self.run(ctx, Some(pages_dir.path()))?;
        self.fill_main(sink, &output, ctx.locale);

        let mut pages: Vec<_> = std::fs::read_dir(pages_dir.path())?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "html"))
            .collect();
        pages.sort();

        for path in pages {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let content = std::fs::read_to_string(&path)?;
            factory.create_sink(name).raw(&content);
        }
        Ok(())
    }
}
