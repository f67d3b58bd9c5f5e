//! Renders document units into decorated pages.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use folio_report::{ReportContext, ReportFailure, ReportOutcome, ReportRunner, Sink};
use minijinja::Environment;

use crate::RenderError;
use crate::context::SiteRenderingContext;
use crate::document::{DocumentSource, DocumentUnit, MarkupSource, SourceKind};
use crate::registry::ClaimedOutputs;
use crate::skin::{PageContent, SiteRenderer, write_file};

/// A decorated page ready to be written or served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Path relative to the locale output directory.
    pub output_name: String,
    pub html: String,
}

/// Result of rendering one unit.
#[derive(Debug)]
pub enum UnitOutput {
    /// The unit's page, followed by any auxiliary report pages.
    Pages(Vec<RenderedPage>),
    /// An external report wrote its own output.
    External,
    /// The report's runtime was unavailable.
    Skipped,
    /// The report failed; its pages are omitted.
    Failed(ReportFailure),
}

/// Pages written and report failures of one batch.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub pages: usize,
    pub failures: Vec<ReportFailure>,
    /// Output names of auxiliary report pages written.
    pub auxiliary: HashSet<String>,
}

impl BatchSummary {
    pub fn merge(&mut self, other: Self) {
        self.pages += other.pages;
        self.failures.extend(other.failures);
        self.auxiliary.extend(other.auxiliary);
    }
}

/// Drives parsers, reports and the skin for document units.
pub struct RendererFrontend<'a> {
    renderer: &'a dyn SiteRenderer,
    runner: ReportRunner,
}

impl<'a> RendererFrontend<'a> {
    #[must_use]
    pub fn new(renderer: &'a dyn SiteRenderer, runner: ReportRunner) -> Self {
        Self { renderer, runner }
    }

    /// Render `units` into the context's output directory.
    ///
    /// Auxiliary report pages whose output name is in `claimed`, or was
    /// already written by another report of the batch, are dropped. Report
    /// failures are logged and collected; any other error aborts the batch.
    pub fn render_batch(
        &self,
        units: &[DocumentUnit],
        claimed: &dyn ClaimedOutputs,
        ctx: &SiteRenderingContext,
    ) -> Result<BatchSummary, RenderError> {
        log_batch(units);

        let mut summary = BatchSummary::default();
        for unit in units {
            match self.render_unit(unit, claimed, ctx)? {
                UnitOutput::Pages(pages) => {
                    for (i, page) in pages.into_iter().enumerate() {
                        if i > 0 && !summary.auxiliary.insert(page.output_name.clone()) {
                            tracing::info!(
                                "Skipping page {} of {}: output is already provided by another report",
                                page.output_name,
                                unit.describe()
                            );
                            continue;
                        }
                        write_file(&ctx.output_dir.join(&page.output_name), &page.html)?;
                        summary.pages += 1;
                    }
                }
                UnitOutput::External | UnitOutput::Skipped => {}
                UnitOutput::Failed(failure) => {
                    tracing::error!(locale = %ctx.locale, "{}", error_chain(&failure));
                    summary.failures.push(failure);
                }
            }
        }
        Ok(summary)
    }

    /// Render one unit without writing it.
    ///
    /// Auxiliary report pages named like the unit itself or like an output
    /// in `claimed` are dropped with an info log.
    pub fn render_unit(
        &self,
        unit: &DocumentUnit,
        claimed: &dyn ClaimedOutputs,
        ctx: &SiteRenderingContext,
    ) -> Result<UnitOutput, RenderError> {
        tracing::debug!(output = %unit.output_name, source = %unit.describe(), "Rendering document");
        match &unit.source {
            DocumentSource::Markup(markup) => {
                let page = self.render_markup(markup, &unit.output_name, ctx)?;
                Ok(UnitOutput::Pages(vec![page]))
            }
            DocumentSource::Synthetic(sink) => {
                let page = self.decorate(sink, None, &unit.output_name, ctx)?;
                Ok(UnitOutput::Pages(vec![page]))
            }
            DocumentSource::Report(execution) => {
                let report_ctx = ReportContext {
                    project: &ctx.project,
                    locale: &ctx.locale,
                    output_dir: &ctx.output_dir,
                };
                let pages = match self.runner.run(execution, &report_ctx) {
                    Ok(ReportOutcome::Rendered(pages)) => pages,
                    Ok(ReportOutcome::External) => return Ok(UnitOutput::External),
                    Ok(ReportOutcome::Skipped) => return Ok(UnitOutput::Skipped),
                    Err(failure) => return Ok(UnitOutput::Failed(failure)),
                };

                let name = execution.report.descriptor().name(&ctx.locale);
                let mut rendered = Vec::with_capacity(pages.pages.len() + 1);
                rendered.push(self.decorate(&pages.main, Some(&name), &unit.output_name, ctx)?);
                let dir = parent_dir(&unit.output_name);
                for (page_name, sink) in &pages.pages {
                    let output_name = format!("{dir}{page_name}");
                    if output_name == unit.output_name || claimed.is_claimed(&output_name) {
                        tracing::info!(
                            "Skipping page {output_name} of {}: output is already provided by another document",
                            unit.describe()
                        );
                        continue;
                    }
                    rendered.push(self.decorate(sink, Some(&name), &output_name, ctx)?);
                }
                Ok(UnitOutput::Pages(rendered))
            }
        }
    }

    fn render_markup(
        &self,
        markup: &MarkupSource,
        output_name: &str,
        ctx: &SiteRenderingContext,
    ) -> Result<RenderedPage, RenderError> {
        let mut text =
            fs::read_to_string(&markup.path).map_err(|e| RenderError::io(&markup.path, e))?;
        if markup.template {
            text = preprocess(&text, markup, ctx)?;
        }

        let parsed = markup.parser.parse(&text);
        let page = PageContent {
            title: parsed.title,
            body: parsed.body,
        };
        let html = self.renderer.render_page(&page, output_name, ctx)?;
        Ok(RenderedPage {
            output_name: output_name.to_owned(),
            html,
        })
    }

    fn decorate(
        &self,
        sink: &Sink,
        fallback_title: Option<&str>,
        output_name: &str,
        ctx: &SiteRenderingContext,
    ) -> Result<RenderedPage, RenderError> {
        let page = PageContent {
            title: sink.title().or(fallback_title).map(str::to_owned),
            body: sink.body().to_owned(),
        };
        let html = self.renderer.render_page(&page, output_name, ctx)?;
        Ok(RenderedPage {
            output_name: output_name.to_owned(),
            html,
        })
    }
}

/// Run a `.jinja` source through minijinja with the template properties.
fn preprocess(
    text: &str,
    markup: &MarkupSource,
    ctx: &SiteRenderingContext,
) -> Result<String, RenderError> {
    let env = Environment::new();
    let processed = env
        .render_str(text, &ctx.properties)
        .map_err(|source| RenderError::Template {
            name: markup.relative_path.clone(),
            source,
        })?;

    if let Some(dir) = &ctx.processed_dir {
        let path = dir.join(markup.parser.id()).join(&markup.relative_path);
        tracing::debug!(path = %path.display(), "Saving processed content");
        write_file(&path, &processed)?;
    }
    Ok(processed)
}

/// `a/b/page.html` gives `a/b/`, `page.html` gives an empty string.
fn parent_dir(output_name: &str) -> &str {
    output_name.rfind('/').map_or("", |i| &output_name[..=i])
}

/// `err` followed by its sources, joined with `: `.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn log_batch(units: &[DocumentUnit]) {
    let mut markup: BTreeMap<SourceKind, BTreeMap<&str, usize>> = BTreeMap::new();
    let mut reports = 0;
    let mut others = 0;
    for unit in units {
        match unit.source {
            DocumentSource::Markup(_) => {
                *markup
                    .entry(unit.source_kind)
                    .or_default()
                    .entry(unit.generator.as_str())
                    .or_default() += 1;
            }
            DocumentSource::Report(_) => reports += 1,
            DocumentSource::Synthetic(_) => others += 1,
        }
    }

    for (kind, counts) in &markup {
        let total: usize = counts.values().sum();
        let detail = counts
            .iter()
            .map(|(generator, count)| format!("{count} {generator}"))
            .collect::<Vec<_>>()
            .join(", ");
        let label = if *kind == SourceKind::Generated {
            "generated source"
        } else {
            "source"
        };
        tracing::info!("Rendering {total} {label} documents: {detail}");
    }
    if reports > 0 {
        tracing::info!("Rendering {reports} report documents");
    }
    if others > 0 {
        tracing::info!("Rendering {others} other documents");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ContextRequest, DefaultContextBuilder, RenderingContextBuilder};
    use crate::parser::ParserKind;
    use folio_model::{LocaleSet, Project, ReportCategory, SiteLocale};
    use folio_report::{
        MultiPageReport, Report, ReportDescriptor, ReportError, ReportExecution, SinkFactory,
    };
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use std::sync::Arc;

    /// Writes the title and body verbatim.
    struct BareSkin;

    impl SiteRenderer for BareSkin {
        fn render_page(
            &self,
            page: &PageContent,
            output_name: &str,
            _ctx: &SiteRenderingContext,
        ) -> Result<String, RenderError> {
            Ok(format!(
                "{output_name}|{}|{}",
                page.title.as_deref().unwrap_or_default(),
                page.body
            ))
        }

        fn copy_resources(
            &self,
            _ctx: &SiteRenderingContext,
            _output_dir: &Path,
        ) -> Result<(), RenderError> {
            Ok(())
        }
    }

    struct Paged {
        pages: &'static [&'static str],
        fail: bool,
    }

    impl ReportDescriptor for Paged {
        fn output_name(&self) -> &str {
            "dir/paged"
        }
        fn name(&self, _locale: &SiteLocale) -> String {
            "Paged".to_owned()
        }
        fn description(&self, _locale: &SiteLocale) -> String {
            String::new()
        }
        fn category(&self) -> ReportCategory {
            ReportCategory::ProjectReports
        }
    }

    impl MultiPageReport for Paged {
        fn generate(
            &self,
            sink: &mut Sink,
            factory: &mut dyn SinkFactory,
            _ctx: &ReportContext<'_>,
        ) -> Result<(), ReportError> {
            if self.fail {
                return Err(ReportError::Generation("broken".to_owned()));
            }
            sink.paragraph("main");
            for page in self.pages {
                factory.create_sink(page).paragraph(page);
            }
            Ok(())
        }
    }

    fn report_unit(pages: &'static [&'static str], fail: bool) -> DocumentUnit {
        DocumentUnit {
            output_name: "dir/paged.html".to_owned(),
            source_kind: SourceKind::Report,
            localized_source_dir: None,
            editable: false,
            generator: "test:paged".to_owned(),
            source: DocumentSource::Report(ReportExecution {
                plugin_id: "test".to_owned(),
                goal: "paged".to_owned(),
                report: Report::MultiPage(Arc::new(Paged { pages, fail })),
                user_defined: true,
            }),
        }
    }

    fn context(project: Project, out: &Path) -> SiteRenderingContext {
        let project = Arc::new(project);
        let locales = LocaleSet::parse(&["default"]).unwrap();
        DefaultContextBuilder
            .build(ContextRequest {
                project: &project,
                locales: &locales,
                locale: &SiteLocale::default_locale(),
                reports: &[],
                output_dir: out,
            })
            .unwrap()
    }

    fn markup_unit(path: PathBuf, relative_path: &str, template: bool) -> DocumentUnit {
        DocumentUnit {
            output_name: "index.html".to_owned(),
            source_kind: SourceKind::Handwritten,
            localized_source_dir: None,
            editable: true,
            generator: "markdown".to_owned(),
            source: DocumentSource::Markup(MarkupSource {
                parser: ParserKind::Markdown,
                path,
                relative_path: relative_path.to_owned(),
                template,
            }),
        }
    }

    #[test]
    fn test_multi_page_report_writes_one_file_per_sink() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        let ctx = context(Project::with_base_dir("demo", tmp.path()), &out);
        let frontend = RendererFrontend::new(&BareSkin, ReportRunner);

        let summary = frontend
            .render_batch(&[report_unit(&["a", "b"], false)], &HashSet::new(), &ctx)
            .unwrap();

        assert_eq!(summary.pages, 3);
        assert!(summary.failures.is_empty());
        assert_eq!(
            fs::read_to_string(out.join("dir/paged.html")).unwrap(),
            "dir/paged.html|Paged|<p>main</p>\n"
        );
        assert!(out.join("dir/a.html").is_file());
        assert!(out.join("dir/b.html").is_file());
    }

    #[test]
    fn test_sub_pages_never_replace_claimed_outputs() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        let ctx = context(Project::with_base_dir("demo", tmp.path()), &out);
        let frontend = RendererFrontend::new(&BareSkin, ReportRunner);
        fs::create_dir_all(out.join("dir")).unwrap();
        fs::write(out.join("dir/index.html"), "handwritten").unwrap();
        let claimed: HashSet<String> = ["dir/index.html".to_owned(), "dir/paged.html".to_owned()]
            .into_iter()
            .collect();

        let summary = frontend
            .render_batch(
                &[report_unit(&["index", "paged", "extra"], false)],
                &claimed,
                &ctx,
            )
            .unwrap();

        assert_eq!(summary.pages, 2);
        assert_eq!(
            fs::read_to_string(out.join("dir/index.html")).unwrap(),
            "handwritten"
        );
        assert_eq!(
            fs::read_to_string(out.join("dir/paged.html")).unwrap(),
            "dir/paged.html|Paged|<p>main</p>\n"
        );
        assert!(out.join("dir/extra.html").is_file());
    }

    #[test]
    fn test_sub_page_written_once_per_batch() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        let ctx = context(Project::with_base_dir("demo", tmp.path()), &out);
        let frontend = RendererFrontend::new(&BareSkin, ReportRunner);
        let mut second = report_unit(&["shared"], false);
        second.output_name = "dir/other.html".to_owned();

        let summary = frontend
            .render_batch(
                &[report_unit(&["shared"], false), second],
                &HashSet::new(),
                &ctx,
            )
            .unwrap();

        assert_eq!(summary.pages, 3);
        assert_eq!(
            summary.auxiliary,
            HashSet::from(["dir/shared.html".to_owned()])
        );
    }

    #[test]
    fn test_report_without_sub_pages_writes_main_only() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        let ctx = context(Project::with_base_dir("demo", tmp.path()), &out);
        let frontend = RendererFrontend::new(&BareSkin, ReportRunner);

        let summary = frontend
            .render_batch(&[report_unit(&[], false)], &HashSet::new(), &ctx)
            .unwrap();
        assert_eq!(summary.pages, 1);
        assert_eq!(fs::read_dir(out.join("dir")).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_report_does_not_stop_batch() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        let source = tmp.path().join("index.md");
        fs::write(&source, "# Home\n\nWelcome").unwrap();
        let ctx = context(Project::with_base_dir("demo", tmp.path()), &out);
        let frontend = RendererFrontend::new(&BareSkin, ReportRunner);

        let units = vec![report_unit(&["a"], true), markup_unit(source, "index.md", false)];
        let summary = frontend.render_batch(&units, &HashSet::new(), &ctx).unwrap();

        assert_eq!(summary.pages, 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].identity(), "test:paged");
        assert!(!out.join("dir/paged.html").exists());
        assert!(out.join("index.html").is_file());
    }

    #[test]
    fn test_template_source_is_preprocessed_and_saved() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("index.md.jinja");
        fs::write(&source, "# {{ project }}\n\nTeam {{ team }}").unwrap();
        let mut project = Project::with_base_dir("Demo", tmp.path());
        project.site.save_processed_content = true;
        project
            .site
            .attributes
            .insert("team".to_owned(), "Docs".to_owned());
        let processed = project.site.processed_dir();
        let ctx = context(project, &tmp.path().join("out"));
        let frontend = RendererFrontend::new(&BareSkin, ReportRunner);

        let UnitOutput::Pages(pages) = frontend
            .render_unit(&markup_unit(source, "index.md", true), &HashSet::new(), &ctx)
            .unwrap()
        else {
            panic!("expected pages");
        };

        assert!(pages[0].html.starts_with("index.html|Demo|"));
        assert!(pages[0].html.contains("Team Docs"));
        assert_eq!(
            fs::read_to_string(processed.join("markdown/index.md")).unwrap(),
            "# Demo\n\nTeam Docs"
        );
    }

    #[test]
    fn test_template_error_names_source() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("bad.md.jinja");
        fs::write(&source, "{% if %}").unwrap();
        let ctx = context(Project::with_base_dir("demo", tmp.path()), tmp.path());
        let frontend = RendererFrontend::new(&BareSkin, ReportRunner);

        let err = frontend
            .render_unit(&markup_unit(source, "bad.md", true), &HashSet::new(), &ctx)
            .unwrap_err();
        assert!(matches!(err, RenderError::Template { name, .. } if name == "bad.md"));
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir("index.html"), "");
        assert_eq!(parent_dir("a/b/page.html"), "a/b/");
    }
}
