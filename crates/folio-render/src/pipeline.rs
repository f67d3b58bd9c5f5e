//! The site render pipeline of one project.
//!
//! ```text
//! LocaleResolver ──► LocaleFanOut ──► per locale:
//!                                      ReportSource + can_generate filter
//!                                      RenderingContextBuilder
//!                                      SiteRenderer::copy_resources
//!                                      hand-written sources ──► render
//!                                      reports, summaries, sitemap ──► render
//!                                      generated sources (rescanned) ──► render
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio_model::{LocaleSet, Project, ReportCategory, ReportMenuEntry, SiteLocale};
use folio_report::{
    ReportContext, ReportExecution, ReportFailure, ReportRunner, Sink, configured_reports,
    filter_generatable,
};

use crate::RenderError;
use crate::context::{
    ConfiguredLocales, ContextRequest, DefaultContextBuilder, LocaleResolver,
    RenderingContextBuilder, SiteRenderingContext,
};
use crate::discovery::discover;
use crate::document::{DocumentSource, DocumentUnit, SourceKind};
use crate::fanout::{LocaleFanOut, PhaseTracker};
use crate::frontend::{BatchSummary, RendererFrontend, UnitOutput};
use crate::registry::{DocumentMap, DocumentRegistry};
use crate::skin::{SiteRenderer, TemplateSkin};
use crate::summary::{SummaryEntry, category_summary, sitemap_page, summary_output_name};

/// Generator name of pages Folio computes itself.
const SYNTHETIC_GENERATOR: &str = "folio";

/// Supplies the reports of a project.
pub trait ReportSource: Send + Sync {
    fn reports(&self, project: &Project) -> Vec<ReportExecution>;
}

/// Built-in and `[[reporting.reports]]` reports, unless
/// `site.generate_reports` is off.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfiguredReports;

impl ReportSource for ConfiguredReports {
    fn reports(&self, project: &Project) -> Vec<ReportExecution> {
        if project.site.generate_reports {
            configured_reports(project)
        } else {
            Vec::new()
        }
    }
}

/// Outcome of one locale pass.
#[derive(Debug)]
pub struct LocaleReport {
    pub locale: SiteLocale,
    pub output_dir: PathBuf,
    pub pages: usize,
    /// Reports that failed; their pages are missing from the output.
    pub failures: Vec<ReportFailure>,
}

/// Outcome of rendering one project.
#[derive(Debug)]
pub struct SiteRenderReport {
    pub project: String,
    /// `site.skip` was set and nothing was rendered.
    pub skipped: bool,
    pub locales: Vec<LocaleReport>,
}

impl SiteRenderReport {
    #[must_use]
    pub fn pages(&self) -> usize {
        self.locales.iter().map(|l| l.pages).sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&SiteLocale, &ReportFailure)> {
        self.locales
            .iter()
            .flat_map(|l| l.failures.iter().map(move |f| (&l.locale, f)))
    }
}

/// Finalized documents of one locale, ready to be rendered on demand.
#[derive(Debug, Clone)]
pub struct PreparedLocale {
    pub context: Arc<SiteRenderingContext>,
    pub documents: DocumentMap,
}

/// Reports and context of a locale before any document is registered.
struct LocalePlan {
    ctx: SiteRenderingContext,
    executions: Vec<ReportExecution>,
    entries: Vec<SummaryEntry>,
}

/// Renders a project's site for every locale.
pub struct SitePipeline {
    context_builder: Box<dyn RenderingContextBuilder>,
    locale_resolver: Box<dyn LocaleResolver>,
    report_source: Box<dyn ReportSource>,
    renderer: Box<dyn SiteRenderer>,
    runner: ReportRunner,
}

impl Default for SitePipeline {
    fn default() -> Self {
        Self {
            context_builder: Box::new(DefaultContextBuilder),
            locale_resolver: Box::new(ConfiguredLocales),
            report_source: Box::new(ConfiguredReports),
            renderer: Box::new(TemplateSkin::new()),
            runner: ReportRunner,
        }
    }
}

impl SitePipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_context_builder(mut self, builder: impl RenderingContextBuilder + 'static) -> Self {
        self.context_builder = Box::new(builder);
        self
    }

    #[must_use]
    pub fn with_locale_resolver(mut self, resolver: impl LocaleResolver + 'static) -> Self {
        self.locale_resolver = Box::new(resolver);
        self
    }

    #[must_use]
    pub fn with_report_source(mut self, source: impl ReportSource + 'static) -> Self {
        self.report_source = Box::new(source);
        self
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: impl SiteRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Locales `project` renders.
    pub fn locales(&self, project: &Project) -> Result<LocaleSet, RenderError> {
        self.locale_resolver.resolve(project)
    }

    /// Render the site of `project` into `site.output_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error for configuration, template and I/O failures. Report
    /// failures are collected in the returned [`SiteRenderReport`].
    pub fn render(&self, project: &Arc<Project>) -> Result<SiteRenderReport, RenderError> {
        if project.site.skip {
            tracing::info!(project = %project.name, "Skipping site generation");
            return Ok(SiteRenderReport {
                project: project.name.clone(),
                skipped: true,
                locales: Vec::new(),
            });
        }

        let locales = self.locales(project)?;
        let reports = LocaleFanOut::new(&locales).for_each_locale(
            &project.site.output_dir,
            |locale, output_dir| self.render_locale(project, &locales, locale, output_dir),
        )?;
        Ok(SiteRenderReport {
            project: project.name.clone(),
            skipped: false,
            locales: reports,
        })
    }

    fn render_locale(
        &self,
        project: &Arc<Project>,
        locales: &LocaleSet,
        locale: &SiteLocale,
        output_dir: PathBuf,
    ) -> Result<LocaleReport, RenderError> {
        let mut phases = PhaseTracker::new(locale);
        let frontend = RendererFrontend::new(self.renderer.as_ref(), self.runner);
        let mut summary = BatchSummary::default();

        phases.advance();
        let plan = self.plan(project, locales, locale, &output_dir)?;
        let ctx = &plan.ctx;
        let mut registry = DocumentRegistry::new();
        register_all(&mut registry, discover(&ctx.site_dirs, SourceKind::Handwritten, ctx)?);
        let handwritten = registry.len();
        let existing = register_generated(&mut registry, ctx, &HashSet::new(), &HashSet::new())?;
        let generated = registry.len();

        // Rendered pages overwrite resources of the same name.
        self.renderer.copy_resources(ctx, &output_dir)?;

        phases.advance();
        summary.merge(frontend.render_batch(&registry.since(0)[..handwritten], &registry, ctx)?);

        phases.advance();
        register_reports(&mut registry, &plan);
        let reports = frontend.render_batch(registry.since(generated), &registry, ctx)?;
        let report_pages = reports.auxiliary.clone();
        summary.merge(reports);

        // Reports may have written new generated sources.
        phases.advance();
        let mark = registry.len();
        register_generated(&mut registry, ctx, &existing, &report_pages)?;
        let units: Vec<DocumentUnit> = registry.since(0)[handwritten..generated]
            .iter()
            .chain(registry.since(mark))
            .cloned()
            .collect();
        summary.merge(frontend.render_batch(&units, &registry, ctx)?);
        phases.advance();

        Ok(LocaleReport {
            locale: locale.clone(),
            output_dir,
            pages: summary.pages,
            failures: summary.failures,
        })
    }

    /// Register every document of `locale` without rendering, for serving
    /// pages on demand from `web_root`.
    ///
    /// Resources are copied and external reports are generated into
    /// `web_root` so that they can be served as static files.
    pub fn prepare_locale(
        &self,
        project: &Arc<Project>,
        locales: &LocaleSet,
        locale: &SiteLocale,
        web_root: &Path,
    ) -> Result<PreparedLocale, RenderError> {
        let output_dir = locales.output_dir(web_root, locale);
        std::fs::create_dir_all(&output_dir).map_err(|e| RenderError::io(&output_dir, e))?;

        let plan = self.plan(project, locales, locale, &output_dir)?;
        let ctx = &plan.ctx;
        let mut registry = DocumentRegistry::new();
        register_all(&mut registry, discover(&ctx.site_dirs, SourceKind::Handwritten, ctx)?);
        let existing = register_generated(&mut registry, ctx, &HashSet::new(), &HashSet::new())?;
        self.renderer.copy_resources(ctx, &output_dir)?;
        let mark = registry.len();
        register_reports(&mut registry, &plan);

        let frontend = RendererFrontend::new(self.renderer.as_ref(), self.runner);
        for unit in registry.since(mark) {
            let DocumentSource::Report(execution) = &unit.source else {
                continue;
            };
            if !execution.report.descriptor().is_external() {
                continue;
            }
            if let UnitOutput::Failed(failure) = frontend.render_unit(unit, &registry, ctx)? {
                tracing::error!(locale = %locale, "{failure}");
            }
        }

        register_generated(&mut registry, ctx, &existing, &HashSet::new())?;

        Ok(PreparedLocale {
            context: Arc::new(plan.ctx),
            documents: registry.finalize(),
        })
    }

    /// Render one prepared document of `documents`.
    pub fn render_document(
        &self,
        unit: &DocumentUnit,
        documents: &DocumentMap,
        ctx: &SiteRenderingContext,
    ) -> Result<UnitOutput, RenderError> {
        RendererFrontend::new(self.renderer.as_ref(), self.runner).render_unit(unit, documents, ctx)
    }

    /// Filter reports and build the rendering context of a locale.
    fn plan(
        &self,
        project: &Arc<Project>,
        locales: &LocaleSet,
        locale: &SiteLocale,
        output_dir: &Path,
    ) -> Result<LocalePlan, RenderError> {
        let report_ctx = ReportContext {
            project,
            locale,
            output_dir,
        };
        let executions = filter_generatable(self.report_source.reports(project), &report_ctx);
        let entries: Vec<SummaryEntry> = executions
            .iter()
            .map(|execution| {
                let descriptor = execution.report.descriptor();
                SummaryEntry {
                    output_name: descriptor.output_name().to_owned(),
                    name: descriptor.name(locale),
                    description: descriptor.description(locale),
                    category: descriptor.category(),
                }
            })
            .collect();
        let menu_entries: Vec<ReportMenuEntry> = entries
            .iter()
            .map(|entry| ReportMenuEntry {
                output_name: entry.output_name.clone(),
                name: entry.name.clone(),
                category: entry.category,
            })
            .collect();

        let ctx = self.context_builder.build(ContextRequest {
            project,
            locales,
            locale,
            reports: &menu_entries,
            output_dir,
        })?;
        Ok(LocalePlan {
            ctx,
            executions,
            entries,
        })
    }
}

fn register_all(registry: &mut DocumentRegistry, units: Vec<DocumentUnit>) {
    for unit in units {
        registry.register(unit);
    }
}

/// Register the generated sources not named in `known`, returning the
/// output names of every generated source found.
///
/// Sources colliding with a report page in `report_pages` are dropped.
fn register_generated(
    registry: &mut DocumentRegistry,
    ctx: &SiteRenderingContext,
    known: &HashSet<String>,
    report_pages: &HashSet<String>,
) -> Result<HashSet<String>, RenderError> {
    let units = discover(&ctx.generated_dirs, SourceKind::Generated, ctx)?;
    let found = units.iter().map(|u| u.output_name.clone()).collect();
    for unit in units {
        if known.contains(&unit.output_name) {
            continue;
        }
        if report_pages.contains(&unit.output_name) {
            tracing::info!(
                "Skipping {}: output {} is already provided by a report page",
                unit.describe(),
                unit.output_name
            );
            continue;
        }
        registry.register(unit);
    }
    Ok(found)
}

/// Register report pages, then category summaries, then the sitemap.
fn register_reports(registry: &mut DocumentRegistry, plan: &LocalePlan) {
    let ctx = &plan.ctx;
    for execution in &plan.executions {
        registry.register(DocumentUnit {
            output_name: format!("{}.html", execution.output_name()),
            source_kind: SourceKind::Report,
            localized_source_dir: None,
            editable: false,
            generator: execution.identity(),
            source: DocumentSource::Report(execution.clone()),
        });
    }

    for category in [ReportCategory::ProjectInfo, ReportCategory::ProjectReports] {
        if category == ReportCategory::ProjectInfo && !ctx.project.site.generate_project_info {
            continue;
        }
        if !plan.entries.iter().any(|entry| entry.category == category) {
            continue;
        }
        registry.register(synthetic(
            summary_output_name(category),
            SourceKind::CategorySummary,
            category_summary(category, &plan.entries, &ctx.locale),
        ));
    }

    if ctx.project.site.generate_sitemap {
        registry.register(synthetic(
            "sitemap.html".to_owned(),
            SourceKind::Sitemap,
            sitemap_page(&ctx.site_model, &ctx.locale),
        ));
    }
}

fn synthetic(output_name: String, kind: SourceKind, sink: Sink) -> DocumentUnit {
    DocumentUnit {
        output_name,
        source_kind: kind,
        localized_source_dir: None,
        editable: false,
        generator: SYNTHETIC_GENERATOR.to_owned(),
        source: DocumentSource::Synthetic(sink),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_report::{
        MultiPageReport, Report, ReportDescriptor, ReportError, SinglePageReport, SinkFactory,
    };
    use pretty_assertions::assert_eq;
    use std::fs;

    static_assertions::assert_impl_all!(SitePipeline: Send, Sync);
    static_assertions::assert_impl_all!(PreparedLocale: Send, Sync);

    struct Fixed {
        output: &'static str,
        fail: bool,
    }

    impl ReportDescriptor for Fixed {
        fn output_name(&self) -> &str {
            self.output
        }
        fn name(&self, locale: &SiteLocale) -> String {
            format!("{} ({locale})", self.output)
        }
        fn description(&self, _locale: &SiteLocale) -> String {
            format!("The {} report", self.output)
        }
        fn category(&self) -> ReportCategory {
            ReportCategory::ProjectReports
        }
    }

    impl SinglePageReport for Fixed {
        fn generate(&self, sink: &mut Sink, _ctx: &ReportContext<'_>) -> Result<(), ReportError> {
            if self.fail {
                return Err(ReportError::Generation("broken".to_owned()));
            }
            sink.paragraph(&format!("{} body", self.output));
            Ok(())
        }
    }

    struct FixedReports(Vec<(&'static str, bool)>);

    impl ReportSource for FixedReports {
        fn reports(&self, _project: &Project) -> Vec<ReportExecution> {
            self.0
                .iter()
                .map(|&(output, fail)| ReportExecution {
                    plugin_id: "test".to_owned(),
                    goal: output.to_owned(),
                    report: Report::SinglePage(Arc::new(Fixed { output, fail })),
                    user_defined: true,
                })
                .collect()
        }
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn project(tmp: &Path, locales: &[&str]) -> Project {
        let mut project = Project::with_base_dir("Demo", tmp);
        project.site.locales = locales.iter().map(|l| (*l).to_owned()).collect();
        project.site.publish_date = Some("2024-01-01T00:00:00Z".to_owned());
        project
    }

    #[test]
    fn test_renders_one_tree_per_locale() {
        let tmp = tempfile::tempdir().unwrap();
        let project = project(tmp.path(), &["en", "fr"]);
        let site = project.site.site_dir.clone();
        let out = project.site.output_dir.clone();
        write(&site.join("markdown/index.md"), "# Home\n");
        write(&site.join("fr/markdown/index.md"), "# Accueil\n");

        let report = SitePipeline::new()
            .with_report_source(FixedReports(vec![]))
            .render(&Arc::new(project))
            .unwrap();

        assert_eq!(report.locales.len(), 2);
        assert!(fs::read_to_string(out.join("index.html")).unwrap().contains("Home"));
        assert!(
            fs::read_to_string(out.join("fr/index.html"))
                .unwrap()
                .contains("Accueil")
        );
        assert!(out.join("css/site.css").is_file());
        assert!(out.join("fr/css/site.css").is_file());
    }

    #[test]
    fn test_handwritten_page_wins_over_report() {
        let tmp = tempfile::tempdir().unwrap();
        let project = project(tmp.path(), &["default"]);
        let out = project.site.output_dir.clone();
        write(&project.site.site_dir.join("markdown/audit.md"), "# Mine\n");

        let report = SitePipeline::new()
            .with_report_source(FixedReports(vec![("audit", false), ("lint", false)]))
            .render(&Arc::new(project))
            .unwrap();

        let audit = fs::read_to_string(out.join("audit.html")).unwrap();
        assert!(audit.contains("Mine"));
        assert!(!audit.contains("audit body"));
        assert!(out.join("lint.html").is_file());

        let summary = fs::read_to_string(out.join("project-reports.html")).unwrap();
        assert!(summary.contains("audit.html"));
        assert!(summary.contains("lint.html"));
        assert!(!out.join("project-info.html").exists());
        assert_eq!(report.locales[0].failures.len(), 0);
    }

    #[test]
    fn test_existing_generated_page_wins_over_report() {
        let tmp = tempfile::tempdir().unwrap();
        let project = project(tmp.path(), &["default"]);
        let out = project.site.output_dir.clone();
        let generated = &project.site.generated_site_dir;
        write(&generated.join("markdown/audit.md"), "# Generated audit\n");

        SitePipeline::new()
            .with_report_source(FixedReports(vec![("audit", false)]))
            .render(&Arc::new(project))
            .unwrap();

        let audit = fs::read_to_string(out.join("audit.html")).unwrap();
        assert!(audit.contains("Generated audit"));
        assert!(!audit.contains("audit body"));
    }

    #[test]
    fn test_report_sub_pages_keep_first_registration() {
        struct Pages;

        impl ReportDescriptor for Pages {
            fn output_name(&self) -> &str {
                "pages"
            }
            fn name(&self, _locale: &SiteLocale) -> String {
                "Pages".to_owned()
            }
            fn description(&self, _locale: &SiteLocale) -> String {
                String::new()
            }
            fn category(&self) -> ReportCategory {
                ReportCategory::ProjectReports
            }
        }

        impl MultiPageReport for Pages {
            fn generate(
                &self,
                sink: &mut Sink,
                factory: &mut dyn SinkFactory,
                _ctx: &ReportContext<'_>,
            ) -> Result<(), ReportError> {
                sink.paragraph("main page");
                factory.create_sink("index").paragraph("sub-page index");
                factory.create_sink("pages").paragraph("sub-page clobber");
                factory.create_sink("details").paragraph("sub-page details");
                Ok(())
            }
        }

        struct PagesSource;

        impl ReportSource for PagesSource {
            fn reports(&self, _project: &Project) -> Vec<ReportExecution> {
                vec![ReportExecution {
                    plugin_id: "test".to_owned(),
                    goal: "pages".to_owned(),
                    report: Report::MultiPage(Arc::new(Pages)),
                    user_defined: true,
                }]
            }
        }

        let tmp = tempfile::tempdir().unwrap();
        let project = project(tmp.path(), &["default"]);
        let out = project.site.output_dir.clone();
        write(&project.site.site_dir.join("markdown/index.md"), "# Handwritten home\n");

        SitePipeline::new()
            .with_report_source(PagesSource)
            .render(&Arc::new(project))
            .unwrap();

        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains("Handwritten home"));
        assert!(!index.contains("sub-page index"));
        let main = fs::read_to_string(out.join("pages.html")).unwrap();
        assert!(main.contains("main page"));
        assert!(!main.contains("sub-page clobber"));
        assert!(
            fs::read_to_string(out.join("details.html"))
                .unwrap()
                .contains("sub-page details")
        );
    }

    #[test]
    fn test_rendered_page_wins_over_resource() {
        let tmp = tempfile::tempdir().unwrap();
        let project = project(tmp.path(), &["default"]);
        let out = project.site.output_dir.clone();
        let site = project.site.site_dir.clone();
        write(&site.join("markdown/index.md"), "# Rendered home\n");
        write(&site.join("resources/index.html"), "STALE RESOURCE");
        write(&site.join("resources/img/logo.svg"), "<svg/>");

        SitePipeline::new()
            .with_report_source(FixedReports(vec![]))
            .render(&Arc::new(project))
            .unwrap();

        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains("Rendered home"));
        assert!(!index.contains("STALE RESOURCE"));
        assert_eq!(fs::read_to_string(out.join("img/logo.svg")).unwrap(), "<svg/>");
    }

    #[test]
    fn test_failing_report_is_isolated() {
        let tmp = tempfile::tempdir().unwrap();
        let project = project(tmp.path(), &["default"]);
        let out = project.site.output_dir.clone();
        write(&project.site.site_dir.join("markdown/index.md"), "# Home\n");

        let report = SitePipeline::new()
            .with_report_source(FixedReports(vec![("broken", true), ("good", false)]))
            .render(&Arc::new(project))
            .unwrap();

        let failures: Vec<String> = report.failures().map(|(_, f)| f.identity()).collect();
        assert_eq!(failures, vec!["test:broken".to_owned()]);
        assert!(!out.join("broken.html").exists());
        assert!(out.join("good.html").is_file());
        assert!(out.join("index.html").is_file());
    }

    #[test]
    fn test_generated_sources_are_rescanned_after_reports() {
        struct Emitter;

        impl ReportDescriptor for Emitter {
            fn output_name(&self) -> &str {
                "emitter"
            }
            fn name(&self, _locale: &SiteLocale) -> String {
                "Emitter".to_owned()
            }
            fn description(&self, _locale: &SiteLocale) -> String {
                String::new()
            }
            fn category(&self) -> ReportCategory {
                ReportCategory::ProjectReports
            }
        }

        impl SinglePageReport for Emitter {
            fn generate(&self, sink: &mut Sink, ctx: &ReportContext<'_>) -> Result<(), ReportError> {
                let path = ctx
                    .project
                    .site
                    .generated_site_dir
                    .join("markdown/emitted.md");
                fs::create_dir_all(path.parent().unwrap())?;
                fs::write(path, "# Emitted\n")?;
                sink.paragraph("done");
                Ok(())
            }
        }

        struct EmitterSource;

        impl ReportSource for EmitterSource {
            fn reports(&self, _project: &Project) -> Vec<ReportExecution> {
                vec![ReportExecution {
                    plugin_id: "test".to_owned(),
                    goal: "emit".to_owned(),
                    report: Report::SinglePage(Arc::new(Emitter)),
                    user_defined: false,
                }]
            }
        }

        let tmp = tempfile::tempdir().unwrap();
        let project = project(tmp.path(), &["default"]);
        let out = project.site.output_dir.clone();

        SitePipeline::new()
            .with_report_source(EmitterSource)
            .render(&Arc::new(project))
            .unwrap();

        assert!(
            fs::read_to_string(out.join("emitted.html"))
                .unwrap()
                .contains("Emitted")
        );
    }

    #[test]
    fn test_sitemap_and_project_info() {
        let tmp = tempfile::tempdir().unwrap();
        let mut project = project(tmp.path(), &["default"]);
        project.site.generate_sitemap = true;
        let out = project.site.output_dir.clone();

        SitePipeline::new()
            .with_report_source(ConfiguredReports)
            .render(&Arc::new(project))
            .unwrap();

        assert!(out.join("sitemap.html").is_file());
        assert!(out.join("summary.html").is_file());
        let info = fs::read_to_string(out.join("project-info.html")).unwrap();
        assert!(info.contains("summary.html"));
        assert!(!out.join("scm.html").exists());
    }

    #[test]
    fn test_skip_renders_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let mut project = project(tmp.path(), &["default"]);
        project.site.skip = true;
        let out = project.site.output_dir.clone();

        let report = SitePipeline::new().render(&Arc::new(project)).unwrap();
        assert!(report.skipped);
        assert!(!out.exists());
    }

    #[test]
    fn test_prepare_locale_registers_without_writing_pages() {
        let tmp = tempfile::tempdir().unwrap();
        let project = Arc::new(project(tmp.path(), &["en", "fr"]));
        write(&project.site.site_dir.join("markdown/index.md"), "# Home\n");
        let web_root = tmp.path().join("web");

        let pipeline = SitePipeline::new().with_report_source(FixedReports(vec![("lint", false)]));
        let locales = pipeline.locales(&project).unwrap();
        let fr = SiteLocale::parse("fr").unwrap();
        let prepared = pipeline
            .prepare_locale(&project, &locales, &fr, &web_root)
            .unwrap();

        let names: Vec<&str> = prepared.documents.output_names().collect();
        assert_eq!(names, vec!["index.html", "lint.html", "project-reports.html"]);
        assert!(web_root.join("fr/css/site.css").is_file());
        assert!(!web_root.join("fr/index.html").exists());

        let unit = prepared.documents.get("lint.html").unwrap();
        let UnitOutput::Pages(pages) = pipeline
            .render_document(unit, &prepared.documents, &prepared.context)
            .unwrap()
        else {
            panic!("expected pages");
        };
        assert!(pages[0].html.contains("lint body"));
    }
}
