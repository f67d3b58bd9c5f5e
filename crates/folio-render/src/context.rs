//! Rendering context of one locale pass.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use folio_model::{
    LocaleSet, MenuSources, Project, ReportMenuEntry, SiteLocale, SiteModel, SiteModelAssembler,
    populate_menus,
};

use crate::RenderError;

/// Source and output encoding of every page.
pub const ENCODING: &str = "UTF-8";

/// Everything the frontend and skin need to render pages for one locale.
#[derive(Debug, Clone)]
pub struct SiteRenderingContext {
    pub project: Arc<Project>,
    pub locales: LocaleSet,
    pub locale: SiteLocale,
    /// Assembled navigation with menus populated.
    pub site_model: SiteModel,
    /// Values available to source templates and the skin.
    pub properties: BTreeMap<String, String>,
    pub publish_date: DateTime<Utc>,
    /// Hand-written source roots, most specific first.
    pub site_dirs: Vec<PathBuf>,
    /// Generated source roots, most specific first.
    pub generated_dirs: Vec<PathBuf>,
    /// Glob patterns excluded from discovery, keyed by parser id.
    pub module_excludes: BTreeMap<String, Vec<String>>,
    /// Where template-processed sources are saved, when enabled.
    pub processed_dir: Option<PathBuf>,
    /// Locale output directory.
    pub output_dir: PathBuf,
}

impl SiteRenderingContext {
    #[must_use]
    pub fn is_default_locale(&self) -> bool {
        self.locales.is_default(&self.locale)
    }
}

/// Input of [`RenderingContextBuilder::build`].
#[derive(Debug, Clone, Copy)]
pub struct ContextRequest<'a> {
    pub project: &'a Arc<Project>,
    pub locales: &'a LocaleSet,
    pub locale: &'a SiteLocale,
    /// Reports of the pass, for menu population.
    pub reports: &'a [ReportMenuEntry],
    pub output_dir: &'a Path,
}

/// Builds the rendering context of a locale pass.
pub trait RenderingContextBuilder: Send + Sync {
    fn build(&self, request: ContextRequest<'_>) -> Result<SiteRenderingContext, RenderError>;
}

/// Assembles the site model from descriptors and settings from `[site]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultContextBuilder;

impl RenderingContextBuilder for DefaultContextBuilder {
    fn build(&self, request: ContextRequest<'_>) -> Result<SiteRenderingContext, RenderError> {
        let ContextRequest {
            project,
            locales,
            locale,
            reports,
            output_dir,
        } = request;
        let site = &project.site;

        let mut site_model = SiteModelAssembler.assemble(project, locales, locale)?;
        populate_menus(
            &mut site_model,
            &MenuSources {
                project,
                locale,
                reports,
            },
        );

        let localized = |root: &Path| -> Vec<PathBuf> {
            if locales.is_default(locale) {
                vec![root.to_path_buf()]
            } else {
                vec![root.join(locale.code()), root.to_path_buf()]
            }
        };

        let processed_dir = site.save_processed_content.then(|| {
            let dir = site.processed_dir();
            match locales.path_prefix(locale) {
                Some(prefix) => dir.join(prefix),
                None => dir,
            }
        });

        Ok(SiteRenderingContext {
            project: Arc::clone(project),
            locales: locales.clone(),
            locale: locale.clone(),
            site_model,
            properties: template_properties(project),
            publish_date: publish_date(site.publish_date.as_deref())?,
            site_dirs: localized(&site.site_dir),
            generated_dirs: localized(&site.generated_site_dir),
            module_excludes: site.module_excludes.clone(),
            processed_dir,
            output_dir: output_dir.to_path_buf(),
        })
    }
}

/// Template properties, later entries overriding earlier ones.
fn template_properties(project: &Project) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();
    properties.insert("project".to_owned(), project.name.clone());
    properties.insert("input_encoding".to_owned(), ENCODING.to_owned());
    properties.insert("output_encoding".to_owned(), ENCODING.to_owned());
    for (key, value) in &project.site.attributes {
        properties.insert(key.clone(), value.clone());
    }
    properties
}

fn publish_date(configured: Option<&str>) -> Result<DateTime<Utc>, RenderError> {
    match configured {
        Some(value) => DateTime::parse_from_rfc3339(value)
            .map(|date| date.with_timezone(&Utc))
            .map_err(|source| RenderError::InvalidPublishDate {
                value: value.to_owned(),
                source,
            }),
        None => Ok(Utc::now()),
    }
}

/// Decides which locales a project renders.
pub trait LocaleResolver: Send + Sync {
    fn resolve(&self, project: &Project) -> Result<LocaleSet, RenderError>;
}

/// Uses the locales of `[site]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfiguredLocales;

impl LocaleResolver for ConfiguredLocales {
    fn resolve(&self, project: &Project) -> Result<LocaleSet, RenderError> {
        Ok(LocaleSet::parse(project.site.locales.as_slice())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build(project: Project, codes: &[&str], locale: &str) -> SiteRenderingContext {
        let project = Arc::new(project);
        let locales = LocaleSet::parse(codes).unwrap();
        let locale = SiteLocale::parse(locale).unwrap();
        DefaultContextBuilder
            .build(ContextRequest {
                project: &project,
                locales: &locales,
                locale: &locale,
                reports: &[],
                output_dir: Path::new("/out"),
            })
            .unwrap()
    }

    #[test]
    fn test_properties_order_and_override() {
        let tmp = tempfile::tempdir().unwrap();
        let mut project = Project::with_base_dir("Demo", tmp.path());
        project
            .site
            .attributes
            .insert("team".to_owned(), "Docs".to_owned());
        project
            .site
            .attributes
            .insert("output_encoding".to_owned(), "ISO-8859-1".to_owned());

        let ctx = build(project, &["default"], "default");
        assert_eq!(ctx.properties["project"], "Demo");
        assert_eq!(ctx.properties["input_encoding"], "UTF-8");
        assert_eq!(ctx.properties["output_encoding"], "ISO-8859-1");
        assert_eq!(ctx.properties["team"], "Docs");
    }

    #[test]
    fn test_localized_source_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let project = Project::with_base_dir("Demo", tmp.path());
        let site_dir = project.site.site_dir.clone();

        let ctx = build(project, &["en", "fr"], "fr");
        assert!(!ctx.is_default_locale());
        assert_eq!(ctx.site_dirs, vec![site_dir.join("fr"), site_dir]);
    }

    #[test]
    fn test_fixed_publish_date() {
        let tmp = tempfile::tempdir().unwrap();
        let mut project = Project::with_base_dir("Demo", tmp.path());
        project.site.publish_date = Some("2024-03-01T10:00:00+02:00".to_owned());

        let ctx = build(project, &["default"], "default");
        assert_eq!(ctx.publish_date.to_rfc3339(), "2024-03-01T08:00:00+00:00");
    }

    #[test]
    fn test_invalid_publish_date() {
        assert!(matches!(
            publish_date(Some("yesterday")),
            Err(RenderError::InvalidPublishDate { .. })
        ));
    }

    #[test]
    fn test_processed_dir_is_localized() {
        let tmp = tempfile::tempdir().unwrap();
        let mut project = Project::with_base_dir("Demo", tmp.path());
        project.site.save_processed_content = true;
        let processed = project.site.processed_dir();

        let ctx = build(project, &["en", "de"], "de");
        assert_eq!(ctx.processed_dir, Some(processed.join("de")));
    }
}
