//! Skin: decorates page bodies with the site layout.
//!
//! The built-in skin is a minijinja template. A project can supply its own
//! with `skin.template` in `site.yaml`; the template receives:
//!
//! | Variable      | Content                                            |
//! |---------------|----------------------------------------------------|
//! | `title`       | Page title                                         |
//! | `body`        | Page HTML (already escaped, use `\|safe`)          |
//! | `root`        | Relative path from the page to the locale root     |
//! | `site`        | The site model, hrefs adjusted to the page and     |
//! |               | HTML-escaped (print them with `\|safe`)            |
//! | `locale`      | Locale code, `lang` its language                   |
//! | `locales`     | Links to the same page in other locales            |
//! | `published`   | Formatted publish date                             |
//! | `properties`  | Template properties                                |
//! | `generator`   | Generator name                                     |

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use folio_model::SiteModel;
use folio_model::i18n::GENERATOR_NAME;
use folio_report::escape;
use minijinja::Environment;
use serde::Serialize;

use crate::RenderError;
use crate::context::{ENCODING, SiteRenderingContext};

const DEFAULT_TEMPLATE: &str = include_str!("skin/default.html");
const DEFAULT_STYLESHEET: &str = include_str!("skin/site.css");
const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Title and body of a page before decoration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    pub title: Option<String>,
    pub body: String,
}

/// Turns page content into complete HTML documents.
pub trait SiteRenderer: Send + Sync {
    /// Decorate `page`, which will be written to `output_name`.
    fn render_page(
        &self,
        page: &PageContent,
        output_name: &str,
        ctx: &SiteRenderingContext,
    ) -> Result<String, RenderError>;

    /// Copy static resources into `output_dir`.
    fn copy_resources(
        &self,
        ctx: &SiteRenderingContext,
        output_dir: &Path,
    ) -> Result<(), RenderError>;
}

/// minijinja-based skin.
#[derive(Debug, Default)]
pub struct TemplateSkin {
    templates: Mutex<HashMap<PathBuf, Arc<str>>>,
}

#[derive(Serialize)]
struct PageView<'a> {
    title: &'a str,
    body: &'a str,
    root: &'a str,
    site: SiteModel,
    locale: &'a str,
    lang: &'a str,
    locales: Vec<LocaleLink>,
    published: String,
    properties: &'a BTreeMap<String, String>,
    generator: &'a str,
    encoding: &'a str,
}

#[derive(Serialize)]
struct LocaleLink {
    code: String,
    href: String,
    current: bool,
}

impl TemplateSkin {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn template_source(&self, ctx: &SiteRenderingContext) -> Result<Arc<str>, RenderError> {
        let Some(path) = ctx
            .site_model
            .skin
            .as_ref()
            .and_then(|skin| skin.template.as_deref())
        else {
            return Ok(Arc::from(DEFAULT_TEMPLATE));
        };
        let path = PathBuf::from(path);

        let mut templates = self
            .templates
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(source) = templates.get(&path) {
            return Ok(Arc::clone(source));
        }
        let source: Arc<str> = fs::read_to_string(&path)
            .map_err(|e| RenderError::io(&path, e))?
            .into();
        tracing::debug!(template = %path.display(), "Loaded skin template");
        templates.insert(path, Arc::clone(&source));
        Ok(source)
    }
}

impl SiteRenderer for TemplateSkin {
    fn render_page(
        &self,
        page: &PageContent,
        output_name: &str,
        ctx: &SiteRenderingContext,
    ) -> Result<String, RenderError> {
        let source = self.template_source(ctx)?;
        let template_name = "skin.html";
        let template_error = |source| RenderError::Template {
            name: template_name.to_owned(),
            source,
        };

        let root = relative_root(output_name);
        let mut site = ctx.site_model.clone();
        site.for_each_href_mut(|href| *href = escape(&relocate(href, &root)));

        let view = PageView {
            title: page.title.as_deref().unwrap_or(output_name),
            body: &page.body,
            root: &root,
            site,
            locale: ctx.locale.code(),
            lang: ctx.locale.language(),
            locales: locale_links(ctx, output_name, &root),
            published: published(ctx),
            properties: &ctx.properties,
            generator: GENERATOR_NAME,
            encoding: ENCODING,
        };

        let env = Environment::new();
        let template = env
            .template_from_named_str(template_name, &source)
            .map_err(template_error)?;
        template.render(&view).map_err(template_error)
    }

    fn copy_resources(
        &self,
        ctx: &SiteRenderingContext,
        output_dir: &Path,
    ) -> Result<(), RenderError> {
        let stylesheet = output_dir.join("css/site.css");
        write_file(&stylesheet, DEFAULT_STYLESHEET)?;

        // Generic resources first so localized ones overwrite them.
        for site_dir in ctx.site_dirs.iter().rev() {
            let resources = site_dir.join("resources");
            if resources.is_dir() {
                tracing::debug!(from = %resources.display(), "Copying site resources");
                copy_dir(&resources, output_dir)?;
            }
        }
        Ok(())
    }
}

/// Relative path from `output_name` to the directory it is rendered into.
///
/// `index.html` gives an empty string, `a/b/page.html` gives `../../`.
#[must_use]
pub fn relative_root(output_name: &str) -> String {
    "../".repeat(output_name.matches('/').count())
}

fn is_site_relative(href: &str) -> bool {
    !(href.is_empty()
        || href.starts_with('/')
        || href.starts_with('#')
        || href.contains("://")
        || href.starts_with("mailto:"))
}

/// Make a root-relative href relative to the page.
fn relocate(href: &str, root: &str) -> String {
    if root.is_empty() || !is_site_relative(href) {
        href.to_owned()
    } else {
        format!("{root}{href}")
    }
}

fn locale_links(ctx: &SiteRenderingContext, output_name: &str, root: &str) -> Vec<LocaleLink> {
    if ctx.locales.len() < 2 {
        return Vec::new();
    }
    let site_root = if ctx.is_default_locale() {
        root.to_owned()
    } else {
        format!("{root}../")
    };
    ctx.locales
        .iter()
        .map(|locale| {
            let href = match ctx.locales.path_prefix(locale) {
                Some(prefix) => format!("{site_root}{prefix}/{output_name}"),
                None => format!("{site_root}{output_name}"),
            };
            let href = escape(&href);
            LocaleLink {
                code: locale.code().to_owned(),
                href,
                current: *locale == ctx.locale,
            }
        })
        .collect()
}

fn published(ctx: &SiteRenderingContext) -> String {
    let format = ctx
        .site_model
        .publish_date
        .as_ref()
        .and_then(|p| p.format.as_deref())
        .unwrap_or(DEFAULT_DATE_FORMAT);

    let mut text = String::new();
    if write!(text, "{}", ctx.publish_date.format(format)).is_err() {
        tracing::warn!("Invalid publish date format '{format}', using {DEFAULT_DATE_FORMAT}");
        text = ctx.publish_date.format(DEFAULT_DATE_FORMAT).to_string();
    }
    text
}

pub(crate) fn write_file(path: &Path, content: &str) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| RenderError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| RenderError::io(path, e))
}

fn copy_dir(from: &Path, to: &Path) -> Result<(), RenderError> {
    fs::create_dir_all(to).map_err(|e| RenderError::io(to, e))?;
    for entry in fs::read_dir(from).map_err(|e| RenderError::io(from, e))? {
        let entry = entry.map_err(|e| RenderError::io(from, e))?;
        let target = to.join(entry.file_name());
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| RenderError::io(&target, e))?;
        }
    }
    Ok(())
}
