//! Site rendering for Folio.
//!
//! [`SitePipeline`] renders one project for every configured locale. Each
//! locale pass collects [`DocumentUnit`]s into a [`DocumentRegistry`] (first
//! registration of an output name wins), renders them through the
//! [`RendererFrontend`] and decorates every page with a [`SiteRenderer`].
//!
//! # Source layout
//!
//! ```text
//! src/site/
//! ├── site.yaml              navigation descriptor
//! ├── site_fr.yaml           locale override
//! ├── markdown/              one directory per parser
//! ├── xhtml/
//! ├── resources/             copied verbatim
//! └── fr/                    localized sources, same layout
//! ```
//!
//! # Batches
//!
//! | Order | Units                                | Source kind                |
//! |-------|--------------------------------------|----------------------------|
//! | 1     | hand-written markup                  | [`SourceKind::Handwritten`] |
//! | 2     | reports, category summaries, sitemap | `Report`, `CategorySummary`, `Sitemap` |
//! | 3     | generated markup, rescanned          | [`SourceKind::Generated`]   |

mod context;
mod discovery;
mod document;
mod error;
mod fanout;
mod frontend;
mod parser;
mod pipeline;
mod registry;
mod skin;
mod summary;

pub use context::{
    ConfiguredLocales, ContextRequest, DefaultContextBuilder, ENCODING, LocaleResolver,
    RenderingContextBuilder, SiteRenderingContext,
};
pub use discovery::discover;
pub use document::{DocumentSource, DocumentUnit, MarkupSource, SourceKind};
pub use error::RenderError;
pub use fanout::{LocaleFanOut, RenderPhase};
pub use frontend::{BatchSummary, RenderedPage, RendererFrontend, UnitOutput};
pub use parser::{ParsedDocument, ParserKind, TEMPLATE_SUFFIX};
pub use pipeline::{
    ConfiguredReports, LocaleReport, PreparedLocale, ReportSource, SitePipeline, SiteRenderReport,
};
pub use registry::{ClaimedOutputs, DocumentMap, DocumentRegistry};
pub use skin::{PageContent, SiteRenderer, TemplateSkin, relative_root};
pub use summary::{SummaryEntry, category_summary, sitemap_page, summary_output_name};
