//! Report contract.

use std::path::Path;
use std::sync::Arc;

use folio_model::{Project, ReportCategory, SiteLocale};

use crate::ReportError;
use crate::sink::{Sink, SinkFactory};

/// What a report is given when checked and generated.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub project: &'a Project,
    pub locale: &'a SiteLocale,
    /// Locale-scoped output directory. External reports write here.
    pub output_dir: &'a Path,
}

/// Identity and presentation of a report.
pub trait ReportDescriptor: Send + Sync {
    /// Output file name without `.html`.
    fn output_name(&self) -> &str;

    /// Display name in `locale`.
    fn name(&self, locale: &SiteLocale) -> String;

    /// Description in `locale`.
    fn description(&self, locale: &SiteLocale) -> String;

    fn category(&self) -> ReportCategory;

    /// External reports write their own output instead of filling a sink.
    fn is_external(&self) -> bool {
        false
    }

    /// Whether the report has anything to say for this project.
    ///
    /// Must not have side effects.
    fn can_generate(&self, _ctx: &ReportContext<'_>) -> Result<bool, ReportError> {
        Ok(true)
    }
}

/// A report producing a single page.
pub trait SinglePageReport: ReportDescriptor {
    fn generate(&self, sink: &mut Sink, ctx: &ReportContext<'_>) -> Result<(), ReportError>;
}

/// A report producing a main page plus any number of auxiliary pages.
pub trait MultiPageReport: ReportDescriptor {
    fn generate(
        &self,
        sink: &mut Sink,
        factory: &mut dyn SinkFactory,
        ctx: &ReportContext<'_>,
    ) -> Result<(), ReportError>;
}

/// A report of either shape.
#[derive(Clone)]
pub enum Report {
    SinglePage(Arc<dyn SinglePageReport>),
    MultiPage(Arc<dyn MultiPageReport>),
}

impl Report {
    #[must_use]
    pub fn descriptor(&self) -> &dyn ReportDescriptor {
        match self {
            Self::SinglePage(report) => report.as_ref(),
            Self::MultiPage(report) => report.as_ref(),
        }
    }
}

impl std::fmt::Debug for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::SinglePage(_) => "SinglePage",
            Self::MultiPage(_) => "MultiPage",
        };
        f.debug_struct("Report")
            .field("kind", &kind)
            .field("output_name", &self.descriptor().output_name())
            .finish()
    }
}
