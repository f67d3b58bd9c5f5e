//! Renderable document units.

use std::path::PathBuf;

use folio_report::{ReportExecution, Sink};

use crate::parser::ParserKind;

/// Where a document unit comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceKind {
    /// Written by hand in the site directory.
    Handwritten,
    /// Found in the generated-site directory.
    Generated,
    /// Produced by a report.
    Report,
    /// A report category summary page.
    CategorySummary,
    Sitemap,
}

/// A markup file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupSource {
    pub parser: ParserKind,
    pub path: PathBuf,
    /// Path relative to the parser directory, with forward slashes.
    pub relative_path: String,
    /// The file carries the template suffix and is preprocessed first.
    pub template: bool,
}

/// Content behind a document unit.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    Markup(MarkupSource),
    Report(ReportExecution),
    /// A page computed before rendering.
    Synthetic(Sink),
}

/// One output page and how to produce it.
#[derive(Debug, Clone)]
pub struct DocumentUnit {
    /// Output file name relative to the locale output directory, ending in `.html`.
    pub output_name: String,
    pub source_kind: SourceKind,
    /// Directory the source was discovered in.
    pub localized_source_dir: Option<PathBuf>,
    pub editable: bool,
    /// Parser id, report identity or `folio`.
    pub generator: String,
    pub source: DocumentSource,
}

impl DocumentUnit {
    /// Human-readable origin for log lines.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.source {
            DocumentSource::Markup(markup) => markup.path.display().to_string(),
            DocumentSource::Report(execution) => format!("report {}", execution.identity()),
            DocumentSource::Synthetic(_) => format!("{} page", self.generator),
        }
    }
}
