//! Source document discovery.
//!
//! Each source root holds one subdirectory per parser:
//!
//! ```text
//! src/site/
//! ├── markdown/
//! │   ├── index.md
//! │   └── guide/setup.md.jinja    (template preprocessed)
//! ├── xhtml/
//! │   └── legacy.html
//! └── fr/                         (localized root for `fr`)
//!     └── markdown/index.md
//! ```
//!
//! `markdown/guide/setup.md.jinja` becomes `guide/setup.html`.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::RenderError;
use crate::context::SiteRenderingContext;
use crate::document::{DocumentSource, DocumentUnit, MarkupSource, SourceKind};
use crate::parser::{ParserKind, TEMPLATE_SUFFIX};

/// Discover markup sources under `roots`, most specific root first.
///
/// Units are returned in root order, then parser order, then path order, so
/// that a registry keeps the localized variant of a page.
pub fn discover(
    roots: &[PathBuf],
    kind: SourceKind,
    ctx: &SiteRenderingContext,
) -> Result<Vec<DocumentUnit>, RenderError> {
    let mut units = Vec::new();
    for root in roots {
        for parser in ParserKind::ALL {
            let dir = root.join(parser.id());
            if !dir.is_dir() {
                continue;
            }
            let excludes = compile_excludes(ctx.module_excludes.get(parser.id()))?;
            let mut files = Vec::new();
            walk(&dir, &mut files)?;

            for path in files {
                let Some(source) = markup_source(parser, &dir, path) else {
                    continue;
                };
                if excludes.iter().any(|p| p.matches(&source.relative_path)) {
                    tracing::debug!(path = %source.relative_path, parser = %parser, "Excluded from discovery");
                    continue;
                }
                units.push(DocumentUnit {
                    output_name: output_name(&source.relative_path),
                    source_kind: kind,
                    localized_source_dir: Some(root.clone()),
                    editable: kind == SourceKind::Handwritten,
                    generator: parser.id().to_owned(),
                    source: DocumentSource::Markup(source),
                });
            }
        }
    }
    Ok(units)
}

fn compile_excludes(patterns: Option<&Vec<String>>) -> Result<Vec<Pattern>, RenderError> {
    patterns
        .into_iter()
        .flatten()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|source| RenderError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

/// Collect files below `dir` in sorted order, skipping hidden entries.
fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .map_err(|e| RenderError::io(dir, e))?
        .filter_map(Result::ok)
        .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
        .collect();
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            walk(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

fn markup_source(parser: ParserKind, dir: &Path, path: PathBuf) -> Option<MarkupSource> {
    let relative = path.strip_prefix(dir).ok()?.to_string_lossy().replace('\\', "/");
    let (relative_path, template) = match relative.strip_suffix(TEMPLATE_SUFFIX) {
        Some(stripped) => (stripped.to_owned(), true),
        None => (relative, false),
    };
    let extension = Path::new(&relative_path).extension()?.to_str()?;
    if !parser.accepts(extension) {
        return None;
    }
    Some(MarkupSource {
        parser,
        path,
        relative_path,
        template,
    })
}

/// `guide/setup.md` becomes `guide/setup.html`.
fn output_name(relative_path: &str) -> String {
    let stem = relative_path
        .rsplit_once('.')
        .map_or(relative_path, |(stem, _)| stem);
    format!("{stem}.html")
}
