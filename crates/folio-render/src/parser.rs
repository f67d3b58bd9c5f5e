//! Markup parsers.
//!
//! Each parser owns a subdirectory of the site directory named after its id
//! (`markdown/`, `xhtml/`) and a set of file extensions.

use std::fmt;
use std::sync::LazyLock;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use regex::Regex;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());
static BODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body[^>]*>(.*)</body>").unwrap());
static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Suffix marking a source for template preprocessing.
pub const TEMPLATE_SUFFIX: &str = ".jinja";

/// Supported markup formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParserKind {
    Markdown,
    Xhtml,
}

/// A parsed source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    pub title: Option<String>,
    /// HTML fragment placed inside the skin.
    pub body: String,
}

impl ParserKind {
    pub const ALL: [Self; 2] = [Self::Markdown, Self::Xhtml];

    /// Parser id, also the name of its source subdirectory.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Xhtml => "xhtml",
        }
    }

    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Markdown => &["md", "markdown"],
            Self::Xhtml => &["xhtml", "html"],
        }
    }

    #[must_use]
    pub fn accepts(self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }

    /// Convert source text into a body fragment and a title.
    #[must_use]
    pub fn parse(self, source: &str) -> ParsedDocument {
        match self {
            Self::Markdown => parse_markdown(source),
            Self::Xhtml => parse_xhtml(source),
        }
    }
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

fn parse_markdown(source: &str) -> ParsedDocument {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM;
    let events: Vec<Event<'_>> = Parser::new_ext(source, options).collect();

    let mut title: Option<String> = None;
    let mut in_title = false;
    for event in &events {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) if title.is_none() => {
                in_title = true;
                title = Some(String::new());
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) if in_title => break,
            Event::Text(text) | Event::Code(text) if in_title => {
                if let Some(title) = title.as_mut() {
                    title.push_str(text);
                }
            }
            _ => {}
        }
    }

    let mut body = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut body, events.into_iter());
    ParsedDocument {
        title: title.filter(|t| !t.trim().is_empty()),
        body,
    }
}

fn parse_xhtml(source: &str) -> ParsedDocument {
    let inner_text = |html: &str| TAG_RE.replace_all(html, "").trim().to_owned();

    let title = TITLE_RE
        .captures(source)
        .or_else(|| H1_RE.captures(source))
        .map(|c| inner_text(&c[1]))
        .filter(|t| !t.is_empty());
    let body = BODY_RE
        .captures(source)
        .map_or(source, |c| c.get(1).map_or("", |m| m.as_str()))
        .trim()
        .to_owned();

    ParsedDocument { title, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_markdown_title_from_first_h1() {
        let doc = ParserKind::Markdown.parse("# Getting `started`\n\nHello *world*.\n\n# Other\n");
        assert_eq!(doc.title.as_deref(), Some("Getting started"));
        assert!(doc.body.contains("<p>Hello <em>world</em>.</p>"));
    }

    #[test]
    fn test_markdown_without_heading_has_no_title() {
        let doc = ParserKind::Markdown.parse("## Section\n\ntext\n");
        assert_eq!(doc.title, None);
    }

    #[test]
    fn test_markdown_tables_enabled() {
        let doc = ParserKind::Markdown.parse("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(doc.body.contains("<table>"));
    }

    #[test]
    fn test_xhtml_body_and_title() {
        let doc = ParserKind::Xhtml.parse(
            "<html><head><title>My <b>Page</b></title></head><body class=\"x\">\n<p>Hi</p>\n</body></html>",
        );
        assert_eq!(doc.title.as_deref(), Some("My Page"));
        assert_eq!(doc.body, "<p>Hi</p>");
    }

    #[test]
    fn test_xhtml_fragment_uses_h1() {
        let doc = ParserKind::Xhtml.parse("<h1>Intro</h1><p>Body</p>");
        assert_eq!(doc.title.as_deref(), Some("Intro"));
        assert_eq!(doc.body, "<h1>Intro</h1><p>Body</p>");
    }

    #[test]
    fn test_extensions() {
        assert!(ParserKind::Markdown.accepts("md"));
        assert!(ParserKind::Markdown.accepts("MARKDOWN"));
        assert!(!ParserKind::Markdown.accepts("html"));
        assert!(ParserKind::Xhtml.accepts("html"));
    }
}
