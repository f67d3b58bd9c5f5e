//! Output sinks for generated pages.
//!
//! A [`Sink`] accumulates the body of one page as HTML. Text passed to it is
//! escaped; [`Sink::raw`] is the only way to inject markup verbatim.

use std::fmt::Write;

/// Escape text for inclusion in HTML content or attribute values.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Link { href: String, text: String },
}

impl Cell {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    #[must_use]
    pub fn link(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Link {
            href: href.into(),
            text: text.into(),
        }
    }
}

/// Accumulates the content of one page.
#[derive(Debug, Default, Clone)]
pub struct Sink {
    title: Option<String>,
    body: String,
    depth: u8,
}

impl Sink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Page title, shown by the skin in the document head.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_owned());
    }

    /// HTML accumulated so far.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Open a section. Nested sections use deeper heading levels.
    pub fn section(&mut self, heading: &str) {
        self.depth = self.depth.saturating_add(1);
        let level = (self.depth + 1).min(6);
        let _ = write!(
            self.body,
            "<section>\n<h{level}>{}</h{level}>\n",
            escape(heading)
        );
    }

    /// Close the innermost open section.
    pub fn section_end(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
            self.body.push_str("</section>\n");
        }
    }

    pub fn paragraph(&mut self, text: &str) {
        let _ = writeln!(self.body, "<p>{}</p>", escape(text));
    }

    pub fn paragraph_start(&mut self) {
        self.body.push_str("<p>");
    }

    pub fn paragraph_end(&mut self) {
        self.body.push_str("</p>\n");
    }

    /// Inline text.
    pub fn text(&mut self, text: &str) {
        self.body.push_str(&escape(text));
    }

    /// Inline link.
    pub fn link(&mut self, href: &str, text: &str) {
        let _ = write!(
            self.body,
            "<a href=\"{}\">{}</a>",
            escape(href),
            escape(text)
        );
    }

    /// Preformatted text.
    pub fn verbatim(&mut self, text: &str) {
        let _ = writeln!(self.body, "<pre>{}</pre>", escape(text));
    }

    /// Markup inserted as is.
    pub fn raw(&mut self, html: &str) {
        self.body.push_str(html);
    }

    /// A table with a header row.
    pub fn table<I>(&mut self, header: &[&str], rows: I)
    where
        I: IntoIterator<Item = Vec<Cell>>,
    {
        self.body.push_str("<table>\n<thead>\n<tr>");
        for column in header {
            let _ = write!(self.body, "<th>{}</th>", escape(column));
        }
        self.body.push_str("</tr>\n</thead>\n<tbody>\n");
        for row in rows {
            self.body.push_str("<tr>");
            for cell in row {
                match cell {
                    Cell::Text(text) => {
                        let _ = write!(self.body, "<td>{}</td>", escape(&text));
                    }
                    Cell::Link { href, text } => {
                        let _ = write!(
                            self.body,
                            "<td><a href=\"{}\">{}</a></td>",
                            escape(&href),
                            escape(&text)
                        );
                    }
                }
            }
            self.body.push_str("</tr>\n");
        }
        self.body.push_str("</tbody>\n</table>\n");
    }

    pub fn list_start(&mut self) {
        self.body.push_str("<ul>\n");
    }

    pub fn list_end(&mut self) {
        self.body.push_str("</ul>\n");
    }

    /// Open a list item. Close it with [`Sink::list_item_end`] so nested
    /// lists can be placed inside.
    pub fn list_item_start(&mut self) {
        self.body.push_str("<li>");
    }

    pub fn list_item_end(&mut self) {
        self.body.push_str("</li>\n");
    }

    /// Close any sections left open.
    pub fn close(&mut self) {
        while self.depth > 0 {
            self.section_end();
        }
    }
}

/// Opens auxiliary pages for multi-page reports.
pub trait SinkFactory {
    /// Sink for the page named `name`, relative to the report's directory.
    ///
    /// Asking twice for the same name returns the same sink.
    fn create_sink(&mut self, name: &str) -> &mut Sink;
}

/// Records every sink it hands out, in creation order.
#[derive(Debug, Default)]
pub struct MultiPageSinkFactory {
    sinks: Vec<(String, Sink)>,
    /// File name of the report's main page, never handed out as a sub-page.
    main_page: Option<String>,
    discarded: Sink,
}

impl MultiPageSinkFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory for a report whose main page is `main_page`, e.g. `paged.html`.
    ///
    /// A sink requested under that name is discarded.
    #[must_use]
    pub fn for_main_page(main_page: &str) -> Self {
        Self {
            main_page: Some(html_name(main_page)),
            ..Self::default()
        }
    }

    /// Sinks created so far, keyed by page name with an `.html` suffix.
    #[must_use]
    pub fn into_sinks(self) -> Vec<(String, Sink)> {
        self.sinks
    }
}

impl SinkFactory for MultiPageSinkFactory {
    fn create_sink(&mut self, name: &str) -> &mut Sink {
        let name = html_name(name);
        if self.main_page.as_ref() == Some(&name) {
            tracing::info!("Skipping sub-page {name}: it is the report's main page");
            self.discarded = Sink::new();
            return &mut self.discarded;
        }
        let index = match self.sinks.iter().position(|(n, _)| *n == name) {
            Some(index) => index,
            None => {
                self.sinks.push((name, Sink::new()));
                self.sinks.len() - 1
            }
        };
        &mut self.sinks[index].1
    }
}

fn html_name(name: &str) -> String {
    if name.ends_with(".html") {
        name.to_owned()
    } else {
        format!("{name}.html")
    }
}
