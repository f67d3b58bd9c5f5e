//! Category summary and sitemap pages.

use folio_model::i18n::{GENERATOR_NAME, Message};
use folio_model::{MenuItem, ReportCategory, SiteLocale, SiteModel};
use folio_report::{Cell, Sink};

/// A report listed on its category summary page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    /// Output name without `.html`.
    pub output_name: String,
    pub name: String,
    pub description: String,
    pub category: ReportCategory,
}

/// Output name of the summary page of `category`.
#[must_use]
pub fn summary_output_name(category: ReportCategory) -> String {
    format!("{}.html", category.id())
}

/// Build the summary page of `category` from the reports filed under it.
#[must_use]
pub fn category_summary(
    category: ReportCategory,
    entries: &[SummaryEntry],
    locale: &SiteLocale,
) -> Sink {
    let (title, intro, outro) = match category {
        ReportCategory::ProjectInfo => (
            Message::ProjectInfoTitle,
            Message::ProjectInfoIntro,
            Message::ProjectInfoOutro,
        ),
        ReportCategory::ProjectReports => (
            Message::ProjectReportsTitle,
            Message::ProjectReportsIntro,
            Message::ProjectReportsOutro,
        ),
    };
    let title = title.text(locale);

    let mut sink = Sink::new();
    sink.set_title(title);
    sink.section(title);
    sink.paragraph(&format!(
        "{} {GENERATOR_NAME} {}",
        intro.text(locale),
        outro.text(locale)
    ));

    sink.section(Message::ReportsSection.text(locale));
    let rows = entries
        .iter()
        .filter(|entry| entry.category == category)
        .map(|entry| {
            vec![
                Cell::link(format!("{}.html", entry.output_name), entry.name.clone()),
                Cell::text(entry.description.clone()),
            ]
        });
    sink.table(
        &[
            Message::ColumnDocument.text(locale),
            Message::ColumnDescription.text(locale),
        ],
        rows,
    );
    sink.close();
    sink
}

/// Build `sitemap.html` from the menus of the assembled site model.
#[must_use]
pub fn sitemap_page(model: &SiteModel, locale: &SiteLocale) -> Sink {
    let title = Message::SitemapTitle.text(locale);
    let mut sink = Sink::new();
    sink.set_title(title);
    sink.section(title);
    sink.paragraph(Message::SitemapDescription.text(locale));

    for menu in &model.menus {
        if let Some(name) = &menu.name {
            sink.section(name);
        }
        menu_items(&mut sink, &menu.items);
        if menu.name.is_some() {
            sink.section_end();
        }
    }
    sink.close();
    sink
}

fn menu_items(sink: &mut Sink, items: &[MenuItem]) {
    if items.is_empty() {
        return;
    }
    sink.list_start();
    for item in items {
        sink.list_item_start();
        let text = item.name.as_deref().unwrap_or_default();
        match item.href.as_deref() {
            Some(href) => sink.link(&sitemap_href(href), text),
            None => sink.text(text),
        }
        menu_items(sink, &item.items);
        sink.list_item_end();
    }
    sink.list_end();
}

/// `/guide.html` becomes `./guide.html`; other hrefs are kept.
fn sitemap_href(href: &str) -> String {
    if href.starts_with('/') {
        format!(".{href}")
    } else {
        href.to_owned()
    }
}
