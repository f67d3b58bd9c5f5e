//! Built-in project information reports.

use std::sync::Arc;

use folio_model::i18n::Message;
use folio_model::{ReportCategory, SiteLocale};

use crate::ReportError;
use crate::execution::ReportExecution;
use crate::report::{Report, ReportContext, ReportDescriptor, SinglePageReport};
use crate::sink::{Cell, Sink};

const PLUGIN_ID: &str = "folio-project-info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InfoPage {
    Summary,
    Modules,
    Scm,
    Distribution,
}

impl InfoPage {
    const ALL: [Self; 4] = [Self::Summary, Self::Modules, Self::Scm, Self::Distribution];

    fn output_name(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Modules => "modules",
            Self::Scm => "scm",
            Self::Distribution => "distribution-management",
        }
    }

    fn messages(self) -> (Message, Message) {
        match self {
            Self::Summary => (Message::SummaryName, Message::SummaryDescription),
            Self::Modules => (Message::ModulesName, Message::ModulesDescription),
            Self::Scm => (Message::ScmName, Message::ScmDescription),
            Self::Distribution => (Message::DistributionName, Message::DistributionDescription),
        }
    }
}

/// One of the `folio-project-info` reports.
#[derive(Debug)]
struct ProjectInfoReport {
    page: InfoPage,
}

impl ReportDescriptor for ProjectInfoReport {
    fn output_name(&self) -> &str {
        self.page.output_name()
    }

    fn name(&self, locale: &SiteLocale) -> String {
        self.page.messages().0.text(locale).to_owned()
    }

    fn description(&self, locale: &SiteLocale) -> String {
        self.page.messages().1.text(locale).to_owned()
    }

    fn category(&self) -> ReportCategory {
        ReportCategory::ProjectInfo
    }

    fn can_generate(&self, ctx: &ReportContext<'_>) -> Result<bool, ReportError> {
        let project = ctx.project;
        Ok(match self.page {
            InfoPage::Summary => true,
            InfoPage::Modules => !project.modules.is_empty(),
            InfoPage::Scm => project.scm_url.is_some(),
            InfoPage::Distribution => project.distribution.is_some(),
        })
    }
}

impl SinglePageReport for ProjectInfoReport {
    fn generate(&self, sink: &mut Sink, ctx: &ReportContext<'_>) -> Result<(), ReportError> {
        let locale = ctx.locale;
        let project = ctx.project;
        let label = |m: Message| m.text(locale);

        sink.set_title(&self.name(locale));
        sink.section(&self.name(locale));
        sink.paragraph(&self.description(locale));

        match self.page {
            InfoPage::Summary => {
                let mut rows = vec![vec![
                    Cell::text(label(Message::LabelName)),
                    Cell::text(&project.name),
                ]];
                if let Some(description) = &project.description {
                    rows.push(vec![
                        Cell::text(label(Message::ColumnDescription)),
                        Cell::text(description),
                    ]);
                }
                if let Some(url) = &project.url {
                    rows.push(vec![Cell::text(label(Message::LabelUrl)), Cell::link(url, url)]);
                }
                sink.table(&["", ""], rows);
            }
            InfoPage::Modules => {
                let rows = project.modules.iter().map(|module| {
                    let name = match &module.url {
                        Some(url) => Cell::link(url, &module.name),
                        None => Cell::text(&module.name),
                    };
                    vec![name, Cell::text(module.description.as_deref().unwrap_or_default())]
                });
                sink.table(
                    &[label(Message::LabelName), label(Message::ColumnDescription)],
                    rows,
                );
            }
            InfoPage::Scm => {
                if let Some(scm) = &project.scm_url {
                    sink.section(label(Message::LabelConnection));
                    sink.verbatim(scm);
                    sink.section_end();
                }
            }
            InfoPage::Distribution => {
                if let Some(site) = &project.distribution {
                    sink.table(
                        &["", ""],
                        [
                            vec![Cell::text(label(Message::LabelSiteId)), Cell::text(&site.id)],
                            vec![Cell::text(label(Message::LabelSiteUrl)), Cell::text(&site.url)],
                        ],
                    );
                }
            }
        }

        sink.section_end();
        Ok(())
    }
}

/// The reports enabled unless `reporting.exclude_defaults` is set.
#[must_use]
pub fn project_info_reports() -> Vec<ReportExecution> {
    InfoPage::ALL
        .into_iter()
        .map(|page| ReportExecution {
            plugin_id: PLUGIN_ID.to_owned(),
            goal: page.output_name().to_owned(),
            report: Report::SinglePage(Arc::new(ProjectInfoReport { page })),
            user_defined: false,
        })
        .collect()
}
