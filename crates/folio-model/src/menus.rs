//! Menu population from the build.
//!
//! Menus declared with `ref: reports`, `ref: modules` or `ref: parent` are
//! filled from the project and its reports. Items declared with
//! `ref: <output_name>` point to a report; unknown references are pruned.

use folio_config::ReportCategory;

use crate::descriptor::{Menu, MenuItem, MenuRef, SiteModel};
use crate::i18n::Message;
use crate::links::{directory_url, relativize_link};
use crate::{Project, SiteLocale};

/// A report as it appears in navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMenuEntry {
    /// Output name without `.html`.
    pub output_name: String,
    /// Localized display name.
    pub name: String,
    pub category: ReportCategory,
}

impl ReportMenuEntry {
    #[must_use]
    pub fn href(&self) -> String {
        format!("{}.html", self.output_name)
    }
}

/// Inputs for menu population.
pub struct MenuSources<'a> {
    pub project: &'a Project,
    pub locale: &'a SiteLocale,
    /// Every report of the pass, including ones whose page was skipped.
    pub reports: &'a [ReportMenuEntry],
}

/// Fill reference menus and resolve report references in `model`.
pub fn populate_menus(model: &mut SiteModel, sources: &MenuSources<'_>) {
    for menu in &mut model.menus {
        match menu.reference {
            Some(MenuRef::Reports) => populate_reports_menu(menu, sources),
            Some(MenuRef::Modules) => populate_modules_menu(menu, sources),
            Some(MenuRef::Parent) => populate_parent_menu(menu, sources),
            None => {}
        }
        resolve_report_refs(&mut menu.items, sources.reports);
    }
    model
        .menus
        .retain(|menu| menu.reference.is_none() || !menu.items.is_empty());
}

fn populate_reports_menu(menu: &mut Menu, sources: &MenuSources<'_>) {
    if menu.name.is_none() {
        menu.name = Some(Message::MenuProjectDocumentation.text(sources.locale).to_owned());
    }
    if !menu.items.is_empty() {
        return;
    }

    let categories = [
        (ReportCategory::ProjectInfo, Message::ProjectInfoTitle),
        (ReportCategory::ProjectReports, Message::ProjectReportsTitle),
    ];
    for (category, title) in categories {
        if category == ReportCategory::ProjectInfo && !sources.project.site.generate_project_info {
            continue;
        }
        let reports: Vec<MenuItem> = sources
            .reports
            .iter()
            .filter(|r| r.category == category)
            .map(|r| MenuItem::link(r.name.clone(), r.href()))
            .collect();
        if reports.is_empty() {
            continue;
        }
        menu.items.push(MenuItem {
            collapse: true,
            items: reports,
            ..MenuItem::link(title.text(sources.locale), format!("{}.html", category.id()))
        });
    }
}

fn populate_modules_menu(menu: &mut Menu, sources: &MenuSources<'_>) {
    let project = sources.project;
    if project.modules.is_empty() {
        menu.items.clear();
        return;
    }
    if menu.name.is_none() {
        menu.name = Some(Message::MenuModules.text(sources.locale).to_owned());
    }
    if !menu.items.is_empty() {
        return;
    }
    for module in &project.modules {
        let href = match (&module.url, link_base(project)) {
            (Some(url), Some(base)) => relativize_link(url, &base),
            (Some(url), None) => url.clone(),
            (None, _) => {
                let dir = module
                    .base_dir
                    .strip_prefix(&project.base_dir)
                    .map_or_else(
                        |_| {
                            module
                                .base_dir
                                .file_name()
                                .map(|n| n.to_string_lossy().into_owned())
                                .unwrap_or_default()
                        },
                        |rel| rel.to_string_lossy().replace('\\', "/"),
                    );
                format!("{dir}/index.html")
            }
        };
        menu.items.push(MenuItem::link(module.name.clone(), href));
    }
}

fn populate_parent_menu(menu: &mut Menu, sources: &MenuSources<'_>) {
    let Some(parent) = sources.project.parent.as_deref() else {
        menu.items.clear();
        return;
    };
    if menu.name.is_none() {
        menu.name = Some(Message::MenuParentProject.text(sources.locale).to_owned());
    }
    if !menu.items.is_empty() {
        return;
    }
    let href = match (&parent.url, link_base(sources.project)) {
        (Some(url), Some(base)) => relativize_link(url, &base),
        (Some(url), None) => url.clone(),
        (None, _) => "../index.html".to_owned(),
    };
    menu.items.push(MenuItem::link(parent.name.clone(), href));
}

fn link_base(project: &Project) -> Option<url::Url> {
    if !project.site.relativize_links {
        return None;
    }
    project.url.as_deref().and_then(|u| directory_url(u).ok())
}

fn resolve_report_refs(items: &mut Vec<MenuItem>, reports: &[ReportMenuEntry]) {
    items.retain_mut(|item| {
        if let Some(reference) = &item.reference {
            let Some(report) = reports.iter().find(|r| &r.output_name == reference) else {
                tracing::warn!("Unrecognised reference: '{reference}'");
                return false;
            };
            if item.name.is_none() {
                item.name = Some(report.name.clone());
            }
            if item.href.as_deref().is_none_or(str::is_empty) {
                item.href = Some(report.href());
            }
        }
        resolve_report_refs(&mut item.items, reports);
        true
    });
}
