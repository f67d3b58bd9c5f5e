//! Localized strings for generated pages and menus.
//!
//! English, French and German are bundled. Any other language falls back
//! to English.

use crate::SiteLocale;

/// Name of the generator as shown in summaries.
pub const GENERATOR_NAME: &str = "Folio";

/// Messages used by generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    MenuProjectDocumentation,
    MenuModules,
    MenuParentProject,
    ProjectInfoTitle,
    ProjectInfoIntro,
    ProjectInfoOutro,
    ProjectReportsTitle,
    ProjectReportsIntro,
    ProjectReportsOutro,
    ReportsSection,
    ColumnDocument,
    ColumnDescription,
    SitemapTitle,
    SitemapDescription,
    SummaryName,
    SummaryDescription,
    ModulesName,
    ModulesDescription,
    ScmName,
    ScmDescription,
    DistributionName,
    DistributionDescription,
    LabelName,
    LabelUrl,
    LabelConnection,
    LabelSiteId,
    LabelSiteUrl,
}

impl Message {
    /// Text of this message for `locale`.
    #[must_use]
    pub fn text(self, locale: &SiteLocale) -> &'static str {
        match locale.language() {
            "fr" => self.french(),
            "de" => self.german(),
            _ => self.english(),
        }
    }

    fn english(self) -> &'static str {
        match self {
            Self::MenuProjectDocumentation => "Project Documentation",
            Self::MenuModules => "Modules",
            Self::MenuParentProject => "Parent Project",
            Self::ProjectInfoTitle => "Project Information",
            Self::ProjectInfoIntro => {
                "This document provides an overview of the various documents and links that \
                 are part of this project's general information. All of this content is \
                 automatically generated by"
            }
            Self::ProjectInfoOutro => "on behalf of the project.",
            Self::ProjectReportsTitle => "Project Reports",
            Self::ProjectReportsIntro => {
                "This document provides an overview of the various reports that are \
                 automatically generated by"
            }
            Self::ProjectReportsOutro => "Each report is briefly described below.",
            Self::ReportsSection => "Reports",
            Self::ColumnDocument => "Document",
            Self::ColumnDescription => "Description",
            Self::SitemapTitle => "Sitemap",
            Self::SitemapDescription => "This page lists every page of the site, grouped by menu.",
            Self::SummaryName => "Summary",
            Self::SummaryDescription => {
                "This document lists the general information about the project."
            }
            Self::ModulesName => "Project Modules",
            Self::ModulesDescription => {
                "This document lists the modules (sub-projects) of this project."
            }
            Self::ScmName => "Source Code Management",
            Self::ScmDescription => {
                "This document describes how to access the source code of this project."
            }
            Self::DistributionName => "Distribution Management",
            Self::DistributionDescription => {
                "This document describes where the project's site is deployed."
            }
            Self::LabelName => "Name",
            Self::LabelUrl => "Homepage",
            Self::LabelConnection => "Connection",
            Self::LabelSiteId => "Site ID",
            Self::LabelSiteUrl => "Site URL",
        }
    }

    fn french(self) -> &'static str {
        match self {
            Self::MenuProjectDocumentation => "Documentation du projet",
            Self::MenuModules => "Modules",
            Self::MenuParentProject => "Projet parent",
            Self::ProjectInfoTitle => "Informations sur le projet",
            Self::ProjectInfoIntro => {
                "Ce document fournit une vue d'ensemble des différents documents et liens qui \
                 font partie des informations générales de ce projet. Tout ce contenu est \
                 généré automatiquement par"
            }
            Self::ProjectInfoOutro => "pour le compte du projet.",
            Self::ProjectReportsTitle => "Rapports du projet",
            Self::ProjectReportsIntro => {
                "Ce document fournit une vue d'ensemble des différents rapports générés \
                 automatiquement par"
            }
            Self::ProjectReportsOutro => "Chaque rapport est brièvement décrit ci-dessous.",
            Self::ReportsSection => "Rapports",
            Self::ColumnDocument => "Document",
            Self::ColumnDescription => "Description",
            Self::SitemapTitle => "Plan du site",
            Self::SitemapDescription => {
                "Cette page liste toutes les pages du site, regroupées par menu."
            }
            Self::SummaryName => "Résumé",
            Self::SummaryDescription => {
                "Ce document présente les informations générales sur le projet."
            }
            Self::ModulesName => "Modules du projet",
            Self::ModulesDescription => "Ce document liste les modules (sous-projets) de ce projet.",
            Self::ScmName => "Gestion du code source",
            Self::ScmDescription => {
                "Ce document décrit comment accéder au code source de ce projet."
            }
            Self::DistributionName => "Gestion de la distribution",
            Self::DistributionDescription => "Ce document décrit où le site du projet est déployé.",
            Self::LabelName => "Nom",
            Self::LabelUrl => "Page d'accueil",
            Self::LabelConnection => "Connexion",
            Self::LabelSiteId => "Identifiant du site",
            Self::LabelSiteUrl => "URL du site",
        }
    }

    fn german(self) -> &'static str {
        match self {
            Self::MenuProjectDocumentation => "Projektdokumentation",
            Self::MenuModules => "Module",
            Self::MenuParentProject => "Übergeordnetes Projekt",
            Self::ProjectInfoTitle => "Projektinformationen",
            Self::ProjectInfoIntro => {
                "Dieses Dokument bietet einen Überblick über die verschiedenen Dokumente und \
                 Links, die zu den allgemeinen Informationen dieses Projekts gehören. Alle \
                 diese Inhalte werden automatisch generiert von"
            }
            Self::ProjectInfoOutro => "im Auftrag des Projekts.",
            Self::ProjectReportsTitle => "Projektberichte",
            Self::ProjectReportsIntro => {
                "Dieses Dokument bietet einen Überblick über die verschiedenen Berichte, die \
                 automatisch generiert werden von"
            }
            Self::ProjectReportsOutro => "Jeder Bericht wird unten kurz beschrieben.",
            Self::ReportsSection => "Berichte",
            Self::ColumnDocument => "Dokument",
            Self::ColumnDescription => "Beschreibung",
            Self::SitemapTitle => "Sitemap",
            Self::SitemapDescription => {
                "Diese Seite listet alle Seiten der Website, nach Menü gruppiert."
            }
            Self::SummaryName => "Zusammenfassung",
            Self::SummaryDescription => {
                "Dieses Dokument enthält allgemeine Informationen über das Projekt."
            }
            Self::ModulesName => "Projektmodule",
            Self::ModulesDescription => {
                "Dieses Dokument listet die Module (Unterprojekte) dieses Projekts auf."
            }
            Self::ScmName => "Quellcodeverwaltung",
            Self::ScmDescription => {
                "Dieses Dokument beschreibt, wie auf den Quellcode dieses Projekts \
                 zugegriffen werden kann."
            }
            Self::DistributionName => "Verteilungsverwaltung",
            Self::DistributionDescription => {
                "Dieses Dokument beschreibt, wohin die Website des Projekts bereitgestellt wird."
            }
            Self::LabelName => "Name",
            Self::LabelUrl => "Homepage",
            Self::LabelConnection => "Verbindung",
            Self::LabelSiteId => "Website-ID",
            Self::LabelSiteUrl => "Website-URL",
        }
    }
}
