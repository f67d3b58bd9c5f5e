//! Project and site model for Folio.
//!
//! This crate turns `folio.toml` files into a [`Project`] graph, resolves the
//! requested [`LocaleSet`], and assembles the navigation [`SiteModel`] of a
//! project from its own `site.yaml` and those of its ancestors.
//!
//! # Assembly
//!
//! ```text
//! root site.yaml ──► child site.yaml ──► ... ──► project site.yaml
//!        │                 │                           │
//!        └── merged top-down (children override) ──────┘
//!                                   │
//!                     relativized against project URL
//!                                   │
//!                     menus populated (reports/modules/parent)
//! ```

mod assembler;
mod descriptor;
mod error;
pub mod i18n;
mod inheritance;
mod links;
mod locale;
mod menus;
mod project;

pub use assembler::SiteModelAssembler;
pub use descriptor::{
    Banner, Inherit, Link, Menu, MenuItem, MenuRef, Position, PublishDate, SiteModel, Skin,
    VersionInfo,
};
pub use error::ModelError;
pub use folio_config::ReportCategory;
pub use links::{directory_url, locale_url, relativize_link};
pub use locale::{LocaleSet, SiteLocale};
pub use menus::{MenuSources, ReportMenuEntry, populate_menus};
pub use project::{DistributionSite, ModuleSummary, Project, ProjectLoader, Reactor};
