//! Staging and deployment of Folio sites.
//!
//! A reactor's sites form one tree. [`top_level_project`] finds the root of
//! the tree a project belongs to by comparing distribution URLs
//! ([`is_same_site`]), and [`relative_deploy_path`] places the project
//! inside it. [`Stager`] copies sites into a local staging directory;
//! [`Deployer`] copies them to `file://` URLs or uploads them to `s3://`.

mod deploy;
mod error;
mod site_url;
mod stage;

pub use deploy::{DeployOutcome, DeployTarget, Deployer, deploy_target};
pub use error::DeployError;
pub use site_url::{
    SiteUrlError, extract_comparable_url, is_same_site, relative_site_path, top_level_project,
    try_same_site,
};
pub use stage::{DEFAULT_STAGING_DIR, StageOutcome, Stager, relative_deploy_path, staging_dir};
