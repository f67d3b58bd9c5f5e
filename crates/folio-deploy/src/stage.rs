//! Staging of rendered sites into one local tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio_model::Project;

use crate::DeployError;
use crate::site_url::{relative_site_path, top_level_project};

/// Directory name of the default staging area below the build directory.
pub const DEFAULT_STAGING_DIR: &str = "staging";

/// Where `project`'s site goes relative to the site of `base`.
///
/// `base` itself maps to `.`. A project deployed below `base`'s site uses
/// the URL path difference. Any other project uses its directory relative
/// to `base`.
#[must_use]
pub fn relative_deploy_path(project: &Project, base: &Project) -> PathBuf {
    if project.base_dir == base.base_dir {
        return PathBuf::from(".");
    }

    if let (Some(base_site), Some(site)) = (&base.distribution, &project.distribution)
        && let Some(path) = relative_site_path(&base_site.url, &site.url)
    {
        return PathBuf::from(path);
    }

    match project.base_dir.strip_prefix(&base.base_dir) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => project
            .base_dir
            .file_name()
            .map_or_else(|| PathBuf::from("."), PathBuf::from),
    }
}

/// Staging directory for a reactor rooted at `execution_root`.
#[must_use]
pub fn staging_dir(execution_root: &Project) -> PathBuf {
    execution_root
        .deploy
        .staging_dir
        .clone()
        .unwrap_or_else(|| execution_root.build_dir.join(DEFAULT_STAGING_DIR))
}

/// Result of staging one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Staged { target: PathBuf, files: usize },
    /// `deploy.skip` or `site.skip` is set.
    Skipped,
}

/// Copies rendered sites into a staging directory.
#[derive(Debug, Clone)]
pub struct Stager {
    staging_dir: PathBuf,
}

impl Stager {
    #[must_use]
    pub fn new(staging_dir: PathBuf) -> Self {
        tracing::info!("Using this base directory for staging: {}", staging_dir.display());
        Self { staging_dir }
    }

    #[must_use]
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Copy the rendered site of `project` to its staging location.
    ///
    /// Every project of a reactor is placed relative to the top-level
    /// project of `execution_root`, so the staged tree mirrors the deployed
    /// site.
    pub fn stage(
        &self,
        project: &Arc<Project>,
        execution_root: &Arc<Project>,
    ) -> Result<StageOutcome, DeployError> {
        if project.deploy.skip || project.site.skip {
            tracing::info!(project = %project.name, "Skipping site staging");
            return Ok(StageOutcome::Skipped);
        }
        let source = &project.site.output_dir;
        if !source.is_dir() {
            return Err(DeployError::DirectoryNotFound(source.clone()));
        }

        let top = top_level_project(execution_root);
        let target = self.staging_dir.join(relative_deploy_path(project, &top));
        tracing::info!(
            project = %project.name,
            "Staging {} to {}",
            source.display(),
            target.display()
        );
        let files = copy_tree(source, &target)?;
        Ok(StageOutcome::Staged { target, files })
    }
}

/// Copy every file below `from` into `to`, returning the number of files.
pub(crate) fn copy_tree(from: &Path, to: &Path) -> Result<usize, DeployError> {
    fs::create_dir_all(to).map_err(|e| DeployError::io(to, e))?;
    let mut count = 0;
    for entry in fs::read_dir(from).map_err(|e| DeployError::io(from, e))? {
        let entry = entry.map_err(|e| DeployError::io(from, e))?;
        let target = to.join(entry.file_name());
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            count += copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| DeployError::io(&target, e))?;
            count += 1;
        }
    }
    Ok(count)
}
