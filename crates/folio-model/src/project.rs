//! Project model and multi-module loading.
//!
//! A [`Project`] is built from one `folio.toml`. Its parent chain is loaded
//! eagerly and shared through `Arc`, so a reactor of sibling modules holds a
//! single copy of the common parent.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio_config::{CliSettings, Config, DeployConfig, ReportingConfig, SiteConfig};

use crate::ModelError;

/// Deployment target declared by a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionSite {
    pub id: String,
    /// Plain or SCM-prefixed URL.
    pub url: String,
}

/// What a project knows about one of its modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSummary {
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub base_dir: PathBuf,
}

/// A documented project.
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub description: Option<String>,
    /// Public URL of the project's site.
    pub url: Option<String>,
    pub scm_url: Option<String>,
    pub base_dir: PathBuf,
    pub build_dir: PathBuf,
    pub distribution: Option<DistributionSite>,
    pub parent: Option<Arc<Project>>,
    pub modules: Vec<ModuleSummary>,
    pub site: SiteConfig,
    pub reporting: ReportingConfig,
    pub deploy: DeployConfig,
}

impl Project {
    /// Build a project from its loaded configuration.
    #[must_use]
    pub fn from_config(
        config: &Config,
        parent: Option<Arc<Project>>,
        modules: Vec<ModuleSummary>,
    ) -> Self {
        Self {
            name: config.project.name.clone(),
            description: config.project.description.clone(),
            url: config.project.url.clone(),
            scm_url: config.project.scm_url.clone(),
            base_dir: config.project.base_dir.clone(),
            build_dir: config.project.build_dir.clone(),
            distribution: config.distribution.as_ref().map(|d| DistributionSite {
                id: d.site_id.clone(),
                url: d.site_url.clone(),
            }),
            parent,
            modules,
            site: config.site.clone(),
            reporting: config.reporting.clone(),
            deploy: config.deploy.clone(),
        }
    }

    /// Project with default settings rooted at `base_dir`.
    #[must_use]
    pub fn with_base_dir(name: &str, base_dir: &Path) -> Self {
        let mut config = Config::with_base_dir(base_dir);
        config.project.name = name.to_owned();
        Self::from_config(&config, None, Vec::new())
    }

    /// Ancestors from the topmost down to this project itself.
    #[must_use]
    pub fn ancestor_chain(self: &Arc<Self>) -> Vec<Arc<Project>> {
        let mut chain = vec![Arc::clone(self)];
        let mut current = self.parent.clone();
        while let Some(project) = current {
            current = project.parent.clone();
            chain.push(project);
        }
        chain.reverse();
        chain
    }
}

/// Loads projects and their parents, sharing already-loaded ancestors.
#[derive(Debug, Default)]
pub struct ProjectLoader {
    cli_settings: Option<CliSettings>,
    loaded: HashMap<PathBuf, Arc<Project>>,
    in_progress: Vec<PathBuf>,
}

impl ProjectLoader {
    #[must_use]
    pub fn new(cli_settings: Option<CliSettings>) -> Self {
        Self {
            cli_settings,
            ..Self::default()
        }
    }

    /// Load the project at `path` (a directory or its `folio.toml`).
    pub fn load(&mut self, path: &Path) -> Result<Arc<Project>, ModelError> {
        let dir = project_dir(path)?;
        if let Some(project) = self.loaded.get(&dir) {
            return Ok(Arc::clone(project));
        }
        if self.in_progress.contains(&dir) {
            return Err(ModelError::ProjectCycle(dir));
        }

        self.in_progress.push(dir.clone());
        let result = self.load_uncached(&dir);
        self.in_progress.pop();

        let project = Arc::new(result?);
        self.loaded.insert(dir, Arc::clone(&project));
        Ok(project)
    }

    fn load_uncached(&mut self, dir: &Path) -> Result<Project, ModelError> {
        let config = Config::load_project(dir, self.cli_settings.as_ref())?;
        tracing::debug!(project = %config.project.name, dir = %dir.display(), "Loading project");

        let parent = match &config.project.parent {
            Some(parent_dir) => Some(self.load(parent_dir)?),
            None => None,
        };

        let modules = config
            .project
            .modules
            .iter()
            .map(|module_dir| {
                let module = Config::load_project(module_dir, self.cli_settings.as_ref())?;
                Ok(ModuleSummary {
                    name: module.project.name,
                    description: module.project.description,
                    url: module.project.url,
                    base_dir: module.project.base_dir,
                })
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        Ok(Project::from_config(&config, parent, modules))
    }
}

fn project_dir(path: &Path) -> Result<PathBuf, ModelError> {
    let dir = if path.is_file() {
        path.parent().unwrap_or(Path::new("."))
    } else {
        path
    };
    dir.canonicalize().map_err(|source| ModelError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// The execution root and every module reachable from it.
#[derive(Debug, Clone)]
pub struct Reactor {
    projects: Vec<Arc<Project>>,
}

impl Reactor {
    /// Load the project at `root` and all of its modules, depth first.
    pub fn load(root: &Path, cli_settings: Option<CliSettings>) -> Result<Self, ModelError> {
        let mut loader = ProjectLoader::new(cli_settings);
        let root = loader.load(root)?;
        let mut projects = Vec::new();
        collect_modules(&mut loader, root, &mut projects)?;
        Ok(Self { projects })
    }

    /// Reactor holding already-built projects, execution root first.
    #[must_use]
    pub fn from_projects(projects: Vec<Arc<Project>>) -> Self {
        Self { projects }
    }

    #[must_use]
    pub fn execution_root(&self) -> Option<&Arc<Project>> {
        self.projects.first()
    }

    #[must_use]
    pub fn projects(&self) -> &[Arc<Project>] {
        &self.projects
    }
}

fn collect_modules(
    loader: &mut ProjectLoader,
    project: Arc<Project>,
    out: &mut Vec<Arc<Project>>,
) -> Result<(), ModelError> {
    if out.iter().any(|p| p.base_dir == project.base_dir) {
        return Ok(());
    }
    let module_dirs: Vec<PathBuf> = project.modules.iter().map(|m| m.base_dir.clone()).collect();
    out.push(project);
    for dir in module_dirs {
        let module = loader.load(&dir)?;
        collect_modules(loader, module, out)?;
    }
    Ok(())
}
