//! Configuration management for Folio.
//!
//! Parses `folio.toml` project files with serde and provides auto-discovery
//! of the nearest config file in the current directory or its parents.
//!
//! Every project in a multi-module build carries its own `folio.toml`. The
//! `[project]` section links it to its parent and modules, `[site]` controls
//! rendering, `[reporting]` declares report generators and `[distribution]`
//! names the deployment target.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `project.url`
//! - `distribution.site_url`
//! - `server.host`
//! - `deploy.s3.endpoint`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "folio.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default, Clone)]
pub struct CliSettings {
    /// Override preview server host.
    pub host: Option<String>,
    /// Override preview server port.
    pub port: Option<u16>,
    /// Override the locale list.
    pub locales: Option<Vec<String>>,
    /// Override the site output directory.
    pub output_dir: Option<PathBuf>,
    /// Override the staging directory.
    pub staging_dir: Option<PathBuf>,
    /// Override report generation.
    pub generate_reports: Option<bool>,
    /// Override sitemap generation.
    pub generate_sitemap: Option<bool>,
    /// Override link relativization.
    pub relativize_links: Option<bool>,
}

/// Project configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "project")]
    project_raw: ProjectConfigRaw,
    #[serde(rename = "site")]
    site_raw: SiteConfigRaw,
    #[serde(rename = "deploy")]
    deploy_raw: DeployConfigRaw,
    /// Report generators.
    pub reporting: ReportingConfig,
    /// Deployment target (optional section).
    pub distribution: Option<DistributionConfig>,
    /// Preview server configuration.
    pub server: ServerConfig,

    /// Resolved project configuration (set after loading).
    #[serde(skip)]
    pub project: ProjectConfig,
    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site: SiteConfig,
    /// Resolved deploy configuration (set after loading).
    #[serde(skip)]
    pub deploy: DeployConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    #[allow(clippy::derivable_impls)]
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ProjectConfigRaw {
    name: Option<String>,
    description: Option<String>,
    url: Option<String>,
    scm_url: Option<String>,
    parent: Option<String>,
    modules: Vec<String>,
    build_dir: Option<String>,
}

/// Resolved `[project]` section.
#[derive(Debug, Default, Clone)]
pub struct ProjectConfig {
    /// Display name. Defaults to the project directory name.
    pub name: String,
    /// Short description.
    pub description: Option<String>,
    /// Public URL of the project's site, used for link relativization.
    pub url: Option<String>,
    /// SCM connection URL.
    pub scm_url: Option<String>,
    /// Parent project directory.
    pub parent: Option<PathBuf>,
    /// Module project directories.
    pub modules: Vec<PathBuf>,
    /// Directory holding the config file.
    pub base_dir: PathBuf,
    /// Build output directory.
    pub build_dir: PathBuf,
}

/// Locales as written in TOML: either `"default,fr"` or `["default", "fr"]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LocalesRaw {
    Csv(String),
    List(Vec<String>),
}

impl LocalesRaw {
    fn into_list(self) -> Vec<String> {
        match self {
            Self::Csv(csv) => split_csv(&csv),
            Self::List(list) => list
                .into_iter()
                .map(|l| l.trim().to_owned())
                .filter(|l| !l.is_empty())
                .collect(),
        }
    }
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    site_dir: Option<String>,
    generated_site_dir: Option<String>,
    output_dir: Option<String>,
    locales: Option<LocalesRaw>,
    relativize_links: Option<bool>,
    generate_reports: Option<bool>,
    generate_project_info: Option<bool>,
    generate_sitemap: Option<bool>,
    save_processed_content: Option<bool>,
    publish_date: Option<String>,
    skip: bool,
    attributes: BTreeMap<String, String>,
    module_excludes: BTreeMap<String, String>,
}

/// Resolved `[site]` section with absolute paths.
#[derive(Debug, Default, Clone)]
pub struct SiteConfig {
    /// Hand-written site sources.
    pub site_dir: PathBuf,
    /// Generated site sources (not editable).
    pub generated_site_dir: PathBuf,
    /// Rendered site output.
    pub output_dir: PathBuf,
    /// Requested locales, default locale first.
    pub locales: Vec<String>,
    /// Rewrite absolute links relative to the project URL.
    pub relativize_links: bool,
    /// Run report generators.
    pub generate_reports: bool,
    /// Emit the project information summary page.
    pub generate_project_info: bool,
    /// Emit `sitemap.html`.
    pub generate_sitemap: bool,
    /// Save template-processed sources under the generated site dir.
    pub save_processed_content: bool,
    /// Fixed publish date (RFC 3339) for reproducible output.
    pub publish_date: Option<String>,
    /// Skip site generation for this project.
    pub skip: bool,
    /// Extra template properties.
    pub attributes: BTreeMap<String, String>,
    /// Glob patterns excluded from discovery, keyed by parser id.
    pub module_excludes: BTreeMap<String, Vec<String>>,
}

impl SiteConfig {
    /// Directory where template-processed sources are saved.
    #[must_use]
    pub fn processed_dir(&self) -> PathBuf {
        self.generated_site_dir.join("processed")
    }
}

/// Report category as written in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReportCategory {
    /// General project information (`project-info`).
    ProjectInfo,
    /// Generated analysis reports (`project-reports`).
    #[default]
    ProjectReports,
}

impl ReportCategory {
    /// Identifier used for summary page names.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::ProjectInfo => "project-info",
            Self::ProjectReports => "project-reports",
        }
    }
}

/// `[reporting]` section.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct ReportingConfig {
    /// Do not add the built-in project information reports.
    pub exclude_defaults: bool,
    /// Command reports.
    pub reports: Vec<ReportConfig>,
}

/// One `[[reporting.reports]]` entry.
#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Generator identity, e.g. `cargo-audit`.
    pub plugin: String,
    /// Goal within the generator.
    pub goal: String,
    /// Output file name without `.html`.
    pub output_name: String,
    /// Display name.
    pub name: Option<String>,
    /// Description shown in summaries.
    pub description: Option<String>,
    /// Category the report is listed under.
    #[serde(default)]
    pub category: ReportCategory,
    /// Program and arguments.
    pub command: Vec<String>,
    /// The program writes its own files instead of emitting a page body.
    #[serde(default)]
    pub external: bool,
    /// The program may write auxiliary pages.
    #[serde(default)]
    pub multi_page: bool,
    /// Files (relative to the project) that must exist for the report to run.
    #[serde(default)]
    pub requires: Vec<String>,
    /// Localized display names keyed by locale.
    #[serde(default)]
    pub names: BTreeMap<String, String>,
    /// Localized descriptions keyed by locale.
    #[serde(default)]
    pub descriptions: BTreeMap<String, String>,
}

/// `[distribution]` section.
#[derive(Debug, Deserialize, Clone)]
pub struct DistributionConfig {
    /// Identifier of the site repository.
    #[serde(default = "default_site_id")]
    pub site_id: String,
    /// Deployment URL, plain or SCM-prefixed.
    pub site_url: String,
}

fn default_site_id() -> String {
    "site".to_owned()
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DeployConfigRaw {
    staging_dir: Option<String>,
    skip: bool,
    s3: S3Config,
}

/// S3 transport settings.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct S3Config {
    /// AWS region.
    pub region: String,
    /// S3-compatible endpoint URL.
    pub endpoint: Option<String>,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_owned(),
            endpoint: None,
        }
    }
}

/// Resolved `[deploy]` section.
#[derive(Debug, Default, Clone)]
pub struct DeployConfig {
    /// Staging directory override.
    pub staging_dir: Option<PathBuf>,
    /// Skip staging and deployment for this project.
    pub skip: bool,
    /// S3 transport settings.
    pub s3: S3Config,
}

/// Preview server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error in {}: {source}", .path.display())]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// Parser error.
        source: toml::de::Error,
    },
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`distribution.site_url`").
        field: String,
        /// Error message (e.g., "${`SITE_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file (or from the
    /// `folio.toml` inside it when it names a directory). Otherwise, searches
    /// for `folio.toml` in the current directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            Self::load_from_file(&config_file_for(path)?)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Load the project config found at `path`.
    ///
    /// `path` may name the config file or the project directory. Unlike
    /// [`Config::load`], there is no discovery: the file must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if there is no config at `path`.
    pub fn load_project(
        path: &Path,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::load_from_file(&config_file_for(path)?)?;
        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        Ok(config)
    }

    /// Default configuration for a project rooted at `base`.
    #[must_use]
    pub fn with_base_dir(base: &Path) -> Self {
        Self::default_with_base(base)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(locales) = &settings.locales {
            self.site.locales.clone_from(locales);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.site.output_dir.clone_from(output_dir);
        }
        if let Some(staging_dir) = &settings.staging_dir {
            self.deploy.staging_dir = Some(staging_dir.clone());
        }
        if let Some(generate_reports) = settings.generate_reports {
            self.site.generate_reports = generate_reports;
        }
        if let Some(generate_sitemap) = settings.generate_sitemap {
            self.site.generate_sitemap = generate_sitemap;
        }
        if let Some(relativize_links) = settings.relativize_links {
            self.site.relativize_links = relativize_links;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            project_raw: ProjectConfigRaw::default(),
            site_raw: SiteConfigRaw::default(),
            deploy_raw: DeployConfigRaw::default(),
            reporting: ReportingConfig::default(),
            distribution: None,
            server: ServerConfig::default(),
            project: ProjectConfig::default(),
            site: SiteConfig::default(),
            deploy: DeployConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.project.name, "project.name")?;
        self.validate_server()?;
        self.validate_reports()?;
        if let Some(distribution) = &self.distribution {
            require_non_empty(&distribution.site_url, "distribution.site_url")?;
        }
        if let Some(endpoint) = &self.deploy.s3.endpoint {
            require_http_url(endpoint, "deploy.s3.endpoint")?;
        }
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_reports(&self) -> Result<(), ConfigError> {
        for (i, report) in self.reporting.reports.iter().enumerate() {
            let field = |name: &str| format!("reporting.reports[{i}].{name}");
            require_non_empty(&report.plugin, &field("plugin"))?;
            require_non_empty(&report.goal, &field("goal"))?;
            require_non_empty(&report.output_name, &field("output_name"))?;
            if report.command.first().is_none_or(|program| program.is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "{} must name a program",
                    field("command")
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_opt(&mut self.project_raw.url, "project.url")?;
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref mut distribution) = self.distribution {
            distribution.site_url =
                expand::expand_env(&distribution.site_url, "distribution.site_url")?;
        }

        expand::expand_opt(&mut self.deploy_raw.s3.endpoint, "deploy.s3.endpoint")?;

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        let raw = &self.project_raw;
        let name = raw.name.clone().unwrap_or_else(|| {
            config_dir
                .file_name()
                .map_or_else(|| "project".to_owned(), |n| n.to_string_lossy().into_owned())
        });
        self.project = ProjectConfig {
            name,
            description: raw.description.clone(),
            url: raw.url.clone(),
            scm_url: raw.scm_url.clone(),
            parent: raw.parent.as_deref().map(|p| config_dir.join(p)),
            modules: raw.modules.iter().map(|m| config_dir.join(m)).collect(),
            base_dir: config_dir.to_path_buf(),
            build_dir: resolve(raw.build_dir.as_deref(), "target"),
        };

        let site = &mut self.site_raw;
        let build_dir = &self.project.build_dir;
        self.site = SiteConfig {
            site_dir: resolve(site.site_dir.as_deref(), "src/site"),
            generated_site_dir: site
                .generated_site_dir
                .as_deref()
                .map_or_else(|| build_dir.join("generated-site"), |d| config_dir.join(d)),
            output_dir: site
                .output_dir
                .as_deref()
                .map_or_else(|| build_dir.join("site"), |d| config_dir.join(d)),
            locales: site
                .locales
                .take()
                .map(LocalesRaw::into_list)
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| vec!["default".to_owned()]),
            relativize_links: site.relativize_links.unwrap_or(true),
            generate_reports: site.generate_reports.unwrap_or(true),
            generate_project_info: site.generate_project_info.unwrap_or(true),
            generate_sitemap: site.generate_sitemap.unwrap_or(false),
            save_processed_content: site.save_processed_content.unwrap_or(false),
            publish_date: site.publish_date.clone(),
            skip: site.skip,
            attributes: site.attributes.clone(),
            module_excludes: site
                .module_excludes
                .iter()
                .map(|(parser, patterns)| (parser.clone(), split_csv(patterns)))
                .collect(),
        };

        self.deploy = DeployConfig {
            staging_dir: self
                .deploy_raw
                .staging_dir
                .as_deref()
                .map(|d| config_dir.join(d)),
            skip: self.deploy_raw.skip,
            s3: self.deploy_raw.s3.clone(),
        };
    }
}

/// Map a file-or-directory argument to the config file it names.
fn config_file_for(path: &Path) -> Result<PathBuf, ConfigError> {
    let file = if path.is_dir() {
        path.join(CONFIG_FILENAME)
    } else {
        path.to_path_buf()
    };
    if !file.exists() {
        return Err(ConfigError::NotFound(file));
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(toml: &str, dir: &Path) -> Config {
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(dir);
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/work/demo"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.project.name, "demo");
        assert_eq!(config.project.build_dir, PathBuf::from("/work/demo/target"));
        assert_eq!(config.site.site_dir, PathBuf::from("/work/demo/src/site"));
        assert_eq!(
            config.site.generated_site_dir,
            PathBuf::from("/work/demo/target/generated-site")
        );
        assert_eq!(
            config.site.output_dir,
            PathBuf::from("/work/demo/target/site")
        );
        assert_eq!(config.site.locales, vec!["default".to_owned()]);
        assert!(config.site.relativize_links);
        assert!(config.site.generate_reports);
        assert!(config.site.generate_project_info);
        assert!(!config.site.generate_sitemap);
        assert!(config.distribution.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.reporting.reports.is_empty());
    }

    #[test]
    fn test_parse_project_section() {
        let config = parse(
            r#"
[project]
name = "Widgets"
description = "Widget toolkit"
url = "https://widgets.example.com/"
scm_url = "scm:git:https://github.com/example/widgets.git"
parent = "../parent"
modules = ["core", "cli"]
build_dir = "out"
"#,
            Path::new("/src/widgets"),
        );
        assert_eq!(config.project.name, "Widgets");
        assert_eq!(
            config.project.url.as_deref(),
            Some("https://widgets.example.com/")
        );
        assert_eq!(
            config.project.parent,
            Some(PathBuf::from("/src/widgets/../parent"))
        );
        assert_eq!(
            config.project.modules,
            vec![
                PathBuf::from("/src/widgets/core"),
                PathBuf::from("/src/widgets/cli")
            ]
        );
        assert_eq!(config.project.build_dir, PathBuf::from("/src/widgets/out"));
        assert_eq!(
            config.site.output_dir,
            PathBuf::from("/src/widgets/out/site")
        );
    }

    #[test]
    fn test_parse_locales_csv() {
        let config = parse("[site]\nlocales = \"default, fr ,de\"\n", Path::new("/p"));
        assert_eq!(config.site.locales, vec!["default", "fr", "de"]);
    }

    #[test]
    fn test_parse_locales_list() {
        let config = parse("[site]\nlocales = [\"en\", \"fr\"]\n", Path::new("/p"));
        assert_eq!(config.site.locales, vec!["en", "fr"]);
    }

    #[test]
    fn test_empty_locales_fall_back_to_default() {
        let config = parse("[site]\nlocales = \"\"\n", Path::new("/p"));
        assert_eq!(config.site.locales, vec!["default"]);
    }

    #[test]
    fn test_parse_module_excludes_and_attributes() {
        let config = parse(
            r#"
[site.module_excludes]
markdown = "drafts/**, *-wip.md"

[site.attributes]
team = "Docs"
"#,
            Path::new("/p"),
        );
        assert_eq!(
            config.site.module_excludes.get("markdown"),
            Some(&vec!["drafts/**".to_owned(), "*-wip.md".to_owned()])
        );
        assert_eq!(config.site.attributes.get("team").map(String::as_str), Some("Docs"));
    }

    #[test]
    fn test_parse_reports() {
        let config = parse(
            r#"
[reporting]
exclude_defaults = true

[[reporting.reports]]
plugin = "cargo-audit"
goal = "audit"
output_name = "audit"
name = "Security Audit"
category = "project-reports"
command = ["cargo", "audit"]
multi_page = true
names = { fr = "Audit de sécurité" }
"#,
            Path::new("/p"),
        );
        assert!(config.reporting.exclude_defaults);
        let report = &config.reporting.reports[0];
        assert_eq!(report.plugin, "cargo-audit");
        assert_eq!(report.category, ReportCategory::ProjectReports);
        assert!(report.multi_page);
        assert!(!report.external);
        assert_eq!(
            report.names.get("fr").map(String::as_str),
            Some("Audit de sécurité")
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_report_without_command_is_invalid() {
        let config = parse(
            r#"
[[reporting.reports]]
plugin = "x"
goal = "y"
output_name = "z"
command = []
"#,
            Path::new("/p"),
        );
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("reporting.reports[0].command"));
    }

    #[test]
    fn test_invalid_s3_endpoint() {
        let config = parse(
            "[deploy.s3]\nendpoint = \"storage.local\"\n",
            Path::new("/p"),
        );
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("deploy.s3.endpoint"));
    }

    #[test]
    fn test_port_zero_is_invalid() {
        let config = parse("[server]\nport = 0\n", Path::new("/p"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            port: Some(9000),
            locales: Some(vec!["en".to_owned(), "de".to_owned()]),
            output_dir: Some(PathBuf::from("/tmp/out")),
            generate_sitemap: Some(true),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.site.locales, vec!["en", "de"]);
        assert_eq!(config.site.output_dir, PathBuf::from("/tmp/out"));
        assert!(config.site.generate_sitemap);
        assert!(config.site.generate_reports);
    }

    #[test]
    fn test_load_project_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            "[project]\nname = \"Demo\"\n\n[distribution]\nsite_url = \"file:///srv/www\"\n",
        )
        .unwrap();

        let config = Config::load_project(dir.path(), None).unwrap();
        assert_eq!(config.project.name, "Demo");
        assert_eq!(config.project.base_dir, dir.path());
        let distribution = config.distribution.unwrap();
        assert_eq!(distribution.site_id, "site");
        assert_eq!(distribution.site_url, "file:///srv/www");
    }

    #[test]
    fn test_load_project_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_project(dir.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[project\n").unwrap();
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILENAME));
    }
}
