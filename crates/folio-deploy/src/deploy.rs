//! Deployment of rendered sites to their distribution URL.

use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use aws_sdk_s3::Client;
use folio_config::S3Config;
use folio_model::Project;
use url::Url;

use crate::DeployError;
use crate::site_url::top_level_project;
use crate::stage::{copy_tree, relative_deploy_path};

/// Where a site is deployed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployTarget {
    /// A local directory (`file://`).
    File(PathBuf),
    /// A bucket and key prefix (`s3://bucket/prefix`).
    S3 { bucket: String, prefix: String },
}

impl DeployTarget {
    /// Parse a distribution URL.
    pub fn parse(site_url: &str) -> Result<Self, DeployError> {
        let scheme = site_url.split_once(':').map(|(scheme, _)| scheme);
        match scheme {
            Some("file") => {
                let url = Url::parse(site_url)
                    .map_err(|_| DeployError::InvalidUrl(site_url.to_owned()))?;
                let path = url
                    .to_file_path()
                    .map_err(|()| DeployError::InvalidUrl(site_url.to_owned()))?;
                Ok(Self::File(path))
            }
            Some("s3") => {
                let url = Url::parse(site_url)
                    .map_err(|_| DeployError::InvalidUrl(site_url.to_owned()))?;
                let bucket = url
                    .host_str()
                    .filter(|b| !b.is_empty())
                    .ok_or_else(|| DeployError::InvalidUrl(site_url.to_owned()))?;
                Ok(Self::S3 {
                    bucket: bucket.to_owned(),
                    prefix: url.path().trim_matches('/').to_owned(),
                })
            }
            _ => Err(DeployError::UnsupportedTransport(site_url.to_owned())),
        }
    }

    /// The target `relative` below this one.
    #[must_use]
    pub fn join(&self, relative: &Path) -> Self {
        if relative == Path::new(".") {
            return self.clone();
        }
        match self {
            Self::File(dir) => Self::File(dir.join(relative)),
            Self::S3 { bucket, prefix } => {
                let relative = relative.to_string_lossy().replace('\\', "/");
                let prefix = if prefix.is_empty() {
                    relative
                } else {
                    format!("{prefix}/{relative}")
                };
                Self::S3 {
                    bucket: bucket.clone(),
                    prefix,
                }
            }
        }
    }
}

impl fmt::Display for DeployTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(dir) => write!(f, "{}", dir.display()),
            Self::S3 { bucket, prefix } => write!(f, "s3://{bucket}/{prefix}"),
        }
    }
}

/// Deployment target of `project`: the distribution URL of its top-level
/// project plus the project's relative path.
pub fn deploy_target(project: &Arc<Project>) -> Result<DeployTarget, DeployError> {
    let top = top_level_project(project);
    let site = top
        .distribution
        .as_ref()
        .ok_or_else(|| DeployError::MissingDistribution(top.name.clone()))?;
    let relative = relative_deploy_path(project, &top);
    Ok(DeployTarget::parse(&site.url)?.join(&relative))
}

/// Result of deploying one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    Deployed { target: DeployTarget, files: usize },
    /// `deploy.skip` or `site.skip` is set.
    Skipped,
}

/// Deploys rendered sites.
#[derive(Debug, Clone, Default)]
pub struct Deployer {
    s3: S3Config,
}

impl Deployer {
    #[must_use]
    pub fn new(s3: S3Config) -> Self {
        Self { s3 }
    }

    /// Deploy the rendered site of `project`.
    ///
    /// Returns the number of files copied or uploaded.
    pub async fn deploy(&self, project: &Arc<Project>) -> Result<DeployOutcome, DeployError> {
        if project.deploy.skip || project.site.skip {
            tracing::info!(project = %project.name, "Skipping site deployment");
            return Ok(DeployOutcome::Skipped);
        }
        let source = &project.site.output_dir;
        if !source.is_dir() {
            return Err(DeployError::DirectoryNotFound(source.clone()));
        }

        let target = deploy_target(project)?;
        tracing::info!(project = %project.name, "Deploying {} to {target}", source.display());
        let files = match &target {
            DeployTarget::File(dir) => copy_tree(source, dir)?,
            DeployTarget::S3 { bucket, prefix } => {
                S3Transport {
                    config: &self.s3,
                    bucket,
                    prefix,
                }
                .upload(source)
                .await?
            }
        };
        Ok(DeployOutcome::Deployed { target, files })
    }
}

struct S3Transport<'a> {
    config: &'a S3Config,
    bucket: &'a str,
    prefix: &'a str,
}

impl S3Transport<'_> {
    async fn upload(&self, directory: &Path) -> Result<usize, DeployError> {
        let mut files = Vec::new();
        walk_dir(directory, directory, &mut files)?;
        let client = self.build_client().await;

        for (relative_path, abs_path) in &files {
            let key = build_key(self.prefix, relative_path);
            let content_type = mime_guess::from_path(relative_path)
                .first_or_octet_stream()
                .to_string();
            let body = fs::read(abs_path).map_err(|e| DeployError::io(abs_path, e))?;

            client
                .put_object()
                .bucket(self.bucket)
                .key(&key)
                .body(body.into())
                .content_type(content_type)
                .send()
                .await
                .map_err(|e| DeployError::S3(error_chain(&e)))?;

            tracing::debug!(key = %key, "Uploaded");
        }

        Ok(files.len())
    }

    async fn build_client(&self) -> Client {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(self.config.region.clone()));

        if let Some(endpoint) = &self.config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;

        // S3-compatible endpoints (MinIO, LocalStack) expect path-style
        // addressing.
        if self.config.endpoint.is_some() {
            let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
                .force_path_style(true)
                .build();
            return Client::from_conf(s3_config);
        }

        Client::new(&sdk_config)
    }
}

fn build_key(prefix: &str, relative_path: &str) -> String {
    if prefix.is_empty() {
        relative_path.to_owned()
    } else {
        format!("{prefix}/{relative_path}")
    }
}

fn walk_dir(
    base: &Path,
    current: &Path,
    files: &mut Vec<(String, PathBuf)>,
) -> Result<(), DeployError> {
    for entry in fs::read_dir(current).map_err(|e| DeployError::io(current, e))? {
        let entry = entry.map_err(|e| DeployError::io(current, e))?;
        let path = entry.path();
        if path.is_dir() {
            walk_dir(base, &path, files)?;
        } else if let Ok(relative) = path.strip_prefix(base) {
            let relative = relative.to_string_lossy().replace('\\', "/");
            files.push((relative, path));
        }
    }
    Ok(())
}

/// Walk the error source chain and join all messages.
fn error_chain(err: &dyn Error) -> String {
    let mut msgs = vec![err.to_string()];
    let mut source = err.source();
    while let Some(s) = source {
        msgs.push(s.to_string());
        source = s.source();
    }
    msgs.join(": ")
}
