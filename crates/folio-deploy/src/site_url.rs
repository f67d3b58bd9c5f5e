//! Same-site comparison of distribution URLs.
//!
//! Two site URLs belong to the same site when they share scheme, host and
//! port, and one path is an ancestor of (or equal to) the other:
//!
//! | A                             | B                              | Same site |
//! |-------------------------------|--------------------------------|-----------|
//! | `https://h/site/`             | `https://h/site/child`         | yes       |
//! | `scm:svn:http://h/repos/site` | `scm:svn:https://h/repos/site/sub` | yes   |
//! | `https://h/a/x`               | `https://h/b/x`                | no        |
//! | `scm:git:git@h:repo.git`      | anything                       | error     |

use std::sync::Arc;

use folio_model::Project;
use url::Url;

/// A site URL that cannot be compared.
#[derive(Debug, thiserror::Error)]
pub enum SiteUrlError {
    /// The URL has no hierarchical structure, e.g. `git@host:path`.
    #[error("Site URL '{0}' is not hierarchical and cannot be compared")]
    NotHierarchical(String),
}

/// A site URL reduced to what matters for comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ComparableUrl {
    scheme: String,
    host: Option<String>,
    port: Option<u16>,
    segments: Vec<String>,
}

impl ComparableUrl {
    fn parse(site_url: &str) -> Result<Self, SiteUrlError> {
        let url = comparable(site_url)?;
        Ok(Self {
            scheme: url.scheme().to_owned(),
            host: url.host_str().map(str::to_ascii_lowercase),
            port: url.port_or_known_default(),
            segments: url
                .path_segments()
                .into_iter()
                .flatten()
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        })
    }

    fn same_authority(&self, other: &Self) -> bool {
        self.scheme == other.scheme && self.host == other.host && self.port == other.port
    }

    fn is_ancestor_of(&self, other: &Self) -> bool {
        other.segments.starts_with(&self.segments)
    }
}

/// Strip the SCM prefix and normalize the scheme.
fn comparable(site_url: &str) -> Result<Url, SiteUrlError> {
    let not_hierarchical = || SiteUrlError::NotHierarchical(site_url.to_owned());

    let (provider, location) = match site_url.strip_prefix("scm:") {
        Some(rest) => rest.split_once(':').ok_or_else(not_hierarchical)?,
        None => ("", site_url),
    };
    let mut url = Url::parse(location).map_err(|_| not_hierarchical())?;
    if url.cannot_be_a_base() {
        return Err(not_hierarchical());
    }
    if provider == "svn" && url.scheme() == "https" {
        url.set_scheme("http").map_err(|()| not_hierarchical())?;
    }
    Ok(url)
}

/// Normalized form of a plain or SCM-prefixed site URL.
///
/// `scm:svn:https://svn.example.org/repos/site` becomes
/// `http://svn.example.org/repos/site`.
pub fn extract_comparable_url(site_url: &str) -> Result<String, SiteUrlError> {
    comparable(site_url).map(String::from)
}

/// Whether `a` and `b` are parts of the same site.
pub fn try_same_site(a: &str, b: &str) -> Result<bool, SiteUrlError> {
    let a = ComparableUrl::parse(a)?;
    let b = ComparableUrl::parse(b)?;
    Ok(a.same_authority(&b) && (a.is_ancestor_of(&b) || b.is_ancestor_of(&a)))
}

/// Like [`try_same_site`], treating URLs that cannot be compared as
/// different sites.
#[must_use]
pub fn is_same_site(a: &str, b: &str) -> bool {
    try_same_site(a, b).unwrap_or_else(|e| {
        tracing::debug!(a, b, "Not the same site: {e}");
        false
    })
}

/// Path of `url` below `base`, `.` when they are equal.
///
/// Returns `None` when `url` is not inside `base` or either URL cannot be
/// compared.
#[must_use]
pub fn relative_site_path(base: &str, url: &str) -> Option<String> {
    let base = ComparableUrl::parse(base).ok()?;
    let url = ComparableUrl::parse(url).ok()?;
    if !base.same_authority(&url) || !base.is_ancestor_of(&url) {
        return None;
    }
    let rest = &url.segments[base.segments.len()..];
    if rest.is_empty() {
        Some(".".to_owned())
    } else {
        Some(rest.join("/"))
    }
}

/// The topmost ancestor of `project` deployed to the same site.
///
/// Walks up the parent chain while each parent's distribution URL is the
/// same site as its child's.
#[must_use]
pub fn top_level_project(project: &Arc<Project>) -> Arc<Project> {
    let mut current = Arc::clone(project);
    while let Some(parent) = current.parent.clone() {
        let same = match (&current.distribution, &parent.distribution) {
            (Some(child), Some(parent)) => is_same_site(&child.url, &parent.url),
            _ => false,
        };
        if !same {
            break;
        }
        current = parent;
    }
    current
}
