//! Link rewriting against project URLs.

use url::Url;

use crate::ModelError;

/// Parse `url` as a directory URL, appending a trailing slash if missing.
pub fn directory_url(url: &str) -> Result<Url, ModelError> {
    let with_slash = if url.ends_with('/') {
        url.to_owned()
    } else {
        format!("{url}/")
    };
    Url::parse(&with_slash).map_err(|source| ModelError::InvalidUrl {
        url: url.to_owned(),
        source,
    })
}

/// Append `locale` to `url` as a path segment, adding a slash only when needed.
#[must_use]
pub fn locale_url(url: &str, locale: &str) -> String {
    if url.ends_with('/') {
        format!("{url}{locale}")
    } else {
        format!("{url}/{locale}")
    }
}

/// Rewrite an absolute `href` relative to `base`.
///
/// Links that are already relative, or that point to another scheme, host
/// or port, are returned unchanged. A link to `base` itself becomes `./`.
#[must_use]
pub fn relativize_link(href: &str, base: &Url) -> String {
    let Ok(target) = Url::parse(href) else {
        return href.to_owned();
    };
    match base.make_relative(&target) {
        Some(relative) if relative.is_empty() => "./".to_owned(),
        Some(relative) => relative,
        None => href.to_owned(),
    }
}

/// Move a relative `href` written for `from` so it resolves the same way from `to`.
///
/// Absolute links, fragments and root-relative paths are kept as they are.
#[must_use]
pub(crate) fn rebase_link(href: &str, from: &Url, to: &Url) -> String {
    if href.starts_with('#') || href.starts_with('/') || Url::parse(href).is_ok() {
        return href.to_owned();
    }
    match from.join(href) {
        Ok(absolute) => relativize_link(absolute.as_str(), to),
        Err(_) => href.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base(url: &str) -> Url {
        directory_url(url).unwrap()
    }

    #[test]
    fn test_directory_url_appends_slash() {
        assert_eq!(
            base("https://example.com/site").as_str(),
            "https://example.com/site/"
        );
        assert_eq!(
            base("https://example.com/site/").as_str(),
            "https://example.com/site/"
        );
    }

    #[test]
    fn test_directory_url_invalid() {
        let err = directory_url("not a url").unwrap_err();
        assert!(matches!(err, ModelError::InvalidUrl { .. }));
    }

    #[test]
    fn test_locale_url() {
        assert_eq!(locale_url("https://e.com/site", "fr"), "https://e.com/site/fr");
        assert_eq!(locale_url("https://e.com/site/", "fr"), "https://e.com/site/fr");
    }

    #[test]
    fn test_relativize_same_site() {
        let base = base("https://example.com/site/child");
        assert_eq!(
            relativize_link("https://example.com/site/child/guide.html", &base),
            "guide.html"
        );
        assert_eq!(
            relativize_link("https://example.com/site/index.html", &base),
            "../index.html"
        );
        assert_eq!(relativize_link("https://example.com/site/child/", &base), "./");
    }

    #[test]
    fn test_relativize_other_host_unchanged() {
        let base = base("https://example.com/site/");
        assert_eq!(
            relativize_link("https://github.com/example", &base),
            "https://github.com/example"
        );
    }

    #[test]
    fn test_relativize_relative_unchanged() {
        let base = base("https://example.com/site/");
        assert_eq!(relativize_link("guide.html", &base), "guide.html");
    }

    #[test]
    fn test_rebase_parent_link_into_child() {
        let parent = base("https://example.com/site/");
        let child = base("https://example.com/site/child/");
        assert_eq!(rebase_link("team.html", &parent, &child), "../team.html");
        assert_eq!(rebase_link("#top", &parent, &child), "#top");
        assert_eq!(
            rebase_link("https://other.org/", &parent, &child),
            "https://other.org/"
        );
    }
}
