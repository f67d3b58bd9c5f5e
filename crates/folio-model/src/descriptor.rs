//! Site descriptor (`site.yaml`) types.
//!
//! A descriptor declares the navigation of a project's site: menus with
//! nested items, banners, breadcrumbs and header links. Descriptors are
//! inherited from ancestor projects, see [`crate::SiteModelAssembler`].
//!
//! ```yaml
//! name: Widgets
//! skin:
//!   template: skin/site.html
//! banner_left:
//!   name: Widgets
//!   href: https://widgets.example.com/
//! links:
//!   - name: GitHub
//!     href: https://github.com/example/widgets
//! menus:
//!   - name: Overview
//!     inherit: top
//!     items:
//!       - name: Introduction
//!         href: index.html
//!       - ref: summary
//!   - ref: modules
//!   - ref: reports
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ModelError, SiteLocale};

/// Descriptor file name without locale suffix.
const DESCRIPTOR_STEM: &str = "site";

/// The navigation model of one project's site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skin: Option<Skin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_left: Option<Banner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_right: Option<Banner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<PublishDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub breadcrumbs: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub menus: Vec<Menu>,
    /// Free-form values passed through to the skin.
    #[serde(skip_serializing_if = "serde_yaml::Value::is_null")]
    pub custom: serde_yaml::Value,
}

/// Skin selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Skin {
    /// Page template path. Relative paths are resolved against the site
    /// directory of the descriptor that declares them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

/// Banner image or text shown in the page header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Banner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Where a piece of page chrome is placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    #[default]
    Left,
    Right,
    Bottom,
    None,
}

/// Publish date display settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishDate {
    pub position: Position,
    /// chrono format string, `%Y-%m-%d` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Version display settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersionInfo {
    pub position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Plain named link (breadcrumbs, header links).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub name: String,
    pub href: String,
}

/// Menu whose items are populated from the build rather than the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuRef {
    /// Category summaries and their reports.
    Reports,
    /// Module projects.
    Modules,
    /// Link back to the parent project.
    Parent,
}

/// How a menu propagates to child projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Inherit {
    /// Placed before the child's own menus.
    Top,
    /// Placed after the child's own menus.
    Bottom,
}

/// A navigation menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Menu {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<MenuRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherit: Option<Inherit>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<MenuItem>,
}

/// An entry of a menu, possibly with children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Output name of a report this item points to.
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub collapse: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<MenuItem>,
}

impl MenuItem {
    /// Item with a name and link.
    #[must_use]
    pub fn link(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            href: Some(href.into()),
            ..Self::default()
        }
    }
}

impl SiteModel {
    /// Parse a descriptor from YAML text.
    ///
    /// `path` is used for error messages and to resolve the skin template.
    pub fn from_yaml(text: &str, path: &Path) -> Result<Self, ModelError> {
        let mut model: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text).map_err(|source| ModelError::Descriptor {
                path: path.to_path_buf(),
                source,
            })?
        };
        if let Some(template) = model.skin.as_mut().and_then(|s| s.template.as_mut()) {
            let base = path.parent().unwrap_or(Path::new("."));
            *template = base.join(&*template).to_string_lossy().into_owned();
        }
        Ok(model)
    }

    /// Load a descriptor file.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text, path)
    }

    /// Model used when a project has no descriptor of its own.
    #[must_use]
    pub fn fallback() -> Self {
        let menu = |reference| Menu {
            reference: Some(reference),
            ..Menu::default()
        };
        Self {
            menus: vec![
                menu(MenuRef::Parent),
                menu(MenuRef::Modules),
                menu(MenuRef::Reports),
            ],
            ..Self::default()
        }
    }

    /// Call `f` on every link target in the model.
    pub fn for_each_href_mut(&mut self, mut f: impl FnMut(&mut String)) {
        for banner in [&mut self.banner_left, &mut self.banner_right]
            .into_iter()
            .flatten()
        {
            if let Some(href) = banner.href.as_mut() {
                f(href);
            }
            if let Some(src) = banner.src.as_mut() {
                f(src);
            }
        }
        for link in self.breadcrumbs.iter_mut().chain(self.links.iter_mut()) {
            f(&mut link.href);
        }
        for menu in &mut self.menus {
            visit_items(&mut menu.items, &mut f);
        }
    }
}

fn visit_items(items: &mut [MenuItem], f: &mut impl FnMut(&mut String)) {
    for item in items {
        if let Some(href) = item.href.as_mut() {
            f(href);
        }
        visit_items(&mut item.items, f);
    }
}

/// Find the descriptor for `locale` in `site_dir`.
///
/// `site_<locale>.yaml` takes precedence over `site.yaml` for non-default
/// locales.
pub(crate) fn find_descriptor(site_dir: &Path, locale: &SiteLocale) -> Option<PathBuf> {
    if locale.code() != SiteLocale::DEFAULT {
        let localized = site_dir.join(format!("{DESCRIPTOR_STEM}_{}.yaml", locale.code()));
        if localized.is_file() {
            return Some(localized);
        }
    }
    let plain = site_dir.join(format!("{DESCRIPTOR_STEM}.yaml"));
    plain.is_file().then_some(plain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_descriptor() {
        let yaml = r"
name: Widgets
skin:
  template: skin/site.html
banner_left:
  name: Widgets
  href: https://widgets.example.com/
publish_date:
  position: right
  format: '%d %B %Y'
links:
  - name: GitHub
    href: https://github.com/example/widgets
menus:
  - name: Overview
    inherit: top
    items:
      - name: Introduction
        href: index.html
        items:
          - name: Install
            href: install.html
      - ref: summary
  - ref: reports
";
        let model = SiteModel::from_yaml(yaml, Path::new("/p/src/site/site.yaml")).unwrap();
        assert_eq!(model.name.as_deref(), Some("Widgets"));
        assert_eq!(
            model.skin.unwrap().template.as_deref(),
            Some("/p/src/site/skin/site.html")
        );
        assert_eq!(model.publish_date.unwrap().position, Position::Right);
        assert_eq!(model.menus.len(), 2);
        assert_eq!(model.menus[0].inherit, Some(Inherit::Top));
        assert_eq!(model.menus[0].items[0].items[0].href.as_deref(), Some("install.html"));
        assert_eq!(model.menus[0].items[1].reference.as_deref(), Some("summary"));
        assert_eq!(model.menus[1].reference, Some(MenuRef::Reports));
    }

    #[test]
    fn test_empty_descriptor() {
        let model = SiteModel::from_yaml("  \n", Path::new("site.yaml")).unwrap();
        assert_eq!(model, SiteModel::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SiteModel::from_yaml("menuz: []\n", Path::new("/x/site.yaml")).unwrap_err();
        assert!(matches!(err, ModelError::Descriptor { .. }));
        assert!(err.to_string().contains("/x/site.yaml"));
    }

    #[test]
    fn test_for_each_href_visits_nested_items() {
        let mut model = SiteModel {
            links: vec![Link {
                name: "a".to_owned(),
                href: "a.html".to_owned(),
            }],
            menus: vec![Menu {
                items: vec![MenuItem {
                    items: vec![MenuItem::link("c", "c.html")],
                    ..MenuItem::link("b", "b.html")
                }],
                ..Menu::default()
            }],
            ..SiteModel::default()
        };
        let mut seen = Vec::new();
        model.for_each_href_mut(|href| seen.push(href.clone()));
        assert_eq!(seen, vec!["a.html", "b.html", "c.html"]);
    }

    #[test]
    fn test_find_descriptor_prefers_localized() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("site.yaml"), "").unwrap();
        std::fs::write(dir.path().join("site_fr.yaml"), "").unwrap();

        let fr = SiteLocale::parse("fr").unwrap();
        let de = SiteLocale::parse("de").unwrap();
        assert_eq!(
            find_descriptor(dir.path(), &fr),
            Some(dir.path().join("site_fr.yaml"))
        );
        assert_eq!(
            find_descriptor(dir.path(), &de),
            Some(dir.path().join("site.yaml"))
        );
    }

    #[test]
    fn test_find_descriptor_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_descriptor(dir.path(), &SiteLocale::default_locale()).is_none());
    }
}
