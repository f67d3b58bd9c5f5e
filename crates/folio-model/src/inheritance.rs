//! Site model inheritance between parent and child projects.
//!
//! # Inheritance Rules
//!
//! - `name`: child's value, otherwise the parent's
//! - `skin`, banners, `publish_date`, `version`: inherited when the child has none
//! - `breadcrumbs`, `links`: parent entries first, duplicates dropped
//! - `menus`: parent menus marked `inherit: top` come first and those marked
//!   `inherit: bottom` last; a child menu with the same name replaces the
//!   inherited one
//! - `custom`: deep merged (child values override parent keys)
//!
//! Relative links taken from the parent are rebased onto the child's URL when
//! both URLs are known.

use url::Url;

use crate::descriptor::{Inherit, Link, Menu, SiteModel};
use crate::links::rebase_link;

/// URLs used to rebase inherited links.
pub(crate) struct Rebase<'a> {
    pub parent: &'a Url,
    pub child: &'a Url,
}

/// Overlay `child` onto an already-assembled `parent` model.
#[must_use]
pub(crate) fn merge_site_models(
    parent: &SiteModel,
    child: SiteModel,
    rebase: Option<&Rebase<'_>>,
) -> SiteModel {
    let mut inherited = parent.clone();
    if let Some(rebase) = rebase {
        inherited.for_each_href_mut(|href| *href = rebase_link(href, rebase.parent, rebase.child));
    }

    let menus = merge_menus(&inherited.menus, child.menus);

    SiteModel {
        name: child.name.or(inherited.name),
        skin: child.skin.or(inherited.skin),
        banner_left: child.banner_left.or(inherited.banner_left),
        banner_right: child.banner_right.or(inherited.banner_right),
        publish_date: child.publish_date.or(inherited.publish_date),
        version: child.version.or(inherited.version),
        breadcrumbs: merge_links(inherited.breadcrumbs, child.breadcrumbs),
        links: merge_links(inherited.links, child.links),
        menus,
        custom: merge_custom(inherited.custom, child.custom),
    }
}

fn merge_links(parent: Vec<Link>, child: Vec<Link>) -> Vec<Link> {
    let mut merged = parent;
    for link in child {
        if !merged.contains(&link) {
            merged.push(link);
        }
    }
    merged
}

fn merge_menus(parent: &[Menu], child: Vec<Menu>) -> Vec<Menu> {
    let overridden = |menu: &Menu| {
        menu.name.is_some() && child.iter().any(|c| c.name == menu.name)
    };
    let inherited = |position: Inherit| {
        parent
            .iter()
            .filter(move |m| m.inherit == Some(position))
            .filter(|m| !overridden(*m))
            .cloned()
            .collect::<Vec<_>>()
    };

    let top = inherited(Inherit::Top);
    let bottom = inherited(Inherit::Bottom);

    let mut menus = Vec::with_capacity(top.len() + child.len() + bottom.len());
    menus.extend(top);
    menus.extend(child);
    menus.extend(bottom);
    menus
}

fn merge_custom(parent: serde_yaml::Value, child: serde_yaml::Value) -> serde_yaml::Value {
    use serde_yaml::Value;

    match (parent, child) {
        (Value::Mapping(mut parent), Value::Mapping(child)) => {
            for (key, value) in child {
                let merged = match parent.remove(&key) {
                    Some(existing) => merge_custom(existing, value),
                    None => value,
                };
                parent.insert(key, merged);
            }
            Value::Mapping(parent)
        }
        (parent, Value::Null) => parent,
        (_, child) => child,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Banner, MenuItem, Skin};
    use crate::links::directory_url;
    use pretty_assertions::assert_eq;

    fn menu(name: &str, inherit: Option<Inherit>, href: &str) -> Menu {
        Menu {
            name: Some(name.to_owned()),
            inherit,
            items: vec![MenuItem::link(name, href)],
            ..Menu::default()
        }
    }

    fn menu_names(model: &SiteModel) -> Vec<&str> {
        model.menus.iter().filter_map(|m| m.name.as_deref()).collect()
    }

    #[test]
    fn test_menus_inherited_top_and_bottom() {
        let parent = SiteModel {
            menus: vec![
                menu("Overview", Some(Inherit::Top), "index.html"),
                menu("Private", None, "private.html"),
                menu("Community", Some(Inherit::Bottom), "community.html"),
            ],
            ..SiteModel::default()
        };
        let child = SiteModel {
            menus: vec![menu("Guides", None, "guides.html")],
            ..SiteModel::default()
        };

        let merged = merge_site_models(&parent, child, None);
        assert_eq!(menu_names(&merged), vec!["Overview", "Guides", "Community"]);
    }

    #[test]
    fn test_child_menu_overrides_inherited_by_name() {
        let parent = SiteModel {
            menus: vec![menu("Overview", Some(Inherit::Top), "parent.html")],
            ..SiteModel::default()
        };
        let child = SiteModel {
            menus: vec![menu("Overview", None, "child.html")],
            ..SiteModel::default()
        };

        let merged = merge_site_models(&parent, child, None);
        assert_eq!(merged.menus.len(), 1);
        assert_eq!(
            merged.menus[0].items[0].href.as_deref(),
            Some("child.html")
        );
    }

    #[test]
    fn test_skin_and_banners_inherited_when_missing() {
        let parent = SiteModel {
            name: Some("Parent".to_owned()),
            skin: Some(Skin {
                template: Some("/p/skin.html".to_owned()),
            }),
            banner_left: Some(Banner {
                name: Some("Parent".to_owned()),
                ..Banner::default()
            }),
            ..SiteModel::default()
        };
        let child = SiteModel {
            name: Some("Child".to_owned()),
            banner_left: Some(Banner {
                name: Some("Child".to_owned()),
                ..Banner::default()
            }),
            ..SiteModel::default()
        };

        let merged = merge_site_models(&parent, child, None);
        assert_eq!(merged.name.as_deref(), Some("Child"));
        assert_eq!(
            merged.skin.and_then(|s| s.template).as_deref(),
            Some("/p/skin.html")
        );
        assert_eq!(
            merged.banner_left.and_then(|b| b.name).as_deref(),
            Some("Child")
        );
    }

    #[test]
    fn test_links_deduplicated() {
        let link = |name: &str| Link {
            name: name.to_owned(),
            href: format!("https://{name}.org/"),
        };
        let parent = SiteModel {
            links: vec![link("a"), link("b")],
            ..SiteModel::default()
        };
        let child = SiteModel {
            links: vec![link("b"), link("c")],
            ..SiteModel::default()
        };
        let merged = merge_site_models(&parent, child, None);
        assert_eq!(merged.links, vec![link("a"), link("b"), link("c")]);
    }

    #[test]
    fn test_inherited_links_rebased() {
        let parent_url = directory_url("https://e.com/site/").unwrap();
        let child_url = directory_url("https://e.com/site/child/").unwrap();
        let parent = SiteModel {
            menus: vec![menu("Overview", Some(Inherit::Top), "team.html")],
            ..SiteModel::default()
        };

        let merged = merge_site_models(
            &parent,
            SiteModel::default(),
            Some(&Rebase {
                parent: &parent_url,
                child: &child_url,
            }),
        );
        assert_eq!(
            merged.menus[0].items[0].href.as_deref(),
            Some("../team.html")
        );
    }

    #[test]
    fn test_custom_deep_merged() {
        let parent: serde_yaml::Value =
            serde_yaml::from_str("theme: {color: blue, font: serif}\nfooter: parent").unwrap();
        let child: serde_yaml::Value = serde_yaml::from_str("theme: {color: red}").unwrap();

        let merged = merge_custom(parent, child);
        let expected: serde_yaml::Value =
            serde_yaml::from_str("theme: {color: red, font: serif}\nfooter: parent").unwrap();
        assert_eq!(merged, expected);
    }
}
