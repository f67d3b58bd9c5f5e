//! Site model assembly across the project hierarchy.

use std::sync::Arc;

use crate::descriptor::{SiteModel, find_descriptor};
use crate::inheritance::{Rebase, merge_site_models};
use crate::links::{directory_url, locale_url, relativize_link};
use crate::{LocaleSet, ModelError, Project, SiteLocale};

/// Builds the effective [`SiteModel`] of a project for one locale.
#[derive(Debug, Default, Clone, Copy)]
pub struct SiteModelAssembler;

impl SiteModelAssembler {
    /// Merge the descriptors of `project` and its ancestors, then relativize links.
    ///
    /// The topmost ancestor's model is computed first and each descendant is
    /// overlaid on it in turn. Projects without a descriptor contribute
    /// [`SiteModel::fallback`].
    pub fn assemble(
        &self,
        project: &Arc<Project>,
        locales: &LocaleSet,
        locale: &SiteLocale,
    ) -> Result<SiteModel, ModelError> {
        let mut model: Option<SiteModel> = None;
        let mut previous_url: Option<url::Url> = None;

        for ancestor in project.ancestor_chain() {
            let own = match find_descriptor(&ancestor.site.site_dir, locale) {
                Some(path) => {
                    tracing::debug!(project = %ancestor.name, descriptor = %path.display(), "Loading site descriptor");
                    SiteModel::load(&path)?
                }
                None => SiteModel::fallback(),
            };
            let current_url = ancestor.url.as_deref().map(directory_url).transpose()?;

            model = Some(match model {
                None => own,
                Some(parent_model) => {
                    let rebase = previous_url
                        .as_ref()
                        .zip(current_url.as_ref())
                        .map(|(parent, child)| Rebase { parent, child });
                    merge_site_models(&parent_model, own, rebase.as_ref())
                }
            });
            previous_url = current_url;
        }

        let mut model = model.unwrap_or_else(SiteModel::fallback);
        if model.name.is_none() {
            model.name = Some(project.name.clone());
        }

        if project.site.relativize_links {
            Self::relativize(&mut model, project, locales, locale)?;
        }

        Ok(model)
    }

    fn relativize(
        model: &mut SiteModel,
        project: &Project,
        locales: &LocaleSet,
        locale: &SiteLocale,
    ) -> Result<(), ModelError> {
        let Some(url) = project.url.as_deref() else {
            tracing::warn!("No project URL defined - site links will not be relativized!");
            return Ok(());
        };

        let localized = match locales.path_prefix(locale) {
            Some(prefix) => locale_url(url, prefix),
            None => url.to_owned(),
        };
        tracing::info!("Relativizing site links with respect to localized project URL: {localized}");

        let base = directory_url(&localized)?;
        model.for_each_href_mut(|href| *href = relativize_link(href, &base));
        Ok(())
    }
}
