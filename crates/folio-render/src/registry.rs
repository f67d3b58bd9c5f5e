//! Output-name keyed document registry.

use std::collections::{HashMap, HashSet};

use crate::document::DocumentUnit;

/// Output names already taken in a locale pass.
///
/// Auxiliary report pages never go through the registry, so they are
/// checked against it before being written.
pub trait ClaimedOutputs {
    fn is_claimed(&self, output_name: &str) -> bool;
}

impl ClaimedOutputs for HashSet<String> {
    fn is_claimed(&self, output_name: &str) -> bool {
        self.contains(output_name)
    }
}

/// Collects document units for one locale pass.
///
/// Output names are unique. The first unit registered under a name is kept
/// and later ones are dropped with a log line.
#[derive(Debug, Default)]
pub struct DocumentRegistry {
    units: Vec<DocumentUnit>,
    names: HashSet<String>,
}

impl DocumentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `unit`, returning false if its output name is already taken.
    pub fn register(&mut self, unit: DocumentUnit) -> bool {
        if self.names.contains(&unit.output_name) {
            let existing = self
                .units
                .iter()
                .find(|u| u.output_name == unit.output_name)
                .map(DocumentUnit::describe)
                .unwrap_or_default();
            tracing::info!(
                "Skipping {}: output {} is already provided by {existing}",
                unit.describe(),
                unit.output_name
            );
            return false;
        }
        self.names.insert(unit.output_name.clone());
        self.units.push(unit);
        true
    }

    #[must_use]
    pub fn contains(&self, output_name: &str) -> bool {
        self.names.contains(output_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Units registered after the first `mark` ones.
    #[must_use]
    pub fn since(&self, mark: usize) -> &[DocumentUnit] {
        self.units.get(mark..).unwrap_or_default()
    }

    /// Freeze the registry into a lookup map that keeps registration order.
    #[must_use]
    pub fn finalize(self) -> DocumentMap {
        let index = self
            .units
            .iter()
            .enumerate()
            .map(|(i, unit)| (unit.output_name.clone(), i))
            .collect();
        DocumentMap {
            units: self.units,
            index,
        }
    }
}

impl ClaimedOutputs for DocumentRegistry {
    fn is_claimed(&self, output_name: &str) -> bool {
        self.contains(output_name)
    }
}

/// Finalized document units of one locale, in registration order.
#[derive(Debug, Default, Clone)]
pub struct DocumentMap {
    units: Vec<DocumentUnit>,
    index: HashMap<String, usize>,
}

impl DocumentMap {
    #[must_use]
    pub fn get(&self, output_name: &str) -> Option<&DocumentUnit> {
        self.index.get(output_name).map(|&i| &self.units[i])
    }

    #[must_use]
    pub fn contains(&self, output_name: &str) -> bool {
        self.index.contains_key(output_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentUnit> {
        self.units.iter()
    }

    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|u| u.output_name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl ClaimedOutputs for DocumentMap {
    fn is_claimed(&self, output_name: &str) -> bool {
        self.contains(output_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentSource, SourceKind};
    use folio_report::Sink;
    use pretty_assertions::assert_eq;

    fn unit(name: &str, generator: &str, kind: SourceKind) -> DocumentUnit {
        DocumentUnit {
            output_name: name.to_owned(),
            source_kind: kind,
            localized_source_dir: None,
            editable: kind == SourceKind::Handwritten,
            generator: generator.to_owned(),
            source: DocumentSource::Synthetic(Sink::new()),
        }
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = DocumentRegistry::new();
        assert!(registry.register(unit("index.html", "markdown", SourceKind::Handwritten)));
        assert!(!registry.register(unit("index.html", "xhtml", SourceKind::Generated)));
        assert!(!registry.register(unit("index.html", "report", SourceKind::Report)));

        let map = registry.finalize();
        assert_eq!(map.len(), 1);
        let kept = map.get("index.html").unwrap();
        assert_eq!(kept.generator, "markdown");
        assert_eq!(kept.source_kind, SourceKind::Handwritten);
    }

    #[test]
    fn test_finalize_preserves_order() {
        let mut registry = DocumentRegistry::new();
        for name in ["b.html", "a.html", "c.html"] {
            registry.register(unit(name, "markdown", SourceKind::Handwritten));
        }
        let map = registry.finalize();
        let names: Vec<&str> = map.output_names().collect();
        assert_eq!(names, vec!["b.html", "a.html", "c.html"]);
    }

    #[test]
    fn test_since_returns_new_units() {
        let mut registry = DocumentRegistry::new();
        registry.register(unit("a.html", "markdown", SourceKind::Handwritten));
        let mark = registry.len();
        registry.register(unit("a.html", "folio", SourceKind::Sitemap));
        registry.register(unit("b.html", "folio", SourceKind::Sitemap));

        let new: Vec<&str> = registry
            .since(mark)
            .iter()
            .map(|u| u.output_name.as_str())
            .collect();
        assert_eq!(new, vec!["b.html"]);
        assert!(registry.since(10).is_empty());
    }

    #[test]
    fn test_claimed_outputs() {
        let mut registry = DocumentRegistry::new();
        registry.register(unit("a.html", "markdown", SourceKind::Handwritten));
        assert!(registry.is_claimed("a.html"));
        assert!(!registry.is_claimed("b.html"));

        let map = registry.finalize();
        assert!(map.is_claimed("a.html"));
        assert!(!map.is_claimed("b.html"));
    }
}
