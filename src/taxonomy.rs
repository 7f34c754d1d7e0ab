//! Category → subcategory index derived from the full catalog

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::Specimen;

/// Built once after load, never mutated
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Taxonomy {
    categories: BTreeMap<String, BTreeSet<String>>,
}

impl Taxonomy {
    pub fn build(specimens: &[Specimen]) -> Self {
        let mut categories: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for specimen in specimens {
            let subcategories = categories.entry(specimen.category.clone()).or_default();
            if let Some(sub) = &specimen.subcategory {
                subcategories.insert(sub.clone());
            }
        }
        tracing::debug!("Taxonomy built: {} categories", categories.len());
        Self { categories }
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn subcategories(&self, category: &str) -> impl Iterator<Item = &str> {
        self.categories
            .get(category)
            .into_iter()
            .flat_map(|subs| subs.iter().map(String::as_str))
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    /// True when `subcategory` occurs under `category` somewhere in the catalog
    pub fn contains(&self, category: &str, subcategory: &str) -> bool {
        self.categories
            .get(category)
            .is_some_and(|subs| subs.contains(subcategory))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
