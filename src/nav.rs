//! Category/subcategory navigation tree
//!
//! `All` comes first, then each category followed by its subcategories.
//! Every entry knows the [`Selection`] it activates, so a subcategory
//! click sets its parent too and never goes through the parent's entry.

use crate::filter::{Selection, ALL_CATEGORIES};
use crate::taxonomy::Taxonomy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub label: String,
    /// 0 for `All` and categories, 1 for subcategories
    pub depth: u8,
    pub selection: Selection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavTree {
    entries: Vec<NavEntry>,
}

impl NavTree {
    pub fn build(taxonomy: &Taxonomy) -> Self {
        let mut entries = vec![NavEntry {
            label: ALL_CATEGORIES.to_string(),
            depth: 0,
            selection: Selection::All,
        }];

        for category in taxonomy.categories() {
            entries.push(NavEntry {
                label: category.to_string(),
                depth: 0,
                selection: Selection::Category(category.to_string()),
            });
            for sub in taxonomy.subcategories(category) {
                entries.push(NavEntry {
                    label: sub.to_string(),
                    depth: 1,
                    selection: Selection::Subcategory {
                        category: category.to_string(),
                        subcategory: sub.to_string(),
                    },
                });
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// The one entry marked active for `selection`
    pub fn active(&self, selection: &Selection) -> Option<usize> {
        self.entries.iter().position(|e| e.selection == *selection)
    }

    /// Subcategory entries under the category entry at `index`
    pub fn children(&self, index: usize) -> &[NavEntry] {
        let rest = self.entries.get(index + 1..).unwrap_or_default();
        let len = rest.iter().take_while(|e| e.depth == 1).count();
        &rest[..len]
    }

    /// Top-level entries with their positions
    pub fn roots(&self) -> impl Iterator<Item = (usize, &NavEntry)> {
        self.entries.iter().enumerate().filter(|(_, e)| e.depth == 0)
    }
}
