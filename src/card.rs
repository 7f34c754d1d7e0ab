//! Displayed grid unit
//!
//! A card carries every field the detail modal shows, already formatted,
//! so opening a specimen never goes back to the catalog.

use crate::catalog::{CatalogSource, Specimen};

pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Position of the specimen in the loaded catalog
    pub catalog_index: usize,
    pub name: String,
    pub locality: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub dimensions: String,
    pub size: String,
    pub weight: String,
    pub price: String,
    pub system: String,
    pub self_collected: &'static str,
    pub description: String,
    /// Primary image, resolved
    pub image: String,
    /// Gallery sequence: primary image first, then the extras
    pub gallery: Vec<String>,
}

fn or_na(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

impl Card {
    pub fn new(catalog_index: usize, specimen: &Specimen, source: Option<&CatalogSource>) -> Self {
        let resolve = |reference: &str| match source {
            Some(source) => source.resolve_image(reference),
            None => reference.to_string(),
        };

        Self {
            catalog_index,
            name: specimen.name.clone(),
            locality: specimen.locality.clone(),
            category: specimen.category.clone(),
            subcategory: specimen.subcategory.clone(),
            dimensions: or_na(specimen.dimensions.as_deref().unwrap_or_default()),
            size: specimen
                .size
                .map(|s| s.label().to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            weight: or_na(&specimen.weight),
            price: or_na(&specimen.price),
            system: or_na(&specimen.crystal_system),
            self_collected: if specimen.is_self_collected() { "Yes" } else { "No" },
            description: specimen.description.clone(),
            image: resolve(&specimen.image),
            gallery: specimen.gallery_images().iter().map(|i| resolve(i)).collect(),
        }
    }
}
