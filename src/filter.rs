//! Filter/selection state + the pure evaluator over the catalog
//!
//! A specimen is shown only when every active constraint passes:
//! - taxonomy selection (All / category / category + subcategory)
//! - free-text query against the name (case-insensitive substring)
//! - field filters: locality, size, weight range, price range, crystal system

use regex::Regex;
use std::sync::LazyLock;

use crate::catalog::{Specimen, SpecimenSize};

/// Label of the pseudo-category that matches everything
pub const ALL_CATEGORIES: &str = "All";

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").expect("valid number pattern")
});

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥'];

/// Parse the leading decimal number of `text`, ignoring whatever follows it
pub fn parse_number(text: &str) -> Option<f64> {
    let m = LEADING_NUMBER.find(text.trim_start())?;
    m.as_str().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Like [`parse_number`] after dropping a leading currency symbol and thousands separators
pub fn parse_price(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let text = text.strip_prefix(CURRENCY_SYMBOLS).unwrap_or(text);
    parse_number(&text.replace(',', ""))
}

fn specimen_weight(specimen: &Specimen) -> f64 {
    parse_number(&specimen.weight).unwrap_or(0.0)
}

fn specimen_price(specimen: &Specimen) -> f64 {
    parse_price(&specimen.price).unwrap_or(0.0)
}

/// Active taxonomy selection; a subcategory always carries its parent
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    All,
    Category(String),
    Subcategory { category: String, subcategory: String },
}

impl Selection {
    pub fn category(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Category(category) | Selection::Subcategory { category, .. } => Some(category),
        }
    }

    pub fn subcategory(&self) -> Option<&str> {
        match self {
            Selection::Subcategory { subcategory, .. } => Some(subcategory),
            _ => None,
        }
    }

    pub fn matches(&self, specimen: &Specimen) -> bool {
        match self {
            Selection::All => true,
            Selection::Category(category) => specimen.category == *category,
            Selection::Subcategory { category, subcategory } => {
                specimen.category == *category
                    && specimen.subcategory.as_deref() == Some(subcategory.as_str())
            }
        }
    }
}

/// Raw text of the field-filter controls, as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterInputs {
    pub locality: String,
    pub size: Option<SpecimenSize>,
    pub weight_min: String,
    pub weight_max: String,
    pub price_min: String,
    pub price_max: String,
    pub system: String,
}

/// Parsed field filters; `None` means no constraint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldFilters {
    pub locality: Option<String>,
    pub size: Option<SpecimenSize>,
    pub weight_min: Option<f64>,
    pub weight_max: Option<f64>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub system: Option<String>,
}

fn non_blank(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_lowercase())
}

fn in_range(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}

impl FieldFilters {
    /// Unparsable numeric inputs become unset
    pub fn from_inputs(inputs: &FilterInputs) -> Self {
        Self {
            locality: non_blank(&inputs.locality),
            size: inputs.size,
            weight_min: parse_number(&inputs.weight_min),
            weight_max: parse_number(&inputs.weight_max),
            price_min: parse_price(&inputs.price_min),
            price_max: parse_price(&inputs.price_max),
            system: non_blank(&inputs.system),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, specimen: &Specimen) -> bool {
        if let Some(locality) = &self.locality {
            if !specimen.locality.to_lowercase().contains(locality.as_str()) {
                return false;
            }
        }
        if let Some(size) = self.size {
            if specimen.size != Some(size) {
                return false;
            }
        }
        if (self.weight_min.is_some() || self.weight_max.is_some())
            && !in_range(specimen_weight(specimen), self.weight_min, self.weight_max)
        {
            return false;
        }
        if (self.price_min.is_some() || self.price_max.is_some())
            && !in_range(specimen_price(specimen), self.price_min, self.price_max)
        {
            return false;
        }
        if let Some(system) = &self.system {
            if specimen.crystal_system.trim().to_lowercase() != *system {
                return false;
            }
        }
        true
    }
}

/// Everything that narrows the displayed set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub selection: Selection,
    pub query: String,
    pub fields: FieldFilters,
}

impl FilterState {
    pub fn matches(&self, specimen: &Specimen) -> bool {
        self.selection.matches(specimen)
            && specimen.name.to_lowercase().contains(&self.query.to_lowercase())
            && self.fields.matches(specimen)
    }

    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

/// Specimens passing `state`, in catalog order
pub fn evaluate<'a>(specimens: &'a [Specimen], state: &FilterState) -> Vec<&'a Specimen> {
    specimens.iter().filter(|s| state.matches(s)).collect()
}

/// Catalog positions of the specimens passing `state`
pub fn matching_indices(specimens: &[Specimen], state: &FilterState) -> Vec<usize> {
    specimens
        .iter()
        .enumerate()
        .filter(|(_, s)| state.matches(s))
        .map(|(i, _)| i)
        .collect()
}
