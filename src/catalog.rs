//! Specimen catalog - record types + one-shot loader
//!
//! The catalog is a JSON array of specimen records read once at startup,
//! either from disk or over HTTP. Load failures are reported and leave
//! the catalog empty.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Failure to read or decode the catalog document
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch catalog: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Specimen size classes, smallest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpecimenSize {
    Micromount,
    Thumbnail,
    Miniature,
    #[serde(rename = "Small Cabinet")]
    SmallCabinet,
    Cabinet,
}

impl SpecimenSize {
    pub const ALL: [SpecimenSize; 5] = [
        SpecimenSize::Micromount,
        SpecimenSize::Thumbnail,
        SpecimenSize::Miniature,
        SpecimenSize::SmallCabinet,
        SpecimenSize::Cabinet,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SpecimenSize::Micromount => "Micromount",
            SpecimenSize::Thumbnail => "Thumbnail",
            SpecimenSize::Miniature => "Miniature",
            SpecimenSize::SmallCabinet => "Small Cabinet",
            SpecimenSize::Cabinet => "Cabinet",
        }
    }
}

impl fmt::Display for SpecimenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SpecimenSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|size| size.label() == s)
            .ok_or_else(|| format!("unknown specimen size: {:?}", s))
    }
}

/// A single specimen record as supplied by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specimen {
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub locality: String,
    pub category: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub subcategory: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub dimensions: Option<String>,
    #[serde(default, deserialize_with = "optional_size")]
    pub size: Option<SpecimenSize>,
    /// Display text, e.g. `"45 g"` or `"45"`
    #[serde(default, deserialize_with = "text")]
    pub weight: String,
    /// Display text, e.g. `"$12.50"`
    #[serde(default, deserialize_with = "text")]
    pub price: String,
    #[serde(default, rename = "system", deserialize_with = "text")]
    pub crystal_system: String,
    #[serde(default, deserialize_with = "text")]
    pub self_collected: String,
    pub image: String,
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
}

impl Specimen {
    /// `selfCollected` is free text; only "yes" (any case) counts
    pub fn is_self_collected(&self) -> bool {
        self.self_collected.trim().eq_ignore_ascii_case("yes")
    }

    /// Primary image followed by the additional images, blanks dropped
    pub fn gallery_images(&self) -> Vec<String> {
        std::iter::once(self.image.trim())
            .chain(self.images.iter().map(|s| s.trim()))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Accepts a string, a number or null; numbers keep their JSON spelling
fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<TextOrNumber>::deserialize(deserializer)? {
        Some(TextOrNumber::Text(s)) => s,
        Some(TextOrNumber::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = text(deserializer)?;
    Ok(if value.trim().is_empty() { None } else { Some(value) })
}

fn optional_size<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<SpecimenSize>, D::Error> {
    let Some(label) = optional_text(deserializer)? else {
        return Ok(None);
    };
    match label.parse() {
        Ok(size) => Ok(Some(size)),
        Err(e) => {
            tracing::debug!("Ignoring size field: {}", e);
            Ok(None)
        }
    }
}

/// Where the catalog document lives
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSource {
    Path(PathBuf),
    Url(reqwest::Url),
}

impl CatalogSource {
    /// `http://` and `https://` locations are fetched, anything else is a path
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            if let Ok(url) = reqwest::Url::parse(location) {
                return CatalogSource::Url(url);
            }
            tracing::warn!("Invalid catalog URL {:?}, treating it as a path", location);
        }
        CatalogSource::Path(PathBuf::from(location))
    }

    /// Resolve an image reference relative to the catalog location
    pub fn resolve_image(&self, reference: &str) -> String {
        let reference = reference.trim();
        if reference.contains("://") {
            return reference.to_string();
        }

        match self {
            CatalogSource::Url(base) => base
                .join(reference)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| reference.to_string()),
            CatalogSource::Path(path) => {
                let reference = Path::new(reference);
                let full = if reference.is_absolute() {
                    reference.to_path_buf()
                } else {
                    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
                    let dir = match dir {
                        Some(d) => d.to_path_buf(),
                        None => std::env::current_dir().unwrap_or_default(),
                    };
                    dir.join(reference)
                };
                format!("file://{}", full.display())
            }
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Path(p) => write!(f, "{}", p.display()),
            CatalogSource::Url(u) => write!(f, "{}", u),
        }
    }
}

/// Decode a catalog document, keeping the supplied order
pub fn parse_catalog(json: &str) -> Result<Vec<Specimen>, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

/// Read the catalog once from its source
pub async fn load_catalog(source: &CatalogSource) -> Result<Vec<Specimen>, CatalogError> {
    tracing::info!("Loading catalog from {}", source);

    let body = match source {
        CatalogSource::Path(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CatalogError::Io { path: path.clone(), source: e })?,
        CatalogSource::Url(url) => {
            let response = reqwest::get(url.clone()).await?.error_for_status()?;
            response.text().await?
        }
    };
    tracing::debug!("Read {} bytes of catalog JSON", body.len());

    let specimens = parse_catalog(&body)?;
    tracing::info!("Catalog loaded: {} specimens", specimens.len());
    Ok(specimens)
}

/// Load the catalog, logging any failure and falling back to an empty one
pub async fn load_or_empty(source: &CatalogSource) -> Vec<Specimen> {
    match load_catalog(source).await {
        Ok(specimens) => specimens,
        Err(e) => {
            crate::log_failure!("Catalog load", e, source = %source);
            Vec::new()
        }
    }
}
