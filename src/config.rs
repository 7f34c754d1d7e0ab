//! Configuration loader - YAML settings + .env overrides

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::CatalogSource;
use crate::pager::DEFAULT_PAGE_SIZE;

/// Main configuration loaded from museum.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path or http(s) URL of the specimen JSON
    pub catalog: String,
    pub page_size: usize,
    pub log_dir: String,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: "minerals.json".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            log_dir: "logs".to_string(),
            window: WindowConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Mineral Museum".to_string(),
            width: 1280.0,
            height: 860.0,
        }
    }
}

/// Overrides loaded from .env / the process environment
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub catalog: Option<String>,
    pub page_size: Option<usize>,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config.normalized())
    }

    pub fn apply(&mut self, overrides: &EnvOverrides) {
        if let Some(catalog) = &overrides.catalog {
            self.catalog = catalog.clone();
        }
        if let Some(page_size) = overrides.page_size {
            self.page_size = page_size;
        }
        if let Some(log_dir) = &overrides.log_dir {
            self.log_dir = log_dir.clone();
        }
        *self = self.clone().normalized();
    }

    pub fn catalog_source(&self) -> CatalogSource {
        CatalogSource::parse(&self.catalog)
    }

    fn normalized(mut self) -> Self {
        self.page_size = self.page_size.max(1);
        self
    }
}

impl EnvOverrides {
    /// Load overrides from .env file
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        EnvOverrides {
            catalog: std::env::var("MUSEUM_CATALOG").ok(),
            page_size: std::env::var("MUSEUM_PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok()),
            log_dir: std::env::var("MUSEUM_LOG_DIR").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("page_size: 12\nwindow:\n  width: 800\n").unwrap();
        assert_eq!(config.page_size, 12);
        assert_eq!(config.catalog, "minerals.json");
        assert_eq!(config.window.width, 800.0);
        assert_eq!(config.window.title, "Mineral Museum");
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("museum.yaml");
        std::fs::write(&path, "catalog: https://example.org/minerals.json\npage_size: 0\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.page_size, 1);
        assert!(matches!(config.catalog_source(), CatalogSource::Url(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply(&EnvOverrides {
            catalog: Some("data/minerals.json".into()),
            page_size: Some(48),
            log_dir: None,
        });
        assert_eq!(config.catalog, "data/minerals.json");
        assert_eq!(config.page_size, 48);
        assert_eq!(config.log_dir, "logs");
    }
}
