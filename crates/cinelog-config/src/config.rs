use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub reviews: ReviewOptions,
}

/// Movie catalog (TMDB v3) endpoints
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// JSON file in the data directory
    #[default]
    Local,
    /// Hosted table reached through its REST interface
    Supabase,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default)]
    pub supabase: Option<SupabaseConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    #[serde(default = "default_reviews_table")]
    pub table: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ReviewOptions {
    /// Reject a second review from the same identity for the same movie.
    /// Off by default: duplicates are only discouraged by hiding the review form.
    #[serde(default)]
    pub enforce_unique_per_identity: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be an http(s) URL, got '{value}'")]
    InvalidUrl { field: &'static str, value: String },
    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,
    #[error("store backend is 'supabase' but [store.supabase] is not configured")]
    MissingSupabase,
    #[error("supabase table name cannot be empty")]
    EmptyTable,
}

fn default_catalog_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_reviews_table() -> String {
    "reviews".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_base_url(),
            image_base_url: default_image_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl SupabaseConfig {
    pub fn new(url: String) -> Self {
        Self {
            url,
            table: default_reviews_table(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("catalog.base_url", &self.catalog.base_url)?;
        check_url("catalog.image_base_url", &self.catalog.image_base_url)?;
        if self.catalog.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        if self.store.backend == StoreBackend::Supabase {
            let supabase = self.store.supabase.as_ref().ok_or(ConfigError::MissingSupabase)?;
            check_url("store.supabase.url", &supabase.url)?;
            if supabase.table.trim().is_empty() {
                return Err(ConfigError::EmptyTable);
            }
        }

        Ok(())
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
        })
    }
}
