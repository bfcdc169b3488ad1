use crate::error::CatalogError;
use crate::http::build_http_client;
use crate::tmdb::api;
use crate::traits::CatalogService;
use async_trait::async_trait;
use cinelog_config::CatalogConfig;
use cinelog_models::{Movie, MovieDetails, PosterSize};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    api_key: Option<String>,
    base_url: String,
    image_base_url: String,
}

impl TmdbClient {
    pub fn new(config: &CatalogConfig, api_key: Option<String>) -> Self {
        Self {
            client: Arc::new(build_http_client(Duration::from_secs(config.request_timeout_secs))),
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: config.base_url.clone(),
            image_base_url: config.image_base_url.clone(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, CatalogError> {
        self.api_key.as_deref().ok_or(CatalogError::MissingApiKey)
    }
}

#[async_trait]
impl CatalogService for TmdbClient {
    fn service_name(&self) -> &str {
        "tmdb"
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<Movie>, CatalogError> {
        let movies =
            api::search_movies(&self.client, &self.base_url, self.api_key()?, query).await?;
        info!(query = %query, results = movies.len(), "Catalog search completed");
        Ok(movies)
    }

    async fn get_by_id(&self, id: u64) -> Result<MovieDetails, CatalogError> {
        api::get_movie_details(&self.client, &self.base_url, self.api_key()?, id).await
    }

    fn poster_url(&self, path: Option<&str>, size: PosterSize) -> String {
        api::poster_url(&self.image_base_url, path, size)
    }
}
