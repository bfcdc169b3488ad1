use crate::error::StoreError;
use crate::http::build_http_client;
use crate::supabase::api;
use crate::traits::ReviewStore;
use async_trait::async_trait;
use cinelog_config::SupabaseConfig;
use cinelog_models::{NewReview, Review};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Review store backed by a hosted Postgres table exposed through PostgREST.
#[derive(Clone)]
pub struct SupabaseReviewStore {
    client: Arc<Client>,
    base_url: String,
    table: String,
    anon_key: String,
}

impl SupabaseReviewStore {
    pub fn new(config: &SupabaseConfig, anon_key: String, timeout: Duration) -> Self {
        Self {
            client: Arc::new(build_http_client(timeout)),
            base_url: config.url.clone(),
            table: config.table.clone(),
            anon_key,
        }
    }
}

#[async_trait]
impl ReviewStore for SupabaseReviewStore {
    fn store_name(&self) -> &str {
        "supabase"
    }

    async fn insert(&self, review: NewReview) -> Result<Review, StoreError> {
        let stored = api::insert_review(
            &self.client,
            &self.base_url,
            &self.table,
            &self.anon_key,
            &review,
        )
        .await?;
        info!(review_id = %stored.id, movie_id = %stored.movie_id, "Review stored");
        Ok(stored)
    }

    async fn query_by_movie(&self, movie_id: &str) -> Result<Vec<Review>, StoreError> {
        api::select_reviews(
            &self.client,
            &self.base_url,
            &self.table,
            &self.anon_key,
            movie_id,
        )
        .await
    }
}
