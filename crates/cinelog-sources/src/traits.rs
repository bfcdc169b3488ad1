use async_trait::async_trait;
use cinelog_models::{Movie, MovieDetails, NewReview, PosterSize, Review};
use crate::error::{CatalogError, StoreError};

/// Movie metadata lookup (search and details).
#[async_trait]
pub trait CatalogService: Send + Sync {
    fn service_name(&self) -> &str;

    /// Search by title. Results keep the service's own relevance order.
    async fn search_by_title(&self, query: &str) -> Result<Vec<Movie>, CatalogError>;

    /// Full details for one movie. Unknown ids fail with `CatalogError::NotFound`.
    async fn get_by_id(&self, id: u64) -> Result<MovieDetails, CatalogError>;

    /// Image URL for a poster path, or a placeholder when the path is absent.
    fn poster_url(&self, path: Option<&str>, size: PosterSize) -> String;
}

/// Durable persistence of review records.
///
/// Stores assign `id` and `created_at`. Uniqueness of (movie, visitor) is not
/// part of the contract; a store may report `StoreError::Conflict` if it
/// enforces one.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    fn store_name(&self) -> &str;

    async fn insert(&self, review: NewReview) -> Result<Review, StoreError>;

    /// Reviews for one movie, newest first. No reviews is an empty list.
    async fn query_by_movie(&self, movie_id: &str) -> Result<Vec<Review>, StoreError>;
}
