//! Everything the movie details view shows, loaded in one call.

use crate::aggregate::{has_reviewed, summarize};
use crate::identity::IdentityProvider;
use cinelog_models::{AggregateRating, MovieDetails, MovieSnapshot, PosterSize, Review};
use cinelog_sources::{CatalogError, CatalogService, ReviewStore, StoreError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Movie not found")]
    NotFound(u64),

    #[error("Failed to load movie: {0}")]
    Catalog(#[source] CatalogError),

    #[error("Failed to load reviews: {0}")]
    Reviews(#[from] StoreError),
}

impl From<CatalogError> for PageError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => PageError::NotFound(id),
            other => PageError::Catalog(other),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MoviePage {
    pub details: MovieDetails,
    pub poster_url: String,
    pub reviews: Vec<Review>, // Newest first
    pub aggregate: AggregateRating,
    pub user_has_reviewed: bool,
    /// Catalog data copied into a new review
    pub snapshot: MovieSnapshot,
}

impl MoviePage {
    pub fn movie_id(&self) -> String {
        self.details.movie.id.to_string()
    }
}

/// Load a movie's details, its reviews and whether this visitor reviewed it.
///
/// Nothing is cached; call again to refresh after a submission. The visitor
/// identity is read, never created.
pub async fn load_movie_page(
    catalog: &dyn CatalogService,
    store: &dyn ReviewStore,
    identity: &dyn IdentityProvider,
    movie_id: u64,
) -> Result<MoviePage, PageError> {
    let details = catalog.get_by_id(movie_id).await?;

    let reviews = store.query_by_movie(&movie_id.to_string()).await.map_err(|e| {
        error!(movie_id, "Error fetching reviews: {}", e);
        e
    })?;

    let aggregate = summarize(&reviews);
    let user_has_reviewed = has_reviewed(&reviews, identity.current().as_ref());
    let poster_url = catalog.poster_url(details.movie.poster_path.as_deref(), PosterSize::W500);

    debug!(
        movie_id,
        reviews = aggregate.count,
        user_has_reviewed,
        "Loaded movie page"
    );

    let snapshot = MovieSnapshot {
        movie_id: movie_id.to_string(),
        title: details.movie.title.clone(),
        year: details.movie.year(),
        poster_url: poster_url.clone(),
    };

    Ok(MoviePage {
        details,
        poster_url,
        reviews,
        aggregate,
        user_has_reviewed,
        snapshot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{
        IdentityStorage, MemoryIdentityStorage, StoredIdentityProvider, IDENTITY_KEY,
    };
    use crate::testing::{details, review, FakeCatalog};
    use cinelog_sources::tmdb::api::PLACEHOLDER_POSTER_URL;
    use cinelog_sources::InMemoryReviewStore;

    fn catalog() -> FakeCatalog {
        FakeCatalog::new(vec![
            details(42, "Answer", Some("2001-09-11"), Some("/answer.jpg")),
            details(7, "Unknown Date", None, None),
        ])
    }

    fn provider_with(identifier: Option<&str>) -> StoredIdentityProvider<MemoryIdentityStorage> {
        let storage = MemoryIdentityStorage::new();
        if let Some(identifier) = identifier {
            storage.write(IDENTITY_KEY, identifier).unwrap();
        }
        StoredIdentityProvider::new(storage)
    }

    async fn seeded_store() -> InMemoryReviewStore {
        let store = InMemoryReviewStore::new();
        for r in [
            review("42", "u1", 5),
            review("42", "u2", 4),
            review("42", "u3", 2),
            review("7", "u1", 1),
        ] {
            let new_review = cinelog_models::NewReview {
                movie_id: r.movie_id,
                movie_title: r.movie_title,
                movie_year: r.movie_year,
                movie_poster: r.movie_poster,
                rating: r.rating,
                review_text: r.review_text,
                user_identifier: r.user_identifier,
                user_name: r.user_name,
            };
            store.insert(new_review).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_load_page_with_reviews() {
        let store = seeded_store().await;
        let identity = provider_with(Some("u2"));

        let page = load_movie_page(&catalog(), &store, &identity, 42).await.unwrap();

        assert_eq!(page.details.movie.title, "Answer");
        assert_eq!(page.reviews.len(), 3);
        assert!(page.reviews.iter().all(|r| r.movie_id == "42"));
        assert_eq!(page.aggregate.count, 3);
        assert_eq!(page.aggregate.display_mean(), "3.7");
        assert!(page.user_has_reviewed);
        assert_eq!(page.poster_url, "https://image.tmdb.org/t/p/w500/answer.jpg");
        assert_eq!(
            page.snapshot,
            MovieSnapshot {
                movie_id: "42".to_string(),
                title: "Answer".to_string(),
                year: "2001".to_string(),
                poster_url: "https://image.tmdb.org/t/p/w500/answer.jpg".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_page_without_identity_does_not_create_one() {
        let store = seeded_store().await;
        let identity = provider_with(None);

        let page = load_movie_page(&catalog(), &store, &identity, 42).await.unwrap();
        assert!(!page.user_has_reviewed);
        assert_eq!(identity.storage().write_count(), 0);
    }

    #[tokio::test]
    async fn test_movie_without_reviews_or_date() {
        let store = InMemoryReviewStore::new();
        let page = load_movie_page(&catalog(), &store, &provider_with(Some("u1")), 7)
            .await
            .unwrap();

        assert!(page.reviews.is_empty());
        assert_eq!(page.aggregate.display_mean(), "N/A");
        assert_eq!(page.aggregate.count_label(), "0 reviews");
        assert!(!page.user_has_reviewed);
        assert_eq!(page.snapshot.year, "N/A");
        assert_eq!(page.snapshot.poster_url, PLACEHOLDER_POSTER_URL);
    }

    #[tokio::test]
    async fn test_unknown_movie_is_not_found() {
        let store = InMemoryReviewStore::new();
        let err = load_movie_page(&catalog(), &store, &provider_with(None), 999)
            .await
            .unwrap_err();
        assert!(matches!(err, PageError::NotFound(999)));
        assert_eq!(err.to_string(), "Movie not found");
    }

    #[tokio::test]
    async fn test_store_read_failure_propagates() {
        let store = InMemoryReviewStore::new();
        store.set_failing(true);
        let err = load_movie_page(&catalog(), &store, &provider_with(None), 42)
            .await
            .unwrap_err();
        assert!(matches!(err, PageError::Reviews(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_catalog_failure() {
        let catalog = catalog();
        catalog.set_failing(true);
        let err = load_movie_page(&catalog, &InMemoryReviewStore::new(), &provider_with(None), 42)
            .await
            .unwrap_err();
        assert!(matches!(err, PageError::Catalog(_)));
    }
}
