use cinelog_models::Movie;
use cinelog_sources::{CatalogError, CatalogService};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Please enter a movie title")]
    EmptyQuery,

    #[error("Failed to search movies. Please try again.")]
    SearchFailed(#[from] CatalogError),
}

/// Search the catalog by title.
///
/// An empty result list is not an error.
pub async fn search_movies(
    catalog: &dyn CatalogService,
    query: &str,
) -> Result<Vec<Movie>, SearchError> {
    if query.trim().is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    debug!(service = catalog.service_name(), query = %query, "Searching catalog");
    catalog.search_by_title(query).await.map_err(|e| {
        error!("Error searching movies: {}", e);
        SearchError::SearchFailed(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{details, FakeCatalog};

    fn catalog() -> FakeCatalog {
        FakeCatalog::new(vec![
            details(603, "The Matrix", Some("1999-03-30"), Some("/matrix.jpg")),
            details(604, "The Matrix Reloaded", Some("2003-05-15"), None),
            details(10, "Heat", Some("1995-12-15"), None),
        ])
    }

    #[tokio::test]
    async fn test_empty_query_skips_catalog() {
        let catalog = catalog();
        for query in ["", "   ", "\t\n"] {
            let err = search_movies(&catalog, query).await.unwrap_err();
            assert!(matches!(err, SearchError::EmptyQuery));
            assert_eq!(err.to_string(), "Please enter a movie title");
        }
        assert_eq!(catalog.search_count(), 0);
    }

    #[tokio::test]
    async fn test_results_keep_catalog_order() {
        let movies = search_movies(&catalog(), "matrix").await.unwrap();
        let ids: Vec<u64> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![603, 604]);
        assert_eq!(movies[0].year(), "1999");
    }

    #[tokio::test]
    async fn test_no_results_is_ok() {
        assert!(search_movies(&catalog(), "zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_failure() {
        let catalog = catalog();
        catalog.set_failing(true);
        let err = search_movies(&catalog, "heat").await.unwrap_err();
        assert!(matches!(err, SearchError::SearchFailed(CatalogError::Api { status: 503, .. })));
    }
}
