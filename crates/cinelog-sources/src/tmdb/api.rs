use crate::error::CatalogError;
use crate::http::error_parts;
use cinelog_models::{Movie, MovieDetails, PosterSize};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// Shown when the catalog has no poster for a movie
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/500x750?text=No+Poster";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<Movie>>,
}

/// Search movies by title
pub async fn search_movies(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<Movie>, CatalogError> {
    let url = format!("{}/search/movie", base_url.trim_end_matches('/'));
    debug!(query = %query, "Searching catalog");

    let response = client
        .get(&url)
        .query(&[("api_key", api_key), ("query", query)])
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let (status, body) = error_parts(response).await;
        return Err(CatalogError::Api { status, body });
    }

    let body = response.text().await?;
    parse_search_results(&body)
}

/// Fetch full details for one movie
pub async fn get_movie_details(
    client: &Client,
    base_url: &str,
    api_key: &str,
    movie_id: u64,
) -> Result<MovieDetails, CatalogError> {
    let url = format!("{}/movie/{}", base_url.trim_end_matches('/'), movie_id);
    debug!(movie_id, "Fetching movie details");

    let response = client
        .get(&url)
        .query(&[("api_key", api_key)])
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let (status, body) = error_parts(response).await;
        return Err(details_status_error(status, body, movie_id));
    }

    let body = response.text().await?;
    parse_movie_details(&body)
}

/// Error for a non-success details response; 404 means the id is unknown
pub fn details_status_error(status: u16, body: String, movie_id: u64) -> CatalogError {
    if status == StatusCode::NOT_FOUND.as_u16() {
        CatalogError::NotFound(movie_id)
    } else {
        CatalogError::Api { status, body }
    }
}

/// A missing `results` array is an empty result set, not an error
pub fn parse_search_results(body: &str) -> Result<Vec<Movie>, CatalogError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.results.unwrap_or_default())
}

pub fn parse_movie_details(body: &str) -> Result<MovieDetails, CatalogError> {
    Ok(serde_json::from_str(body)?)
}

/// Build an image URL like `https://image.tmdb.org/t/p/w500/abc.jpg`
pub fn poster_url(image_base_url: &str, path: Option<&str>, size: PosterSize) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(path) => format!("{}/{}{}", image_base_url.trim_end_matches('/'), size.as_str(), path),
        None => PLACEHOLDER_POSTER_URL.to_string(),
    }
}
