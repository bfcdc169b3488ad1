//! Fixtures and fakes shared by unit tests.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use cinelog_models::{
    Genre, Movie, MovieDetails, MovieSnapshot, PosterSize, Review, ReviewCandidate,
};
use cinelog_sources::tmdb::api::poster_url;
use cinelog_sources::{CatalogError, CatalogService};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub fn review(movie_id: &str, identifier: &str, rating: u8) -> Review {
    Review {
        id: format!("{}-{}", movie_id, identifier),
        movie_id: movie_id.to_string(),
        movie_title: "Answer".to_string(),
        movie_year: "2001".to_string(),
        movie_poster: String::new(),
        rating,
        review_text: "Watched it".to_string(),
        user_name: "Viewer".to_string(),
        user_identifier: identifier.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
    }
}

pub fn snapshot(movie_id: &str) -> MovieSnapshot {
    MovieSnapshot {
        movie_id: movie_id.to_string(),
        title: "Answer".to_string(),
        year: "2001".to_string(),
        poster_url: "https://image.tmdb.org/t/p/w500/answer.jpg".to_string(),
    }
}

pub fn candidate(rating: u8, review_text: &str, user_name: &str) -> ReviewCandidate {
    ReviewCandidate {
        rating,
        review_text: review_text.to_string(),
        user_name: user_name.to_string(),
        movie: snapshot("42"),
    }
}

pub fn details(
    id: u64,
    title: &str,
    release_date: Option<&str>,
    poster_path: Option<&str>,
) -> MovieDetails {
    MovieDetails {
        movie: Movie {
            id,
            title: title.to_string(),
            poster_path: poster_path.map(str::to_string),
            release_date: release_date.map(str::to_string),
            overview: format!("{} overview", title),
            vote_average: 7.5,
        },
        runtime: Some(120),
        genres: vec![Genre {
            id: 18,
            name: "Drama".to_string(),
        }],
    }
}

/// Catalog backed by a fixed list of movies.
pub struct FakeCatalog {
    movies: Vec<MovieDetails>,
    failing: AtomicBool,
    searches: AtomicUsize,
}

impl FakeCatalog {
    pub fn new(movies: Vec<MovieDetails>) -> Self {
        Self {
            movies,
            failing: AtomicBool::new(false),
            searches: AtomicUsize::new(0),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn search_count(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), CatalogError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(CatalogError::Api {
                status: 503,
                body: "unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CatalogService for FakeCatalog {
    fn service_name(&self) -> &str {
        "fake"
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<Movie>, CatalogError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let needle = query.trim().to_lowercase();
        Ok(self
            .movies
            .iter()
            .filter(|d| d.movie.title.to_lowercase().contains(&needle))
            .map(|d| d.movie.clone())
            .collect())
    }

    async fn get_by_id(&self, id: u64) -> Result<MovieDetails, CatalogError> {
        self.check_available()?;
        self.movies
            .iter()
            .find(|d| d.movie.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    fn poster_url(&self, path: Option<&str>, size: PosterSize) -> String {
        poster_url("https://image.tmdb.org/t/p", path, size)
    }
}
