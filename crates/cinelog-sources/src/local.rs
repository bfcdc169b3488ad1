use crate::error::StoreError;
use crate::traits::ReviewStore;
use async_trait::async_trait;
use chrono::Utc;
use cinelog_models::{NewReview, Review};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// Review store kept in a JSON file, for use without a hosted database.
///
/// The whole file is rewritten on each insert; a mutex serializes writers
/// within the process.
pub struct LocalReviewStore {
    path: PathBuf,
    unique_per_identity: bool,
    write_lock: Mutex<()>,
}

impl LocalReviewStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            unique_per_identity: false,
            write_lock: Mutex::new(()),
        }
    }

    /// Reject a second review of a movie from the same identifier
    pub fn with_unique_constraint(mut self, enabled: bool) -> Self {
        self.unique_per_identity = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_all(&self) -> Result<Vec<Review>, StoreError> {
        if !tokio::fs::try_exists(&self.path).await? {
            debug!("Review file {} does not exist yet", self.path.display());
            return Ok(Vec::new());
        }
        let data = tokio::fs::read(&self.path).await?;
        if data.is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&data)?)
    }

    async fn save_all(&self, reviews: &[Review]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let data = serde_json::to_vec_pretty(reviews)?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl ReviewStore for LocalReviewStore {
    fn store_name(&self) -> &str {
        "local"
    }

    async fn insert(&self, review: NewReview) -> Result<Review, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut reviews = self.load_all().await?;

        if self.unique_per_identity
            && reviews
                .iter()
                .any(|r| {
                    r.movie_id == review.movie_id && r.user_identifier == review.user_identifier
                })
        {
            return Err(StoreError::Conflict);
        }

        let stored = review.into_review(Uuid::new_v4().to_string(), Utc::now());
        reviews.push(stored.clone());
        self.save_all(&reviews).await?;

        info!(
            review_id = %stored.id,
            movie_id = %stored.movie_id,
            "Review stored in {}",
            self.path.display()
        );
        Ok(stored)
    }

    async fn query_by_movie(&self, movie_id: &str) -> Result<Vec<Review>, StoreError> {
        let reviews = self.load_all().await?;
        Ok(newest_first(reviews.into_iter().filter(|r| r.movie_id == movie_id).collect()))
    }
}

/// Sort by `created_at` descending; equal timestamps keep the later insert first
pub(crate) fn newest_first(mut reviews: Vec<Review>) -> Vec<Review> {
    reviews.reverse();
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    reviews
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn new_review(movie_id: &str, identifier: &str, rating: u8) -> NewReview {
        NewReview {
            movie_id: movie_id.to_string(),
            movie_title: "Answer".to_string(),
            movie_year: "2001".to_string(),
            movie_poster: "https://via.placeholder.com/500x750?text=No+Poster".to_string(),
            rating,
            review_text: "Great film".to_string(),
            user_identifier: identifier.to_string(),
            user_name: "Ada".to_string(),
        }
    }

    #[tokio::test]
    async fn test_query_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = LocalReviewStore::new(dir.path().join("reviews.json"));
        assert!(store.query_by_movie("42").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("reviews.json");
        let store = LocalReviewStore::new(path.clone());

        let stored = store.insert(new_review("42", "visitor-1", 4)).await.unwrap();
        assert!(!stored.id.is_empty());
        assert_eq!(stored.rating, 4);

        // A fresh instance sees the same data
        let reopened = LocalReviewStore::new(path);
        let reviews = reopened.query_by_movie("42").await.unwrap();
        assert_eq!(reviews, vec![stored]);
    }

    #[tokio::test]
    async fn test_query_filters_by_movie_newest_first() {
        let dir = TempDir::new().unwrap();
        let store = LocalReviewStore::new(dir.path().join("reviews.json"));

        let first = store.insert(new_review("42", "visitor-1", 3)).await.unwrap();
        store.insert(new_review("7", "visitor-1", 1)).await.unwrap();
        let second = store.insert(new_review("42", "visitor-2", 5)).await.unwrap();

        let reviews = store.query_by_movie("42").await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].id, second.id);
        assert_eq!(reviews[1].id, first.id);
    }

    #[tokio::test]
    async fn test_duplicates_allowed_by_default() {
        let dir = TempDir::new().unwrap();
        let store = LocalReviewStore::new(dir.path().join("reviews.json"));

        let a = store.insert(new_review("42", "visitor-1", 4)).await.unwrap();
        let b = store.insert(new_review("42", "visitor-1", 4)).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.query_by_movie("42").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unique_constraint_rejects_second_review() {
        let dir = TempDir::new().unwrap();
        let store =
            LocalReviewStore::new(dir.path().join("reviews.json")).with_unique_constraint(true);

        store.insert(new_review("42", "visitor-1", 4)).await.unwrap();
        let err = store.insert(new_review("42", "visitor-1", 2)).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict));

        // Same visitor, other movie is fine
        store.insert(new_review("7", "visitor-1", 2)).await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reviews.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = LocalReviewStore::new(path);
        assert!(matches!(store.query_by_movie("42").await, Err(StoreError::Decode(_))));
    }
}
