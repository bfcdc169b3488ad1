//! In-memory review store.
//!
//! All data is lost when the value is dropped. Used by tests and by callers
//! that want a throwaway store.

use crate::error::StoreError;
use crate::local::newest_first;
use crate::traits::ReviewStore;
use async_trait::async_trait;
use chrono::Utc;
use cinelog_models::{NewReview, Review};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct InMemoryReviewStore {
    reviews: RwLock<Vec<Review>>,
    /// When set, every call fails as if the backend were unreachable.
    failing: AtomicBool,
    unique_per_identity: bool,
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self {
            reviews: RwLock::new(Vec::new()),
            failing: AtomicBool::new(false),
            unique_per_identity: false,
        }
    }

    pub fn with_unique_constraint(mut self, enabled: bool) -> Self {
        self.unique_per_identity = enabled;
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of stored reviews across all movies
    pub async fn len(&self) -> usize {
        self.reviews.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reviews.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("in-memory store set to fail".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Default for InMemoryReviewStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    fn store_name(&self) -> &str {
        "memory"
    }

    async fn insert(&self, review: NewReview) -> Result<Review, StoreError> {
        self.check_available()?;
        let mut reviews = self.reviews.write().await;

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
        Ok(stored)
    }

    async fn query_by_movie(&self, movie_id: &str) -> Result<Vec<Review>, StoreError> {
        self.check_available()?;
        let reviews = self.reviews.read().await;
        Ok(newest_first(
            reviews.iter().filter(|r| r.movie_id == movie_id).cloned().collect(),
        ))
    }
}
