//! Review submission: validate, attach the visitor identity, persist.

mod form;

pub use form::ReviewForm;

use crate::aggregate::has_reviewed;
use crate::identity::IdentityProvider;
use crate::validation::{validate_candidate, ValidationError};
use cinelog_models::{Review, ReviewCandidate};
use cinelog_sources::{ReviewStore, StoreError};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Lifecycle of one submission attempt.
///
/// `Idle -> Validating -> (Invalid | Submitting)`, `Submitting -> (Persisted | Failed)`.
/// Terminal states return to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Validating,
    Invalid,
    Submitting,
    Persisted,
    Failed,
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Invalid | Self::Persisted | Self::Failed)
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("You've already reviewed this movie!")]
    DuplicateReview,

    #[error("Failed to submit review. Please try again.")]
    SubmissionFailed(#[source] StoreError),

    #[error("A review is already being submitted")]
    InProgress,
}

impl SubmitError {
    /// Whether resubmitting the same input could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::SubmissionFailed(_))
    }
}

/// Runs submission attempts against one store and identity provider.
pub struct SubmissionWorkflow {
    store: Arc<dyn ReviewStore>,
    identity: Arc<dyn IdentityProvider>,
    enforce_unique: bool,
}

impl SubmissionWorkflow {
    pub fn new(store: Arc<dyn ReviewStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            store,
            identity,
            enforce_unique: false,
        }
    }

    /// Reject a second review of a movie by the same identity instead of
    /// only warning about it.
    pub fn with_unique_enforcement(mut self, enabled: bool) -> Self {
        self.enforce_unique = enabled;
        self
    }

    /// Validate and persist `candidate`.
    ///
    /// `existing` is the review list the caller last displayed for the movie;
    /// it is only used for the duplicate check. The store is not touched
    /// unless validation passes.
    pub async fn submit_review(
        &self,
        candidate: &ReviewCandidate,
        existing: &[Review],
    ) -> Result<Review, SubmitError> {
        self.submit_observed(candidate, existing, &mut |_| {}).await
    }

    /// Same as `submit_review`, reporting each state entered to `observe`.
    pub async fn submit_observed(
        &self,
        candidate: &ReviewCandidate,
        existing: &[Review],
        observe: &mut (dyn FnMut(SubmissionState) + Send),
    ) -> Result<Review, SubmitError> {
        observe(SubmissionState::Validating);
        if let Err(e) = validate_candidate(candidate) {
            debug!(movie_id = %candidate.movie.movie_id, "Review rejected: {}", e);
            observe(SubmissionState::Invalid);
            return Err(e.into());
        }

        let identity = self.identity.get_or_create();

        if has_reviewed(existing, Some(&identity)) {
            if self.enforce_unique {
                info!(
                    movie_id = %candidate.movie.movie_id,
                    "Review rejected: visitor already reviewed this movie"
                );
                observe(SubmissionState::Invalid);
                return Err(SubmitError::DuplicateReview);
            }
            warn!(
                movie_id = %candidate.movie.movie_id,
                "Visitor already reviewed this movie; submitting another review"
            );
        }

        observe(SubmissionState::Submitting);
        let new_review = candidate.to_new_review(identity.as_str());

        match self.store.insert(new_review).await {
            Ok(review) => {
                info!(
                    review_id = %review.id,
                    movie_id = %review.movie_id,
                    store = self.store.store_name(),
                    "Review submitted"
                );
                observe(SubmissionState::Persisted);
                Ok(review)
            }
            Err(StoreError::Conflict) => {
                info!(movie_id = %candidate.movie.movie_id, "Store rejected duplicate review");
                observe(SubmissionState::Failed);
                Err(SubmitError::DuplicateReview)
            }
            Err(e) => {
                error!(movie_id = %candidate.movie.movie_id, "Error submitting review: {}", e);
                observe(SubmissionState::Failed);
                Err(SubmitError::SubmissionFailed(e))
            }
        }
    }
}
