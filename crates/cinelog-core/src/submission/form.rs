use super::{SubmissionState, SubmissionWorkflow, SubmitError};
use cinelog_models::{MovieSnapshot, Review, ReviewCandidate};

/// Input state of the review form on a movie page.
///
/// After a stored review the rating and text are cleared and the name is
/// kept. Any failure leaves all three untouched so the user can retry.
#[derive(Debug, Clone)]
pub struct ReviewForm {
    pub rating: u8,
    pub review_text: String,
    pub user_name: String,
    state: SubmissionState,
    last_attempt: Vec<SubmissionState>,
}

impl ReviewForm {
    pub fn new() -> Self {
        Self {
            rating: 0,
            review_text: String::new(),
            user_name: String::new(),
            state: SubmissionState::Idle,
            last_attempt: Vec::new(),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// The form is disabled while a submission is in flight
    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// States entered during the most recent attempt, starting at `Validating`
    pub fn last_attempt(&self) -> &[SubmissionState] {
        &self.last_attempt
    }

    /// Unlock a form left in `Submitting` by an attempt that was dropped
    /// before it finished
    pub fn reset_state(&mut self) {
        self.state = SubmissionState::Idle;
    }

    pub fn candidate(&self, movie: &MovieSnapshot) -> ReviewCandidate {
        ReviewCandidate {
            rating: self.rating,
            review_text: self.review_text.clone(),
            user_name: self.user_name.clone(),
            movie: movie.clone(),
        }
    }

    /// Submit the current input for `movie`.
    ///
    /// On success the caller should reload the movie's reviews.
    pub async fn submit(
        &mut self,
        workflow: &SubmissionWorkflow,
        movie: &MovieSnapshot,
        existing: &[Review],
    ) -> Result<Review, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::InProgress);
        }

        let candidate = self.candidate(movie);
        self.last_attempt.clear();

        let state = &mut self.state;
        let visited = &mut self.last_attempt;
        let result = workflow
            .submit_observed(&candidate, existing, &mut |next| {
                *state = next;
                visited.push(next);
            })
            .await;

        if result.is_ok() {
            self.rating = 0;
            self.review_text.clear();
        }
        self.state = SubmissionState::Idle;
        result
    }
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self::new()
    }
}
