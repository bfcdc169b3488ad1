pub mod aggregate;
pub mod identity;
pub mod movie_page;
pub mod search;
pub mod submission;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::{compute_average, has_reviewed, summarize};
pub use identity::{
    FileIdentityStorage, IdentityProvider, IdentityStorage, MemoryIdentityStorage,
    StoredIdentityProvider, IDENTITY_KEY,
};
pub use movie_page::{load_movie_page, MoviePage, PageError};
pub use search::{search_movies, SearchError};
pub use submission::{ReviewForm, SubmissionState, SubmissionWorkflow, SubmitError};
pub use validation::{
    validate_candidate, ValidationError, MAX_REVIEW_TEXT_CHARS, MAX_USER_NAME_CHARS,
};
