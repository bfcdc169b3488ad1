use cinelog_models::ReviewCandidate;
use thiserror::Error;

pub const MAX_REVIEW_TEXT_CHARS: usize = 1000;
pub const MAX_USER_NAME_CHARS: usize = 100;

/// Why a review candidate was rejected before reaching the store.
///
/// Display strings are shown to the user as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a rating")]
    MissingRating,

    #[error("Rating must be between 1 and 5 stars (got {0})")]
    InvalidRating(u8),

    #[error("Please write a review")]
    MissingReviewText,

    #[error("Please enter your name")]
    MissingUserName,

    #[error("Review is too long ({0} characters, at most 1000)")]
    ReviewTextTooLong(usize),

    #[error("Name is too long ({0} characters, at most 100)")]
    UserNameTooLong(usize),
}

/// Check a candidate, reporting the first failing rule.
///
/// Rules run in a fixed order: rating, review text, name, then lengths.
/// Text is checked trimmed but stored as entered.
pub fn validate_candidate(candidate: &ReviewCandidate) -> Result<(), ValidationError> {
    match candidate.rating {
        0 => return Err(ValidationError::MissingRating),
        1..=5 => {}
        other => return Err(ValidationError::InvalidRating(other)),
    }

    if candidate.review_text.trim().is_empty() {
        return Err(ValidationError::MissingReviewText);
    }

    if candidate.user_name.trim().is_empty() {
        return Err(ValidationError::MissingUserName);
    }

    let text_len = candidate.review_text.chars().count();
    if text_len > MAX_REVIEW_TEXT_CHARS {
        return Err(ValidationError::ReviewTextTooLong(text_len));
    }

    let name_len = candidate.user_name.chars().count();
    if name_len > MAX_USER_NAME_CHARS {
        return Err(ValidationError::UserNameTooLong(name_len));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{candidate, snapshot};

    #[test]
    fn test_valid_candidate() {
        assert_eq!(validate_candidate(&candidate(4, "Great film", "Ada")), Ok(()));
    }

    #[test]
    fn test_rating_checked_first() {
        assert_eq!(validate_candidate(&candidate(0, "", "")), Err(ValidationError::MissingRating));
        assert_eq!(
            validate_candidate(&candidate(0, "Great film", "Ada")),
            Err(ValidationError::MissingRating)
        );
        assert_eq!(
            validate_candidate(&candidate(6, "Great film", "Ada")),
            Err(ValidationError::InvalidRating(6))
        );
    }

    #[test]
    fn test_review_text_before_name() {
        assert_eq!(
            validate_candidate(&candidate(3, "   \n\t", "")),
            Err(ValidationError::MissingReviewText)
        );
        assert_eq!(
            validate_candidate(&candidate(3, "Fine", "  ")),
            Err(ValidationError::MissingUserName)
        );
    }

    #[test]
    fn test_length_limits_count_characters() {
        let at_limit = "é".repeat(MAX_REVIEW_TEXT_CHARS);
        assert_eq!(validate_candidate(&candidate(5, &at_limit, "Ada")), Ok(()));

        let too_long = "x".repeat(MAX_REVIEW_TEXT_CHARS + 1);
        assert_eq!(
            validate_candidate(&candidate(5, &too_long, "Ada")),
            Err(ValidationError::ReviewTextTooLong(1001))
        );

        let long_name = "n".repeat(MAX_USER_NAME_CHARS + 1);
        assert_eq!(
            validate_candidate(&candidate(5, "Fine", &long_name)),
            Err(ValidationError::UserNameTooLong(101))
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ValidationError::MissingRating.to_string(), "Please select a rating");
        assert_eq!(ValidationError::MissingReviewText.to_string(), "Please write a review");
        assert_eq!(ValidationError::MissingUserName.to_string(), "Please enter your name");
    }

    #[test]
    fn test_whitespace_is_kept() {
        let c = ReviewCandidate {
            rating: 2,
            review_text: "  padded  ".to_string(),
            user_name: " Ada ".to_string(),
            movie: snapshot("42"),
        };
        assert_eq!(validate_candidate(&c), Ok(()));
        assert_eq!(c.to_new_review("id").review_text, "  padded  ");
    }
}
