use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A review as persisted by a review store.
///
/// `movie_title`, `movie_year` and `movie_poster` are a snapshot of the catalog
/// entry taken when the review was written. They are never re-synced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String, // Assigned by the store
    pub movie_id: String,
    pub movie_title: String,
    pub movie_year: String,
    pub movie_poster: String,
    pub rating: u8, // 1-5 stars
    pub review_text: String,
    pub user_name: String, // Display only, never used for deduplication
    pub user_identifier: String,
    pub created_at: DateTime<Utc>, // Assigned by the store
}

/// A review that has not been stored yet (no `id`, no `created_at`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewReview {
    pub movie_id: String,
    pub movie_title: String,
    pub movie_year: String,
    pub movie_poster: String,
    pub rating: u8,
    pub review_text: String,
    pub user_identifier: String,
    pub user_name: String,
}

impl NewReview {
    /// Attach the store-assigned fields.
    pub fn into_review(self, id: String, created_at: DateTime<Utc>) -> Review {
        Review {
            id,
            movie_id: self.movie_id,
            movie_title: self.movie_title,
            movie_year: self.movie_year,
            movie_poster: self.movie_poster,
            rating: self.rating,
            review_text: self.review_text,
            user_name: self.user_name,
            user_identifier: self.user_identifier,
            created_at,
        }
    }
}

/// Catalog data copied into a review at submission time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieSnapshot {
    pub movie_id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
}

/// Raw user input for one submission attempt.
///
/// A `rating` of 0 means no star has been selected yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewCandidate {
    pub rating: u8,
    pub review_text: String,
    pub user_name: String,
    pub movie: MovieSnapshot,
}

impl ReviewCandidate {
    /// Build the record handed to the store once validation passed.
    pub fn to_new_review(&self, user_identifier: &str) -> NewReview {
        NewReview {
            movie_id: self.movie.movie_id.clone(),
            movie_title: self.movie.title.clone(),
            movie_year: self.movie.year.clone(),
            movie_poster: self.movie.poster_url.clone(),
            rating: self.rating,
            review_text: self.review_text.clone(),
            user_identifier: user_identifier.to_string(),
            user_name: self.user_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> MovieSnapshot {
        MovieSnapshot {
            movie_id: "603".to_string(),
            title: "The Matrix".to_string(),
            year: "1999".to_string(),
            poster_url: "https://image.tmdb.org/t/p/w500/matrix.jpg".to_string(),
        }
    }

    #[test]
    fn test_candidate_keeps_text_as_entered() {
        let candidate = ReviewCandidate {
            rating: 5,
            review_text: "  Still holds up  ".to_string(),
            user_name: " Neo ".to_string(),
            movie: snapshot(),
        };

        let new_review = candidate.to_new_review("visitor-1");
        assert_eq!(new_review.review_text, "  Still holds up  ");
        assert_eq!(new_review.user_name, " Neo ");
        assert_eq!(new_review.user_identifier, "visitor-1");
        assert_eq!(new_review.movie_id, "603");
        assert_eq!(new_review.movie_poster, "https://image.tmdb.org/t/p/w500/matrix.jpg");
    }

    #[test]
    fn test_review_uses_snake_case_wire_names() {
        let review = ReviewCandidate {
            rating: 4,
            review_text: "Great film".to_string(),
            user_name: "Ada".to_string(),
            movie: snapshot(),
        }
        .to_new_review("visitor-1")
        .into_review("r-1".to_string(), Utc::now());

        let json = serde_json::to_value(&review).unwrap();
        assert_eq!(json["movie_id"], "603");
        assert_eq!(json["review_text"], "Great film");
        assert_eq!(json["user_identifier"], "visitor-1");
        assert!(json.get("created_at").is_some());
    }
}
