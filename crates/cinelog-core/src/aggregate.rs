//! Derived statistics over a movie's review set.

use cinelog_models::{AggregateRating, AnonymousIdentity, Review};

/// Arithmetic mean of the ratings, or 0.0 for an empty list.
pub fn compute_average(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    f64::from(sum) / reviews.len() as f64
}

/// Whether any review was written by `identity`. No identity means no.
pub fn has_reviewed(reviews: &[Review], identity: Option<&AnonymousIdentity>) -> bool {
    match identity {
        Some(identity) => reviews.iter().any(|r| r.user_identifier == identity.as_str()),
        None => false,
    }
}

pub fn summarize(reviews: &[Review]) -> AggregateRating {
    AggregateRating {
        count: reviews.len(),
        mean: compute_average(reviews),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::review;

    #[test]
    fn test_compute_average() {
        assert_eq!(compute_average(&[]), 0.0);

        let reviews = vec![review("42", "a", 5), review("42", "b", 4), review("42", "c", 2)];
        let average = compute_average(&reviews);
        assert!((average - 11.0 / 3.0).abs() < 1e-9);
        assert_eq!(format!("{:.1}", average), "3.7");
    }

    #[test]
    fn test_compute_average_exact() {
        assert_eq!(compute_average(&[review("42", "a", 1)]), 1.0);
        assert_eq!(compute_average(&[review("42", "a", 3), review("42", "b", 5)]), 4.0);
    }

    #[test]
    fn test_has_reviewed() {
        let reviews = vec![review("42", "u1", 4), review("42", "u2", 3)];
        let u1 = AnonymousIdentity::new("u1");
        let u3 = AnonymousIdentity::new("u3");

        assert!(has_reviewed(&reviews, Some(&u1)));
        assert!(!has_reviewed(&reviews, Some(&u3)));
        assert!(!has_reviewed(&reviews, None));
        assert!(!has_reviewed(&[], Some(&u1)));
    }

    #[test]
    fn test_has_reviewed_ignores_display_name() {
        let mut other = review("42", "u2", 4);
        other.user_name = "u1".to_string();
        assert!(!has_reviewed(&[other], Some(&AnonymousIdentity::new("u1"))));
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&[review("42", "a", 5), review("42", "b", 4)]);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.display_mean(), "4.5");
        assert_eq!(summarize(&[]).display_mean(), "N/A");
    }
}
