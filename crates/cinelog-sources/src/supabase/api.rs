use crate::error::StoreError;
use crate::http::error_parts;
use chrono::{DateTime, Utc};
use cinelog_models::{NewReview, Review};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// Row shape of the hosted `reviews` table
#[derive(Debug, Deserialize)]
struct ReviewRow {
    id: serde_json::Value, // uuid or bigint depending on the table definition
    movie_id: String,
    #[serde(default)]
    movie_title: Option<String>,
    #[serde(default)]
    movie_year: Option<String>,
    #[serde(default)]
    movie_poster: Option<String>,
    rating: u8,
    review_text: String,
    user_name: String,
    user_identifier: String,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        let id = match row.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        Review {
            id,
            movie_id: row.movie_id,
            movie_title: row.movie_title.unwrap_or_default(),
            movie_year: row.movie_year.unwrap_or_default(),
            movie_poster: row.movie_poster.unwrap_or_default(),
            rating: row.rating,
            review_text: row.review_text,
            user_name: row.user_name,
            user_identifier: row.user_identifier,
            created_at: row.created_at,
        }
    }
}

/// PostgREST endpoint for a table, e.g. `https://abc.supabase.co/rest/v1/reviews`
pub fn table_url(base_url: &str, table: &str) -> String {
    format!(
        "{}/rest/v1/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(table)
    )
}

/// PostgREST filter value for an equality match
pub fn eq_filter(value: &str) -> String {
    format!("eq.{}", value)
}

fn with_auth(request: RequestBuilder, anon_key: &str) -> RequestBuilder {
    request
        .header("apikey", anon_key)
        .header("Authorization", format!("Bearer {}", anon_key))
        .header("Accept", "application/json")
}

/// Insert one review and return the stored row
pub async fn insert_review(
    client: &Client,
    base_url: &str,
    table: &str,
    anon_key: &str,
    review: &NewReview,
) -> Result<Review, StoreError> {
    let url = table_url(base_url, table);
    debug!(movie_id = %review.movie_id, "Inserting review");

    let response = with_auth(client.post(&url), anon_key)
        .header("Content-Type", "application/json")
        .header("Prefer", "return=representation")
        .json(review)
        .send()
        .await?;

    if !response.status().is_success() {
        let (status, body) = error_parts(response).await;
        return Err(insert_status_error(status, body));
    }

    let body = response.text().await?;
    parse_rows(&body)?
        .into_iter()
        .next()
        .ok_or(StoreError::EmptyInsert)
}

/// Select all reviews of a movie, newest first
pub async fn select_reviews(
    client: &Client,
    base_url: &str,
    table: &str,
    anon_key: &str,
    movie_id: &str,
) -> Result<Vec<Review>, StoreError> {
    let url = table_url(base_url, table);
    debug!(movie_id = %movie_id, "Querying reviews");

    let response = with_auth(client.get(&url), anon_key)
        .query(&[
            ("select", "*".to_string()),
            ("movie_id", eq_filter(movie_id)),
            ("order", "created_at.desc".to_string()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        let (status, body) = error_parts(response).await;
        return Err(StoreError::Api { status, body });
    }

    let body = response.text().await?;
    parse_rows(&body)
}

/// Error for a non-success insert; 409 is a unique-constraint violation
pub fn insert_status_error(status: u16, body: String) -> StoreError {
    if status == StatusCode::CONFLICT.as_u16() {
        StoreError::Conflict
    } else {
        StoreError::Api { status, body }
    }
}

pub fn parse_rows(body: &str) -> Result<Vec<Review>, StoreError> {
    let rows: Vec<ReviewRow> = serde_json::from_str(body)?;
    Ok(rows.into_iter().map(Review::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url() {
        assert_eq!(
            table_url("https://abc.supabase.co/", "reviews"),
            "https://abc.supabase.co/rest/v1/reviews"
        );
        assert_eq!(
            table_url("https://abc.supabase.co", "movie reviews"),
            "https://abc.supabase.co/rest/v1/movie%20reviews"
        );
    }

    #[test]
    fn test_eq_filter() {
        assert_eq!(eq_filter("42"), "eq.42");
    }

    #[test]
    fn test_parse_rows() {
        let body = r#"[
            {"id": "9b1f8a0e-1c2d-4e5f-8a9b-0c1d2e3f4a5b", "movie_id": "42",
             "movie_title": "Answer",
             "movie_year": "2001", "movie_poster": "https://image.tmdb.org/t/p/w500/a.jpg",
             "rating": 4, "review_text": "Great film", "user_name": "Ada",
             "user_identifier": "visitor-1", "created_at": "2024-05-01T12:34:56.789012+00:00"},
            {"id": 7, "movie_id": "42", "movie_title": null, "movie_year": null,
             "movie_poster": null,
             "rating": 2, "review_text": "Meh", "user_name": "Bob",
             "user_identifier": "visitor-2", "created_at": "2024-04-01T08:00:00+00:00"}
        ]"#;

        let reviews = parse_rows(body).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].id, "9b1f8a0e-1c2d-4e5f-8a9b-0c1d2e3f4a5b");
        assert_eq!(reviews[0].rating, 4);
        assert_eq!(reviews[0].movie_year, "2001");
        assert_eq!(reviews[1].id, "7");
        assert_eq!(reviews[1].movie_title, "");
        assert!(reviews[0].created_at > reviews[1].created_at);
    }

    #[test]
    fn test_insert_status_error() {
        assert!(matches!(insert_status_error(409, String::new()), StoreError::Conflict));

        let err = insert_status_error(401, r#"{"message":"Invalid API key"}"#.to_string());
        assert!(
            matches!(err, StoreError::Api { status: 401, ref body } if body.contains("Invalid"))
        );
        assert!(matches!(
            insert_status_error(500, String::new()),
            StoreError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn test_parse_rows_empty() {
        assert!(parse_rows("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rows_rejects_error_object() {
        let body = r#"{"code": "42P01", "message": "relation does not exist"}"#;
        assert!(matches!(parse_rows(body), Err(StoreError::Decode(_))));
    }
}
