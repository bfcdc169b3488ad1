use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("movie {0} not found in catalog")]
    NotFound(u64),

    #[error("catalog API key is not configured (run 'cinelog config tmdb' or set TMDB_API_KEY)")]
    MissingApiKey,

    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("review store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("review store returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("a review by this visitor already exists for this movie")]
    Conflict,

    #[error("review store returned no record for the insert")]
    EmptyInsert,

    #[error("review store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode review data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("review store unavailable: {0}")]
    Unavailable(String),
}
