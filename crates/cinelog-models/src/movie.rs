use serde::{Deserialize, Serialize};

/// A catalog search hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>, // "YYYY-MM-DD", sometimes empty
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub vote_average: f64,
}

impl Movie {
    /// Release year for display, or "N/A" when the catalog has no date.
    pub fn year(&self) -> String {
        self.release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
            .unwrap_or("N/A")
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Full catalog entry returned by a lookup by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub runtime: Option<u32>, // Minutes
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Poster image widths offered by the catalog's image service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PosterSize {
    W185,
    #[default]
    W500,
    Original,
}

impl PosterSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            PosterSize::W185 => "w185",
            PosterSize::W500 => "w500",
            PosterSize::Original => "original",
        }
    }
}
