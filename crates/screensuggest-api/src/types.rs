//! Canonical catalog types and search filters.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Default page number (1-based).
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size.
pub const DEFAULT_LIMIT: u32 = 20;

/// Title used when the upstream record carries none.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

// --- Identifiers ---

/// Movie identifier. The upstream API mixes numeric and string IDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum MovieId {
    /// Numeric ID.
    Number(i64),
    /// String ID (e.g. a document `_id`).
    Text(String),
}

impl Default for MovieId {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for MovieId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for MovieId {
    fn from(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for MovieId {
    type Err = Infallible;

    /// Digits become a numeric ID, anything else stays text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map_or_else(|_| Self::Text(String::from(s)), Self::Number))
    }
}

// --- Entities ---

/// A movie in canonical shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Movie ID.
    pub id: MovieId,
    /// Display title (never empty).
    pub title: String,
    /// Release year.
    pub year: Option<i32>,
    /// Poster image URL.
    pub poster_url: Option<String>,
    /// Rating on a 0-10 scale.
    pub rating: Option<f64>,
    /// Genre names.
    pub genres: Vec<String>,
    /// Director name (may be empty).
    pub director: String,
    /// Cast member names.
    pub cast: Vec<String>,
    /// Synopsis text (may be empty).
    pub synopsis: String,
    /// Runtime in minutes (0 when unknown).
    pub duration_minutes: u32,
}

/// A movie detail record.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    /// Base movie fields.
    #[serde(flatten)]
    pub movie: Movie,
    /// Release date as sent by the API (display only).
    pub release_date: Option<String>,
    /// User comments, in API order.
    pub comments: Vec<Comment>,
    /// Similar-title recommendations.
    pub similar_movies: Vec<Movie>,
    /// Up-vote count.
    pub votes_up: u32,
    /// Down-vote count.
    pub votes_down: u32,
}

/// A user comment on a movie.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment ID.
    pub id: MovieId,
    /// Author display name.
    pub user_name: String,
    /// Author avatar URL.
    pub user_avatar_url: String,
    /// Comment body.
    pub content: String,
    /// Free-form creation label (e.g. "2 hours ago").
    pub created_at: String,
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage {
    /// Movies on this page, in API order.
    pub items: Vec<Movie>,
    /// Total number of matching movies.
    pub total: u32,
    /// Page number reported by the source.
    pub page: u32,
    /// Total number of pages.
    pub total_pages: u32,
}

// --- Search filters ---

/// Sort key accepted by the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    /// Sort by title.
    Title,
    /// Sort by release date.
    Year,
    /// Sort by rating.
    Rating,
    /// Sort by popularity (no upstream equivalent; sent as rating).
    Popularity,
    /// Any other key, sent as-is.
    Other(String),
}

impl SortKey {
    /// Returns the upstream `sortBy` value.
    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Title => "title",
            Self::Year => "releaseDate",
            Self::Rating | Self::Popularity => "imdbRating",
            Self::Other(key) => key,
        }
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "title" => Self::Title,
            "year" => Self::Year,
            "rating" => Self::Rating,
            "popularity" => Self::Popularity,
            _ => Self::Other(String::from(s)),
        })
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Returns the upper-cased upstream `sortOrder` value.
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("invalid sort order: {other} (expected asc or desc)")),
        }
    }
}

/// Mutable search query state.
///
/// The `q`, `rating_*`, `imdb_rating_*` and `year_start`/`year_end` fields are
/// historical aliases still honored by the request mapper.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilters {
    /// Free-text query.
    pub query: String,
    /// Short query alias; wins over `query` when set.
    pub q: Option<String>,
    /// Genre name.
    pub genre: Option<String>,
    /// Inclusive lower year bound.
    pub year_from: Option<i32>,
    /// Inclusive upper year bound.
    pub year_to: Option<i32>,
    /// Legacy alias for `year_from`.
    pub year_start: Option<i32>,
    /// Legacy alias for `year_to`.
    pub year_end: Option<i32>,
    /// Minimum rating.
    pub rating_from: Option<f64>,
    /// Legacy minimum rating.
    pub rating_min: Option<f64>,
    /// Legacy maximum rating.
    pub rating_max: Option<f64>,
    /// Explicit upstream minimum rating.
    pub imdb_rating_min: Option<f64>,
    /// Explicit upstream maximum rating.
    pub imdb_rating_max: Option<f64>,
    /// Sort key.
    pub sort_by: Option<SortKey>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
    /// Requested page (1-based).
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            query: String::new(),
            q: None,
            genre: None,
            year_from: None,
            year_to: None,
            year_start: None,
            year_end: None,
            rating_from: None,
            rating_min: None,
            rating_max: None,
            imdb_rating_min: None,
            imdb_rating_max: None,
            sort_by: None,
            sort_order: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchFilters {
    /// Creates filters with the given free-text query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Returns the requested page, treating 0 as the default.
    #[must_use]
    pub const fn effective_page(&self) -> u32 {
        if self.page == 0 { DEFAULT_PAGE } else { self.page }
    }

    /// Returns the page size, treating 0 as the default.
    #[must_use]
    pub const fn effective_limit(&self) -> u32 {
        if self.limit == 0 {
            DEFAULT_LIMIT
        } else {
            self.limit
        }
    }
}
