//! Movie catalog client library for screensuggest.
//!
//! Talks to the catalog's REST API, normalizes the loosely shaped records it
//! returns into canonical [`Movie`] values, and falls back to a fixed demo
//! catalog when the API is unreachable.

mod api;
mod client;
mod envelope;
mod mock;
mod normalize;
mod params;
mod service;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalMovieApi, MovieApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{ApiClient, ApiClientBuilder, DEFAULT_TIMEOUT};
pub use envelope::{total_pages_for, unwrap_details, unwrap_genres, unwrap_page};
pub use mock::{MOCK_CATALOG_SIZE, mock_genres, mock_movie_details, mock_page};
pub use normalize::{normalize_comment, normalize_genre, normalize_movie, normalize_movie_details};
pub use params::{QueryParams, to_query_params};
#[allow(clippy::module_name_repetitions)]
pub use service::MovieService;
pub use types::{
    Comment, DEFAULT_LIMIT, DEFAULT_PAGE, Genre, Movie, MovieDetails, MovieId, ResultPage,
    SearchFilters, SortKey, SortOrder, UNKNOWN_TITLE,
};
