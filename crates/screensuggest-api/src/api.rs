//! `MovieApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;
use serde_json::Value;

use super::params::QueryParams;
use super::types::MovieId;

/// Movie catalog transport trait.
///
/// Returns raw JSON bodies; shaping them is the service's job. Abstracts
/// the HTTP layer so tests can substitute a fake transport.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MovieApi: Send)]
pub trait LocalMovieApi {
    /// Fetches `GET /movies` with the given query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not 2xx,
    /// or the body is not JSON.
    async fn fetch_movies(&self, params: &QueryParams) -> Result<Value>;

    /// Fetches `GET /movies/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not 2xx,
    /// or the body is not JSON.
    async fn fetch_movie(&self, id: &MovieId) -> Result<Value>;

    /// Fetches `GET /genres`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not 2xx,
    /// or the body is not JSON.
    async fn fetch_genres(&self) -> Result<Value>;
}
