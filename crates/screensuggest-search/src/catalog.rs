//! `Catalog` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;
use screensuggest_api::{Genre, MovieApi, MovieService, ResultPage, SearchFilters};

/// Searchable movie catalog consumed by the state holders in this crate.
///
/// Unlike [`MovieService`], implementations may fail; a failure is surfaced
/// to the presentation layer as an error string.
#[trait_variant::make(Catalog: Send)]
pub trait LocalCatalog {
    /// Runs one search.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot answer the query.
    async fn search(&self, filters: &SearchFilters) -> Result<ResultPage>;

    /// Lists the available genres.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot list genres.
    async fn genres(&self) -> Result<Vec<Genre>>;
}

impl<A: MovieApi + Sync> Catalog for MovieService<A> {
    async fn search(&self, filters: &SearchFilters) -> Result<ResultPage> {
        Ok(self.search_movies(filters).await)
    }

    async fn genres(&self) -> Result<Vec<Genre>> {
        Ok(Self::genres(self).await)
    }
}
