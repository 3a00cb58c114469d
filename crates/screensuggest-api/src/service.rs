//! `MovieService` - shaped catalog access with a demo-data fallback.
//!
//! Every method here succeeds. A failed live call is logged and answered
//! from the fixed catalog in [`crate::mock`], with the same shape a live
//! response would have.

use anyhow::Error;
use tracing::instrument;

use super::api::MovieApi;
use super::envelope::{unwrap_details, unwrap_genres, unwrap_page};
use super::mock::{mock_genres, mock_movie_details, mock_page};
use super::params::to_query_params;
use super::types::{Genre, Movie, MovieDetails, MovieId, ResultPage, SearchFilters};

/// Page size used for the featured list.
const FEATURED_LIMIT: u32 = 10;

/// Movie catalog service over a transport `A`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct MovieService<A> {
    api: A,
}

impl<A> MovieService<A> {
    /// Wraps a transport.
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    /// Returns the underlying transport.
    pub const fn api(&self) -> &A {
        &self.api
    }
}

impl<A: MovieApi + Sync> MovieService<A> {
    /// Searches the catalog.
    ///
    /// Falls back to the fixed catalog, paginated by `filters.page` and
    /// `filters.limit`, when the live call fails.
    #[instrument(skip_all, fields(page = filters.effective_page(), limit = filters.effective_limit()))]
    pub async fn search_movies(&self, filters: &SearchFilters) -> ResultPage {
        let page = filters.effective_page();
        let limit = filters.effective_limit();
        let params = to_query_params(filters);

        match self.api.fetch_movies(&params).await {
            Ok(body) => {
                let result = unwrap_page(&body, page, limit);
                tracing::debug!(
                    items = result.items.len(),
                    total = result.total,
                    total_pages = result.total_pages,
                    "search completed"
                );
                result
            }
            Err(err) => fallback_page(page, limit, &err),
        }
    }

    /// Fetches one movie's detail record.
    ///
    /// Falls back to the fixed detail record carrying `id` when the live
    /// call fails.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn movie_by_id(&self, id: &MovieId) -> MovieDetails {
        match self.api.fetch_movie(id).await {
            Ok(body) => unwrap_details(&body, id),
            Err(err) => {
                tracing::warn!(error = %err, "movie lookup failed, using demo data");
                mock_movie_details(id)
            }
        }
    }

    /// Fetches the genre list.
    #[instrument(skip_all)]
    pub async fn genres(&self) -> Vec<Genre> {
        match self.api.fetch_genres().await {
            Ok(body) => unwrap_genres(&body),
            Err(err) => {
                tracing::warn!(error = %err, "genre lookup failed, using demo data");
                mock_genres()
            }
        }
    }

    /// Returns the first page of unfiltered results, ten at a time.
    #[instrument(skip_all)]
    pub async fn featured_movies(&self) -> Vec<Movie> {
        let filters = SearchFilters {
            limit: FEATURED_LIMIT,
            ..SearchFilters::default()
        };
        self.search_movies(&filters).await.items
    }
}

/// Logs a failed search and serves the matching fallback page.
fn fallback_page(page: u32, limit: u32, err: &Error) -> ResultPage {
    tracing::warn!(error = %err, page, limit, "movie search failed, using demo data");
    mock_page(page, limit)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::sync::Mutex;

    use anyhow::{Result, anyhow};
    use serde_json::{Value, json};
    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    use super::*;
    use crate::params::QueryParams;

    /// Fake transport answering from a canned body, or failing when `None`.
    struct FakeApi {
        body: Option<Value>,
        requests: Mutex<Vec<QueryParams>>,
    }

    impl FakeApi {
        fn ok(body: Value) -> Self {
            Self {
                body: Some(body),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                body: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn respond(&self) -> Result<Value> {
            self.body
                .clone()
                .ok_or_else(|| anyhow!("Network error. Please check your connection."))
        }
    }

    impl MovieApi for FakeApi {
        async fn fetch_movies(&self, params: &QueryParams) -> Result<Value> {
            self.requests.lock().unwrap().push(params.clone());
            self.respond()
        }

        async fn fetch_movie(&self, _id: &MovieId) -> Result<Value> {
            self.respond()
        }

        async fn fetch_genres(&self) -> Result<Value> {
            self.respond()
        }
    }

    #[tokio::test]
    async fn test_search_normalizes_live_response() {
        // Arrange
        let service = MovieService::new(FakeApi::ok(json!({
            "data": {
                "data": [{ "_id": "a1", "originalTitle": "Alien", "runtime": 117 }],
                "pagination": { "total_items": 1, "current_page": 1, "total_pages": 1 }
            }
        })));

        // Act
        let page = service.search_movies(&SearchFilters::new("alien")).await;

        // Assert
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Alien");
        assert_eq!(page.items[0].duration_minutes, 117);
        assert_eq!(page.total, 1);
        let requests = service.api().requests.lock().unwrap();
        assert_eq!(requests[0].get("q"), Some("alien"));
    }

    #[tokio::test]
    async fn test_search_failure_falls_back_to_mock_catalog() {
        // Arrange
        let service = MovieService::new(FakeApi::failing());
        let filters = SearchFilters {
            page: 1,
            limit: 20,
            ..SearchFilters::new("matrix")
        };

        // Act
        let page = service.search_movies(&filters).await;

        // Assert
        assert!(page.items.len() <= 20);
        assert_eq!(page.total, 15);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_search_fallback_honors_pagination() {
        // Arrange
        let service = MovieService::new(FakeApi::failing());
        let filters = SearchFilters {
            page: 2,
            limit: 3,
            ..SearchFilters::default()
        };

        // Act
        let page = service.search_movies(&filters).await;

        // Assert
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.items[0].id, MovieId::Number(4));
        assert_eq!(page.total_pages, 5);
    }

    #[tokio::test]
    async fn test_movie_by_id_failure_falls_back() {
        // Arrange
        let service = MovieService::new(FakeApi::failing());

        // Act
        let details = service.movie_by_id(&MovieId::Number(77)).await;

        // Assert
        assert_eq!(details.movie.id, MovieId::Number(77));
        assert_eq!(details.comments.len(), 2);
    }

    #[tokio::test]
    async fn test_movie_by_id_live() {
        // Arrange
        let service = MovieService::new(FakeApi::ok(json!({
            "data": { "title": "Heat", "votes_up": 3 }
        })));

        // Act
        let details = service.movie_by_id(&MovieId::Number(949)).await;

        // Assert
        assert_eq!(details.movie.id, MovieId::Number(949));
        assert_eq!(details.movie.title, "Heat");
        assert_eq!(details.votes_up, 3);
    }

    #[tokio::test]
    async fn test_genres_live_and_fallback() {
        // Arrange
        let live = MovieService::new(FakeApi::ok(json!({ "data": [{ "id": 9, "name": "Noir" }] })));
        let failing = MovieService::new(FakeApi::failing());

        // Act
        let live_genres = live.genres().await;
        let fallback_genres = failing.genres().await;

        // Assert
        assert_eq!(live_genres.len(), 1);
        assert_eq!(live_genres[0].name, "Noir");
        assert_eq!(fallback_genres.len(), 7);
    }

    #[tokio::test]
    async fn test_featured_requests_ten() {
        // Arrange
        let service = MovieService::new(FakeApi::failing());

        // Act
        let movies = service.featured_movies().await;

        // Assert
        assert_eq!(movies.len(), 10);
        let requests = service.api().requests.lock().unwrap();
        assert_eq!(requests[0].get("limit"), Some("10"));
    }

    #[test]
    fn test_fallback_page_logs_warning() {
        // Arrange
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().at_level(tracing::Level::WARN))
            .only()
            .run_with_handle();

        // Act
        let page = with_default(subscriber, || {
            fallback_page(1, 5, &anyhow!("Resource not found"))
        });

        // Assert
        handle.assert_finished();
        assert_eq!(page.items.len(), 5);
    }
}
