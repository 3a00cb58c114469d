//! `ApiClient` - movie catalog HTTP client implementation.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::instrument;
use url::Url;

use super::api::MovieApi;
use super::params::QueryParams;
use super::types::MovieId;

/// Default base URL for the movie catalog API.
const DEFAULT_BASE_URL: &str = "https://screensuggest.dev.anarzone.com/api/";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Message for HTTP 404.
const NOT_FOUND_MESSAGE: &str = "Resource not found";

/// Message for HTTP 500.
const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";

/// Message for connection failures.
const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Movie catalog API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ApiClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests (must end with `/`).
    base_url: Url,
}

/// Builder for `ApiClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ApiClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl ApiClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the request timeout (default: 10s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<ApiClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .default_headers(headers)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(ApiClient {
            http_client,
            base_url,
        })
    }
}

impl ApiClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a GET request and decodes the JSON body.
    ///
    /// 404 and 500 are reported with fixed human-readable messages, as are
    /// connection failures. Every failure is logged before it is returned.
    #[instrument(skip_all)]
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let request = self
            .http_client
            .get(url)
            .query(query)
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(method = "GET", url = %request.url(), "API request");

        let response = match self.http_client.execute(request).await {
            Ok(response) => response,
            Err(err) if err.is_connect() => {
                tracing::error!(path, error = %err, "API request error");
                bail!(NETWORK_ERROR_MESSAGE);
            }
            Err(err) => {
                tracing::error!(path, error = %err, "API request error");
                return Err(err).with_context(|| format!("request failed: {path}"));
            }
        };

        let status = response.status();
        tracing::debug!(status = status.as_u16(), path, "API response");

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            tracing::error!(status = status.as_u16(), path, body = %body, "API response error");
            match status {
                StatusCode::NOT_FOUND => bail!(NOT_FOUND_MESSAGE),
                StatusCode::INTERNAL_SERVER_ERROR => bail!(SERVER_ERROR_MESSAGE),
                _ => bail!("API error (HTTP {status}): {body}"),
            }
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<Value, _> = serde_json::from_str(&body);
        let parsed =
            raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }
}

impl MovieApi for ApiClient {
    #[instrument(skip_all)]
    async fn fetch_movies(&self, params: &QueryParams) -> Result<Value> {
        self.get_json("movies", params.as_slice()).await
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn fetch_movie(&self, id: &MovieId) -> Result<Value> {
        let path = format!("movies/{}", urlencoding::encode(&id.to_string()));
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn fetch_genres(&self) -> Result<Value> {
        self.get_json("genres", &[]).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::params::to_query_params;
    use crate::types::SearchFilters;

    fn client_for(server: &MockServer) -> ApiClient {
        let base_url = format!("{}/api/", server.uri());
        ApiClient::builder()
            .base_url(base_url.parse().unwrap())
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = ApiClient::builder().build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_builder_default_base_url() {
        // Arrange & Act
        let client = ApiClient::builder().user_agent("test/0.0.0").build().unwrap();

        // Assert
        assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_builder_with_custom_base_url() {
        // Arrange
        let custom_url = Url::parse("http://localhost:8080/api/").unwrap();

        // Act
        let client = ApiClient::builder()
            .base_url(custom_url.clone())
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url, custom_url);
    }

    #[tokio::test]
    async fn test_fetch_movies_sends_mapped_params() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/movies"))
            .and(query_param("q", "matrix"))
            .and(query_param("page", "1"))
            .and(query_param("limit", "20"))
            .and(header("Content-Type", "application/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"data":[{"id":3,"title":"The Matrix"}]}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let params = to_query_params(&SearchFilters::new("matrix"));

        // Act
        let body = client.fetch_movies(&params).await.unwrap();

        // Assert
        assert_eq!(body["data"][0]["title"], "The Matrix");
    }

    #[tokio::test]
    async fn test_fetch_movie_by_id() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/movies/603"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"data":{"id":603,"title":"The Matrix"}}"#),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let body = client.fetch_movie(&MovieId::Number(603)).await.unwrap();

        // Assert
        assert_eq!(body["data"]["id"], 603);
    }

    #[tokio::test]
    async fn test_fetch_genres() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/genres"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"data":[{"id":1,"name":"Action"}]}"#),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let body = client.fetch_genres().await.unwrap();

        // Assert
        assert_eq!(body["data"][0]["name"], "Action");
    }

    #[tokio::test]
    async fn test_not_found_is_translated() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let result = client.fetch_movie(&MovieId::Number(1)).await;

        // Assert
        assert_eq!(result.unwrap_err().to_string(), "Resource not found");
    }

    #[tokio::test]
    async fn test_server_error_is_translated() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let result = client.fetch_genres().await;

        // Assert
        assert_eq!(
            result.unwrap_err().to_string(),
            "Server error. Please try again later."
        );
    }

    #[tokio::test]
    async fn test_other_status_passes_through() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let err = client.fetch_genres().await.unwrap_err().to_string();

        // Assert
        assert!(err.contains("503"));
        assert!(err.contains("maintenance"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_an_error() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let err = client.fetch_genres().await.unwrap_err().to_string();

        // Assert
        assert!(err.contains("failed to decode JSON response"));
    }

    #[tokio::test]
    async fn test_timeout_is_an_error() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("[]")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let client = ApiClient::builder()
            .base_url(format!("{}/api/", mock_server.uri()).parse().unwrap())
            .user_agent("test/0.0.0")
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();

        // Act
        let result = client.fetch_genres().await;

        // Assert
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Arrange
        let client = ApiClient::builder()
            .base_url(Url::parse("http://127.0.0.1:1/api/").unwrap())
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let result = client.fetch_genres().await;

        // Assert
        assert_eq!(
            result.unwrap_err().to_string(),
            "Network error. Please check your connection."
        );
    }
}
