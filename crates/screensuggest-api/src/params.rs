//! Mapping from `SearchFilters` to upstream `GET /movies` query parameters.

use super::types::SearchFilters;

/// Ordered outbound query parameters.
///
/// Setting a key that is already present overwrites its value in place, so
/// when several filter fields map to the same parameter the last one applied
/// wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Sets `key` to `value`, replacing any earlier value.
    pub fn set(&mut self, key: &'static str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the parameters as key/value pairs.
    #[must_use]
    pub fn as_slice(&self) -> &[(&'static str, String)] {
        &self.0
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn set_text(&mut self, key: &'static str, value: Option<&str>) {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.set(key, v);
        }
    }

    fn set_year(&mut self, key: &'static str, value: Option<i32>) {
        if let Some(v) = value.filter(|v| *v != 0) {
            self.set(key, v.to_string());
        }
    }

    fn set_rating(&mut self, key: &'static str, value: Option<f64>) {
        if let Some(v) = value.filter(|v| v.is_finite() && v.abs() > f64::EPSILON) {
            self.set(key, v.to_string());
        }
    }
}

/// Builds the outbound query parameters for a movie search.
///
/// Empty strings and zero numbers are treated as unset and omitted.
/// `page` and `limit` are always present.
#[must_use]
pub fn to_query_params(filters: &SearchFilters) -> QueryParams {
    let mut params = QueryParams::new();
    params.set("page", filters.effective_page().to_string());
    params.set("limit", filters.effective_limit().to_string());

    let short = filters.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    params.set_text("q", short.or(Some(filters.query.as_str())));

    params.set_text("genre", filters.genre.as_deref());

    // Single-sided minimum first, so explicit min/max pairs override it.
    params.set_rating("imdbRatingMin", filters.rating_from);
    params.set_rating("imdbRatingMin", filters.rating_min);
    params.set_rating("imdbRatingMax", filters.rating_max);
    params.set_rating("imdbRatingMin", filters.imdb_rating_min);
    params.set_rating("imdbRatingMax", filters.imdb_rating_max);

    params.set_year("yearStart", filters.year_from);
    params.set_year("yearEnd", filters.year_to);
    params.set_year("yearStart", filters.year_start);
    params.set_year("yearEnd", filters.year_end);

    if let Some(ref sort_by) = filters.sort_by {
        params.set_text("sortBy", Some(sort_by.as_wire()));
    }
    if let Some(order) = filters.sort_order {
        params.set("sortOrder", order.as_wire());
    }

    params
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::types::{SortKey, SortOrder};

    #[test]
    fn test_defaults_only_page_and_limit() {
        // Arrange
        let filters = SearchFilters::default();

        // Act
        let params = to_query_params(&filters);

        // Assert
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("page"), Some("1"));
        assert_eq!(params.get("limit"), Some("20"));
    }

    #[test]
    fn test_zero_page_and_limit_fall_back_to_defaults() {
        // Arrange
        let filters = SearchFilters {
            page: 0,
            limit: 0,
            ..SearchFilters::default()
        };

        // Act
        let params = to_query_params(&filters);

        // Assert
        assert_eq!(params.get("page"), Some("1"));
        assert_eq!(params.get("limit"), Some("20"));
    }

    #[test]
    fn test_query_sent_as_q() {
        // Arrange
        let filters = SearchFilters::new("matrix");

        // Act
        let params = to_query_params(&filters);

        // Assert
        assert_eq!(params.get("q"), Some("matrix"));
        assert!(!params.contains("query"));
    }

    #[test]
    fn test_short_alias_wins_over_query() {
        // Arrange
        let filters = SearchFilters {
            q: Some(String::from("alien")),
            ..SearchFilters::new("matrix")
        };

        // Act & Assert
        assert_eq!(to_query_params(&filters).get("q"), Some("alien"));
    }

    #[test]
    fn test_empty_strings_are_omitted() {
        // Arrange
        let filters = SearchFilters {
            q: Some(String::new()),
            genre: Some(String::from("  ")),
            ..SearchFilters::new("")
        };

        // Act
        let params = to_query_params(&filters);

        // Assert
        assert!(!params.contains("q"));
        assert!(!params.contains("genre"));
    }

    #[test]
    fn test_rating_from_maps_to_min() {
        // Arrange
        let filters = SearchFilters {
            rating_from: Some(7.5),
            ..SearchFilters::default()
        };

        // Act
        let params = to_query_params(&filters);

        // Assert
        assert_eq!(params.get("imdbRatingMin"), Some("7.5"));
        assert!(!params.contains("imdbRatingMax"));
    }

    #[test]
    fn test_explicit_rating_bounds_override_rating_from() {
        // Arrange
        let filters = SearchFilters {
            rating_from: Some(5.0),
            rating_min: Some(6.0),
            rating_max: Some(8.0),
            imdb_rating_min: Some(7.0),
            ..SearchFilters::default()
        };

        // Act
        let params = to_query_params(&filters);

        // Assert
        assert_eq!(params.get("imdbRatingMin"), Some("7"));
        assert_eq!(params.get("imdbRatingMax"), Some("8"));
    }

    #[test]
    fn test_zero_rating_is_omitted() {
        // Arrange
        let filters = SearchFilters {
            rating_from: Some(0.0),
            ..SearchFilters::default()
        };

        // Act & Assert
        assert!(!to_query_params(&filters).contains("imdbRatingMin"));
    }

    #[test]
    fn test_year_aliases_later_overwrites_earlier() {
        // Arrange
        let filters = SearchFilters {
            year_from: Some(1990),
            year_to: Some(1999),
            year_start: Some(2000),
            ..SearchFilters::default()
        };

        // Act
        let params = to_query_params(&filters);

        // Assert
        assert_eq!(params.get("yearStart"), Some("2000"));
        assert_eq!(params.get("yearEnd"), Some("1999"));
    }

    #[test]
    fn test_year_range_not_validated() {
        // Arrange
        let filters = SearchFilters {
            year_from: Some(2020),
            year_to: Some(1980),
            ..SearchFilters::default()
        };

        // Act
        let params = to_query_params(&filters);

        // Assert
        assert_eq!(params.get("yearStart"), Some("2020"));
        assert_eq!(params.get("yearEnd"), Some("1980"));
    }

    #[test]
    fn test_sort_mapping_and_order_upper_case() {
        // Arrange
        let filters = SearchFilters {
            sort_by: Some(SortKey::Popularity),
            sort_order: Some("desc".parse::<SortOrder>().unwrap()),
            ..SearchFilters::default()
        };

        // Act
        let params = to_query_params(&filters);

        // Assert
        assert_eq!(params.get("sortBy"), Some("imdbRating"));
        assert_eq!(params.get("sortOrder"), Some("DESC"));
    }

    #[test]
    fn test_unknown_sort_key_passes_through() {
        // Arrange
        let filters = SearchFilters {
            sort_by: Some(SortKey::Other(String::from("createdAt"))),
            ..SearchFilters::default()
        };

        // Act & Assert
        assert_eq!(to_query_params(&filters).get("sortBy"), Some("createdAt"));
    }

    #[test]
    fn test_set_overwrites_in_place() {
        // Arrange
        let mut params = QueryParams::new();

        // Act
        params.set("a", "1");
        params.set("b", "2");
        params.set("a", "3");

        // Assert
        assert_eq!(
            params.as_slice(),
            &[("a", String::from("3")), ("b", String::from("2"))]
        );
    }
}
