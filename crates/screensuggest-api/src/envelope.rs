//! Response envelope unwrapping.
//!
//! The movie API has shipped several envelope layouts over time:
//!
//! ```text
//! { "data": { "data": [...], "pagination": { "total_items", "current_page", "total_pages" } } }
//! { "data": [...], "pagination": { ... } }
//! { "data": [...], "total": 42, "page": 1, "totalPages": 3 }
//! [...]
//! ```
//!
//! Extraction is total: anything unrecognized yields an empty result.

use serde_json::Value;

use super::normalize::{as_whole, normalize_genre, normalize_movie, normalize_movie_details};
use super::types::{Genre, MovieDetails, MovieId, ResultPage};

/// Unwraps a `GET /movies` body into a canonical page.
///
/// `requested_page` and `limit` fill in metadata the body does not carry:
/// `page` defaults to the requested page, `total` to the number of items,
/// and `total_pages` to `ceil(total / limit)`.
#[must_use]
pub fn unwrap_page(body: &Value, requested_page: u32, limit: u32) -> ResultPage {
    let items: Vec<_> = result_array(body).iter().map(normalize_movie).collect();
    let pagination = pagination_object(body);

    let fallback_total = u32::try_from(items.len()).unwrap_or(u32::MAX);
    let total = pagination
        .and_then(|p| positive(p, "total_items"))
        .or_else(|| positive(body, "total"))
        .unwrap_or(fallback_total);
    let page = pagination
        .and_then(|p| positive(p, "current_page"))
        .or_else(|| positive(body, "page"))
        .unwrap_or(requested_page);
    let total_pages = pagination
        .and_then(|p| positive(p, "total_pages"))
        .or_else(|| positive(body, "totalPages"))
        .unwrap_or_else(|| total_pages_for(total, limit));

    ResultPage {
        items,
        total,
        page,
        total_pages,
    }
}

/// Unwraps a `GET /movies/{id}` body into a detail record.
#[must_use]
pub fn unwrap_details(body: &Value, requested_id: &MovieId) -> MovieDetails {
    let record = body.get("data").filter(|d| d.is_object()).unwrap_or(body);
    normalize_movie_details(record, requested_id)
}

/// Unwraps a `GET /genres` body into a genre list.
#[must_use]
pub fn unwrap_genres(body: &Value) -> Vec<Genre> {
    result_array(body)
        .iter()
        .filter_map(normalize_genre)
        .collect()
}

/// `ceil(total / limit)`, with a zero limit treated as the default page size.
#[must_use]
pub fn total_pages_for(total: u32, limit: u32) -> u32 {
    let limit = if limit == 0 {
        crate::types::DEFAULT_LIMIT
    } else {
        limit
    };
    total.div_ceil(limit)
}

/// Locates the result array: `data.data`, then `data`, then a bare array.
fn result_array(body: &Value) -> &[Value] {
    body.get("data")
        .and_then(|d| d.get("data"))
        .and_then(Value::as_array)
        .or_else(|| body.get("data").and_then(Value::as_array))
        .or_else(|| body.as_array())
        .map_or(&[], Vec::as_slice)
}

/// Locates the `pagination` object under `data` or at the top level.
fn pagination_object(body: &Value) -> Option<&Value> {
    body.get("data")
        .and_then(|d| d.get("pagination"))
        .or_else(|| body.get("pagination"))
        .filter(|p| p.is_object())
}

/// Positive integer field (numbers, whole floats or numeric strings).
fn positive(value: &Value, key: &str) -> Option<u32> {
    value
        .get(key)
        .and_then(as_whole)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0)
}
