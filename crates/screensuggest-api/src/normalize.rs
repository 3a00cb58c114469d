//! Field normalization from raw API records into canonical types.
//!
//! The upstream API is not consistent about field names, so every lookup
//! walks a list of candidate keys and takes the first present, non-empty
//! value. Normalization never fails: a missing or mistyped field falls back
//! to its default.

use chrono::{DateTime, Datelike, NaiveDate};
use serde_json::Value;

use super::types::{Comment, Genre, Movie, MovieDetails, MovieId, UNKNOWN_TITLE};

/// Date formats tried when deriving a year from `releaseDate`.
const RELEASE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

/// Normalizes one raw movie record.
#[must_use]
pub fn normalize_movie(raw: &Value) -> Movie {
    Movie {
        id: first_id(raw, &["id", "_id"]).unwrap_or_default(),
        title: first_str(raw, &["title", "originalTitle"])
            .unwrap_or_else(|| String::from(UNKNOWN_TITLE)),
        year: first_i32(raw, &["year"]).or_else(|| release_year(raw)),
        poster_url: first_str(raw, &["poster_url", "posterUrl"]),
        rating: first_f64(raw, &["rating", "imdbRating"]),
        genres: string_list(raw.get("genres")),
        director: first_str(raw, &["director"]).unwrap_or_default(),
        cast: string_list(raw.get("cast")),
        synopsis: first_str(raw, &["synopsis", "description"]).unwrap_or_default(),
        duration_minutes: first_u32(raw, &["duration", "runtime"]).unwrap_or(0),
    }
}

/// Normalizes a raw movie detail record.
///
/// `requested_id` is used when the record carries no ID of its own.
#[must_use]
pub fn normalize_movie_details(raw: &Value, requested_id: &MovieId) -> MovieDetails {
    let mut movie = normalize_movie(raw);
    if first_id(raw, &["id", "_id"]).is_none() {
        movie.id = requested_id.clone();
    }

    MovieDetails {
        movie,
        release_date: first_str(raw, &["release_date", "releaseDate"]),
        comments: array_of(raw, &["comments"])
            .iter()
            .map(normalize_comment)
            .collect(),
        similar_movies: array_of(raw, &["similar_movies", "similarMovies"])
            .iter()
            .map(normalize_movie)
            .collect(),
        votes_up: first_u32(raw, &["votes_up", "votesUp"]).unwrap_or(0),
        votes_down: first_u32(raw, &["votes_down", "votesDown"]).unwrap_or(0),
    }
}

/// Normalizes a raw comment record.
#[must_use]
pub fn normalize_comment(raw: &Value) -> Comment {
    Comment {
        id: first_id(raw, &["id", "_id"]).unwrap_or_default(),
        user_name: first_str(raw, &["user_name", "userName"]).unwrap_or_default(),
        user_avatar_url: first_str(raw, &["user_avatar", "userAvatar", "userAvatarUrl"])
            .unwrap_or_default(),
        content: first_str(raw, &["content"]).unwrap_or_default(),
        created_at: first_str(raw, &["created_at", "createdAt"]).unwrap_or_default(),
    }
}

/// Normalizes a raw genre record. Returns `None` for records without a name.
#[must_use]
pub fn normalize_genre(raw: &Value) -> Option<Genre> {
    let name = first_str(raw, &["name"])?;
    Some(Genre {
        id: first_u32(raw, &["id"]).unwrap_or(0),
        name,
    })
}

/// Returns the first array found under any of `keys`, or an empty slice.
fn array_of<'a>(raw: &'a Value, keys: &[&str]) -> &'a [Value] {
    keys.iter()
        .find_map(|key| raw.get(*key).and_then(Value::as_array))
        .map_or(&[], Vec::as_slice)
}

/// First non-empty string under any of `keys`.
fn first_str(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        raw.get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    })
}

/// First non-zero number (or numeric string) under any of `keys`.
fn first_f64(raw: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|key| raw.get(*key).and_then(as_f64).filter(|n| n.abs() > f64::EPSILON))
}

/// First positive integer under any of `keys`.
fn first_u32(raw: &Value, keys: &[&str]) -> Option<u32> {
    keys.iter().find_map(|key| {
        raw.get(*key)
            .and_then(as_whole)
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0)
    })
}

/// First non-zero `i32` under any of `keys`.
fn first_i32(raw: &Value, keys: &[&str]) -> Option<i32> {
    keys.iter().find_map(|key| {
        raw.get(*key)
            .and_then(as_whole)
            .and_then(|n| i32::try_from(n).ok())
            .filter(|n| *n != 0)
    })
}

/// First usable ID: non-zero number or non-empty string.
fn first_id(raw: &Value, keys: &[&str]) -> Option<MovieId> {
    keys.iter().find_map(|key| match raw.get(*key)? {
        number @ Value::Number(_) => as_whole(number)
            .filter(|n| *n != 0)
            .map(MovieId::Number),
        Value::String(s) if !s.is_empty() => Some(MovieId::Text(s.clone())),
        _ => None,
    })
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Integer value of a number or numeric string.
///
/// Whole floats such as `170.0` count when they lie within the `i32`/`u32`
/// span; a fractional part makes the value unusable.
#[must_use]
pub fn as_whole(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_f64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse()
                .ok()
                .or_else(|| s.parse().ok().and_then(whole_f64))
        }
        _ => None,
    }
}

fn whole_f64(f: f64) -> Option<i64> {
    let span = f64::from(i32::MIN)..=f64::from(u32::MAX);
    if f.fract() != 0.0 || !span.contains(&f) {
        return None;
    }
    // In range and integral, so the cast is exact.
    #[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
    let n = f as i64;
    Some(n)
}

/// Collects a list of names. Accepts plain strings or `{ "name": ... }` objects.
fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) if !s.is_empty() => Some(s.clone()),
                    Value::Object(_) => first_str(item, &["name"]),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Derives the year component of `releaseDate` / `release_date`.
fn release_year(raw: &Value) -> Option<i32> {
    let date = first_str(raw, &["releaseDate", "release_date"])?;
    parse_year(&date)
}

/// Parses the year out of a free-form date string.
///
/// Tries RFC 3339, a handful of common date layouts, and finally a bare
/// leading four-digit year.
fn parse_year(date: &str) -> Option<i32> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.year());
    }
    if let Some(d) = RELEASE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
    {
        return Some(d.year());
    }
    date.get(..4)
        .filter(|prefix| prefix.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|prefix| prefix.parse().ok())
}
