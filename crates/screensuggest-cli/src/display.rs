//! Display formatting for movie records.

use chrono::{DateTime, Datelike, Local, NaiveDate};
use screensuggest_api::Movie;

/// Earliest release year accepted by the year filters.
pub const YEAR_MIN: i32 = 1900;

/// Lowest accepted rating.
pub const RATING_MIN: f64 = 0.0;

/// Highest accepted rating.
pub const RATING_MAX: f64 = 10.0;

/// Poster shown for movies without one.
pub const NO_POSTER_URL: &str = "https://placehold.co/300x450/1a1a1a/ffffff?text=No+Poster";

/// Avatar shown for commenters without one.
pub const USER_AVATAR_URL: &str = "https://placehold.co/40x40/D97706/ffffff?text=U";

/// Latest release year accepted by the year filters (the current year).
#[must_use]
pub fn year_max() -> i32 {
    Local::now().year()
}

/// Star state for one of the five rating stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Star {
    /// Filled.
    Full,
    /// Half filled.
    Half,
    /// Empty.
    Empty,
}

impl Star {
    const fn symbol(self) -> char {
        match self {
            Self::Full => '★',
            Self::Half => '⯪',
            Self::Empty => '☆',
        }
    }
}

/// Formats minutes as `"2h 28m"`, `"2h"` or `"45m"`.
#[must_use]
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Formats a rating with one decimal; absent or non-numeric is `"0.0"`.
#[must_use]
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r.is_finite() => format!("{r:.1}"),
        _ => String::from("0.0"),
    }
}

/// Cuts `text` to `length` characters, trimming and appending `"..."`.
#[must_use]
pub fn truncate_text(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return String::from(text);
    }
    let cut: String = text.chars().take(length).collect();
    format!("{}...", cut.trim())
}

/// Formats a date as `"July 16, 2010"`.
///
/// Input that is not a recognizable date is returned unchanged.
#[must_use]
pub fn format_date(input: &str) -> String {
    let trimmed = input.trim();
    let date = DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            ["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y"]
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        });
    date.map_or_else(
        || String::from(input),
        |d| d.format("%B %-d, %Y").to_string(),
    )
}

/// Placeholder poster URL carrying the movie title.
#[must_use]
pub fn placeholder_image(title: &str) -> String {
    format!(
        "https://placehold.co/300x450/1a1a1a/ffffff?text={}",
        urlencoding::encode(title)
    )
}

/// Splits a 0-10 rating into five stars on a 0-5 scale.
#[must_use]
pub fn generate_stars(rating: f64) -> [Star; 5] {
    let scaled = rating / 2.0;
    let mut stars = [Star::Empty; 5];
    for (star, position) in stars.iter_mut().zip(1_u8..) {
        let position = f64::from(position);
        *star = if scaled >= position {
            Star::Full
        } else if scaled >= position - 0.5 {
            Star::Half
        } else {
            Star::Empty
        };
    }
    stars
}

/// Renders [`generate_stars`] as text.
#[must_use]
pub fn render_stars(rating: Option<f64>) -> String {
    generate_stars(rating.unwrap_or(0.0))
        .iter()
        .map(|s| s.symbol())
        .collect()
}

/// One tab-separated result row.
#[must_use]
pub fn movie_row(movie: &Movie) -> String {
    format!(
        "{}\t{}\t{}\t{} {}\t{}\t{}",
        movie.id,
        truncate_text(&movie.title, 32),
        movie
            .year
            .map_or_else(|| String::from("-"), |y| y.to_string()),
        render_stars(movie.rating),
        format_rating(movie.rating),
        format_duration(movie.duration_minutes),
        movie.genres.join(", "),
    )
}

/// Poster URL, or a titled placeholder.
#[must_use]
pub fn poster_url(movie: &Movie) -> String {
    movie
        .poster_url
        .clone()
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| {
            if movie.title.is_empty() {
                String::from(NO_POSTER_URL)
            } else {
                placeholder_image(&movie.title)
            }
        })
}
