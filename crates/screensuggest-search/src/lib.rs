//! Search state for screensuggest.
//!
//! Presentation-facing state holders over a fallible [`Catalog`]: a
//! debounced [`MovieSearch`] and a [`GenreList`].

mod catalog;
mod genres;
mod guard;
mod search;

#[allow(clippy::module_name_repetitions)]
pub use catalog::{Catalog, LocalCatalog};
pub use genres::GenreList;
pub use search::{DEFAULT_DEBOUNCE, MovieSearch, SearchSnapshot};
