//! `GenreList` - genre state for filter pickers.

use std::sync::Mutex;

use screensuggest_api::Genre;
use tracing::instrument;

use super::catalog::Catalog;
use super::guard::{Loading, LoadingGuard, lock};

#[derive(Debug, Default)]
struct GenreState {
    genres: Vec<Genre>,
    loading: bool,
    error: Option<String>,
    latest: u64,
}

impl Loading for GenreState {
    fn finish(&mut self, seq: u64) {
        if seq == self.latest {
            self.loading = false;
        }
    }
}

/// Genre list loaded from a [`Catalog`].
pub struct GenreList<C> {
    catalog: C,
    state: Mutex<GenreState>,
}

impl<C: Catalog + Sync> GenreList<C> {
    /// Creates an empty list; call [`load_genres`](Self::load_genres) to fill it.
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            state: Mutex::new(GenreState::default()),
        }
    }

    /// Loads the genres, replacing any previous list.
    ///
    /// A failure empties the list and records the error.
    #[instrument(skip_all)]
    pub async fn load_genres(&self) {
        let seq = {
            let mut state = lock(&self.state);
            state.latest = state.latest.wrapping_add(1);
            state.loading = true;
            state.error = None;
            state.latest
        };
        let _loading = LoadingGuard::new(&self.state, seq);

        let result = self.catalog.genres().await;
        let mut state = lock(&self.state);
        if state.latest != seq {
            return;
        }
        // `state` drops before `_loading`, which relocks.
        match result {
            Ok(genres) => {
                tracing::debug!(count = genres.len(), "genres loaded");
                state.genres = genres;
            }
            Err(err) => {
                tracing::warn!(error = %err, "loading genres failed");
                state.error = Some(err.to_string());
                state.genres.clear();
            }
        }
    }
}

impl<C> GenreList<C> {
    /// Loaded genres.
    #[must_use]
    pub fn genres(&self) -> Vec<Genre> {
        lock(&self.state).genres.clone()
    }

    /// Whether a load is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        lock(&self.state).loading
    }

    /// Message of the last failed load.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }
}

impl<C> std::fmt::Debug for GenreList<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenreList")
            .field("state", &*lock(&self.state))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use anyhow::{Result, bail};
    use screensuggest_api::{ResultPage, SearchFilters};

    use super::*;

    struct FixedCatalog {
        fail: bool,
    }

    impl Catalog for FixedCatalog {
        async fn search(&self, _filters: &SearchFilters) -> Result<ResultPage> {
            Ok(ResultPage::default())
        }

        async fn genres(&self) -> Result<Vec<Genre>> {
            if self.fail {
                bail!("Server error. Please try again later.");
            }
            Ok(vec![Genre {
                id: 3,
                name: String::from("Drama"),
            }])
        }
    }

    #[tokio::test]
    async fn test_load_genres() {
        // Arrange
        let list = GenreList::new(FixedCatalog { fail: false });

        // Act
        list.load_genres().await;

        // Assert
        assert_eq!(list.genres()[0].name, "Drama");
        assert!(!list.loading());
        assert_eq!(list.error(), None);
    }

    #[tokio::test]
    async fn test_load_genres_failure() {
        // Arrange
        let list = GenreList::new(FixedCatalog { fail: true });

        // Act
        list.load_genres().await;

        // Assert
        assert!(list.genres().is_empty());
        assert!(!list.loading());
        assert_eq!(
            list.error().as_deref(),
            Some("Server error. Please try again later.")
        );
    }
}
