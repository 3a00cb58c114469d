//! `MovieSearch` - presentation-facing search state.
//!
//! Holds the current result list, pagination counters, loading/error
//! flags and the active filter set. `loading` and `error` are independent,
//! so a stale error can sit next to freshly loaded movies after a failed
//! "load more".
//!
//! Query edits are debounced: every [`MovieSearch::set_query`] aborts the
//! pending timer and starts a new one, so a burst of keystrokes produces a
//! single trailing search. Every issued search carries a sequence number
//! and only the latest one may write results.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use screensuggest_api::{DEFAULT_PAGE, Movie, ResultPage, SearchFilters};
use tokio::task::JoinHandle;
use tracing::instrument;

use super::catalog::Catalog;
use super::guard::{Loading, LoadingGuard, lock};

/// Delay between the last query edit and the search it triggers.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Point-in-time copy of the search state.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot {
    /// Loaded movies, in result order across all loaded pages.
    pub movies: Vec<Movie>,
    /// Whether a request owns the state.
    pub loading: bool,
    /// Message of the last failed request.
    pub error: Option<String>,
    /// Total matches reported by the last full search.
    pub total: u32,
    /// Last successfully loaded page (1-based).
    pub current_page: u32,
    /// Page count reported by the catalog.
    pub total_pages: u32,
    /// Active filters; `filters.page` is the page last requested.
    pub filters: SearchFilters,
}

impl SearchSnapshot {
    const fn new(filters: SearchFilters) -> Self {
        Self {
            movies: Vec::new(),
            loading: false,
            error: None,
            total: 0,
            current_page: DEFAULT_PAGE,
            total_pages: 1,
            filters,
        }
    }

    /// `true` when at least one movie is loaded.
    #[must_use]
    pub fn has_results(&self) -> bool {
        !self.movies.is_empty()
    }

    /// `true` when pages past `current_page` exist.
    #[must_use]
    pub const fn has_more_pages(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Fields whose change re-runs the search immediately.
#[derive(PartialEq)]
struct Watched {
    genre: Option<String>,
    year_from: Option<i32>,
    year_to: Option<i32>,
    rating_from: Option<f64>,
}

impl Watched {
    fn of(filters: &SearchFilters) -> Self {
        Self {
            genre: filters.genre.clone(),
            year_from: filters.year_from,
            year_to: filters.year_to,
            rating_from: filters.rating_from,
        }
    }
}

#[derive(Debug)]
struct SearchState {
    view: SearchSnapshot,
    /// Sequence number of the most recently issued request.
    latest: u64,
}

impl SearchState {
    /// Marks a new request as the owner of the state.
    fn issue(&mut self) -> u64 {
        self.latest = self.latest.wrapping_add(1);
        self.view.loading = true;
        self.latest
    }

    fn is_stale(&self, seq: u64) -> bool {
        if seq == self.latest {
            return false;
        }
        tracing::debug!(seq, latest = self.latest, "discarding stale search response");
        true
    }

    /// Replaces the result list with a full search response.
    fn apply_search(&mut self, seq: u64, result: Result<ResultPage>) {
        if self.is_stale(seq) {
            return;
        }
        let view = &mut self.view;
        match result {
            Ok(page) => {
                view.movies = page.items;
                view.total = page.total;
                view.current_page = non_zero_or(page.page, DEFAULT_PAGE);
                view.total_pages = non_zero_or(page.total_pages, 1);
            }
            Err(err) => {
                tracing::warn!(error = %err, "movie search failed");
                view.error = Some(err.to_string());
                view.movies.clear();
                view.total = 0;
            }
        }
    }

    /// Appends a "load more" response, or reverts the requested page.
    fn apply_next_page(&mut self, seq: u64, result: Result<ResultPage>) {
        if self.is_stale(seq) {
            return;
        }
        let view = &mut self.view;
        match result {
            Ok(page) => {
                view.movies.extend(page.items);
                view.current_page = non_zero_or(page.page, view.filters.page);
                view.total_pages = non_zero_or(page.total_pages, view.total_pages);
            }
            Err(err) => {
                tracing::warn!(error = %err, page = view.filters.page, "loading more movies failed");
                view.error = Some(err.to_string());
                view.filters.page = view.current_page;
            }
        }
    }
}

impl Loading for SearchState {
    fn finish(&mut self, seq: u64) {
        if seq == self.latest {
            self.view.loading = false;
        }
    }
}

const fn non_zero_or(value: u32, fallback: u32) -> u32 {
    if value == 0 { fallback } else { value }
}

struct Shared<C> {
    catalog: C,
    state: Mutex<SearchState>,
    /// Pending debounce timer, if any.
    pending: Mutex<Option<JoinHandle<()>>>,
    debounce: Duration,
    /// Filters restored by `clear_filters`.
    defaults: SearchFilters,
}

impl<C: Catalog + Sync> Shared<C> {
    #[instrument(skip_all, fields(reset_page = reset_page))]
    async fn search(&self, reset_page: bool) {
        let (seq, filters) = {
            let mut state = lock(&self.state);
            if reset_page {
                state.view.filters.page = DEFAULT_PAGE;
                state.view.current_page = DEFAULT_PAGE;
            }
            state.view.error = None;
            (state.issue(), state.view.filters.clone())
        };
        let _loading = LoadingGuard::new(&self.state, seq);

        tracing::debug!(seq, query = %filters.query, page = filters.page, "search issued");
        let result = self.catalog.search(&filters).await;
        lock(&self.state).apply_search(seq, result);
    }

    #[instrument(skip_all)]
    async fn load_more(&self) {
        let (seq, filters) = {
            let mut state = lock(&self.state);
            if state.view.loading || !state.view.has_more_pages() {
                return;
            }
            state.view.filters.page = state.view.current_page.saturating_add(1);
            (state.issue(), state.view.filters.clone())
        };
        let _loading = LoadingGuard::new(&self.state, seq);

        tracing::debug!(seq, page = filters.page, "next page issued");
        let result = self.catalog.search(&filters).await;
        lock(&self.state).apply_next_page(seq, result);
    }
}

/// Search state machine over a [`Catalog`].
pub struct MovieSearch<C> {
    shared: Arc<Shared<C>>,
}

impl<C: Catalog + Send + Sync + 'static> MovieSearch<C> {
    /// Creates a search with default filters and a 300 ms debounce.
    pub fn new(catalog: C) -> Self {
        Self::with_config(catalog, DEFAULT_DEBOUNCE, SearchFilters::default())
    }

    /// Creates a search with an explicit debounce delay and default filters.
    ///
    /// `defaults` is both the initial filter set and the one
    /// [`clear_filters`](Self::clear_filters) restores.
    pub fn with_config(catalog: C, debounce: Duration, defaults: SearchFilters) -> Self {
        Self {
            shared: Arc::new(Shared {
                catalog,
                state: Mutex::new(SearchState {
                    view: SearchSnapshot::new(defaults.clone()),
                    latest: 0,
                }),
                pending: Mutex::new(None),
                debounce,
                defaults,
            }),
        }
    }

    /// Returns the underlying catalog.
    pub fn catalog(&self) -> &C {
        &self.shared.catalog
    }

    /// Runs a search with the current filters.
    ///
    /// With `reset_page`, the request is for page 1. Results replace the
    /// current list; a failure empties it and records the error.
    pub async fn perform_search(&self, reset_page: bool) {
        self.shared.search(reset_page).await;
    }

    /// Fetches the page after `current_page` and appends it.
    ///
    /// Does nothing while a request is in flight or when no further page
    /// exists. A failure keeps the loaded movies and records the error.
    pub async fn load_more(&self) {
        self.shared.load_more().await;
    }

    /// Updates the query and schedules a debounced search from page 1.
    ///
    /// The timer runs on the current tokio runtime. Outside a runtime only
    /// the query is updated and a warning is logged.
    pub fn set_query(&self, query: impl Into<String>) {
        lock(&self.shared.state).view.filters.query = query.into();

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("no tokio runtime, debounced search not scheduled");
            return;
        };
        let shared = Arc::clone(&self.shared);
        let timer = runtime.spawn(async move {
            tokio::time::sleep(shared.debounce).await;
            shared.search(true).await;
        });

        if let Some(previous) = lock(&self.shared.pending).replace(timer) {
            previous.abort();
        }
    }

    /// Applies `edit` to the filters and searches once from page 1.
    pub async fn set_filters(&self, edit: impl FnOnce(&mut SearchFilters)) {
        edit(&mut lock(&self.shared.state).view.filters);
        self.shared.search(true).await;
    }

    /// Applies `edit` to the filters, searching only if a watched field
    /// (genre, year range start/end, minimum rating) changed.
    ///
    /// Returns whether a search ran.
    pub async fn edit_filters(&self, edit: impl FnOnce(&mut SearchFilters)) -> bool {
        let changed = {
            let mut state = lock(&self.shared.state);
            let before = Watched::of(&state.view.filters);
            edit(&mut state.view.filters);
            Watched::of(&state.view.filters) != before
        };
        if changed {
            self.shared.search(true).await;
        }
        changed
    }

    /// Restores the default filters and searches once.
    pub async fn clear_filters(&self) {
        lock(&self.shared.state).view.filters = self.shared.defaults.clone();
        self.shared.search(true).await;
    }
}

impl<C> MovieSearch<C> {
    /// Returns a copy of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> SearchSnapshot {
        lock(&self.shared.state).view.clone()
    }

    /// Loaded movies.
    #[must_use]
    pub fn movies(&self) -> Vec<Movie> {
        lock(&self.shared.state).view.movies.clone()
    }

    /// Whether a request is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        lock(&self.shared.state).view.loading
    }

    /// Message of the last failed request.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        lock(&self.shared.state).view.error.clone()
    }

    /// Total matches.
    #[must_use]
    pub fn total(&self) -> u32 {
        lock(&self.shared.state).view.total
    }

    /// Last loaded page.
    #[must_use]
    pub fn current_page(&self) -> u32 {
        lock(&self.shared.state).view.current_page
    }

    /// Page count.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        lock(&self.shared.state).view.total_pages
    }

    /// Active filters.
    #[must_use]
    pub fn filters(&self) -> SearchFilters {
        lock(&self.shared.state).view.filters.clone()
    }

    /// `true` when at least one movie is loaded.
    #[must_use]
    pub fn has_results(&self) -> bool {
        lock(&self.shared.state).view.has_results()
    }

    /// `true` when pages past the current one exist.
    #[must_use]
    pub fn has_more_pages(&self) -> bool {
        lock(&self.shared.state).view.has_more_pages()
    }
}

impl<C> Drop for MovieSearch<C> {
    fn drop(&mut self) {
        if let Some(timer) = lock(&self.shared.pending).take() {
            timer.abort();
        }
    }
}

impl<C> std::fmt::Debug for MovieSearch<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieSearch")
            .field("state", &self.snapshot())
            .field("debounce", &self.shared.debounce)
            .finish_non_exhaustive()
    }
}
