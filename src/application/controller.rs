//! The generic list-view controller.
//!
//! One controller instance owns the state behind one paginated, filterable
//! list view (articles, theater or OTT releases, galleries): the fetched
//! collection, the active filter set, and the page state. It decides whether
//! filtering and paging happen server-side (re-fetch) or client-side (local
//! slicing), keeps the visible slice consistent whenever any input changes,
//! and sequences overlapping fetches so only the latest issued request may
//! populate the collection.

use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;
use time::OffsetDateTime;

use crate::application::filters::{FilterKey, FilterSet};
use crate::application::pagination::{DEFAULT_ITEMS_PER_PAGE, PageState};
use crate::application::prefs::{PreferenceStore, items_per_page_key};
use crate::application::sources::{
    FetchQuery, FetchStrategy, ItemSource, PageWindow, SourceError,
};
use crate::domain::items::ListItem;
use crate::domain::types::ViewKind;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Everything a rendering layer needs to draw one list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub items_per_page: usize,
}

struct State<T> {
    filters: FilterSet,
    page: PageState,
    collection: Vec<T>,
    server_total: usize,
    fetch_seq: u64,
    closed: bool,
}

pub struct ListViewController<T> {
    view: ViewKind,
    source: Arc<dyn ItemSource<T>>,
    prefs: Arc<dyn PreferenceStore>,
    clock: Arc<dyn Fn() -> OffsetDateTime + Send + Sync>,
    state: Arc<Mutex<State<T>>>,
}

impl<T> Clone for ListViewController<T> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            source: Arc::clone(&self.source),
            prefs: Arc::clone(&self.prefs),
            clock: Arc::clone(&self.clock),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: ListItem + Clone + Send + 'static> ListViewController<T> {
    /// Build a controller with defaults and the persisted page-size
    /// preference for `view`, if one exists. The collection starts empty;
    /// call [`refetch`](Self::refetch) once on mount.
    pub fn new(
        view: ViewKind,
        source: Arc<dyn ItemSource<T>>,
        prefs: Arc<dyn PreferenceStore>,
    ) -> Self {
        let items_per_page = prefs
            .get(&items_per_page_key(view))
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_ITEMS_PER_PAGE);

        Self {
            view,
            source,
            prefs,
            clock: Arc::new(OffsetDateTime::now_utc),
            state: Arc::new(Mutex::new(State {
                filters: FilterSet::new(),
                page: PageState::new(items_per_page),
                collection: Vec::new(),
                server_total: 0,
                fetch_seq: 0,
                closed: false,
            })),
        }
    }

    /// Substitute the time source used by date-range filters.
    pub fn with_clock(
        mut self,
        clock: impl Fn() -> OffsetDateTime + Send + Sync + 'static,
    ) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn view(&self) -> ViewKind {
        self.view
    }

    /// Update one filter and reconcile. The page always resets to 1: a
    /// filter change invalidates the old page index, which could point past
    /// the end of the new result set.
    ///
    /// A server-filter change always re-fetches. A local-only filter
    /// re-fetches only on a mode boundary: entering local mode on a
    /// server-paged source (the full collection is needed to filter
    /// correctly), or leaving local mode (the sliced collection must be
    /// replaced by a fresh server page rather than kept stale).
    pub async fn set_filter(
        &self,
        key: FilterKey,
        value: Option<String>,
    ) -> Result<(), ControllerError> {
        let needs_refetch = {
            let mut st = self.lock();
            let was_local = st.filters.any_local_active();
            st.filters.set(key, value);
            st.page.reset_page();
            let is_local = st.filters.any_local_active();

            let refetch = if !key.is_local() {
                true
            } else if was_local && !is_local {
                true
            } else if !was_local && is_local {
                self.source.strategy() == FetchStrategy::ServerPaged
            } else {
                false
            };

            if !refetch {
                self.sync_totals(&mut st);
            }
            refetch
        };

        if needs_refetch {
            self.refetch().await
        } else {
            Ok(())
        }
    }

    /// Clamp-and-set the current page. Never fetches; server-paged callers
    /// follow up with [`refetch`](Self::refetch) to load the page's items.
    pub fn set_page(&self, page: usize) {
        let mut st = self.lock();
        self.sync_totals(&mut st);
        st.page.set_page(page);
    }

    /// Change the page size, persist it for this view, and reset to page 1.
    /// Re-fetches only when server-side paging is in effect, since the
    /// backend must then return a differently-sized page.
    pub async fn set_items_per_page(&self, items_per_page: usize) -> Result<(), ControllerError> {
        let needs_refetch = {
            let mut st = self.lock();
            st.page.set_items_per_page(items_per_page);
            self.prefs.set(
                &items_per_page_key(self.view),
                &st.page.items_per_page().to_string(),
            );
            let server_paged = self.source.strategy() == FetchStrategy::ServerPaged
                && !st.filters.any_local_active();
            if !server_paged {
                self.sync_totals(&mut st);
            }
            server_paged
        };

        if needs_refetch {
            self.refetch().await
        } else {
            Ok(())
        }
    }

    /// Issue a fetch for the current filters and page. Carries skip/limit
    /// when server-side paging is in effect; otherwise requests the full
    /// base collection so local filters can see everything.
    ///
    /// Responses are applied latest-wins: each fetch carries a token, and a
    /// response is discarded if a newer fetch was issued while it was in
    /// flight, or if the controller was closed. On failure the collection is
    /// cleared, totals reset, and the error surfaced to the caller.
    pub async fn refetch(&self) -> Result<(), ControllerError> {
        let (seq, query) = {
            let mut st = self.lock();
            st.fetch_seq += 1;
            (st.fetch_seq, Self::build_query(self.source.strategy(), &st))
        };

        let fetched = self.source.fetch(query).await;

        let mut st = self.lock();
        if st.closed || st.fetch_seq != seq {
            tracing::debug!(
                view = self.view.as_str(),
                seq,
                latest = st.fetch_seq,
                closed = st.closed,
                "discarding superseded fetch response"
            );
            return Ok(());
        }

        match fetched {
            Ok(page) => {
                st.collection = page.items;
                st.server_total = page.total;
                self.sync_totals(&mut st);
                Ok(())
            }
            Err(err) => {
                st.collection.clear();
                st.server_total = 0;
                self.sync_totals(&mut st);
                tracing::warn!(view = self.view.as_str(), error = %err, "list fetch failed");
                Err(err.into())
            }
        }
    }

    /// Logically abandon this view. Any in-flight fetch resolving afterwards
    /// becomes a no-op instead of a stale-state write.
    pub fn close(&self) {
        self.lock().closed = true;
    }

    /// The page of items currently visible, derived from collection, filters,
    /// and page state.
    pub fn visible(&self) -> Vec<T> {
        self.snapshot().items
    }

    pub fn snapshot(&self) -> ListSnapshot<T> {
        let mut st = self.lock();
        self.sync_totals(&mut st);

        let items = if st.filters.any_local_active() {
            let now = (self.clock)();
            let effective = st.filters.apply_local(&st.collection, now);
            let (start, end) = st.page.slice_bounds(effective.len());
            effective[start..end].iter().map(|item| (*item).clone()).collect()
        } else {
            match self.source.strategy() {
                // The server already returned exactly one page.
                FetchStrategy::ServerPaged => st.collection.clone(),
                FetchStrategy::FetchAll => {
                    let (start, end) = st.page.slice_bounds(st.collection.len());
                    st.collection[start..end].to_vec()
                }
            }
        };

        ListSnapshot {
            items,
            current_page: st.page.current_page(),
            total_pages: st.page.total_pages(),
            total_count: st.page.total_count(),
            items_per_page: st.page.items_per_page(),
        }
    }

    pub fn current_page(&self) -> usize {
        self.lock().page.current_page()
    }

    pub fn items_per_page(&self) -> usize {
        self.lock().page.items_per_page()
    }

    pub fn total_pages(&self) -> usize {
        let mut st = self.lock();
        self.sync_totals(&mut st);
        st.page.total_pages()
    }

    pub fn total_count(&self) -> usize {
        let mut st = self.lock();
        self.sync_totals(&mut st);
        st.page.total_count()
    }

    fn build_query(strategy: FetchStrategy, st: &State<T>) -> FetchQuery {
        let window = if strategy == FetchStrategy::ServerPaged && !st.filters.any_local_active() {
            Some(PageWindow {
                skip: st.page.offset(),
                limit: st.page.items_per_page(),
            })
        } else {
            None
        };
        FetchQuery {
            params: st.filters.server_params(),
            window,
        }
    }

    /// Re-derive the authoritative total for the active mode and keep the
    /// current page in range. In local mode the total is the filtered
    /// collection's size; otherwise it is the last server-reported total.
    fn sync_totals(&self, st: &mut State<T>) {
        let total = if st.filters.any_local_active() {
            let now = (self.clock)();
            st.filters.apply_local(&st.collection, now).len()
        } else {
            st.server_total
        };
        st.page.set_total_count(total);
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().expect("list view state lock poisoned")
    }
}
