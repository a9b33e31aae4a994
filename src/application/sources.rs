//! The data-source seam between the controller and the ContentAPI.

use async_trait::async_trait;
use thiserror::Error;

/// How a source answers fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// The backend filters and pages; a fetch returns exactly one page plus
    /// the total count (articles).
    ServerPaged,
    /// The backend returns the whole base collection; paging is always local
    /// (releases, galleries).
    FetchAll,
}

/// Skip/limit window for a server-paged fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: usize,
    pub limit: usize,
}

/// One fetch issued by the controller. `window` is `None` when the full base
/// collection is needed, either because the source never pages server-side
/// or because a local-only filter must see everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchQuery {
    pub params: Vec<(&'static str, String)>,
    pub window: Option<PageWindow>,
}

/// A fetched collection (or page of one) with the authoritative total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPage<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> FetchPage<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// A complete collection; the total is simply its length.
    pub fn complete(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("fetch failed: {0}")]
    Fetch(String),
}

/// A content collection the controller can (re-)fetch. Implementations wrap
/// one ContentAPI endpoint each; tests substitute scripted fakes.
#[async_trait]
pub trait ItemSource<T>: Send + Sync {
    fn strategy(&self) -> FetchStrategy;

    async fn fetch(&self, query: FetchQuery) -> Result<FetchPage<T>, SourceError>;
}
