//! Named filters and their local/server classification.
//!
//! Two filters are local-only: free-text search and the date-range tag. The
//! backend has no server-side support for either, so whenever one of them is
//! active the controller must hold the full base collection and filter it
//! client-side. Every other filter is sent as a query parameter and answered
//! by the backend.

use std::collections::BTreeMap;

use time::OffsetDateTime;

use crate::domain::dates::{DateRangeTag, tag_matches};
use crate::domain::items::ListItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FilterKey {
    Search,
    DateRange,
    Category,
    Status,
    State,
    Language,
}

impl FilterKey {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::Search => "search",
            FilterKey::DateRange => "date_range",
            FilterKey::Category => "category",
            FilterKey::Status => "status",
            FilterKey::State => "state",
            FilterKey::Language => "language",
        }
    }

    /// Local-only filters are applied client-side over the full collection.
    pub fn is_local(self) -> bool {
        matches!(self, FilterKey::Search | FilterKey::DateRange)
    }
}

/// The active predicate configuration of one list view. Absent and empty
/// values both mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    values: BTreeMap<FilterKey, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear one filter. Empty strings clear, matching the UI where
    /// wiping a search box removes the constraint.
    pub fn set(&mut self, key: FilterKey, value: Option<String>) {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(value) => {
                self.values.insert(key, value);
            }
            None => {
                self.values.remove(&key);
            }
        }
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// True while any local-only filter holds a value; the sole trigger for
    /// client-side pagination mode.
    pub fn any_local_active(&self) -> bool {
        self.values.keys().any(|key| key.is_local())
    }

    /// Query parameters for a server fetch: every active non-local filter.
    pub fn server_params(&self) -> Vec<(&'static str, String)> {
        self.values
            .iter()
            .filter(|(key, _)| !key.is_local())
            .map(|(key, value)| (key.as_str(), value.clone()))
            .collect()
    }

    /// Evaluate the local-only predicates against one item. All active local
    /// filters must hold.
    pub fn matches_local<T: ListItem>(&self, item: &T, now: OffsetDateTime) -> bool {
        if let Some(needle) = self.get(FilterKey::Search) {
            let title = item.title().to_lowercase();
            if !title.contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if let Some(tag) = self.get(FilterKey::DateRange) {
            match DateRangeTag::try_from(tag) {
                Ok(tag) => {
                    if !tag_matches(tag, item, now) {
                        return false;
                    }
                }
                Err(()) => {
                    // Unknown tags come from stale UI options; treat as no
                    // constraint rather than filtering everything out.
                    tracing::debug!(tag, "ignoring unknown date-range tag");
                }
            }
        }
        true
    }

    /// The filtered subset of a fully-fetched collection.
    pub fn apply_local<'a, T: ListItem>(
        &self,
        items: &'a [T],
        now: OffsetDateTime,
    ) -> Vec<&'a T> {
        items
            .iter()
            .filter(|item| self.matches_local(*item, now))
            .collect()
    }
}
