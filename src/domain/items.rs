//! The generic record contract list views operate on.

use time::OffsetDateTime;

/// A listable content record. Everything the controller's local filters need:
/// a stable identifier, a searchable title, and the timestamps date-range
/// tags are evaluated against.
pub trait ListItem {
    /// Opaque identifier, stable across fetches.
    fn id(&self) -> &str;

    /// Title used for free-text search.
    fn title(&self) -> &str;

    /// The timestamp date-range tags filter on (published, release, or
    /// creation time depending on the record).
    fn primary_time(&self) -> OffsetDateTime;

    /// Scheduled publication time, when the record has one. Only the
    /// `future_scheduled` tag looks at this.
    fn scheduled_time(&self) -> Option<OffsetDateTime> {
        None
    }

    fn category(&self) -> Option<&str> {
        None
    }

    fn language(&self) -> Option<&str> {
        None
    }
}
