//! Date-range tags and the single window-resolution function shared by all
//! list views.
//!
//! Every filter dropdown in the console maps a named tag to a concrete
//! half-open `[start, end)` instant range relative to "now" at evaluation
//! time. Two subtly different week tags coexist on purpose: `thisWeek` is the
//! Monday-start calendar week, `week` is a rolling seven-day window. Release
//! dropdowns spell the calendar-week tag as `this-week`; the semantics are
//! identical.

use time::{Duration, OffsetDateTime, Time};

use crate::domain::items::ListItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangeTag {
    Today,
    Yesterday,
    /// Monday-start calendar week containing "now" (`thisWeek`).
    ThisWeek,
    /// Rolling window covering the last seven days (`week`).
    Week,
    /// Rolling window covering the last thirty days.
    Month,
    /// Rolling window covering the last ninety days.
    Quarter,
    /// Rolling window covering the last 182 days.
    HalfYear,
    /// Rolling window covering the last 365 days.
    Year,
    /// Items whose scheduled timestamp is strictly in the future, regardless
    /// of when (or whether) they were published.
    FutureScheduled,
    /// Calendar week, as release dropdowns spell it (`this-week`).
    ReleaseWeek,
    /// The Monday-start calendar week after the current one.
    NextWeek,
    LastThirtyDays,
}

impl DateRangeTag {
    pub fn as_str(self) -> &'static str {
        match self {
            DateRangeTag::Today => "today",
            DateRangeTag::Yesterday => "yesterday",
            DateRangeTag::ThisWeek => "thisWeek",
            DateRangeTag::Week => "week",
            DateRangeTag::Month => "month",
            DateRangeTag::Quarter => "quarter",
            DateRangeTag::HalfYear => "halfYear",
            DateRangeTag::Year => "year",
            DateRangeTag::FutureScheduled => "future_scheduled",
            DateRangeTag::ReleaseWeek => "this-week",
            DateRangeTag::NextWeek => "next-week",
            DateRangeTag::LastThirtyDays => "last-30-days",
        }
    }
}

impl TryFrom<&str> for DateRangeTag {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "today" => Ok(DateRangeTag::Today),
            "yesterday" => Ok(DateRangeTag::Yesterday),
            "thisWeek" => Ok(DateRangeTag::ThisWeek),
            "week" => Ok(DateRangeTag::Week),
            "month" => Ok(DateRangeTag::Month),
            "quarter" => Ok(DateRangeTag::Quarter),
            "halfYear" => Ok(DateRangeTag::HalfYear),
            "year" => Ok(DateRangeTag::Year),
            "future_scheduled" => Ok(DateRangeTag::FutureScheduled),
            "this-week" => Ok(DateRangeTag::ReleaseWeek),
            "next-week" => Ok(DateRangeTag::NextWeek),
            "last-30-days" => Ok(DateRangeTag::LastThirtyDays),
            _ => Err(()),
        }
    }
}

/// Half-open instant range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

impl DateWindow {
    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Resolve a tag to its concrete window relative to `now`.
///
/// Returns `None` for [`DateRangeTag::FutureScheduled`], which is not a
/// window over the primary timestamp; see [`tag_matches`].
pub fn resolve_window(tag: DateRangeTag, now: OffsetDateTime) -> Option<DateWindow> {
    let midnight = now.replace_time(Time::MIDNIGHT);
    let monday = midnight - Duration::days(i64::from(now.date().weekday().number_days_from_monday()));

    let window = match tag {
        DateRangeTag::Today => DateWindow {
            start: midnight,
            end: midnight + Duration::days(1),
        },
        DateRangeTag::Yesterday => DateWindow {
            start: midnight - Duration::days(1),
            end: midnight,
        },
        DateRangeTag::ThisWeek | DateRangeTag::ReleaseWeek => DateWindow {
            start: monday,
            end: monday + Duration::days(7),
        },
        DateRangeTag::NextWeek => DateWindow {
            start: monday + Duration::days(7),
            end: monday + Duration::days(14),
        },
        DateRangeTag::Week => rolling(now, 7),
        DateRangeTag::Month | DateRangeTag::LastThirtyDays => rolling(now, 30),
        DateRangeTag::Quarter => rolling(now, 90),
        DateRangeTag::HalfYear => rolling(now, 182),
        DateRangeTag::Year => rolling(now, 365),
        DateRangeTag::FutureScheduled => return None,
    };
    Some(window)
}

/// Rolling windows include the instant exactly `days` old: an item published
/// precisely seven days ago still counts as `week`, one second older does not.
fn rolling(now: OffsetDateTime, days: i64) -> DateWindow {
    DateWindow {
        start: now - Duration::days(days),
        end: now + Duration::nanoseconds(1),
    }
}

/// Whether `item` satisfies `tag` when evaluated at `now`.
pub fn tag_matches<T: ListItem>(tag: DateRangeTag, item: &T, now: OffsetDateTime) -> bool {
    match resolve_window(tag, now) {
        Some(window) => window.contains(item.primary_time()),
        None => item.scheduled_time().is_some_and(|at| at > now),
    }
}
