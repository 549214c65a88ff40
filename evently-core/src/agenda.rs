//! Day bucketing and ordering for the agenda view.
//!
//! Pure functions: given a flat list of events, produce the per-day,
//! time-ordered map the agenda renders from. An event lands in exactly
//! one bucket, the UTC calendar day of its `start`; an `end` on a later
//! day never creates a second entry.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::event::Event;
use crate::month::VisibleMonth;

/// Day-keyed agenda buckets. `NaiveDate` keys display and serialize as
/// ISO `YYYY-MM-DD`. Days with no events are absent.
pub type Days = BTreeMap<NaiveDate, Vec<Event>>;

/// Day-key for an instant: its UTC calendar date.
pub fn day_key(instant: &DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// Group events under the day-key of their `start`, preserving input
/// order within each bucket. Callers are responsible for only passing
/// events that survived decoding (i.e. with a valid `start`).
pub fn bucket_by_day(events: Vec<Event>) -> Days {
    let mut days = Days::new();
    for event in events {
        days.entry(day_key(&event.start)).or_default().push(event);
    }
    days
}

/// Order one day's events by start, then end (`end` falling back to
/// `start`). Stable: fully tied events keep their input order.
pub fn sort_day(events: &mut [Event]) {
    events.sort_by_key(|event| (event.start, event.end_or_start()));
}

/// Build the agenda buckets for one visible month: filter to events
/// starting in that UTC month, bucket by day, order each bucket.
pub fn aggregate_month(events: Vec<Event>, month: VisibleMonth) -> Days {
    let in_month = events
        .into_iter()
        .filter(|event| month.contains(&event.start))
        .collect();

    let mut days = bucket_by_day(in_month);
    for bucket in days.values_mut() {
        sort_day(bucket);
    }
    days
}
