//! Shared agenda state.
//!
//! The one mutable structure in the engine. Owned by the `Calendar`
//! service; the rendering layer only ever sees snapshots. Merges are
//! keyed by month so concurrent loads of different months write disjoint
//! day-keys.

use std::collections::HashMap;

use evently_core::agenda::{sort_day, Days};
use evently_core::month::VisibleMonth;

#[derive(Default)]
pub struct AgendaState {
    days: Days,
    /// Number of in-flight month loads; the agenda is "loading" while
    /// any are outstanding.
    in_flight: usize,
    /// Per-month load generation, for discarding stale completions
    /// (last-request-wins).
    generations: HashMap<VisibleMonth, u64>,
}

impl AgendaState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn days(&self) -> &Days {
        &self.days
    }

    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Register the start of a month load. Returns the generation token
    /// the completion must present to be merged.
    pub fn begin_load(&mut self, month: VisibleMonth) -> u64 {
        self.in_flight += 1;
        let generation = self.generations.entry(month).or_insert(0);
        *generation += 1;
        *generation
    }

    /// Register the end of a month load, successful or not.
    pub fn finish_load(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Whether a completion holding `generation` is still the newest
    /// load for its month.
    pub fn is_current(&self, month: VisibleMonth, generation: u64) -> bool {
        self.generations.get(&month) == Some(&generation)
    }

    /// Merge one month's buckets: day-keys of that month are replaced
    /// wholesale (never accumulated), other months are untouched. Each
    /// incoming bucket is re-ordered so the sort invariant holds no
    /// matter how the buckets were produced.
    pub fn merge_month(&mut self, month: VisibleMonth, mut partial: Days) {
        for bucket in partial.values_mut() {
            sort_day(bucket);
        }

        self.days.retain(|day, _| !month.contains_day(*day));
        self.days.append(&mut partial);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use evently_core::event::{Event, Visibility};

    fn event(id: &str, year: i32, month: u32, day: u32, hour: u32) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {id}"),
            description: None,
            start: Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap(),
            end: None,
            visibility: Visibility::Public,
            category: None,
            limit: None,
            attendees: vec![],
            owner: None,
            place: None,
        }
    }

    fn days_of(events: Vec<Event>) -> Days {
        evently_core::agenda::bucket_by_day(events)
    }

    fn march() -> VisibleMonth {
        VisibleMonth::new(2024, 3).unwrap()
    }

    fn april() -> VisibleMonth {
        VisibleMonth::new(2024, 4).unwrap()
    }

    #[test]
    fn merge_replaces_same_month_and_keeps_others() {
        let mut state = AgendaState::new();

        state.merge_month(march(), days_of(vec![event("m1", 2024, 3, 5, 10)]));
        state.merge_month(april(), days_of(vec![event("a1", 2024, 4, 2, 9)]));

        // Reload March with different contents: old March keys go away
        state.merge_month(march(), days_of(vec![event("m2", 2024, 3, 7, 8)]));

        let day_5 = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let day_7 = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let day_a = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();

        assert!(!state.days().contains_key(&day_5));
        assert_eq!(state.days()[&day_7][0].id, "m2");
        assert_eq!(state.days()[&day_a][0].id, "a1");
    }

    #[test]
    fn repeated_merges_do_not_accumulate() {
        let mut state = AgendaState::new();
        let load = || days_of(vec![event("m1", 2024, 3, 5, 10)]);

        state.merge_month(march(), load());
        state.merge_month(march(), load());

        let day_5 = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(state.days()[&day_5].len(), 1);
    }

    #[test]
    fn merge_restores_sort_invariant() {
        let mut state = AgendaState::new();

        // Hand-built bucket in the wrong order
        let mut partial = Days::new();
        partial.insert(
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            vec![event("late", 2024, 3, 5, 12), event("early", 2024, 3, 5, 9)],
        );

        state.merge_month(march(), partial);

        let day_5 = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let ids: Vec<_> = state.days()[&day_5].iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["early", "late"]);
    }

    #[test]
    fn loading_tracks_overlapping_loads() {
        let mut state = AgendaState::new();
        assert!(!state.loading());

        state.begin_load(march());
        state.begin_load(april());
        assert!(state.loading());

        state.finish_load();
        assert!(state.loading());

        state.finish_load();
        assert!(!state.loading());
    }

    #[test]
    fn newer_load_invalidates_older_generation() {
        let mut state = AgendaState::new();

        let first = state.begin_load(march());
        let second = state.begin_load(march());
        let other_month = state.begin_load(april());

        assert!(!state.is_current(march(), first));
        assert!(state.is_current(march(), second));
        assert!(state.is_current(april(), other_month));
    }
}
