//! The agenda -- an owned collection of events with day, title, and
//! free-slot queries.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::conflict::Span;
use crate::event::Event;
use crate::freebusy::{self, FreeSlot};

/// Opaque identifier assigned to an event when it enters an agenda.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EventId(u64);

/// A personal agenda. Events are owned exclusively by the agenda and keyed
/// by an [`EventId`] assigned at insertion; iteration follows insertion
/// order.
#[derive(Debug, Clone, Default)]
pub struct Agenda {
    events: BTreeMap<EventId, Event>,
    next_id: u64,
}

impl Agenda {
    /// An empty agenda.
    pub fn new() -> Agenda {
        Agenda::default()
    }

    /// Build an agenda from a list of events. Duplicates (by title, start,
    /// duration) collapse to the first one seen.
    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Agenda {
        let mut agenda = Agenda::new();
        for event in events {
            agenda.add_event(event);
        }
        agenda
    }

    /// Insert an event.
    ///
    /// When an event equal by (title, start, duration) is already stored,
    /// nothing changes and the existing event's id is returned, so inserting
    /// the same event twice leaves the agenda's count untouched.
    pub fn add_event(&mut self, event: Event) -> EventId {
        if let Some(id) = self
            .events
            .iter()
            .find(|(_, stored)| stored.identity() == event.identity())
            .map(|(id, _)| *id)
        {
            return id;
        }
        let id = EventId(self.next_id);
        self.next_id += 1;
        self.events.insert(id, event);
        id
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All stored events, in insertion order.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    /// Every stored event that occurs on `day`.
    pub fn events_in_day(&self, day: NaiveDate) -> Vec<&Event> {
        self.events
            .values()
            .filter(|event| event.occurs_on(day))
            .collect()
    }

    /// Every stored event whose title exactly equals `title`.
    pub fn find_by_title(&self, title: &str) -> Vec<&Event> {
        self.events
            .values()
            .filter(|event| event.title() == title)
            .collect()
    }

    /// Is there room for `candidate` without overlapping any stored event?
    ///
    /// Compares literal spans only: each stored event's own
    /// `[start, start + duration)` against the candidate's. Boundary touches
    /// are not overlaps. Recurring events are NOT expanded into their later
    /// occurrences here; use [`Agenda::free_slots_in`] for
    /// recurrence-accurate availability.
    pub fn is_free_for(&self, candidate: &Event) -> bool {
        let candidate_span = candidate.span();
        self.events
            .values()
            .all(|stored| !stored.span().overlaps(&candidate_span))
    }

    /// Free slots within a window, with recurring events expanded.
    ///
    /// Materializes each stored event's occurrence span for every day the
    /// window touches (occurrences keep the start's time-of-day), then merges
    /// busy periods and returns the gaps.
    pub fn free_slots_in(
        &self,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> Vec<FreeSlot> {
        let spans = self.occurrence_spans(window_start.date(), window_end.date());
        freebusy::find_free_slots(&spans, window_start, window_end)
    }

    /// Occurrence spans of every stored event for each day in
    /// `[first_day, last_day]`.
    fn occurrence_spans(&self, first_day: NaiveDate, last_day: NaiveDate) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut day = first_day;
        while day <= last_day {
            for event in self.events.values() {
                if let Some(span) = event.occurrence_on(day) {
                    spans.push(span);
                }
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        spans
    }
}
