//! The event model -- a closed set of variants sharing one occurrence
//! predicate.
//!
//! An [`Event`] is a title, a start instant, and a duration. The [`EventKind`]
//! payload decides how the occurrence question is answered: a single event
//! occurs only on its start date, a repetitive event on every pattern day not
//! suppressed by an exception, a fixed-termination event additionally stops
//! after its termination date.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::conflict::Span;
use crate::error::{AgendaError, Result};
use crate::recurrence::{Frequency, Repetition, Termination};

/// How an event recurs, if at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// One occurrence, on the start date.
    Single,
    /// Recurs forever at a fixed frequency, minus exception dates.
    Repetitive { repeat: Repetition },
    /// Recurs like `Repetitive` but stops after a termination boundary.
    FixedTermination {
        repeat: Repetition,
        termination: Termination,
    },
}

/// A calendar event. Immutable after construction, except that exception
/// dates may be added to the recurring variants.
///
/// Two events are duplicates of each other when title, start, and duration
/// all match; the recurrence payload does not enter that comparison (see
/// [`Agenda::add_event`](crate::Agenda::add_event)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    title: String,
    start: NaiveDateTime,
    #[serde(with = "duration_seconds")]
    duration: TimeDelta,
    kind: EventKind,
}

impl Event {
    /// A single (non-recurring) event.
    ///
    /// # Errors
    /// Returns [`AgendaError::InvalidEvent`] when `duration` is negative.
    pub fn new(
        title: impl Into<String>,
        start: NaiveDateTime,
        duration: TimeDelta,
    ) -> Result<Event> {
        Event::build(title.into(), start, duration, EventKind::Single)
    }

    /// An event recurring at `frequency` with no termination boundary.
    ///
    /// # Errors
    /// Returns [`AgendaError::InvalidEvent`] when `duration` is negative.
    pub fn repetitive(
        title: impl Into<String>,
        start: NaiveDateTime,
        duration: TimeDelta,
        frequency: Frequency,
    ) -> Result<Event> {
        Event::build(
            title.into(),
            start,
            duration,
            EventKind::Repetitive {
                repeat: Repetition::new(frequency),
            },
        )
    }

    /// A recurring event ending at an inclusive termination date.
    ///
    /// The occurrence count is derived from the date (see
    /// [`Termination::by_date`]).
    ///
    /// # Errors
    /// Returns [`AgendaError::InvalidEvent`] when `duration` is negative or
    /// `end_date` precedes the start date.
    pub fn terminated_on(
        title: impl Into<String>,
        start: NaiveDateTime,
        duration: TimeDelta,
        frequency: Frequency,
        end_date: NaiveDate,
    ) -> Result<Event> {
        let termination = Termination::by_date(start.date(), frequency, end_date)?;
        Event::build(
            title.into(),
            start,
            duration,
            EventKind::FixedTermination {
                repeat: Repetition::new(frequency),
                termination,
            },
        )
    }

    /// A recurring event ending after a number of whole frequency steps.
    ///
    /// The termination date is derived from the count (see
    /// [`Termination::by_count`]).
    ///
    /// # Errors
    /// Returns [`AgendaError::InvalidEvent`] when `duration` is negative.
    pub fn terminated_after(
        title: impl Into<String>,
        start: NaiveDateTime,
        duration: TimeDelta,
        frequency: Frequency,
        occurrences: u32,
    ) -> Result<Event> {
        let termination = Termination::by_count(start.date(), frequency, occurrences);
        Event::build(
            title.into(),
            start,
            duration,
            EventKind::FixedTermination {
                repeat: Repetition::new(frequency),
                termination,
            },
        )
    }

    fn build(
        title: String,
        start: NaiveDateTime,
        duration: TimeDelta,
        kind: EventKind,
    ) -> Result<Event> {
        if duration < TimeDelta::zero() {
            return Err(AgendaError::InvalidEvent(format!(
                "negative duration for \"{title}\""
            )));
        }
        Ok(Event {
            title,
            start,
            duration,
            kind,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn duration(&self) -> TimeDelta {
        self.duration
    }

    /// The end of the literal span starting at `start`.
    pub fn end(&self) -> NaiveDateTime {
        self.start + self.duration
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// The repetition rule, if this event recurs.
    pub fn repetition(&self) -> Option<&Repetition> {
        match &self.kind {
            EventKind::Single => None,
            EventKind::Repetitive { repeat } => Some(repeat),
            EventKind::FixedTermination { repeat, .. } => Some(repeat),
        }
    }

    /// The termination boundary, if this event has one.
    pub fn termination(&self) -> Option<&Termination> {
        match &self.kind {
            EventKind::FixedTermination { termination, .. } => Some(termination),
            _ => None,
        }
    }

    /// Suppress the recurring occurrence on `date`.
    ///
    /// Idempotent; returns `true` when the exception was newly added. Single
    /// events have no occurrences to suppress and always return `false`. The
    /// first occurrence is never suppressed regardless of exceptions.
    pub fn add_exception(&mut self, date: NaiveDate) -> bool {
        match &mut self.kind {
            EventKind::Single => false,
            EventKind::Repetitive { repeat } => repeat.add_exception(date),
            EventKind::FixedTermination { repeat, .. } => repeat.add_exception(date),
        }
    }

    /// Does this event occur on `day`?
    ///
    /// The first occurrence always counts, even when the start date sits in
    /// the exception set. Recurring occurrences require the day to be on or
    /// after the start date, absent from the exceptions, and a member of the
    /// frequency pattern. A fixed-termination event never occurs strictly
    /// after its termination date.
    pub fn occurs_on(&self, day: NaiveDate) -> bool {
        let first = self.start.date();
        match &self.kind {
            EventKind::Single => day == first,
            EventKind::Repetitive { repeat } => day == first || repeat.matches(first, day),
            EventKind::FixedTermination {
                repeat,
                termination,
            } => {
                day <= termination.end_date() && (day == first || repeat.matches(first, day))
            }
        }
    }

    /// The concrete time span this event occupies on `day`, or `None` when
    /// it does not occur that day.
    ///
    /// Every occurrence keeps the start's time-of-day and the event's
    /// duration.
    pub fn occurrence_on(&self, day: NaiveDate) -> Option<Span> {
        if !self.occurs_on(day) {
            return None;
        }
        let start = day.and_time(self.start.time());
        Some(Span::new(start, start + self.duration))
    }

    /// The literal span of the first occurrence, `[start, start + duration)`.
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end())
    }

    /// Structural identity used for duplicate detection on insert.
    pub(crate) fn identity(&self) -> (&str, NaiveDateTime, TimeDelta) {
        (&self.title, self.start, self.duration)
    }
}

/// Serialize a `TimeDelta` as a whole number of seconds.
mod duration_seconds {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &TimeDelta, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_i64(d.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<TimeDelta, D::Error> {
        let secs = i64::deserialize(de)?;
        Ok(TimeDelta::seconds(secs))
    }
}
