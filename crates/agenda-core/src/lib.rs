//! # agenda-core
//!
//! Occurrence and conflict engine for a personal agenda.
//!
//! Events carry a title, a start instant, and a duration. Repetitive events
//! recur daily, weekly, or monthly, minus a set of exception dates, and may
//! stop at a fixed termination boundary given either as an inclusive end
//! date or as an occurrence count (each derivable from the other). The
//! agenda answers which events occur on a given day and whether a candidate
//! event fits without overlapping the ones already stored.
//!
//! All date/time values are naive: a single implicit timezone, no DST
//! arithmetic.
//!
//! ## Quick start
//!
//! ```rust
//! use agenda_core::{Agenda, Event, Frequency};
//! use chrono::{NaiveDate, TimeDelta};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//!
//! let mut standup =
//!     Event::repetitive("Standup", start, TimeDelta::minutes(30), Frequency::Daily).unwrap();
//! standup.add_exception(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
//!
//! let mut agenda = Agenda::new();
//! agenda.add_event(standup);
//!
//! let jan2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//! let jan3 = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
//! assert_eq!(agenda.events_in_day(jan2).len(), 1);
//! assert!(agenda.events_in_day(jan3).is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`event`] — `Event` and its closed variant set (single / repetitive /
//!   fixed termination), the `occurs_on` predicate
//! - [`recurrence`] — frequency step arithmetic, exception dates, termination
//!   boundaries
//! - [`agenda`] — the event collection and its day/title/free-slot queries
//! - [`conflict`] — open-interval span overlap
//! - [`freebusy`] — busy-period merging and free-slot gaps
//! - [`error`] — error types

pub mod agenda;
pub mod conflict;
pub mod error;
pub mod event;
pub mod freebusy;
pub mod recurrence;

pub use agenda::{Agenda, EventId};
pub use conflict::{find_conflicts, Conflict, Span};
pub use error::AgendaError;
pub use event::{Event, EventKind};
pub use freebusy::{find_first_free_slot, find_free_slots, FreeSlot};
pub use recurrence::{Frequency, Repetition, Termination};
