//! Repetition rules -- frequency step arithmetic, exception dates, termination.
//!
//! A [`Repetition`] answers "does a day on/after the first occurrence belong to
//! the pattern", a [`Termination`] fixes the inclusive boundary after which a
//! repetitive event produces no further occurrences. Frequency arms are
//! mutually exclusive: exactly one unit rule applies to any query.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{AgendaError, Result};

/// The step unit between occurrences of a repetitive event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// One occurrence every day.
    Daily,
    /// One occurrence every week, on the start's weekday.
    Weekly,
    /// One occurrence every month, on the start's day-of-month.
    Monthly,
}

impl Frequency {
    /// Advance a date by `steps` whole units of this frequency.
    ///
    /// Monthly steps clamp to the last day of shorter months
    /// (Jan 31 + 1 month = Feb 28/29).
    pub fn advance(self, date: NaiveDate, steps: u32) -> NaiveDate {
        match self {
            Frequency::Daily => date + Days::new(u64::from(steps)),
            Frequency::Weekly => date + Days::new(7 * u64::from(steps)),
            Frequency::Monthly => date + Months::new(steps),
        }
    }

    /// Number of whole frequency steps between `from` and `to`.
    ///
    /// Requires `to >= from`. Monthly uses exact calendar-month counting:
    /// the result is the largest `n` such that `advance(from, n) <= to`.
    pub fn whole_steps_between(self, from: NaiveDate, to: NaiveDate) -> u32 {
        debug_assert!(to >= from, "step counting requires from <= to");
        match self {
            Frequency::Daily => (to - from).num_days() as u32,
            Frequency::Weekly => ((to - from).num_days() / 7) as u32,
            Frequency::Monthly => {
                let months =
                    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
                let mut steps = months.max(0) as u32;
                // End-of-month clamping can land the candidate past `to`
                // (e.g. Jan 31 + 1 month = Feb 28 > Feb 15).
                if steps > 0 && self.advance(from, steps) > to {
                    steps -= 1;
                }
                steps
            }
        }
    }
}

impl FromStr for Frequency {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(AgendaError::InvalidFrequency(other.to_string())),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        };
        f.write_str(s)
    }
}

/// A repetition rule: the step unit plus the dates where the event is
/// suppressed.
///
/// Exception dates are compared by calendar date only; time-of-day never
/// enters the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repetition {
    frequency: Frequency,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    exceptions: BTreeSet<NaiveDate>,
}

impl Repetition {
    /// A repetition with the given step unit and no exceptions.
    pub fn new(frequency: Frequency) -> Self {
        Repetition {
            frequency,
            exceptions: BTreeSet::new(),
        }
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// The suppressed dates, in ascending order.
    pub fn exceptions(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.exceptions.iter().copied()
    }

    /// Suppress the occurrence on `date`. Idempotent; returns `true` when the
    /// date was not already suppressed.
    pub fn add_exception(&mut self, date: NaiveDate) -> bool {
        self.exceptions.insert(date)
    }

    /// Pattern membership for a day, given the date of the first occurrence.
    ///
    /// Days before the first occurrence and excepted days never match. The
    /// first occurrence itself is handled by the caller, which checks it
    /// before the exception set is consulted.
    pub(crate) fn matches(&self, first: NaiveDate, day: NaiveDate) -> bool {
        if day < first {
            return false;
        }
        if self.exceptions.contains(&day) {
            return false;
        }
        match self.frequency {
            Frequency::Daily => true,
            Frequency::Weekly => day.weekday() == first.weekday(),
            Frequency::Monthly => day.day() == first.day(),
        }
    }
}

/// The inclusive boundary after which a repetitive event stops occurring.
///
/// Exactly one of the two fields is supplied at construction; the other is
/// derived from it eagerly under the frequency's step arithmetic, so both
/// reads are plain field accesses and trivially idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Termination {
    end_date: NaiveDate,
    occurrences: u32,
}

impl Termination {
    /// Termination at an inclusive end date.
    ///
    /// The occurrence count is derived as the number of whole frequency steps
    /// from the first occurrence to `end_date` (exact calendar-month counting
    /// for monthly events).
    ///
    /// # Errors
    /// Returns [`AgendaError::InvalidEvent`] when `end_date` precedes the
    /// first occurrence.
    pub fn by_date(first: NaiveDate, frequency: Frequency, end_date: NaiveDate) -> Result<Self> {
        if end_date < first {
            return Err(AgendaError::InvalidEvent(format!(
                "termination date {end_date} precedes first occurrence {first}"
            )));
        }
        Ok(Termination {
            end_date,
            occurrences: frequency.whole_steps_between(first, end_date),
        })
    }

    /// Termination after a number of whole frequency steps.
    ///
    /// The inclusive end date is the first occurrence advanced by
    /// `occurrences` steps.
    pub fn by_count(first: NaiveDate, frequency: Frequency, occurrences: u32) -> Self {
        Termination {
            end_date: frequency.advance(first, occurrences),
            occurrences,
        }
    }

    /// The date of the last possible occurrence (inclusive).
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// The number of whole frequency steps covered before termination.
    pub fn occurrences(&self) -> u32 {
        self.occurrences
    }
}
