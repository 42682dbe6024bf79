//! Compute free time slots from occurrence spans.
//!
//! Sorts spans by start time, merges overlapping busy periods, then computes
//! the gaps between merged periods within a given time window.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::conflict::Span;

/// A free time slot inside a queried window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
}

/// Merge overlapping or adjacent busy spans, clipped to the given window.
///
/// Returns a sorted, non-overlapping list of (start, end) intervals.
fn merge_busy_periods(
    spans: &[Span],
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Vec<(NaiveDateTime, NaiveDateTime)> {
    // Clip to the window, discarding spans entirely outside.
    let mut intervals: Vec<(NaiveDateTime, NaiveDateTime)> = spans
        .iter()
        .filter(|s| s.start < window_end && s.end > window_start)
        .map(|s| (s.start.max(window_start), s.end.min(window_end)))
        .collect();

    if intervals.is_empty() {
        return Vec::new();
    }

    intervals.sort_by_key(|&(start, end)| (start, end));

    let mut merged: Vec<(NaiveDateTime, NaiveDateTime)> = Vec::new();
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                // Overlapping or adjacent — extend the current interval.
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}

/// Find free time slots within a window, given a list of busy spans.
///
/// Spans may overlap -- overlapping busy periods are merged before computing
/// gaps. Returns free slots sorted by start time.
pub fn find_free_slots(
    spans: &[Span],
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Vec<FreeSlot> {
    let merged = merge_busy_periods(spans, window_start, window_end);

    let mut free_slots = Vec::new();
    let mut cursor = window_start;

    for (busy_start, busy_end) in &merged {
        if cursor < *busy_start {
            free_slots.push(FreeSlot {
                start: cursor,
                end: *busy_start,
                duration_minutes: (*busy_start - cursor).num_minutes(),
            });
        }
        cursor = cursor.max(*busy_end);
    }

    // Trailing free slot after the last busy period.
    if cursor < window_end {
        free_slots.push(FreeSlot {
            start: cursor,
            end: window_end,
            duration_minutes: (window_end - cursor).num_minutes(),
        });
    }

    free_slots
}

/// Find the first free slot of at least `min_duration_minutes` within the
/// window.
pub fn find_first_free_slot(
    spans: &[Span],
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
    min_duration_minutes: i64,
) -> Option<FreeSlot> {
    find_free_slots(spans, window_start, window_end)
        .into_iter()
        .find(|slot| slot.duration_minutes >= min_duration_minutes)
}
