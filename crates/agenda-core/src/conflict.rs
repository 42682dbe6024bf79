//! Interval overlap logic for occurrence spans.
//!
//! Two spans conflict when their open intervals intersect. Adjacent spans
//! (one ends exactly when the other starts) are NOT conflicts.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A concrete occupied time span: one occurrence of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Span {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Span { start, end }
    }

    /// Open-interval overlap test: `a.start < b.end && b.start < a.end`.
    ///
    /// Exact boundary touches (end of one equals start of the other) do not
    /// count as overlap. Zero-length spans never overlap anything.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Minutes shared between two spans: `min(ends) - max(starts)`.
    /// Zero when the spans do not overlap.
    pub fn overlap_minutes(&self, other: &Span) -> i64 {
        if !self.overlaps(other) {
            return 0;
        }
        let overlap_start = self.start.max(other.start);
        let overlap_end = self.end.min(other.end);
        (overlap_end - overlap_start).num_minutes()
    }
}

/// A detected conflict between two occurrence spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub span_a: Span,
    pub span_b: Span,
    pub overlap_minutes: i64,
}

/// Find all pairwise conflicts between two span lists.
///
/// Adjacent spans where one ends exactly when another starts are not
/// conflicts.
pub fn find_conflicts(spans_a: &[Span], spans_b: &[Span]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for a in spans_a {
        for b in spans_b {
            if a.overlaps(b) {
                conflicts.push(Conflict {
                    span_a: *a,
                    span_b: *b,
                    overlap_minutes: a.overlap_minutes(b),
                });
            }
        }
    }

    conflicts
}
