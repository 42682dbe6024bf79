//! Tests for span overlap and pairwise conflict detection.

use agenda_core::{find_conflicts, Span};
use chrono::NaiveDate;

/// Helper: a span on a given day from hour:min to hour:min.
fn span(day: u32, start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> Span {
    let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
    Span::new(
        date.and_hms_opt(start_hour, start_min, 0).unwrap(),
        date.and_hms_opt(end_hour, end_min, 0).unwrap(),
    )
}

#[test]
fn overlapping_spans_detected() {
    // 09:00-10:00 vs 09:30-10:30 → 30-minute overlap.
    let a = span(1, 9, 0, 10, 0);
    let b = span(1, 9, 30, 10, 30);

    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a), "overlap is symmetric");
    assert_eq!(a.overlap_minutes(&b), 30);
}

#[test]
fn disjoint_spans_do_not_overlap() {
    let a = span(1, 9, 0, 10, 0);
    let b = span(1, 11, 0, 12, 0);

    assert!(!a.overlaps(&b));
    assert_eq!(a.overlap_minutes(&b), 0);
}

#[test]
fn adjacent_spans_are_not_a_conflict() {
    // One ends exactly when the other starts.
    let a = span(1, 9, 0, 10, 0);
    let b = span(1, 10, 0, 11, 0);

    assert!(!a.overlaps(&b));
    assert!(!b.overlaps(&a));
}

#[test]
fn contained_span_overlaps_for_its_full_length() {
    let outer = span(1, 9, 0, 12, 0);
    let inner = span(1, 10, 0, 11, 0);

    assert_eq!(outer.overlap_minutes(&inner), 60);
}

#[test]
fn identical_spans_overlap_completely() {
    let a = span(1, 10, 0, 11, 0);
    assert!(a.overlaps(&a));
    assert_eq!(a.overlap_minutes(&a), 60);
}

#[test]
fn zero_length_span_never_overlaps() {
    let instant = span(1, 10, 30, 10, 30);
    let busy = span(1, 10, 0, 11, 0);

    assert!(!instant.overlaps(&busy));
    assert!(!busy.overlaps(&instant));
}

#[test]
fn pairwise_conflicts_all_found() {
    let a = vec![span(1, 9, 0, 10, 0), span(1, 14, 0, 15, 0)];
    let b = vec![span(1, 9, 30, 10, 30), span(1, 14, 30, 15, 30)];

    let conflicts = find_conflicts(&a, &b);

    assert_eq!(conflicts.len(), 2, "should find both conflicts");
    assert_eq!(conflicts[0].overlap_minutes, 30);
    assert_eq!(conflicts[1].overlap_minutes, 30);
}

#[test]
fn no_conflicts_between_disjoint_lists() {
    let a = vec![span(1, 9, 0, 10, 0)];
    let b = vec![span(2, 9, 0, 10, 0)];

    assert!(find_conflicts(&a, &b).is_empty(), "different days never conflict");
}
