//! Property-based tests for the occurrence and free-slot logic using proptest.
//!
//! These verify invariants that should hold for *any* event, not just the
//! specific examples in `occurrence_tests.rs`.

use agenda_core::{find_free_slots, Event, Frequency, Span, Termination};
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, TimeDelta};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies — generate dates, times, and frequencies
// ---------------------------------------------------------------------------

fn arb_frequency() -> impl Strategy<Value = Frequency> {
    prop_oneof![
        Just(Frequency::Daily),
        Just(Frequency::Weekly),
        Just(Frequency::Monthly),
    ]
}

/// A date in the 2020-2030 range. Day is capped at 28 to avoid invalid
/// month/day combos.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..=2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_start() -> impl Strategy<Value = NaiveDateTime> {
    (arb_date(), 0u32..=23, 0u32..=59)
        .prop_map(|(date, h, min)| date.and_hms_opt(h, min, 0).unwrap())
}

// ---------------------------------------------------------------------------
// Occurrence invariants
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn every_event_occurs_on_its_start_date(start in arb_start(), freq in arb_frequency()) {
        let single = Event::new("E", start, TimeDelta::minutes(30)).unwrap();
        let repetitive = Event::repetitive("E", start, TimeDelta::minutes(30), freq).unwrap();

        prop_assert!(single.occurs_on(start.date()));
        prop_assert!(repetitive.occurs_on(start.date()));
    }

    #[test]
    fn nothing_occurs_before_the_start_date(
        start in arb_start(),
        freq in arb_frequency(),
        days_before in 1u64..=365,
    ) {
        let event = Event::repetitive("E", start, TimeDelta::minutes(30), freq).unwrap();
        let day = start.date() - Days::new(days_before);

        prop_assert!(!event.occurs_on(day), "occurrence before start on {day}");
    }

    #[test]
    fn daily_events_occur_on_every_later_day(
        start in arb_start(),
        offset in 0u64..=1000,
    ) {
        let event = Event::repetitive("E", start, TimeDelta::minutes(30), Frequency::Daily).unwrap();
        let day = start.date() + Days::new(offset);

        prop_assert!(event.occurs_on(day));
    }

    #[test]
    fn weekly_occurrences_always_share_the_start_weekday(
        start in arb_start(),
        offset in 0u64..=1000,
    ) {
        let event = Event::repetitive("E", start, TimeDelta::minutes(30), Frequency::Weekly).unwrap();
        let day = start.date() + Days::new(offset);

        if event.occurs_on(day) {
            prop_assert_eq!(day.weekday(), start.date().weekday());
        } else {
            prop_assert_ne!(
                day.weekday(),
                start.date().weekday(),
                "a non-excepted matching weekday must occur"
            );
        }
    }

    #[test]
    fn monthly_occurrences_always_share_the_start_day_of_month(
        start in arb_start(),
        offset in 1u64..=1000,
    ) {
        let event = Event::repetitive("E", start, TimeDelta::minutes(30), Frequency::Monthly).unwrap();
        let day = start.date() + Days::new(offset);

        if event.occurs_on(day) {
            prop_assert_eq!(day.day(), start.date().day());
        }
    }

    #[test]
    fn excepted_days_after_the_start_never_occur(
        start in arb_start(),
        freq in arb_frequency(),
        offset in 1u64..=1000,
    ) {
        let mut event = Event::repetitive("E", start, TimeDelta::minutes(30), freq).unwrap();
        let day = start.date() + Days::new(offset);
        event.add_exception(day);

        prop_assert!(!event.occurs_on(day), "exception on {day} was ignored");
    }

    #[test]
    fn terminated_events_never_occur_after_their_boundary(
        start in arb_start(),
        freq in arb_frequency(),
        count in 0u32..=50,
        beyond in 1u64..=365,
    ) {
        let event =
            Event::terminated_after("E", start, TimeDelta::minutes(30), freq, count).unwrap();
        let boundary = event.termination().unwrap().end_date();
        let day = boundary + Days::new(beyond);

        prop_assert!(!event.occurs_on(day), "occurrence past termination on {day}");
    }
}

// ---------------------------------------------------------------------------
// Termination derivation invariants
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn derived_count_is_the_largest_whole_step_fit(
        start in arb_date(),
        freq in arb_frequency(),
        span_days in 0u64..=1000,
    ) {
        let end = start + Days::new(span_days);
        let termination = Termination::by_date(start, freq, end).unwrap();
        let n = termination.occurrences();

        prop_assert!(
            freq.advance(start, n) <= end,
            "{n} steps of {freq} from {start} overshoot {end}"
        );
        prop_assert!(
            freq.advance(start, n + 1) > end,
            "{} steps of {freq} from {start} still fit before {end}",
            n + 1
        );
    }

    #[test]
    fn count_to_date_round_trip_is_exact(
        start in arb_date(),
        freq in arb_frequency(),
        count in 0u32..=100,
    ) {
        let from_count = Termination::by_count(start, freq, count);
        let back = Termination::by_date(start, freq, from_count.end_date()).unwrap();

        prop_assert_eq!(back.occurrences(), count);
    }
}

// ---------------------------------------------------------------------------
// Free-slot invariants
// ---------------------------------------------------------------------------

/// Generate up to eight busy spans within a single day.
fn arb_busy_spans() -> impl Strategy<Value = Vec<Span>> {
    let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    prop::collection::vec((0u32..=22, 0u32..=59, 1i64..=120), 0..8).prop_map(move |raw| {
        raw.into_iter()
            .map(|(h, m, minutes)| {
                let start = day.and_hms_opt(h, m, 0).unwrap();
                Span::new(start, start + TimeDelta::minutes(minutes))
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn free_slots_never_overlap_busy_spans(busy in arb_busy_spans()) {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let window_start = day.and_hms_opt(0, 0, 0).unwrap();
        let window_end = day.and_hms_opt(23, 59, 0).unwrap();

        let slots = find_free_slots(&busy, window_start, window_end);

        for slot in &slots {
            prop_assert!(slot.start >= window_start && slot.end <= window_end);
            prop_assert!(slot.start < slot.end, "free slots have positive length");
            let free = Span::new(slot.start, slot.end);
            for span in &busy {
                prop_assert!(
                    !free.overlaps(span),
                    "free slot {:?} overlaps busy span {:?}",
                    slot,
                    span
                );
            }
        }

        // Slots are sorted and pairwise disjoint.
        for pair in slots.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
    }
}
