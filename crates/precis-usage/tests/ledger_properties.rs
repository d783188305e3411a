// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for ledger invariants and derived views.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use precis_core::TokenUsage;
use precis_test_utils::{TestHarness, day};
use precis_usage::{Tier, UsageLedger, aggregate};
use proptest::prelude::*;

/// (day offset, requests, input tokens, output tokens)
fn observation() -> impl Strategy<Value = (u64, u64, u64, u64)> {
    (0u64..200, 0u64..20, 0u64..2_000_000, 0u64..2_000_000)
}

fn apply(ledger: &mut UsageLedger, ops: &[(u64, u64, u64, u64)]) {
    for &(offset, requests, input, output) in ops {
        ledger.record_at(day(offset), TokenUsage::new(input, output), requests);
    }
}

proptest! {
    #[test]
    fn distinct_dates_are_capped_at_capacity(
        offsets in prop::collection::hash_set(0u64..1_000, 0..250)
    ) {
        let offsets: Vec<u64> = offsets.into_iter().collect();
        let mut h = TestHarness::in_memory();
        for &offset in &offsets {
            h.ledger.record_at(day(offset), TokenUsage::new(1, 1), 1);
        }

        let expected_len = offsets.len().min(90);
        prop_assert_eq!(h.ledger.len(), expected_len);

        // Survivors are the most recent insertions, newest first.
        let expected: Vec<NaiveDate> = offsets.iter().rev().take(90).map(|&o| day(o)).collect();
        let actual: Vec<NaiveDate> = h.ledger.iter().map(|r| r.date).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn repeated_date_accumulates_every_field(
        calls in prop::collection::vec((0u64..50, 0u64..1_000_000, 0u64..1_000_000), 1..40)
    ) {
        let mut h = TestHarness::in_memory();
        let pricing = *h.ledger.pricing();
        let mut cost = 0.0;
        for &(requests, input, output) in &calls {
            h.ledger.record_at(day(5), TokenUsage::new(input, output), requests);
            cost += pricing.cost(input, output);
        }

        prop_assert_eq!(h.ledger.len(), 1);
        let record = h.ledger.get(day(5)).unwrap();
        prop_assert_eq!(record.requests, calls.iter().map(|c| c.0).sum::<u64>());
        prop_assert_eq!(record.input_tokens, calls.iter().map(|c| c.1).sum::<u64>());
        prop_assert_eq!(record.output_tokens, calls.iter().map(|c| c.2).sum::<u64>());
        prop_assert!((record.estimated_cost - cost).abs() < 1e-6);
    }

    #[test]
    fn window_is_exact_ascending_and_ends_at_anchor(
        ops in prop::collection::vec(observation(), 0..60),
        days in 0usize..120,
        anchor in 0u64..250,
    ) {
        let mut h = TestHarness::in_memory();
        apply(&mut h.ledger, &ops);
        let before = h.ledger.snapshot();

        let window = h.ledger.window(days, day(anchor)).unwrap();
        prop_assert_eq!(window.len(), days);
        for pair in window.windows(2) {
            prop_assert_eq!(pair[0].date + Days::new(1), pair[1].date);
        }
        if let Some(last) = window.last() {
            prop_assert_eq!(last.date, day(anchor));
        }
        for record in &window {
            match h.ledger.get(record.date) {
                Some(stored) => prop_assert_eq!(record, stored),
                None => prop_assert_eq!(record.requests, 0),
            }
        }
        prop_assert_eq!(h.ledger.snapshot(), before);
    }

    #[test]
    fn stats_equal_sums_over_snapshot(ops in prop::collection::vec(observation(), 0..150)) {
        let mut h = TestHarness::in_memory();
        apply(&mut h.ledger, &ops);

        let snapshot = h.ledger.snapshot();
        let stats = h.ledger.stats();
        let total_requests: u64 = snapshot.iter().map(|r| r.requests).sum();
        prop_assert_eq!(stats.total_requests, total_requests);
        prop_assert_eq!(stats.total_input_tokens, snapshot.iter().map(|r| r.input_tokens).sum::<u64>());
        prop_assert_eq!(stats.total_output_tokens, snapshot.iter().map(|r| r.output_tokens).sum::<u64>());
        let total_cost: f64 = snapshot.iter().map(|r| r.estimated_cost).sum();
        prop_assert!((stats.total_cost - total_cost).abs() < 1e-6);
        prop_assert_eq!(stats.current_tier, Tier::classify(total_requests));
        prop_assert_eq!(stats, aggregate(snapshot.iter()));
    }

    #[test]
    fn export_then_reload_is_identical(ops in prop::collection::vec(observation(), 0..120)) {
        let mut h = TestHarness::in_memory();
        apply(&mut h.ledger, &ops);

        let exported = h.ledger.export().unwrap();
        let mut fresh = TestHarness::in_memory();
        let outcome = fresh.ledger.import(&exported);
        prop_assert!(outcome.success, "{}", outcome.message);
        prop_assert_eq!(fresh.ledger.snapshot(), h.ledger.snapshot());
        prop_assert_eq!(fresh.reopen().snapshot(), h.ledger.snapshot());
        prop_assert_eq!(h.reopen().snapshot(), h.ledger.snapshot());
    }

    #[test]
    fn dates_stay_unique(ops in prop::collection::vec(observation(), 0..200)) {
        let mut h = TestHarness::in_memory();
        apply(&mut h.ledger, &ops);
        let mut seen = HashSet::new();
        for record in h.ledger.iter() {
            prop_assert!(seen.insert(record.date));
        }
    }
}

#[test]
fn ninety_first_date_evicts_only_the_oldest_insertion() {
    let mut h = TestHarness::in_memory();
    for n in 0..90 {
        h.ledger.record_at(day(n), TokenUsage::new(1, 1), 1);
    }
    assert_eq!(h.ledger.len(), 90);

    h.ledger.record_at(day(500), TokenUsage::new(1, 1), 1);
    assert_eq!(h.ledger.len(), 90);
    assert!(h.ledger.get(day(0)).is_none());
    for n in 1..90 {
        assert!(h.ledger.get(day(n)).is_some(), "day {n} should survive");
    }
    assert_eq!(h.ledger.iter().next().map(|r| r.date), Some(day(500)));
}

#[test]
fn empty_ledger_stats_are_tier_one() {
    let h = TestHarness::in_memory();
    let stats = h.ledger.stats();
    assert_eq!(stats.total_requests, 0);
    assert_eq!(stats.current_tier, Tier::Tier1);
    assert_eq!(stats.rate_limit, 50);
}
