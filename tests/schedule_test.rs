// ABOUTME: Integration tests for the weekly schedule generator
// ABOUTME: Covers session partitioning, duration caps, diagnostics, and determinism
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlaySmart

// Test files don't require documentation - this is a rustc lint (not clippy)
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashSet;

use playsmart::models::Drill;
use playsmart::schedule::{generate_schedule, WEEKDAYS};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn test_bank() -> Vec<Drill> {
    vec![
        Drill::new("Cone weave", 20.0),
        Drill::new("Wall passes", 25.0),
        Drill::new("First-touch circuit", 30.0),
        Drill::new("Shooting ladder", 25.0),
        Drill::new("1v1 jockeying", 20.0),
        Drill::new("Crossing reps", 30.0),
        Drill::new("Sprint intervals", 15.0),
        Drill::new("Juggling blocks", 20.0),
        Drill::new("Target practice", 25.0),
        Drill::new("Scanning rondo", 30.0),
    ]
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

// ============================================================================
// Session Partitioning
// ============================================================================

#[test]
fn test_five_hours_yields_three_sessions() {
    let outcome = generate_schedule(&test_bank(), 5.0, &mut rng());

    // 300 minutes targets 3 sessions of 100 minutes each
    assert_eq!(outcome.sessions.len(), 3);
    assert_eq!(outcome.diagnostic, None);
    let days: Vec<&str> = outcome.sessions.iter().map(|s| s.day.as_str()).collect();
    assert_eq!(days, vec!["Monday", "Tuesday", "Wednesday"]);

    for session in &outcome.sessions {
        assert!(session.duration > 0.0);
        assert!(
            session.duration <= 100.0 * 1.15,
            "session overran the cap: {}",
            session.duration
        );
        let names: HashSet<&str> = session.drills.iter().map(|d| d.drill.as_str()).collect();
        assert_eq!(names.len(), session.drills.len(), "duplicate drill in session");
        let total: f64 = session.drills.iter().map(|d| d.duration).sum();
        assert!((total - session.duration).abs() < f64::EPSILON);
    }
}

#[test]
fn test_one_hour_yields_single_session() {
    let outcome = generate_schedule(&test_bank(), 1.0, &mut rng());
    assert_eq!(outcome.sessions.len(), 1);
    assert_eq!(outcome.sessions[0].day, "Monday");
    assert_eq!(outcome.diagnostic, None);
}

#[test]
fn test_sessions_never_exceed_seven_days() {
    // 900 minutes asks for 10 sessions; the week only has 7 slots
    let outcome = generate_schedule(&test_bank(), 15.0, &mut rng());
    assert!(outcome.sessions.len() <= 7);
    for (session, day) in outcome.sessions.iter().zip(WEEKDAYS) {
        assert_eq!(session.day, day);
    }
}

// ============================================================================
// Oversized and Degenerate Inputs
// ============================================================================

#[test]
fn test_empty_bank_reports_diagnostic() {
    let outcome = generate_schedule(&[], 5.0, &mut rng());
    assert!(outcome.sessions.is_empty());
    assert_eq!(
        outcome.diagnostic.as_deref(),
        Some("Drill Bank empty. Analyze skills first.")
    );
}

#[test]
fn test_tiny_budget_rejected_as_too_short() {
    // 12 minutes total, below the 15-minute session floor
    let outcome = generate_schedule(&test_bank(), 0.2, &mut rng());
    assert!(outcome.sessions.is_empty());
    assert_eq!(
        outcome.diagnostic.as_deref(),
        Some("Sessions too short (12m). Increase hours.")
    );
}

#[test]
fn test_oversized_drill_accepted_into_empty_session() {
    // A single drill longer than the session cap still gets scheduled,
    // otherwise a bank of long drills could never produce anything
    let bank = vec![Drill::new("Full match simulation", 200.0)];
    let outcome = generate_schedule(&bank, 1.5, &mut rng());
    assert_eq!(outcome.sessions.len(), 1);
    assert_eq!(outcome.sessions[0].drills.len(), 1);
    assert!((outcome.sessions[0].duration - 200.0).abs() < f64::EPSILON);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_same_seed_gives_identical_schedule() {
    let first = generate_schedule(&test_bank(), 4.0, &mut rng());
    let second = generate_schedule(&test_bank(), 4.0, &mut rng());
    assert_eq!(first, second);
}

#[test]
fn test_aggregate_properties_hold_across_seeds() {
    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let outcome = generate_schedule(&test_bank(), 3.0, &mut rng);
        assert_eq!(outcome.sessions.len(), 2, "seed {seed}");
        for session in &outcome.sessions {
            let names: HashSet<&str> =
                session.drills.iter().map(|d| d.drill.as_str()).collect();
            assert_eq!(names.len(), session.drills.len(), "seed {seed}");
            assert!(session.duration <= 90.0 * 1.15, "seed {seed}");
        }
    }
}
