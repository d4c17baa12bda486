// ABOUTME: Integration tests for the progress store, drill bank, and KV backends
// ABOUTME: Covers monotonic scores, defensive load-merge, dedup, and file persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlaySmart

// Test files don't require documentation - this is a rustc lint (not clippy)
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use playsmart::models::{Drill, ProgressRecord};
use playsmart::skills::SkillCategory;
use playsmart::store::{
    DrillBank, JsonFileStore, KeyValueStore, MemoryStore, ProgressStore, DRILL_BANK_KEY,
    PROGRESS_KEY,
};
use serde_json::json;

// ============================================================================
// Progress Store
// ============================================================================

#[test]
fn test_progress_defaults_cover_the_whole_catalog() {
    let store = MemoryStore::new();
    let progress = ProgressStore::load(&store);
    for category in SkillCategory::ALL {
        for key in category.sub_skills() {
            assert_eq!(
                progress.record(category, key),
                Some(ProgressRecord::default()),
                "missing default for {key}"
            );
        }
    }
}

#[test]
fn test_progress_scores_only_move_up() {
    let mut store = MemoryStore::new();
    let mut progress = ProgressStore::load(&store);

    assert!(progress
        .record_score(SkillCategory::Shooting, "volley", 70, &mut store)
        .unwrap());
    assert!(!progress
        .record_score(SkillCategory::Shooting, "volley", 60, &mut store)
        .unwrap());
    assert!(!progress
        .record_score(SkillCategory::Shooting, "volley", 70, &mut store)
        .unwrap());

    let record = progress.record(SkillCategory::Shooting, "volley").unwrap();
    assert_eq!(record.current, 70);

    assert!(progress
        .record_score(SkillCategory::Shooting, "volley", 85, &mut store)
        .unwrap());
    let record = progress.record(SkillCategory::Shooting, "volley").unwrap();
    assert_eq!(record.current, 85);
}

#[test]
fn test_progress_survives_a_reload() {
    let mut store = MemoryStore::new();
    let mut progress = ProgressStore::load(&store);
    progress
        .record_score(SkillCategory::Passing, "cross", 64, &mut store)
        .unwrap();

    let reloaded = ProgressStore::load(&store);
    let record = reloaded.record(SkillCategory::Passing, "cross").unwrap();
    assert_eq!(record.current, 64);
    // Untouched skills keep their defaults
    let other = reloaded.record(SkillCategory::Defending, "tackling").unwrap();
    assert_eq!(other, ProgressRecord::default());
}

#[test]
fn test_unknown_stored_entries_are_ignored_on_load() {
    let mut store = MemoryStore::new();
    let stored = json!({
        "shooting": {
            "subSkills": {
                "volley": {"current": 40, "target": 100},
                "rabona": {"current": 99, "target": 100},
                "penalty": "corrupt"
            }
        },
        "dribbling": {
            "subSkills": {"nutmeg": {"current": 50, "target": 100}}
        }
    });
    store.set(PROGRESS_KEY, &stored.to_string()).unwrap();

    let progress = ProgressStore::load(&store);
    let volley = progress.record(SkillCategory::Shooting, "volley").unwrap();
    assert_eq!(volley.current, 40);
    // Malformed record falls back to the default
    let penalty = progress.record(SkillCategory::Shooting, "penalty").unwrap();
    assert_eq!(penalty, ProgressRecord::default());
    // Foreign keys never enter the map
    assert_eq!(progress.record(SkillCategory::Shooting, "rabona"), None);
}

#[test]
fn test_corrupt_progress_json_falls_back_to_defaults() {
    let mut store = MemoryStore::new();
    store.set(PROGRESS_KEY, "{not json").unwrap();
    let progress = ProgressStore::load(&store);
    let record = progress.record(SkillCategory::Shooting, "volley").unwrap();
    assert_eq!(record, ProgressRecord::default());
}

// ============================================================================
// Drill Bank
// ============================================================================

#[test]
fn test_drill_bank_merge_deduplicates_by_text() {
    let mut store = MemoryStore::new();
    let mut bank = DrillBank::load(&store);

    let added = bank
        .merge(
            &[Drill::new("Cone weave", 20.0), Drill::new("Wall passes", 15.0)],
            &mut store,
        )
        .unwrap();
    assert_eq!(added, 2);

    // Same text with a different duration is still a duplicate
    let added = bank
        .merge(
            &[Drill::new("Wall passes", 30.0), Drill::new("Sprints", 10.0)],
            &mut store,
        )
        .unwrap();
    assert_eq!(added, 1);
    assert_eq!(bank.len(), 3);
    assert!((bank.drills()[1].duration - 15.0).abs() < f64::EPSILON);
}

#[test]
fn test_drill_bank_skips_invalid_stored_entries() {
    let mut store = MemoryStore::new();
    let stored = json!([
        {"drill": "Cone weave", "duration": 20},
        {"drill": "", "duration": 10},
        {"drill": "Wall passes", "duration": 0},
        {"drill": "Sprints", "duration": -5},
        "not an object",
        {"drill": "Juggling", "duration": 15}
    ]);
    store.set(DRILL_BANK_KEY, &stored.to_string()).unwrap();

    let bank = DrillBank::load(&store);
    assert_eq!(bank.len(), 2);
    assert_eq!(bank.drills()[0].drill, "Cone weave");
    assert_eq!(bank.drills()[1].drill, "Juggling");
}

#[test]
fn test_non_array_drill_bank_starts_empty() {
    let mut store = MemoryStore::new();
    store
        .set(DRILL_BANK_KEY, &json!({"drill": "x"}).to_string())
        .unwrap();
    assert!(DrillBank::load(&store).is_empty());
}

#[test]
fn test_unchanged_merge_does_not_touch_the_backend() {
    let mut store = MemoryStore::new();
    let mut bank = DrillBank::load(&store);
    bank.merge(&[Drill::new("Cone weave", 20.0)], &mut store)
        .unwrap();
    let before = store.get(DRILL_BANK_KEY).unwrap();

    let added = bank
        .merge(&[Drill::new("Cone weave", 45.0)], &mut store)
        .unwrap();
    assert_eq!(added, 0);
    assert_eq!(store.get(DRILL_BANK_KEY).unwrap(), before);
}

// ============================================================================
// File-Backed Store
// ============================================================================

#[test]
fn test_json_file_store_round_trips_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("playsmart.json");

    {
        let mut store = JsonFileStore::open(&path);
        store.set(PROGRESS_KEY, "{\"shooting\":{}}").unwrap();
        store.set(DRILL_BANK_KEY, "[]").unwrap();
    }

    let store = JsonFileStore::open(&path);
    assert_eq!(store.get(PROGRESS_KEY).as_deref(), Some("{\"shooting\":{}}"));
    assert_eq!(store.get(DRILL_BANK_KEY).as_deref(), Some("[]"));
}

#[test]
fn test_corrupt_store_file_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("playsmart.json");
    std::fs::write(&path, "!!! definitely not json").unwrap();

    let store = JsonFileStore::open(&path);
    assert_eq!(store.get(PROGRESS_KEY), None);
}

#[test]
fn test_removed_key_stays_gone_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("playsmart.json");

    {
        let mut store = JsonFileStore::open(&path);
        store.set(PROGRESS_KEY, "{}").unwrap();
        store.remove(PROGRESS_KEY);
    }

    let store = JsonFileStore::open(&path);
    assert_eq!(store.get(PROGRESS_KEY), None);
}
