// ABOUTME: Greedy weekly schedule generator over the accumulated drill bank
// ABOUTME: Partitions drills into ~90-minute sessions with an injectable RNG
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlaySmart

//! # Schedule Generator
//!
//! Partitions the drill bank into a small number of weekly sessions for a
//! requested hour budget. The heuristic targets ~90-minute sessions, walks a
//! freshly shuffled bank round-robin with a single shared cursor, and accepts
//! a drill when its name is unused in the session and the session stays under
//! a 115% overrun cap (an empty session always accepts its first candidate so
//! generation can never stall). It favors simplicity and guaranteed
//! termination over optimal bin-packing.
//!
//! The shuffle source is injected so callers control determinism: production
//! passes `rand::thread_rng()`, tests a seeded RNG.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::models::{Drill, ScheduleSession};

/// Session labels, Monday-first; never wraps past Sunday
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Target session length in minutes
const TARGET_SESSION_MINUTES: f64 = 90.0;

/// Sessions shorter than this are not worth scheduling
const MIN_SESSION_MINUTES: f64 = 15.0;

/// Sessions under this length draw a soft warning
const SHORT_SESSION_MINUTES: f64 = 30.0;

/// Accepted overrun past the per-session target
const OVERRUN_FACTOR: f64 = 1.15;

/// Result of a generation run
///
/// `diagnostic` is set when no usable schedule (or a short one) could be
/// produced; `warning` flags a schedule that was produced but whose sessions
/// are on the short side.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleOutcome {
    /// Generated sessions in weekday order, empty sessions removed
    pub sessions: Vec<ScheduleSession>,
    /// User-facing explanation of a failed or curtailed generation
    pub diagnostic: Option<String>,
    /// Soft warning that continues generation
    pub warning: Option<String>,
}

impl ScheduleOutcome {
    fn empty(diagnostic: String) -> Self {
        Self {
            sessions: Vec::new(),
            diagnostic: Some(diagnostic),
            warning: None,
        }
    }
}

/// Generate a weekly schedule from the drill bank
///
/// `weekly_hours` is the user's total practice budget. Each generation
/// shuffles the bank once, so exact drill placement is non-deterministic
/// under a real RNG; aggregate properties (no duplicate names per session,
/// duration bounds) always hold.
#[must_use]
pub fn generate_schedule<R: Rng>(
    bank: &[Drill],
    weekly_hours: f64,
    rng: &mut R,
) -> ScheduleOutcome {
    if bank.is_empty() {
        return ScheduleOutcome::empty("Drill Bank empty. Analyze skills first.".to_owned());
    }

    let total_minutes = weekly_hours * 60.0;
    let session_count = ((total_minutes / TARGET_SESSION_MINUTES).round() as usize).max(1);
    let minutes_per_session = (total_minutes / session_count as f64).floor();

    if minutes_per_session < MIN_SESSION_MINUTES {
        return ScheduleOutcome::empty(format!(
            "Sessions too short ({minutes_per_session}m). Increase hours."
        ));
    }
    let warning = (minutes_per_session < SHORT_SESSION_MINUTES && session_count > 1)
        .then(|| format!("Note: Sessions short ({minutes_per_session}m)."));

    let days = &WEEKDAYS[..session_count.min(WEEKDAYS.len())];

    let mut shuffled = bank.to_vec();
    shuffled.shuffle(rng);

    // Shared round-robin cursor; deliberately not reset per session
    let mut cursor = 0usize;
    let max_attempts = shuffled.len() * 3;

    let sessions: Vec<ScheduleSession> = days
        .iter()
        .map(|day| {
            let mut drills: Vec<Drill> = Vec::new();
            let mut duration = 0.0;
            let mut used: HashSet<&str> = HashSet::new();
            let mut attempts = 0usize;

            while duration < minutes_per_session && attempts < max_attempts {
                attempts += 1;
                let candidate = &shuffled[cursor % shuffled.len()];
                cursor += 1;

                let fits = duration + candidate.duration <= minutes_per_session * OVERRUN_FACTOR;
                if !used.contains(candidate.drill.as_str()) && (fits || drills.is_empty()) {
                    used.insert(candidate.drill.as_str());
                    duration += candidate.duration;
                    drills.push(candidate.clone());
                }

                // Early abandonment: a full pass left the session badly underfilled
                if attempts >= shuffled.len() && duration < minutes_per_session * 0.5 {
                    break;
                }
            }

            if duration < MIN_SESSION_MINUTES {
                warn!(day, duration, "generated session below minimum length");
            }
            ScheduleSession {
                day: (*day).to_owned(),
                drills,
                duration,
            }
        })
        .filter(|session| session.duration > 0.0)
        .collect();

    let diagnostic = if sessions.is_empty() {
        Some(format!(
            "Could not generate schedule. Drills too long for sessions ({minutes_per_session}m)?"
        ))
    } else if sessions.len() < session_count {
        Some(format!(
            "Generated {} sessions. Some may have been too short.",
            sessions.len()
        ))
    } else {
        None
    };

    ScheduleOutcome {
        sessions,
        diagnostic,
        warning,
    }
}
