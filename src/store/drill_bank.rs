// ABOUTME: Persisted append-only collection of AI-recommended practice drills
// ABOUTME: Deduplicated by exact drill text, validated entry-by-entry at load
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlaySmart

use serde_json::Value;
use tracing::debug;

use super::KeyValueStore;
use crate::errors::AppResult;
use crate::models::Drill;

/// Fixed persistence key for the serialized drill bank
pub const DRILL_BANK_KEY: &str = "playSmartTrainingDrills";

/// Accumulated drill recommendations across analyses
///
/// The bank is a set keyed by drill text. It only ever grows; entries leave
/// it only when the host clears its storage externally.
#[derive(Debug, Clone, Default)]
pub struct DrillBank {
    drills: Vec<Drill>,
}

impl DrillBank {
    /// Load from the key-value store
    ///
    /// Entries that are not objects, have an empty name, or a non-positive
    /// duration are skipped; a value that is not a JSON array is discarded
    /// entirely.
    #[must_use]
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(raw) = store.get(DRILL_BANK_KEY) else {
            return Self::default();
        };
        let Ok(stored) = serde_json::from_str::<Value>(&raw) else {
            debug!("stored drill bank is not valid JSON, starting empty");
            return Self::default();
        };
        let Some(items) = stored.as_array() else {
            debug!("stored drill bank is not an array, starting empty");
            return Self::default();
        };

        let drills = items
            .iter()
            .filter_map(|item| serde_json::from_value::<Drill>(item.clone()).ok())
            .filter(|d| !d.drill.trim().is_empty() && d.duration > 0.0)
            .collect();
        Self { drills }
    }

    /// Drills in insertion order
    #[must_use]
    pub fn drills(&self) -> &[Drill] {
        &self.drills
    }

    /// Whether the bank holds no drills
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drills.is_empty()
    }

    /// Number of drills in the bank
    #[must_use]
    pub fn len(&self) -> usize {
        self.drills.len()
    }

    /// Merge new recommendations, skipping names already present
    ///
    /// Returns how many genuinely new drills were added. Persists only when
    /// something changed.
    ///
    /// # Errors
    ///
    /// Propagates the backend's storage error when persisting fails.
    pub fn merge(&mut self, new: &[Drill], store: &mut dyn KeyValueStore) -> AppResult<usize> {
        let mut added = 0;
        for candidate in new {
            if self.drills.iter().any(|d| d.drill == candidate.drill) {
                continue;
            }
            self.drills.push(candidate.clone());
            added += 1;
        }
        if added > 0 {
            let encoded = serde_json::to_string(&self.drills)?;
            store.set(DRILL_BANK_KEY, &encoded)?;
        }
        Ok(added)
    }
}
