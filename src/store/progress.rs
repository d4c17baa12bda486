// ABOUTME: Persisted best-score-so-far map keyed by skill category and sub-skill
// ABOUTME: Defensive load-merge against the canonical catalog, monotonic updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlaySmart

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::KeyValueStore;
use crate::errors::AppResult;
use crate::models::ProgressRecord;
use crate::skills::SkillCategory;

/// Fixed persistence key for the serialized progress map
pub const PROGRESS_KEY: &str = "playSmartProgress";

/// Persisted shape of one category's progress
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CategoryProgress {
    #[serde(rename = "subSkills")]
    sub_skills: BTreeMap<String, ProgressRecord>,
}

/// Best-score tracker for every known sub-skill
///
/// Initialized to `{current: 0, target: 100}` for the whole catalog. Stored
/// entries are merged field-by-field against that canonical structure at
/// load: unknown categories or sub-skills and malformed records are ignored,
/// never a crash. `current` only moves up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressStore {
    #[serde(flatten)]
    categories: BTreeMap<String, CategoryProgress>,
}

impl ProgressStore {
    /// The canonical default structure covering the full skill catalog
    #[must_use]
    pub fn defaults() -> Self {
        let categories = SkillCategory::ALL
            .into_iter()
            .map(|category| {
                let sub_skills = category
                    .sub_skills()
                    .iter()
                    .map(|key| ((*key).to_owned(), ProgressRecord::default()))
                    .collect();
                (category.key().to_owned(), CategoryProgress { sub_skills })
            })
            .collect();
        Self { categories }
    }

    /// Load from the key-value store, merging defensively into the defaults
    #[must_use]
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut progress = Self::defaults();
        let Some(raw) = store.get(PROGRESS_KEY) else {
            return progress;
        };
        let Ok(stored) = serde_json::from_str::<Value>(&raw) else {
            debug!("stored progress is not valid JSON, using defaults");
            return progress;
        };

        for (category_key, category) in &mut progress.categories {
            let stored_subs = stored
                .get(category_key)
                .and_then(|c| c.get("subSkills"))
                .and_then(Value::as_object);
            let Some(stored_subs) = stored_subs else {
                continue;
            };
            for (sub_key, record) in &mut category.sub_skills {
                if let Some(entry) = stored_subs.get(sub_key) {
                    if let Ok(stored_record) =
                        serde_json::from_value::<ProgressRecord>(entry.clone())
                    {
                        *record = stored_record;
                    }
                }
            }
        }
        progress
    }

    /// Look up the record for a sub-skill
    #[must_use]
    pub fn record(&self, category: SkillCategory, sub_skill: &str) -> Option<ProgressRecord> {
        self.categories
            .get(category.key())
            .and_then(|c| c.sub_skills.get(sub_skill))
            .copied()
    }

    /// Record a new analysis score, persisting only on improvement
    ///
    /// Returns `true` when the score beat the stored best. A lower or equal
    /// score leaves both the map and the backing store untouched.
    ///
    /// # Errors
    ///
    /// Propagates the backend's storage error when persisting fails.
    pub fn record_score(
        &mut self,
        category: SkillCategory,
        sub_skill: &str,
        score: u8,
        store: &mut dyn KeyValueStore,
    ) -> AppResult<bool> {
        let Some(record) = self
            .categories
            .get_mut(category.key())
            .and_then(|c| c.sub_skills.get_mut(sub_skill))
        else {
            return Ok(false);
        };
        if score <= record.current {
            return Ok(false);
        }
        record.current = score;
        let encoded = serde_json::to_string(&self)?;
        store.set(PROGRESS_KEY, &encoded)?;
        Ok(true)
    }
}
