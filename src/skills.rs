// ABOUTME: Skill category catalog with sub-skill sets and keyframe labels
// ABOUTME: Source of truth for frame counts, display names, and progress defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlaySmart

//! # Skill Catalog
//!
//! The four skill categories and their fixed sub-skill sets. Shooting and
//! passing motions are graded from 5 sequential keyframes, defending and
//! positioning from 4; the per-category labels double as the capture-button
//! captions in the UI host and as the frame role names in the grading prompt.

use serde::{Deserialize, Serialize};

/// A football skill category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    /// Striking the ball at goal
    Shooting,
    /// Distributing the ball to teammates
    Passing,
    /// Winning or denying the ball
    Defending,
    /// Off-ball movement and spatial awareness
    Positioning,
}

impl SkillCategory {
    /// All categories in display order
    pub const ALL: [Self; 4] = [
        Self::Shooting,
        Self::Passing,
        Self::Defending,
        Self::Positioning,
    ];

    /// Stable string key used in persisted state and prompts
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Shooting => "shooting",
            Self::Passing => "passing",
            Self::Defending => "defending",
            Self::Positioning => "positioning",
        }
    }

    /// Parse a category from its stable key
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Human-readable category name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Shooting => "Shooting",
            Self::Passing => "Passing",
            Self::Defending => "Defending",
            Self::Positioning => "Positioning",
        }
    }

    /// Number of keyframes a grading request must carry
    #[must_use]
    pub const fn required_frames(self) -> usize {
        match self {
            Self::Shooting | Self::Passing => 5,
            Self::Defending | Self::Positioning => 4,
        }
    }

    /// Sub-skill keys belonging to this category
    #[must_use]
    pub const fn sub_skills(self) -> &'static [&'static str] {
        match self {
            Self::Shooting => &[
                "power_shot",
                "finesse",
                "chip",
                "volley",
                "bicycle",
                "penalty",
                "trivela",
                "free_kick",
            ],
            Self::Passing => &[
                "ground_pass",
                "lob",
                "through_ball",
                "cross",
                "long_ball",
                "one_touch",
            ],
            Self::Defending => &[
                "jockeying",
                "tackling",
                "interception",
                "marking",
                "clearance",
                "blocking",
            ],
            Self::Positioning => &["off_ball", "spacing", "pressing", "transition", "shape"],
        }
    }

    /// Keyframe capture labels, in the order frames must be submitted
    #[must_use]
    pub const fn keyframe_labels(self) -> &'static [&'static str] {
        match self {
            Self::Shooting | Self::Passing => &[
                "1. Approach",
                "2. Contact",
                "3. Follow-Thru (Start)",
                "4. Follow-Thru (End)",
                "5. Ball Trajectory",
            ],
            Self::Defending => &[
                "1. Approach to Player",
                "2. Jockey / Stance",
                "3. Tackle / Action",
                "4. Recovery / Regain",
            ],
            Self::Positioning => &[
                "1. Initial Position",
                "2. Scan / Movement",
                "3. Action Phase",
                "4. Recovery / Transition",
            ],
        }
    }

    /// Check whether `key` names a sub-skill of this category
    #[must_use]
    pub fn contains_sub_skill(self, key: &str) -> bool {
        self.sub_skills().contains(&key)
    }
}

impl std::fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Human-readable name for a sub-skill key, across all categories
#[must_use]
pub fn sub_skill_display_name(key: &str) -> Option<&'static str> {
    let name = match key {
        "power_shot" => "Power Shot",
        "finesse" => "Finesse Shot",
        "chip" => "Chip Shot",
        "volley" => "Volley",
        "bicycle" => "Bicycle Kick",
        "penalty" => "Penalty",
        "trivela" => "Trivela",
        "free_kick" => "Free Kick",
        "ground_pass" => "Ground Pass",
        "lob" => "Lob Pass",
        "through_ball" => "Through Ball",
        "cross" => "Cross",
        "long_ball" => "Long Ball",
        "one_touch" => "One Touch",
        "jockeying" => "Jockeying",
        "tackling" => "Tackling",
        "interception" => "Interception",
        "marking" => "Marking",
        "clearance" => "Clearance",
        "blocking" => "Blocking",
        "off_ball" => "Off Ball Movement",
        "spacing" => "Spacing",
        "pressing" => "Pressing",
        "transition" => "Transition",
        "shape" => "Team Shape",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_counts_match_label_sets() {
        for category in SkillCategory::ALL {
            assert_eq!(
                category.required_frames(),
                category.keyframe_labels().len()
            );
        }
    }

    #[test]
    fn every_sub_skill_has_a_display_name() {
        for category in SkillCategory::ALL {
            for key in category.sub_skills() {
                assert!(sub_skill_display_name(key).is_some(), "missing name: {key}");
            }
        }
    }

    #[test]
    fn category_key_round_trip() {
        for category in SkillCategory::ALL {
            assert_eq!(SkillCategory::from_key(category.key()), Some(category));
        }
        assert_eq!(SkillCategory::from_key("dribbling"), None);
    }
}
