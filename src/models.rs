// ABOUTME: Shared data model for analysis requests, results, progress, and schedules
// ABOUTME: Serde types matching the persisted JSON and the Gemini response schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlaySmart

//! # Data Model
//!
//! Types shared across the gateway, sanitizer, stores, and scheduler. Field
//! names serialize in the `camelCase` shape the original web client persisted
//! (`proScore`, `subSkills`), so an existing browser profile migrates cleanly.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::skills::SkillCategory;

/// Professional benchmark used when the AI omits or mangles `proScore`
pub const DEFAULT_PRO_SCORE: f64 = 90.0;

/// A still image captured from the uploaded video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyframe {
    /// Image MIME type (the capture pipeline produces JPEG)
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub data: String,
}

impl Keyframe {
    /// Wrap already-encoded JPEG data
    #[must_use]
    pub fn jpeg(data: impl Into<String>) -> Self {
        Self {
            mime_type: "image/jpeg".to_owned(),
            data: data.into(),
        }
    }

    /// Encode raw JPEG bytes
    #[must_use]
    pub fn from_jpeg_bytes(bytes: &[u8]) -> Self {
        Self::jpeg(BASE64.encode(bytes))
    }
}

/// A fully-validated grading request
///
/// Construction enforces the frame-count invariant: the number of keyframes
/// must equal [`SkillCategory::required_frames`], and the sub-skill must
/// belong to the category's fixed set.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    category: SkillCategory,
    sub_skill: String,
    frames: Vec<Keyframe>,
}

impl AnalysisRequest {
    /// Validate and build a request
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Precondition`] if the sub-skill does not belong to
    /// the category or the frame count is wrong.
    pub fn new(
        category: SkillCategory,
        sub_skill: impl Into<String>,
        frames: Vec<Keyframe>,
    ) -> AppResult<Self> {
        let sub_skill = sub_skill.into();
        if !category.contains_sub_skill(&sub_skill) {
            return Err(AppError::precondition(format!(
                "'{sub_skill}' is not a {} skill",
                category.display_name()
            )));
        }
        let required = category.required_frames();
        if frames.len() != required {
            return Err(AppError::precondition(format!(
                "Capture all {required} frames first."
            )));
        }
        Ok(Self {
            category,
            sub_skill,
            frames,
        })
    }

    /// Skill category being graded
    #[must_use]
    pub const fn category(&self) -> SkillCategory {
        self.category
    }

    /// Sub-skill key being graded
    #[must_use]
    pub fn sub_skill(&self) -> &str {
        &self.sub_skill
    }

    /// Keyframes in capture order
    #[must_use]
    pub fn frames(&self) -> &[Keyframe] {
        &self.frames
    }
}

/// Severity of a detected technique issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fundamental flaw in the motion
    High,
    /// Notable but correctable
    Medium,
    /// Minor refinement
    Low,
}

impl Severity {
    /// Parse a severity case-insensitively, as the sanitizer accepts it
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// A single flaw the grader found, with its correction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// How badly the flaw hurts the technique
    pub severity: Severity,
    /// What is wrong (e.g. "Plant foot too far in Frame 2")
    pub issue: String,
    /// The specific correction
    pub fix: String,
}

/// A recommended practice drill
///
/// The drill text acts as the identity key in the drill bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drill {
    /// Drill description
    pub drill: String,
    /// Duration in minutes, always positive
    pub duration: f64,
}

impl Drill {
    /// Build a drill entry
    #[must_use]
    pub fn new(drill: impl Into<String>, duration: f64) -> Self {
        Self {
            drill: drill.into(),
            duration,
        }
    }
}

/// Sanitized grading verdict for one analyzed motion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Harsh score for the entire technique, clamped to 0-100
    pub score: u8,
    /// Professional benchmark, not clamped (a reference value, not a grade)
    #[serde(rename = "proScore")]
    pub pro_score: f64,
    /// Detected flaws, worst first as returned by the grader
    pub issues: Vec<Issue>,
    /// Praised strengths, at most a couple by prompt design
    pub strengths: Vec<String>,
    /// Drills recommended to address the flaws
    pub drills: Vec<Drill>,
}

impl AnalysisResult {
    /// The zero-result default returned for unusable input
    #[must_use]
    pub fn zero() -> Self {
        Self {
            score: 0,
            pro_score: DEFAULT_PRO_SCORE,
            issues: Vec::new(),
            strengths: Vec::new(),
            drills: Vec::new(),
        }
    }
}

/// Best-score-so-far record for one sub-skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Best score achieved so far, monotonically non-decreasing
    pub current: u8,
    /// Goal score
    pub target: u8,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            current: 0,
            target: 100,
        }
    }
}

/// One generated training session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSession {
    /// Weekday name, Monday-first
    pub day: String,
    /// Drills chosen for this session, no duplicate names
    pub drills: Vec<Drill>,
    /// Sum of the chosen drills' minutes
    pub duration: f64,
}
