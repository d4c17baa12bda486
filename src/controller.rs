// ABOUTME: Application controller driving the upload-and-analyze workflow
// ABOUTME: Owns workflow state, the persisted stores, and the analysis pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlaySmart

//! # Application Controller
//!
//! Finite-state controller for the analysis workflow. The UI host calls one
//! method per user action; the controller validates preconditions, advances
//! [`WorkflowState`], and on a successful analysis updates and persists the
//! progress store and drill bank.
//!
//! Selecting a new category resets every downstream selection. `analyze` may
//! only run once the captured frame count equals the category's requirement;
//! on any failure the workflow reverts to its pre-analysis state and no
//! partial result is persisted.
//!
//! The controller is an owned state struct mutated through `&mut self` from a
//! single event flow; a multi-threaded host must serialize access to preserve
//! the monotonic-score and drill-deduplication invariants.

use rand::Rng;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::errors::{AppError, AppResult};
use crate::llm::{prompts, AiGateway, GenerateContent, ERROR_SENTINEL};
use crate::models::{AnalysisRequest, AnalysisResult, Keyframe};
use crate::sanitize::sanitize;
use crate::schedule::{generate_schedule, ScheduleOutcome};
use crate::skills::SkillCategory;
use crate::store::{DrillBank, KeyValueStore, ProgressStore};

/// Maximum accepted upload size
pub const MAX_VIDEO_BYTES: u64 = 100 * 1024 * 1024;

/// Host-reported metadata for an uploaded video
#[derive(Debug, Clone)]
pub struct VideoMeta {
    /// Declared MIME type, must be `video/*`
    pub mime_type: String,
    /// File size in bytes
    pub size_bytes: u64,
}

/// Where the user is in the upload-and-analyze workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// Nothing selected yet
    Idle,
    /// Category chosen, sub-skill pending
    CategorySelected,
    /// Sub-skill chosen, video pending
    SubSkillSelected,
    /// Video accepted, no frames captured yet
    VideoLoaded,
    /// At least one keyframe captured
    FramesCapturing,
    /// Gateway call outstanding; navigation disabled by the host
    Analyzing,
    /// A sanitized result is available
    AnalysisReady,
}

/// Workflow controller owning the persisted stores
pub struct Controller<S: KeyValueStore> {
    state: WorkflowState,
    category: Option<SkillCategory>,
    sub_skill: Option<String>,
    video: Option<VideoMeta>,
    frames: Vec<Option<Keyframe>>,
    analysis: Option<AnalysisResult>,
    progress: ProgressStore,
    drill_bank: DrillBank,
    store: S,
}

impl<S: KeyValueStore> Controller<S> {
    /// Create a controller, loading persisted state from the backend
    #[must_use]
    pub fn new(store: S) -> Self {
        let progress = ProgressStore::load(&store);
        let drill_bank = DrillBank::load(&store);
        Self {
            state: WorkflowState::Idle,
            category: None,
            sub_skill: None,
            video: None,
            frames: Vec::new(),
            analysis: None,
            progress,
            drill_bank,
            store,
        }
    }

    /// Current workflow state
    #[must_use]
    pub const fn state(&self) -> WorkflowState {
        self.state
    }

    /// Selected category, if any
    #[must_use]
    pub const fn category(&self) -> Option<SkillCategory> {
        self.category
    }

    /// Selected sub-skill key, if any
    #[must_use]
    pub fn sub_skill(&self) -> Option<&str> {
        self.sub_skill.as_deref()
    }

    /// The latest sanitized analysis, if any
    #[must_use]
    pub const fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// Progress tracker
    #[must_use]
    pub const fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    /// Accumulated drill bank
    #[must_use]
    pub const fn drill_bank(&self) -> &DrillBank {
        &self.drill_bank
    }

    /// How many keyframes are captured so far
    #[must_use]
    pub fn frames_captured(&self) -> usize {
        self.frames.iter().flatten().count()
    }

    /// Select a skill category, resetting all downstream state
    pub fn select_category(&mut self, category: SkillCategory) {
        debug!(category = %category, "category selected");
        self.category = Some(category);
        self.sub_skill = None;
        self.video = None;
        self.frames = vec![None; category.required_frames()];
        self.analysis = None;
        self.state = WorkflowState::CategorySelected;
    }

    /// Select a sub-skill within the current category
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Precondition`] when no category is selected or the
    /// key does not belong to it.
    pub fn select_sub_skill(&mut self, key: &str) -> AppResult<()> {
        let Some(category) = self.category else {
            return Err(AppError::precondition("Please select skills first."));
        };
        if !category.contains_sub_skill(key) {
            return Err(AppError::precondition(format!(
                "'{key}' is not a {} skill",
                category.display_name()
            )));
        }
        self.sub_skill = Some(key.to_owned());
        self.state = WorkflowState::SubSkillSelected;
        Ok(())
    }

    /// Accept an uploaded video, clearing any prior frames and analysis
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Precondition`] when no sub-skill is selected, the
    /// file is not a video, or it exceeds [`MAX_VIDEO_BYTES`].
    pub fn load_video(&mut self, video: VideoMeta) -> AppResult<()> {
        let Some(category) = self.category else {
            return Err(AppError::precondition("Please select skills first."));
        };
        if self.sub_skill.is_none() {
            return Err(AppError::precondition("Please select skills first."));
        }
        if !video.mime_type.starts_with("video/") {
            return Err(AppError::precondition("Please upload a valid video file."));
        }
        if video.size_bytes > MAX_VIDEO_BYTES {
            return Err(AppError::precondition("Video too large (max 100MB)."));
        }
        self.video = Some(video);
        self.frames = vec![None; category.required_frames()];
        self.analysis = None;
        self.state = WorkflowState::VideoLoaded;
        Ok(())
    }

    /// Store a captured keyframe in `slot` (0-indexed capture position)
    ///
    /// Recapturing an already-filled slot replaces it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Precondition`] when no video is loaded or the slot
    /// is out of range for the category.
    pub fn capture_frame(&mut self, slot: usize, frame: Keyframe) -> AppResult<()> {
        if self.video.is_none() {
            return Err(AppError::precondition("Upload a video first."));
        }
        if slot >= self.frames.len() {
            return Err(AppError::precondition(format!(
                "Frame slot {slot} is out of range."
            )));
        }
        self.frames[slot] = Some(frame);
        self.state = WorkflowState::FramesCapturing;
        Ok(())
    }

    /// Run the full analysis pipeline
    ///
    /// Checks preconditions, builds the grading request, invokes the gateway,
    /// parses and sanitizes the reply, then updates progress and the drill
    /// bank. Store persistence failures after a successful analysis are
    /// logged but do not fail the analysis.
    ///
    /// # Errors
    ///
    /// [`AppError::Precondition`] before any network call when selections or
    /// frames are incomplete; [`AppError::Analysis`] when the gateway returns
    /// its sentinel error or the reply is not valid JSON. On error the
    /// workflow state reverts to its pre-analysis value.
    #[instrument(skip_all)]
    pub async fn analyze<T: GenerateContent>(
        &mut self,
        gateway: &AiGateway<T>,
    ) -> AppResult<&AnalysisResult> {
        let (Some(category), Some(sub_skill)) = (self.category, self.sub_skill.clone()) else {
            return Err(AppError::precondition("Please select skills first."));
        };
        let required = category.required_frames();
        let frames: Vec<Keyframe> = self.frames.iter().flatten().cloned().collect();
        if frames.len() != required {
            return Err(AppError::precondition(format!(
                "Capture all {required} frames first."
            )));
        }

        let request = AnalysisRequest::new(category, sub_skill.clone(), frames)?;
        let previous_state = self.state;
        self.state = WorkflowState::Analyzing;
        self.analysis = None;

        match self.run_analysis(gateway, &request).await {
            Ok(result) => {
                self.persist_result(category, &sub_skill, &result);
                self.analysis = Some(result);
                self.state = WorkflowState::AnalysisReady;
                // Freshly stored above
                self.analysis
                    .as_ref()
                    .ok_or_else(|| AppError::analysis("missing result"))
            }
            Err(error) => {
                self.state = previous_state;
                Err(error)
            }
        }
    }

    async fn run_analysis<T: GenerateContent>(
        &self,
        gateway: &AiGateway<T>,
        request: &AnalysisRequest,
    ) -> AppResult<AnalysisResult> {
        let payload = prompts::build_analysis_request(request);
        let reply = gateway.invoke(&payload).await;

        if let Some(message) = reply.strip_prefix(ERROR_SENTINEL) {
            return Err(AppError::analysis(message.trim_start().to_owned()));
        }

        let raw: Value = serde_json::from_str(&reply)
            .map_err(|_| AppError::analysis("AI returned invalid JSON data."))?;
        Ok(sanitize(&raw))
    }

    /// Apply a successful result to the persisted stores
    fn persist_result(&mut self, category: SkillCategory, sub_skill: &str, result: &AnalysisResult) {
        match self
            .progress
            .record_score(category, sub_skill, result.score, &mut self.store)
        {
            Ok(improved) => {
                if improved {
                    debug!(score = result.score, "new best score recorded");
                }
            }
            Err(error) => warn!(%error, "failed to persist progress"),
        }
        if let Err(error) = self.drill_bank.merge(&result.drills, &mut self.store) {
            warn!(%error, "failed to persist drill bank");
        }
    }

    /// Generate a weekly schedule from the current drill bank
    #[must_use]
    pub fn generate_schedule<R: Rng>(&self, weekly_hours: f64, rng: &mut R) -> ScheduleOutcome {
        generate_schedule(self.drill_bank.drills(), weekly_hours, rng)
    }
}

impl<S: KeyValueStore> std::fmt::Debug for Controller<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("state", &self.state)
            .field("category", &self.category)
            .field("sub_skill", &self.sub_skill)
            .field("frames_captured", &self.frames_captured())
            .finish_non_exhaustive()
    }
}
