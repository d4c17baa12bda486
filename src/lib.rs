// ABOUTME: PlaySmart football training analysis engine
// ABOUTME: Multimodal skill grading via Gemini, progress tracking, and schedule generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlaySmart

//! # `PlaySmart` Core
//!
//! Library engine behind the `PlaySmart` football training application. The UI
//! host drives a [`controller::Controller`] through the upload-and-analyze
//! workflow: pick a skill category and sub-skill, capture the required
//! keyframes from an uploaded video, and submit them to the Gemini
//! `generateContent` API for a structured critique. The critique is
//! defensively sanitized before it touches persisted state.
//!
//! ## Key Components
//!
//! - **[`llm`]**: AI gateway with retry/backoff and the sentinel-string error
//!   boundary, plus the Gemini transport and prompt construction
//! - **[`sanitize`]**: total sanitizer turning arbitrary JSON into a valid
//!   [`models::AnalysisResult`]
//! - **[`store`]**: persisted progress tracker and drill bank over a
//!   key-value backend
//! - **[`schedule`]**: greedy weekly session generator over the drill bank
//! - **[`chat`]**: free-form coach chat against the same gateway
//!
//! ## Example
//!
//! ```rust,no_run
//! use playsmart::config::GeminiConfig;
//! use playsmart::controller::Controller;
//! use playsmart::llm::{AiGateway, GeminiClient};
//! use playsmart::skills::SkillCategory;
//! use playsmart::store::MemoryStore;
//!
//! # async fn example() -> Result<(), playsmart::errors::AppError> {
//! let gateway = AiGateway::new(GeminiClient::new(GeminiConfig::from_env()?));
//! let mut controller = Controller::new(MemoryStore::new());
//! controller.select_category(SkillCategory::Shooting);
//! controller.select_sub_skill("volley")?;
//! // ... load video, capture frames, then:
//! // let result = controller.analyze(&gateway).await?;
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod config;
pub mod controller;
pub mod errors;
pub mod llm;
pub mod models;
pub mod sanitize;
pub mod schedule;
pub mod skills;
pub mod store;
