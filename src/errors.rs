// ABOUTME: Unified error types for the PlaySmart engine
// ABOUTME: Thiserror enum covering config, precondition, storage, and analysis failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlaySmart

//! # Error Handling
//!
//! Application-level errors surfaced to the UI host. Failures inside the AI
//! gateway never reach this type directly: the gateway absorbs transport and
//! completion errors into its sentinel string (see [`crate::llm`]), and only
//! the analysis workflow converts that sentinel into an [`AppError::Analysis`].
//!
//! Every variant's `Display` output is suitable for a user-facing
//! notification; no error here is fatal to the process.

use thiserror::Error;

/// Result alias used throughout the crate
pub type AppResult<T> = Result<T, AppError>;

/// Application error taxonomy
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration problem (missing API key, invalid override)
    #[error("configuration error: {0}")]
    Config(String),

    /// A local precondition failed before any network call was made
    /// (missing selection, incomplete frame capture, invalid upload)
    #[error("{0}")]
    Precondition(String),

    /// The analysis workflow failed after the request was issued
    /// (sentinel error from the gateway, unparseable reply)
    #[error("Analysis Failed: {0}")]
    Analysis(String),

    /// The key-value backend could not persist a value
    #[error("storage error: {0}")]
    Storage(String),

    /// JSON encoding of a persisted structure failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a precondition error
    #[must_use]
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// Create an analysis-workflow error
    #[must_use]
    pub fn analysis(message: impl Into<String>) -> Self {
        Self::Analysis(message.into())
    }

    /// Create a storage error
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}
