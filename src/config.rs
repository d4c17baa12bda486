// ABOUTME: Environment-only configuration for the Gemini transport
// ABOUTME: Reads GEMINI_API_KEY plus optional model and base URL overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlaySmart

//! # Configuration
//!
//! The engine is configured exclusively through environment variables; there
//! is no configuration file.
//!
//! | Variable | Purpose | Default |
//! |---|---|---|
//! | `GEMINI_API_KEY` | API key from Google AI Studio | required |
//! | `PLAYSMART_GEMINI_MODEL` | model identifier | `gemini-2.5-flash` |
//! | `PLAYSMART_GEMINI_BASE_URL` | API base URL (stub servers in tests) | Google endpoint |

use std::env;

use crate::errors::{AppError, AppResult};

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding the model identifier
pub const GEMINI_MODEL_ENV: &str = "PLAYSMART_GEMINI_MODEL";

/// Environment variable overriding the API base URL
pub const GEMINI_BASE_URL_ENV: &str = "PLAYSMART_GEMINI_BASE_URL";

/// Default model used for both grading and coach chat
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL for the Generative Language API
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for the Gemini transport
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key sent as a query parameter
    pub api_key: String,
    /// Model identifier (e.g. `gemini-2.5-flash`)
    pub model: String,
    /// API base URL without a trailing slash
    pub base_url: String,
}

impl GeminiConfig {
    /// Create a config with the default model and endpoint
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    /// Build a config from the environment
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if `GEMINI_API_KEY` is not set.
    pub fn from_env() -> AppResult<Self> {
        let api_key = env::var(GEMINI_API_KEY_ENV).map_err(|_| {
            AppError::config(format!("{GEMINI_API_KEY_ENV} environment variable not set"))
        })?;
        let mut config = Self::new(api_key);
        if let Ok(model) = env::var(GEMINI_MODEL_ENV) {
            config.model = model;
        }
        if let Ok(base_url) = env::var(GEMINI_BASE_URL_ENV) {
            config.base_url = base_url.trim_end_matches('/').to_owned();
        }
        Ok(config)
    }

    /// Override the model identifier
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}
