// ABOUTME: Gemini generateContent transport over reqwest
// ABOUTME: Maps HTTP and body-level failures into typed gateway errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlaySmart

//! # Gemini Transport
//!
//! Production [`GenerateContent`] implementation posting to the Generative
//! Language API. Configure with [`GeminiConfig`](crate::config::GeminiConfig);
//! the API key rides as a query parameter, Gemini style.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, instrument};

use super::{GatewayError, GenerateContent, GenerateRequest, GenerateResponse};
use crate::config::GeminiConfig;

/// How much of an unparseable error body to quote in diagnostics
const ERROR_BODY_SNIPPET: usize = 200;

/// Error body shape the service returns on failures
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Gemini API client
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    /// Create a client from a config
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        )
    }

    /// Pull the service's diagnostic message out of an error body,
    /// falling back to a snippet of the raw text
    fn error_detail(body: &str) -> String {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .map_or_else(
                || body.chars().take(ERROR_BODY_SNIPPET).collect(),
                |e| e.message,
            )
    }
}

#[async_trait]
impl GenerateContent for GeminiClient {
    #[instrument(skip_all, fields(model = %self.config.model))]
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, GatewayError> {
        debug!("sending generateContent request");

        let response = self
            .client
            .post(self.build_url())
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport {
                status: Some(status.as_u16()),
                message: format!("failed to read response body: {e}"),
            })?;

        if !status.is_success() {
            let detail = Self::error_detail(&body);
            error!(status = %status, detail, "Gemini API error");
            return Err(GatewayError::Transport {
                status: Some(status.as_u16()),
                message: detail,
            });
        }

        serde_json::from_str::<GenerateResponse>(&body).map_err(|e| {
            error!(error = %e, "failed to parse Gemini response");
            GatewayError::MalformedResponse
        })
    }
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
