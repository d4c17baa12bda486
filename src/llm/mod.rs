// ABOUTME: AI gateway over the Gemini generateContent API with retry and backoff
// ABOUTME: Defines wire types, the transport trait, and the sentinel error boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlaySmart

//! # AI Gateway
//!
//! The single path by which the engine talks to the hosted model. A
//! [`GenerateContent`] transport performs one request; [`AiGateway`] wraps it
//! with completion-signal inspection, text extraction, and retry with
//! exponential backoff.
//!
//! ## The sentinel error boundary
//!
//! `invoke` never fails in the type system. After exhausting retries it
//! returns a human-readable string beginning with [`ERROR_SENTINEL`]; callers
//! check the prefix to distinguish success from failure. Internally every
//! failure mode is a typed [`GatewayError`] — the sentinel string exists only
//! as the external interface convention the UI host relies on.
//!
//! ## Example
//!
//! ```rust,no_run
//! use playsmart::config::GeminiConfig;
//! use playsmart::llm::{AiGateway, GeminiClient, GenerateRequest, Content, ERROR_SENTINEL};
//!
//! # async fn example() -> Result<(), playsmart::errors::AppError> {
//! let gateway = AiGateway::new(GeminiClient::new(GeminiConfig::from_env()?));
//! let request = GenerateRequest::new(vec![Content::user_text("Suggest a passing drill")]);
//! let reply = gateway.invoke(&request).await;
//! if reply.starts_with(ERROR_SENTINEL) {
//!     eprintln!("coach unavailable: {reply}");
//! }
//! # Ok(())
//! # }
//! ```

mod gemini;
pub mod prompts;
mod retry;

pub use gemini::GeminiClient;
pub use retry::{retry_with_backoff, RetryConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Prefix marking a failed `invoke` result; the sole failure signal
pub const ERROR_SENTINEL: &str = "Error:";

/// Finish reasons treated as a normal completion
const NORMAL_FINISH_REASONS: [&str; 2] = ["STOP", "MAX_TOKENS"];

// ============================================================================
// Wire Types
// ============================================================================

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Ordered message content
    pub contents: Vec<Content>,
    /// Fixed system instruction, outside the conversation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    /// Structured-output declaration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateRequest {
    /// Create a request with message content only
    #[must_use]
    pub const fn new(contents: Vec<Content>) -> Self {
        Self {
            contents,
            system_instruction: None,
            generation_config: None,
        }
    }

    /// Attach a system instruction
    #[must_use]
    pub fn with_system_instruction(mut self, text: impl Into<String>) -> Self {
        self.system_instruction = Some(Content {
            role: None,
            parts: vec![ContentPart::text(text)],
        });
        self
    }

    /// Constrain the response to a JSON schema
    #[must_use]
    pub fn with_json_schema(mut self, schema: serde_json::Value) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: Some("application/json".to_owned()),
            response_schema: Some(schema),
        });
        self
    }
}

/// A block of content, a list of text and image parts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Conversation role; absent on system instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ordered parts
    pub parts: Vec<ContentPart>,
}

impl Content {
    /// A user turn carrying the given parts
    #[must_use]
    pub fn user(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Some("user".to_owned()),
            parts,
        }
    }

    /// A user turn carrying a single text part
    #[must_use]
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::user(vec![ContentPart::text(text)])
    }
}

/// One part of a content block: text or an inline base64 image
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentPart {
    /// Text segment
    Text {
        /// The text
        text: String,
    },
    /// Inline image segment
    InlineData {
        /// Encoded image payload
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl ContentPart {
    /// Build a text part
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Build an inline image part
    #[must_use]
    pub fn inline_image(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }
}

/// Base64-encoded inline media
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// Declared image MIME type
    pub mime_type: String,
    /// Base64 payload
    pub data: String,
}

/// Structured-output declaration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Response MIME type, `application/json` for schema-constrained replies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// Gemini-format response schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

/// Success body of a generation call
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    /// Candidate results; the gateway only reads the first
    pub candidates: Option<Vec<Candidate>>,
}

/// One candidate result
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    /// Generated content parts
    pub content: Option<Content>,
    /// Completion signal (`STOP`, `MAX_TOKENS`, `SAFETY`, ...)
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

// ============================================================================
// Errors
// ============================================================================

/// Typed failure modes of a single generation attempt
///
/// Every variant is retryable; the distinction matters for the cause-specific
/// wording of the final sentinel message.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network or HTTP-level failure; `status` is absent when the request
    /// never reached the service
    #[error("transport failure: {message}")]
    Transport {
        /// HTTP status, when a response arrived
        status: Option<u16>,
        /// Service diagnostic detail
        message: String,
    },

    /// The service stopped generation abnormally
    #[error("generation stopped: {reason}")]
    AbnormalCompletion {
        /// Raw finish reason tag
        reason: String,
        /// Whether the stop was a safety filter
        safety: bool,
    },

    /// The call finished but carried no text
    #[error("finished with reason {reason} but returned no text")]
    EmptyResponse {
        /// Finish reason reported alongside the empty content
        reason: String,
    },

    /// The response structure was unrecognizable
    #[error("unrecognized response structure")]
    MalformedResponse,
}

impl GatewayError {
    /// Cause-specific wording for the user-facing sentinel message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { status: None, .. } => "Network error.".to_owned(),
            Self::Transport {
                status: Some(status),
                message,
            } => format!("HTTP error ({status}): {message}"),
            Self::AbnormalCompletion { safety: true, .. } => "Response blocked (safety).".to_owned(),
            Self::AbnormalCompletion { reason, .. } => {
                format!("AI processing stopped unexpectedly: {reason}.")
            }
            Self::EmptyResponse { .. } => "AI returned empty response.".to_owned(),
            Self::MalformedResponse => "Unexpected response format.".to_owned(),
        }
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// One-shot content generation transport
///
/// [`GeminiClient`] is the production implementation; tests substitute a
/// scripted fake to exercise the gateway's retry and extraction logic.
#[async_trait]
pub trait GenerateContent: Send + Sync {
    /// Issue a single generation request
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] for transport failures, non-success HTTP
    /// statuses, and unparseable response bodies.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, GatewayError>;
}

// ============================================================================
// Gateway
// ============================================================================

/// Retrying gateway around a [`GenerateContent`] transport
pub struct AiGateway<T> {
    transport: T,
    retry: RetryConfig,
}

impl<T: GenerateContent> AiGateway<T> {
    /// Wrap a transport with the default retry policy (3 attempts, 1s base)
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            retry: RetryConfig::default(),
        }
    }

    /// Override the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Invoke the service, retrying transient failures
    ///
    /// On success returns the first text part of the first candidate. On
    /// final-attempt failure returns a sentinel-prefixed message; this
    /// function never panics and never returns `Err`.
    #[instrument(skip_all)]
    pub async fn invoke(&self, request: &GenerateRequest) -> String {
        let result = retry_with_backoff(&self.retry, || self.attempt(request)).await;
        match result {
            Ok(text) => text,
            Err(error) => {
                warn!(%error, "gateway exhausted retries");
                format!("{ERROR_SENTINEL} API Call Failed. {}", error.user_message())
            }
        }
    }

    async fn attempt(&self, request: &GenerateRequest) -> Result<String, GatewayError> {
        let response = self.transport.generate(request).await?;
        let text = extract_text(&response)?;
        debug!("received text response");
        Ok(text)
    }
}

/// Inspect the completion signal and pull the first text part
fn extract_text(response: &GenerateResponse) -> Result<String, GatewayError> {
    let candidate = response.candidates.as_ref().and_then(|c| c.first());

    if let Some(reason) = candidate.and_then(|c| c.finish_reason.as_deref()) {
        if !NORMAL_FINISH_REASONS.contains(&reason) {
            warn!(reason, "generation finished abnormally");
            return Err(GatewayError::AbnormalCompletion {
                reason: reason.to_owned(),
                safety: reason == "SAFETY",
            });
        }
    }

    let text = candidate
        .and_then(|c| c.content.as_ref())
        .and_then(|content| {
            content.parts.iter().find_map(|part| match part {
                ContentPart::Text { text } => Some(text.clone()),
                ContentPart::InlineData { .. } => None,
            })
        });

    match (text, candidate.and_then(|c| c.finish_reason.clone())) {
        (Some(text), _) => Ok(text),
        (None, Some(reason)) => Err(GatewayError::EmptyResponse { reason }),
        (None, None) => Err(GatewayError::MalformedResponse),
    }
}

impl<T> std::fmt::Debug for AiGateway<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiGateway")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
