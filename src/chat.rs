// ABOUTME: Coach chat session over the AI gateway
// ABOUTME: Ordered history with a typing flag serializing in-flight sends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlaySmart

//! # Coach Chat
//!
//! Free-form conversation with the "Coach AI" persona. The session holds the
//! ordered message history and a typing flag: while a reply is outstanding,
//! further sends are rejected, as is a draft that is empty after trimming.
//!
//! The coach path bypasses the sanitizer — replies are free text — and the
//! gateway's sentinel error string is surfaced inline as the coach reply,
//! so the conversation never dead-ends on a failure.

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::llm::{prompts, AiGateway, GenerateContent};

/// Who authored a chat entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The person training
    User,
    /// The AI coach
    Coach,
}

/// One message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntry {
    /// Message author
    pub role: ChatRole,
    /// Message text
    pub text: String,
}

/// A coach conversation
#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatEntry>,
    typing: bool,
}

impl ChatSession {
    /// Start an empty conversation
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Conversation history, oldest first
    #[must_use]
    pub fn messages(&self) -> &[ChatEntry] {
        &self.messages
    }

    /// Whether a reply is currently outstanding
    #[must_use]
    pub const fn is_typing(&self) -> bool {
        self.typing
    }

    /// Send a message and wait for the coach reply
    ///
    /// The draft is trimmed before sending. The returned string is the coach
    /// reply just appended to the history, which may be the gateway's
    /// sentinel error text.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Precondition`] when the draft is empty after
    /// trimming or a previous send is still awaiting its reply.
    pub async fn send<T: GenerateContent>(
        &mut self,
        gateway: &AiGateway<T>,
        draft: &str,
    ) -> AppResult<&str> {
        let message = draft.trim();
        if message.is_empty() {
            return Err(AppError::precondition("Message is empty."));
        }
        if self.typing {
            return Err(AppError::precondition(
                "The coach is still replying to your last message.",
            ));
        }

        self.messages.push(ChatEntry {
            role: ChatRole::User,
            text: message.to_owned(),
        });
        self.typing = true;

        let request = prompts::build_coach_request(message);
        let reply = gateway.invoke(&request).await;

        self.typing = false;
        self.messages.push(ChatEntry {
            role: ChatRole::Coach,
            text: reply,
        });
        // Just pushed, so last() cannot be empty
        Ok(self.messages.last().map_or("", |entry| &entry.text))
    }
}
