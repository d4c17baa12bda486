// ABOUTME: Generic retry combinator with exponential backoff
// ABOUTME: Parameterized by attempt budget and base delay, used by the AI gateway
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlaySmart

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the first retry; doubles each retry thereafter
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

/// Run `operation` up to `config.max_attempts` times
///
/// The delay before retry *i* (1-indexed) is `base_delay * 2^(i-1)`: with the
/// defaults, 1s then 2s between the three attempts. Every error is retryable;
/// the last error is returned once the budget is spent.
///
/// # Errors
///
/// Returns the final attempt's error when all attempts fail.
pub async fn retry_with_backoff<T, E, F, Fut>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                attempt += 1;
                if attempt >= config.max_attempts {
                    return Err(error);
                }
                let delay = config.base_delay * 2u32.pow(attempt - 1);
                warn!(
                    attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    %error,
                    "attempt failed, backing off"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
