// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Retry with exponential backoff for inference calls
//!
//! Model inference is a failure-prone external operation; [`Retry`]
//! wraps any [`EntityExtractor`] or [`EntailmentClassifier`] backend and
//! retries transient failures with exponential backoff. Structured
//! scoring errors pass through untouched.

use async_trait::async_trait;
use clausemark::{
    EntailmentClassifier, EntailmentVerdict, EntitySet, EntityExtractor, Error, Result,
};
use std::time::Duration;
use tracing::warn;

/// Configuration for retry behavior
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Initial delay before the first retry
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_factor: 2.0,
        }
    }
}

impl RetryConfig {
    fn next_delay(&self, current: Duration) -> Duration {
        current.mul_f64(self.backoff_factor).min(self.max_delay)
    }
}

/// Backend wrapper that retries transient inference failures
pub struct Retry<T> {
    inner: T,
    config: RetryConfig,
}

impl<T> Retry<T> {
    /// Wrap a backend with the default retry policy
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, RetryConfig::default())
    }

    /// Wrap a backend with an explicit retry policy
    pub fn with_config(inner: T, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

/// Only raw inference failures are worth retrying; structured errors are
/// deterministic and would fail again.
fn is_retryable(error: &Error) -> bool {
    matches!(error, Error::Inference(_))
}

#[async_trait]
impl<T: EntityExtractor> EntityExtractor for Retry<T> {
    async fn extract_entities(&self, text: &str) -> Result<EntitySet> {
        let mut attempt = 0u32;
        let mut delay = self.config.initial_delay;
        loop {
            match self.inner.extract_entities(text).await {
                Ok(entities) => return Ok(entities),
                Err(e) if is_retryable(&e) && attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(attempt, ?delay, error = %e, "entity extraction failed, retrying");
                    tokio::time::sleep(delay).await;
                    delay = self.config.next_delay(delay);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl<T: EntailmentClassifier> EntailmentClassifier for Retry<T> {
    async fn score_entailment(
        &self,
        premise: &str,
        hypothesis: &str,
    ) -> Result<EntailmentVerdict> {
        let mut attempt = 0u32;
        let mut delay = self.config.initial_delay;
        loop {
            match self.inner.score_entailment(premise, hypothesis).await {
                Ok(verdict) => return Ok(verdict),
                Err(e) if is_retryable(&e) && attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(attempt, ?delay, error = %e, "entailment scoring failed, retrying");
                    tokio::time::sleep(delay).await;
                    delay = self.config.next_delay(delay);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
