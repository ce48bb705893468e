// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Inference endpoint configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for an inference endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the inference service
    pub endpoint: String,

    /// Model identifier appended to the endpoint path
    pub model: String,

    /// Bearer token, if the endpoint requires one
    pub api_token: Option<String>,

    /// HTTP request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api-inference.huggingface.co".to_string(),
            model: String::new(),
            api_token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl InferenceConfig {
    /// Configure for a specific model on the default endpoint
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Set the base endpoint URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the bearer token
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set the HTTP request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL for this model's inference route
    pub fn model_url(&self) -> String {
        format!(
            "{}/models/{}",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

/// Serialize a Duration as whole seconds for config files.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}
