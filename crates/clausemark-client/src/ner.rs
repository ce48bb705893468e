// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! HTTP named-entity-recognition backend

use crate::config::InferenceConfig;
use async_trait::async_trait;
use clausemark::{EntityExtractor, EntitySet, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Token-classification backend against a Hugging Face Inference-style
/// endpoint
///
/// Posts raw text and collects the returned entity spans into an
/// [`EntitySet`] of surface strings.
pub struct HfNerProvider {
    config: InferenceConfig,
    client: reqwest::Client,
}

impl HfNerProvider {
    /// Create a provider for the configured NER model
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// The active endpoint configuration
    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }
}

#[async_trait]
impl EntityExtractor for HfNerProvider {
    async fn extract_entities(&self, text: &str) -> Result<EntitySet> {
        // Empty input has the empty set by contract; skip the network call.
        if text.trim().is_empty() {
            return Ok(EntitySet::new());
        }

        #[derive(Serialize)]
        struct NerRequest<'a> {
            inputs: &'a str,
        }

        #[derive(Deserialize)]
        struct NerSpan {
            word: String,
            #[allow(dead_code)] // Present in API response but not currently used
            #[serde(default)]
            score: f64,
            #[allow(dead_code)] // Present in API response but not currently used
            #[serde(default)]
            entity_group: Option<String>,
        }

        let mut request = self
            .client
            .post(self.config.model_url())
            .timeout(self.config.timeout)
            .json(&NerRequest { inputs: text });
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let spans: Vec<NerSpan> = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Inference(format!("NER request failed: {e}")))?
            .json()
            .await
            .map_err(|e| Error::Inference(format!("NER response malformed: {e}")))?;

        debug!(model = %self.config.model, spans = spans.len(), "NER inference complete");

        let mut entities = EntitySet::new();
        for span in &spans {
            entities.insert(&span.word);
        }

        Ok(entities)
    }
}
