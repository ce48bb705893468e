// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! HTTP natural-language-inference backend

use crate::config::InferenceConfig;
use async_trait::async_trait;
use clausemark::{EntailmentClassifier, EntailmentLabel, EntailmentVerdict, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Text-pair classification backend against a Hugging Face
/// Inference-style endpoint
///
/// Posts (premise, hypothesis) pairs to a pretrained NLI model and keeps
/// only the highest-confidence label from the returned candidates.
pub struct HfNliProvider {
    config: InferenceConfig,
    client: reqwest::Client,
}

impl HfNliProvider {
    /// Create a provider for the configured NLI model
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

/// One candidate label with its confidence.
#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// Classification endpoints return either a flat candidate list or one
/// list per input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NliResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl NliResponse {
    fn into_candidates(self) -> Vec<LabelScore> {
        match self {
            NliResponse::Nested(mut rows) => {
                if rows.is_empty() {
                    Vec::new()
                } else {
                    rows.swap_remove(0)
                }
            }
            NliResponse::Flat(candidates) => candidates,
        }
    }
}

/// Map a model label string onto the three NLI labels.
///
/// Model vocabularies differ (ENTAILMENT, entailment, LABEL_2, ...);
/// anything not recognizably entailment or contradiction is neutral.
fn parse_label(label: &str) -> EntailmentLabel {
    let upper = label.to_uppercase();
    if upper.contains("ENTAIL") {
        EntailmentLabel::Entailment
    } else if upper.contains("CONTRADICT") {
        EntailmentLabel::Contradiction
    } else {
        EntailmentLabel::Neutral
    }
}

#[async_trait]
impl EntailmentClassifier for HfNliProvider {
    async fn score_entailment(
        &self,
        premise: &str,
        hypothesis: &str,
    ) -> Result<EntailmentVerdict> {
        #[derive(Serialize)]
        struct NliInputs<'a> {
            text: &'a str,
            text_pair: &'a str,
        }

        #[derive(Serialize)]
        struct NliRequest<'a> {
            inputs: NliInputs<'a>,
        }

        let mut request = self
            .client
            .post(self.config.model_url())
            .timeout(self.config.timeout)
            .json(&NliRequest {
                inputs: NliInputs {
                    text: premise,
                    text_pair: hypothesis,
                },
            });
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let response: NliResponse = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Inference(format!("NLI request failed: {e}")))?
            .json()
            .await
            .map_err(|e| Error::Inference(format!("NLI response malformed: {e}")))?;

        let top = response
            .into_candidates()
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or_else(|| Error::Inference("NLI response contained no labels".to_string()))?;

        debug!(model = %self.config.model, label = %top.label, score = top.score, "NLI inference complete");
        Ok(EntailmentVerdict::new(parse_label(&top.label), top.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_vocabularies_normalize() {
        assert_eq!(parse_label("ENTAILMENT"), EntailmentLabel::Entailment);
        assert_eq!(parse_label("entailment"), EntailmentLabel::Entailment);
        assert_eq!(parse_label("CONTRADICTION"), EntailmentLabel::Contradiction);
        assert_eq!(parse_label("neutral"), EntailmentLabel::Neutral);
        assert_eq!(parse_label("LABEL_1"), EntailmentLabel::Neutral);
    }

    #[test]
    fn nested_and_flat_responses_yield_the_same_candidates() {
        let nested: NliResponse = serde_json::from_str(
            r#"[[{"label":"ENTAILMENT","score":0.91},{"label":"NEUTRAL","score":0.07}]]"#,
        )
        .unwrap();
        let flat: NliResponse = serde_json::from_str(
            r#"[{"label":"ENTAILMENT","score":0.91},{"label":"NEUTRAL","score":0.07}]"#,
        )
        .unwrap();

        for response in [nested, flat] {
            let top = response
                .into_candidates()
                .into_iter()
                .max_by(|a, b| a.score.total_cmp(&b.score))
                .unwrap();
            assert_eq!(top.label, "ENTAILMENT");
            assert!((top.score - 0.91).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_response_has_no_candidates() {
        let response: NliResponse = serde_json::from_str("[]").unwrap();
        assert!(response.into_candidates().is_empty());
    }
}
