// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Natural-language-inference seam
//!
//! Production NLI models run behind the [`EntailmentClassifier`] trait;
//! the [`HeuristicEntailment`] backend gives deterministic verdicts for
//! tests and offline runs.

use crate::error::Result;
use crate::types::{EntailmentLabel, EntailmentVerdict};
use async_trait::async_trait;
use std::collections::HashSet;

/// Capability interface for NLI text-pair classification backends
///
/// The premise is the reference (ground-truth) text and the hypothesis is
/// the generated answer. Entailment is asymmetric, so the direction must
/// never be swapped. When a backend produces several candidate labels,
/// only the highest-confidence one is returned.
#[async_trait]
pub trait EntailmentClassifier: Send + Sync {
    /// Classify whether `hypothesis` is entailed by `premise`.
    async fn score_entailment(&self, premise: &str, hypothesis: &str)
        -> Result<EntailmentVerdict>;
}

/// Containment ratio at or above which the hypothesis counts as entailed.
const ENTAILMENT_THRESHOLD: f64 = 0.75;

/// Tokens that flip the polarity of a clause.
const NEGATION_TOKENS: &[&str] = &["not", "no", "never", "without", "neither", "nor"];

/// Deterministic, model-free entailment backend
///
/// Scores the fraction of hypothesis tokens present in the premise.
/// High containment reads as entailment, a polarity mismatch on otherwise
/// overlapping text reads as contradiction, everything else is neutral.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEntailment;

impl HeuristicEntailment {
    /// Create a new heuristic entailment backend
    pub fn new() -> Self {
        Self
    }

    fn classify(&self, premise: &str, hypothesis: &str) -> EntailmentVerdict {
        let premise_tokens = tokenize(premise);
        let hypothesis_tokens = tokenize(hypothesis);

        if hypothesis_tokens.is_empty() || premise_tokens.is_empty() {
            return EntailmentVerdict::new(EntailmentLabel::Neutral, 0.5);
        }

        let shared = hypothesis_tokens.intersection(&premise_tokens).count();
        let containment = shared as f64 / hypothesis_tokens.len() as f64;

        let premise_negated = has_negation(&premise_tokens);
        let hypothesis_negated = has_negation(&hypothesis_tokens);

        if premise_negated != hypothesis_negated && containment >= 0.5 {
            // Same clause, opposite polarity.
            return EntailmentVerdict::new(EntailmentLabel::Contradiction, containment);
        }

        if containment >= ENTAILMENT_THRESHOLD {
            EntailmentVerdict::new(EntailmentLabel::Entailment, containment)
        } else {
            EntailmentVerdict::new(EntailmentLabel::Neutral, 1.0 - containment)
        }
    }
}

fn tokenize(s: &str) -> HashSet<String> {
    s.split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

fn has_negation(tokens: &HashSet<String>) -> bool {
    NEGATION_TOKENS.iter().any(|n| tokens.contains(*n))
}

#[async_trait]
impl EntailmentClassifier for HeuristicEntailment {
    async fn score_entailment(
        &self,
        premise: &str,
        hypothesis: &str,
    ) -> Result<EntailmentVerdict> {
        Ok(self.classify(premise, hypothesis))
    }
}
