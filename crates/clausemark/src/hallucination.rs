// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Composite hallucination scorer
//!
//! Blends two signals into one 0-1 score where higher means less
//! faithful: the fraction of generated entities the reference does not
//! corroborate, and the NLI non-entailment of the generated answer
//! against the reference.

use crate::entailment::EntailmentClassifier;
use crate::error::Result;
use crate::extract::EntityExtractor;
use crate::types::{EntailmentLabel, EntitySet};
use std::sync::Arc;

/// Policy knobs for the hallucination formula
///
/// The defaults are the standard scoring policy; they are configuration
/// rather than hard-coded literals so the policy can be tuned without
/// touching scorer logic.
#[derive(Debug, Clone, Copy)]
pub struct HallucinationConfig {
    /// Entity score assigned when the generated answer has no
    /// extractable entities at all.
    ///
    /// Default 1.0: an answer with zero extractable entities is treated
    /// as maximally unverifiable. This is a deliberate conservative
    /// policy, not a bug.
    pub empty_entity_penalty: f64,

    /// Entailment confidence credited when the top label is Neutral or
    /// Contradiction.
    ///
    /// Default 0.0: only explicit entailment reduces the hallucination
    /// penalty.
    pub non_entailment_credit: f64,

    /// Weight of the unverified-entity component.
    pub entity_weight: f64,

    /// Weight of the non-entailment component.
    pub entailment_weight: f64,
}

impl Default for HallucinationConfig {
    fn default() -> Self {
        Self {
            empty_entity_penalty: 1.0,
            non_entailment_credit: 0.0,
            entity_weight: 0.5,
            entailment_weight: 0.5,
        }
    }
}

impl HallucinationConfig {
    /// Set component weights, normalized so they sum to 1.
    pub fn weights(mut self, entity: f64, entailment: f64) -> Self {
        let total = entity + entailment;
        self.entity_weight = entity / total;
        self.entailment_weight = entailment / total;
        self
    }
}

/// Per-component view of one hallucination score
#[derive(Debug, Clone, Copy)]
pub struct HallucinationBreakdown {
    /// Fraction of generated entities not corroborated by the reference
    pub entity_score: f64,

    /// Confidence credited to the entailment verdict
    pub entailment_confidence: f64,

    /// Combined 0-1 hallucination score
    pub score: f64,
}

/// Combines entity overlap and NLI entailment into one faithfulness score
pub struct HallucinationScorer {
    extractor: Arc<dyn EntityExtractor>,
    classifier: Arc<dyn EntailmentClassifier>,
    config: HallucinationConfig,
}

impl HallucinationScorer {
    /// Create a scorer with default policy
    pub fn new(
        extractor: Arc<dyn EntityExtractor>,
        classifier: Arc<dyn EntailmentClassifier>,
    ) -> Self {
        Self::with_config(extractor, classifier, HallucinationConfig::default())
    }

    /// Create a scorer with explicit policy
    pub fn with_config(
        extractor: Arc<dyn EntityExtractor>,
        classifier: Arc<dyn EntailmentClassifier>,
        config: HallucinationConfig,
    ) -> Self {
        Self {
            extractor,
            classifier,
            config,
        }
    }

    /// The active policy
    pub fn config(&self) -> &HallucinationConfig {
        &self.config
    }

    /// Score a generated answer against its reference, in [0, 1].
    pub async fn score(&self, generated: &str, reference: &str) -> Result<f64> {
        Ok(self.breakdown(generated, reference).await?.score)
    }

    /// Score with per-component detail.
    ///
    /// The entity component penalizes generated entities missing from the
    /// reference but never rewards reference entities missing from the
    /// generated answer; that asymmetry is part of the scoring contract.
    /// With an empty reference the overlap is necessarily zero, so the
    /// entity component saturates whenever the generated answer names
    /// anything, and the entailment verdict is whatever the backend
    /// degrades to on an empty premise.
    pub async fn breakdown(
        &self,
        generated: &str,
        reference: &str,
    ) -> Result<HallucinationBreakdown> {
        let generated_entities = self.extractor.extract_entities(generated).await?;
        let reference_entities = self.extractor.extract_entities(reference).await?;
        let entity_score = self.entity_score(&generated_entities, &reference_entities);

        // Premise is the reference, hypothesis the generated answer.
        let verdict = self
            .classifier
            .score_entailment(reference, generated)
            .await?;
        let entailment_confidence = if verdict.label == EntailmentLabel::Entailment {
            verdict.confidence
        } else {
            self.config.non_entailment_credit
        };

        let score = self.config.entity_weight * entity_score
            + self.config.entailment_weight * (1.0 - entailment_confidence);

        Ok(HallucinationBreakdown {
            entity_score,
            entailment_confidence,
            score: score.clamp(0.0, 1.0),
        })
    }

    fn entity_score(&self, generated: &EntitySet, reference: &EntitySet) -> f64 {
        if generated.is_empty() {
            return self.config.empty_entity_penalty;
        }
        1.0 - generated.overlap(reference) as f64 / generated.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entailment::HeuristicEntailment;
    use crate::extract::HeuristicExtractor;
    use crate::types::EntailmentVerdict;
    use async_trait::async_trait;

    /// Extractor stub returning a fixed entity set regardless of input.
    struct FixedExtractor(Vec<&'static str>);

    #[async_trait]
    impl EntityExtractor for FixedExtractor {
        async fn extract_entities(&self, text: &str) -> Result<EntitySet> {
            if text.is_empty() {
                return Ok(EntitySet::new());
            }
            Ok(self.0.iter().collect())
        }
    }

    /// Classifier stub returning a fixed verdict.
    struct FixedClassifier(EntailmentVerdict);

    #[async_trait]
    impl EntailmentClassifier for FixedClassifier {
        async fn score_entailment(&self, _: &str, _: &str) -> Result<EntailmentVerdict> {
            Ok(self.0)
        }
    }

    fn scorer_with(
        label: EntailmentLabel,
        confidence: f64,
        generated_entities: Vec<&'static str>,
    ) -> HallucinationScorer {
        HallucinationScorer::new(
            Arc::new(FixedExtractor(generated_entities)),
            Arc::new(FixedClassifier(EntailmentVerdict::new(label, confidence))),
        )
    }

    fn heuristic_scorer() -> HallucinationScorer {
        HallucinationScorer::new(
            Arc::new(HeuristicExtractor::new()),
            Arc::new(HeuristicEntailment::new()),
        )
    }

    #[tokio::test]
    async fn identical_text_scores_near_zero() {
        let text = "Acme Corp must pay $5,000 within 30 days.";
        let breakdown = heuristic_scorer().breakdown(text, text).await.unwrap();
        assert_eq!(breakdown.entity_score, 0.0);
        assert!(breakdown.score < 0.05, "score was {}", breakdown.score);
    }

    #[tokio::test]
    async fn zero_generated_entities_pins_score_at_or_above_half() {
        // Entity-free answer: entity component saturates at 1.0 and the
        // halved entailment term can at most bring the total to 0.5.
        let scorer = heuristic_scorer();
        let breakdown = scorer
            .breakdown("it depends on the parties involved", "Acme Corp owes $5,000.")
            .await
            .unwrap();
        assert_eq!(breakdown.entity_score, 1.0);
        assert!(breakdown.score >= 0.5);
    }

    #[tokio::test]
    async fn non_entailment_labels_get_zero_credit() {
        let scorer = scorer_with(EntailmentLabel::Contradiction, 0.99, vec!["Acme"]);
        let breakdown = scorer.breakdown("Acme", "Acme").await.unwrap();
        assert_eq!(breakdown.entailment_confidence, 0.0);

        let scorer = scorer_with(EntailmentLabel::Neutral, 0.9, vec!["Acme"]);
        let breakdown = scorer.breakdown("Acme", "Acme").await.unwrap();
        assert_eq!(breakdown.entailment_confidence, 0.0);
    }

    #[tokio::test]
    async fn entailment_confidence_reduces_the_score() {
        let low = scorer_with(EntailmentLabel::Entailment, 0.2, vec!["Acme"]);
        let high = scorer_with(EntailmentLabel::Entailment, 0.95, vec!["Acme"]);
        let s_low = low.score("Acme", "Acme").await.unwrap();
        let s_high = high.score("Acme", "Acme").await.unwrap();
        assert!(s_high < s_low);
    }

    #[tokio::test]
    async fn uncorroborated_entities_raise_the_score() {
        let scorer = heuristic_scorer();
        let faithful = scorer
            .breakdown("The term is 12 months.", "The term is 12 months.")
            .await
            .unwrap();
        let fabricated = scorer
            .breakdown(
                "The term is 12 months per Exhibit Q signed by John Smith.",
                "The term is 12 months.",
            )
            .await
            .unwrap();
        assert!(fabricated.entity_score > faithful.entity_score);
        assert!(fabricated.score > faithful.score);
    }

    #[tokio::test]
    async fn empty_reference_saturates_entity_component() {
        let scorer = heuristic_scorer();
        let breakdown = scorer
            .breakdown("Acme Corp owes $5,000.", "")
            .await
            .unwrap();
        assert_eq!(breakdown.entity_score, 1.0);
        assert!((0.0..=1.0).contains(&breakdown.score));
    }

    #[tokio::test]
    async fn custom_weights_shift_the_blend() {
        let config = HallucinationConfig::default().weights(1.0, 0.0);
        let scorer = HallucinationScorer::with_config(
            Arc::new(HeuristicExtractor::new()),
            Arc::new(HeuristicEntailment::new()),
            config,
        );
        // Entity-only blend: both entities uncorroborated by an
        // entity-free reference is a full-penalty score.
        let score = scorer
            .score("Acme in Delaware", "nothing specific here")
            .await
            .unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn score_stays_in_unit_interval() {
        let scorer = heuristic_scorer();
        for (generated, reference) in [
            ("", ""),
            ("Acme", ""),
            ("", "Acme"),
            ("Acme Corp and Jane Doe in Delaware", "Acme Corp"),
        ] {
            let score = scorer.score(generated, reference).await.unwrap();
            assert!((0.0..=1.0).contains(&score), "{generated:?} -> {score}");
        }
    }
}
