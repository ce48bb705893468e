// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Named-entity extraction seam
//!
//! Production NER models run behind the [`EntityExtractor`] trait; the
//! [`HeuristicExtractor`] is a deterministic, model-free backend used for
//! tests and offline runs.

use crate::error::Result;
use crate::types::EntitySet;
use async_trait::async_trait;

/// Capability interface for named-entity recognition backends
///
/// Same text must yield the same entity set for a fixed backend. Empty
/// input yields the empty set. No side effects beyond the inference call.
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    /// Extract distinct entity surface strings from free text.
    async fn extract_entities(&self, text: &str) -> Result<EntitySet>;
}

/// Sentence starters that look like capitalized entities but are not.
const CAPITALIZED_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "it", "its", "if", "in", "on", "at",
    "for", "of", "to", "and", "or", "but", "is", "are", "was", "were", "yes", "no", "there",
    "any", "all", "each", "both", "however", "under", "per", "as", "such",
];

/// Deterministic, model-free entity extractor
///
/// Recognizes two entity shapes that dominate contract text: runs of
/// capitalized tokens (party names, places, defined terms) and tokens
/// carrying digits (durations, dates, amounts, section numbers). Single
/// capitalized stop words are not entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    /// Create a new heuristic extractor
    pub fn new() -> Self {
        Self
    }

    fn extract(&self, text: &str) -> EntitySet {
        let mut entities = EntitySet::new();
        let mut run: Vec<&str> = Vec::new();

        for raw in text.split_whitespace() {
            let token = strip_punctuation(raw);
            if token.is_empty() {
                flush_run(&mut run, &mut entities);
                continue;
            }

            if token.chars().any(|c| c.is_ascii_digit()) {
                flush_run(&mut run, &mut entities);
                entities.insert(token);
                continue;
            }

            if token.chars().next().is_some_and(char::is_uppercase) {
                run.push(token);
            } else {
                flush_run(&mut run, &mut entities);
            }

            // A token that ends the sentence also ends any capitalized run.
            if raw.ends_with(['.', '!', '?', ';']) {
                flush_run(&mut run, &mut entities);
            }
        }
        flush_run(&mut run, &mut entities);

        entities
    }
}

/// Emit a pending capitalized run as one entity, unless it is a lone
/// stop word.
fn flush_run(run: &mut Vec<&str>, entities: &mut EntitySet) {
    match run.len() {
        0 => {}
        1 => {
            let word = run[0];
            if !CAPITALIZED_STOP_WORDS.contains(&word.to_lowercase().as_str()) {
                entities.insert(word);
            }
        }
        _ => entities.insert(run.join(" ")),
    }
    run.clear();
}

/// Trim wrapping punctuation while keeping currency and percent marks.
fn strip_punctuation(token: &str) -> &str {
    token
        .trim_start_matches(|c: char| c.is_ascii_punctuation() && c != '$')
        .trim_end_matches(|c: char| c.is_ascii_punctuation() && c != '%')
}

#[async_trait]
impl EntityExtractor for HeuristicExtractor {
    async fn extract_entities(&self, text: &str) -> Result<EntitySet> {
        Ok(self.extract(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> EntitySet {
        HeuristicExtractor::new().extract(text)
    }

    #[test]
    fn empty_text_yields_empty_set() {
        assert!(extract("").is_empty());
        assert!(extract("   \t  ").is_empty());
    }

    #[test]
    fn capitalized_runs_become_single_entities() {
        let set = extract("the agreement binds Acme Corp and Jane Doe.");
        assert!(set.contains("Acme Corp"));
        assert!(set.contains("Jane Doe"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn numeric_tokens_are_entities() {
        let set = extract("terminates after 12 months with a $5,000 penalty");
        assert!(set.contains("12"));
        assert!(set.contains("$5,000"));
    }

    #[test]
    fn sentence_initial_stop_words_are_ignored() {
        let set = extract("The term is five years. Yes.");
        assert!(!set.contains("The"));
        assert!(!set.contains("Yes"));
    }

    #[test]
    fn sentence_boundary_splits_runs() {
        let set = extract("governed by Delaware. Acme may assign.");
        assert!(set.contains("Delaware"));
        assert!(set.contains("Acme"));
        assert!(!set.contains("Delaware Acme"));
    }

    #[test]
    fn wrapping_punctuation_is_stripped() {
        let set = extract("(see \"Exhibit B\") and 90%.");
        assert!(set.contains("Exhibit B"));
        assert!(set.contains("90%"));
    }

    #[tokio::test]
    async fn trait_surface_matches_direct_extraction() {
        let extractor = HeuristicExtractor::new();
        let via_trait = extractor.extract_entities("Acme Corp").await.unwrap();
        assert_eq!(via_trait, extractor.extract("Acme Corp"));
    }
}
