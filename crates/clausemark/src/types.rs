// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Core type definitions

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A question with its human-authored reference answer
///
/// Immutable once parsed from the evaluation dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    /// The question posed to the pipeline
    pub question: String,

    /// Ground-truth answer authored by a human reviewer
    pub reference_answer: String,
}

impl QueryRecord {
    /// Create a new query record
    pub fn new(question: impl Into<String>, reference_answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            reference_answer: reference_answer.into(),
        }
    }
}

/// Scores for a single evaluated query
///
/// Created by the evaluation harness, never mutated afterwards, and
/// collected in original query order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// The query text
    pub query: String,

    /// Reference answer the generated answer was scored against
    pub reference: String,

    /// Answer produced by the pipeline under evaluation
    pub generated_answer: String,

    /// Lexical overlap score, 0-100
    pub bleu_score: f64,

    /// Composite hallucination score, 0-1 (higher = less faithful)
    pub hallucination_score: f64,
}

/// Corpus-level score averages
///
/// Derived from the full result sequence each run; not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    /// Arithmetic mean of all BLEU scores
    pub average_bleu_score: f64,

    /// Arithmetic mean of all hallucination scores
    pub average_hallucination_score: f64,
}

impl EvaluationSummary {
    /// Average the score columns of a non-empty result sequence.
    ///
    /// Callers are responsible for rejecting empty input first; see
    /// [`Error::EmptyDataset`](crate::Error::EmptyDataset).
    pub fn of(results: &[EvaluationResult]) -> Self {
        let n = results.len().max(1) as f64;
        Self {
            average_bleu_score: results.iter().map(|r| r.bleu_score).sum::<f64>() / n,
            average_hallucination_score: results
                .iter()
                .map(|r| r.hallucination_score)
                .sum::<f64>()
                / n,
        }
    }
}

/// A set of distinct entity surface strings extracted from one text
///
/// Duplicates collapse; ordering is not defined. Surface strings are
/// stored whitespace-trimmed but otherwise verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySet {
    entities: HashSet<String>,
}

impl EntitySet {
    /// Create an empty entity set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity surface string, trimming surrounding whitespace.
    ///
    /// Blank strings are ignored.
    pub fn insert(&mut self, surface: impl AsRef<str>) {
        let trimmed = surface.as_ref().trim();
        if !trimmed.is_empty() {
            self.entities.insert(trimmed.to_string());
        }
    }

    /// Number of distinct entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Whether a surface string is present
    pub fn contains(&self, surface: &str) -> bool {
        self.entities.contains(surface)
    }

    /// Number of entities shared with another set
    pub fn overlap(&self, other: &EntitySet) -> usize {
        self.entities.intersection(&other.entities).count()
    }

    /// Iterate over the entity surface strings
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|s| s.as_str())
    }
}

impl<S: AsRef<str>> FromIterator<S> for EntitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = EntitySet::new();
        for surface in iter {
            set.insert(surface);
        }
        set
    }
}

/// NLI label for a (premise, hypothesis) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntailmentLabel {
    /// The hypothesis is implied by the premise
    Entailment,
    /// The premise neither implies nor refutes the hypothesis
    Neutral,
    /// The hypothesis conflicts with the premise
    Contradiction,
}

/// Top-scoring NLI classification for a text pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntailmentVerdict {
    /// Highest-confidence label
    pub label: EntailmentLabel,

    /// Confidence of that label, clamped to [0, 1]
    pub confidence: f64,
}

impl EntailmentVerdict {
    /// Create a verdict, clamping confidence into [0, 1]
    pub fn new(label: EntailmentLabel, confidence: f64) -> Self {
        Self {
            label,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_set_collapses_duplicates_and_blanks() {
        let set: EntitySet = ["Acme Corp", "  Acme Corp  ", "12 months", "", "   "]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("Acme Corp"));
        assert!(set.contains("12 months"));
    }

    #[test]
    fn entity_overlap_counts_shared_surfaces() {
        let a: EntitySet = ["Acme Corp", "12 months", "California"].into_iter().collect();
        let b: EntitySet = ["12 months", "California", "Delaware"].into_iter().collect();
        assert_eq!(a.overlap(&b), 2);
        assert_eq!(b.overlap(&a), 2);
    }

    #[test]
    fn verdict_confidence_is_clamped() {
        let v = EntailmentVerdict::new(EntailmentLabel::Entailment, 1.7);
        assert_eq!(v.confidence, 1.0);
        let v = EntailmentVerdict::new(EntailmentLabel::Neutral, -0.2);
        assert_eq!(v.confidence, 0.0);
    }

    #[test]
    fn summary_averages_both_columns() {
        let results = vec![
            EvaluationResult {
                query: "q1".into(),
                reference: "r1".into(),
                generated_answer: "g1".into(),
                bleu_score: 40.0,
                hallucination_score: 0.2,
            },
            EvaluationResult {
                query: "q2".into(),
                reference: "r2".into(),
                generated_answer: "g2".into(),
                bleu_score: 60.0,
                hallucination_score: 0.6,
            },
        ];
        let summary = EvaluationSummary::of(&results);
        assert!((summary.average_bleu_score - 50.0).abs() < 1e-9);
        assert!((summary.average_hallucination_score - 0.4).abs() < 1e-9);
    }

    #[test]
    fn records_round_trip_as_json() {
        let record = QueryRecord::new("Is there a non-compete?", "Yes, 12 months.");
        let json = serde_json::to_string(&record).unwrap();
        let back: QueryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
