// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Error types for Clausemark

use std::time::Duration;
use thiserror::Error;

/// Result type alias for Clausemark operations
pub type Result<T> = core::result::Result<T, Error>;

/// Main error type for the Clausemark library
#[derive(Error, Debug)]
pub enum Error {
    /// Query and reference sequences have different lengths
    #[error("invalid input: {queries} queries but {references} references")]
    InvalidInput {
        /// Number of queries supplied
        queries: usize,
        /// Number of references supplied
        references: usize,
    },

    /// The harness was given zero queries
    #[error("empty evaluation dataset: at least one query is required")]
    EmptyDataset,

    /// A model inference backend failed
    ///
    /// Raised by [`EntityExtractor`](crate::EntityExtractor) and
    /// [`EntailmentClassifier`](crate::EntailmentClassifier) backends before
    /// the harness attaches query context.
    #[error("inference failed: {0}")]
    Inference(String),

    /// A scorer failed while processing a specific query
    #[error("scoring failed at query {index} in {scorer}: {message}")]
    ScoringModel {
        /// Zero-based index of the failing query
        index: usize,
        /// Which scorer failed (answer generation, entities, entailment)
        scorer: &'static str,
        /// Underlying failure
        message: String,
    },

    /// A query exceeded the configured per-query deadline
    #[error("scoring timed out after {timeout:?} at query {index}")]
    ScoringTimeout {
        /// Zero-based index of the query that timed out
        index: usize,
        /// The deadline that expired
        timeout: Duration,
    },

    /// Evaluation data markers are unbalanced (strict parsing only)
    #[error("malformed evaluation data at line {line}: {reason}")]
    MalformedEvaluationData {
        /// One-based line number of the offending marker
        line: usize,
        /// What was wrong with it
        reason: String,
    },
}

impl Error {
    /// Attach query index and scorer context to a backend failure.
    pub fn at_query(self, index: usize, scorer: &'static str) -> Self {
        match self {
            Error::Inference(message) => Error::ScoringModel {
                index,
                scorer,
                message,
            },
            other => other,
        }
    }
}
