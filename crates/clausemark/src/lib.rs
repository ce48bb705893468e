// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! # Clausemark - Contract Q&A Answer-Quality Scoring
//!
//! Core scoring library for evaluating generated contract Q&A answers
//! against human-authored references. Two complementary signals are
//! produced per answer:
//!
//! - **BLEU** ([`bleu`]): lexical n-gram overlap on a 0-100 scale.
//! - **Hallucination** ([`HallucinationScorer`]): a 0-1 composite of
//!   unverified-entity fraction and NLI non-entailment, where higher
//!   means less faithful to the reference.
//!
//! Model inference sits behind the [`EntityExtractor`] and
//! [`EntailmentClassifier`] traits so that HTTP-backed production models
//! and deterministic offline backends are interchangeable.

#![warn(missing_docs)]

pub mod bleu;
pub mod dataset;
pub mod entailment;
pub mod error;
pub mod extract;
pub mod hallucination;
pub mod types;

pub use bleu::bleu;
pub use dataset::{parse_qa_pairs, parse_qa_pairs_strict};
pub use entailment::{EntailmentClassifier, HeuristicEntailment};
pub use error::{Error, Result};
pub use extract::{EntityExtractor, HeuristicExtractor};
pub use hallucination::{HallucinationBreakdown, HallucinationConfig, HallucinationScorer};
pub use types::{
    EntailmentLabel, EntailmentVerdict, EntitySet, EvaluationResult, EvaluationSummary,
    QueryRecord,
};
