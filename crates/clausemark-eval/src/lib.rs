// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Evaluation harness for Clausemark
//!
//! Drives a query set through an injected answer module, scores each
//! generated answer with BLEU and the hallucination scorer, and
//! aggregates per-query results into a corpus summary. Sequential and
//! bounded-concurrency evaluators share identical semantics; results are
//! always in original query order.

#![warn(missing_docs)]

pub mod evaluator;
pub mod parallel;
pub mod report;

pub use evaluator::{AnswerFn, AnswerModule, Evaluator, EvaluatorConfig};
pub use parallel::ParallelEvaluator;
pub use report::render_report;
