// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Evaluation-data parsing
//!
//! The evaluation dataset is a structured document where a line starting
//! with `Q:` opens a pending question and a following `A:` line completes
//! it into a [`QueryRecord`]. Parsing is an explicit two-state machine
//! with no hidden mutable state.

use crate::error::{Error, Result};
use crate::types::QueryRecord;

/// Marker opening a question line.
const QUESTION_MARKER: &str = "Q:";

/// Marker opening an answer line.
const ANSWER_MARKER: &str = "A:";

/// Parser state between lines.
enum ParseState {
    /// No question pending; only a `Q:` line advances.
    AwaitingQuestion,
    /// A question is pending; an `A:` line completes the pair.
    AwaitingAnswer {
        question: String,
        /// One-based line the question came from, for strict diagnostics.
        line: usize,
    },
}

/// Parse `Q:`/`A:` pairs leniently.
///
/// Malformed or out-of-order markers are silently dropped: an `A:` line
/// with no pending question is ignored, a second `Q:` line replaces the
/// pending question, and a trailing unanswered question is discarded.
/// Lines carrying neither marker are ignored.
pub fn parse_qa_pairs(input: &str) -> Vec<QueryRecord> {
    let (records, _) = scan(input);
    records
}

/// Parse `Q:`/`A:` pairs, rejecting unbalanced markers.
///
/// Returns [`Error::MalformedEvaluationData`] for an orphaned `A:` line,
/// a `Q:` line that displaces a pending question, or a trailing
/// unanswered question.
pub fn parse_qa_pairs_strict(input: &str) -> Result<Vec<QueryRecord>> {
    let (records, violations) = scan(input);
    if let Some((line, reason)) = violations.into_iter().next() {
        return Err(Error::MalformedEvaluationData { line, reason });
    }
    Ok(records)
}

fn scan(input: &str) -> (Vec<QueryRecord>, Vec<(usize, String)>) {
    let mut records = Vec::new();
    let mut violations = Vec::new();
    let mut state = ParseState::AwaitingQuestion;

    for (number, raw) in input.lines().enumerate() {
        let number = number + 1;
        let line = raw.trim();

        if let Some(question) = line.strip_prefix(QUESTION_MARKER) {
            if let ParseState::AwaitingAnswer { line: pending, .. } = &state {
                violations.push((
                    number,
                    format!("question on line {pending} has no answer"),
                ));
            }
            state = ParseState::AwaitingAnswer {
                question: question.trim().to_string(),
                line: number,
            };
        } else if let Some(answer) = line.strip_prefix(ANSWER_MARKER) {
            match std::mem::replace(&mut state, ParseState::AwaitingQuestion) {
                ParseState::AwaitingAnswer { question, .. } => {
                    records.push(QueryRecord::new(question, answer.trim()));
                }
                ParseState::AwaitingQuestion => {
                    violations.push((number, "answer with no pending question".to_string()));
                }
            }
        }
    }

    if let ParseState::AwaitingAnswer { line, .. } = state {
        violations.push((line, "question has no answer".to_string()));
    }

    (records, violations)
}
