// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Sentence-level BLEU lexical scorer
//!
//! Single-reference, modified n-gram precision up to 4-grams with clipped
//! counts, geometric mean, brevity penalty, and epsilon smoothing for
//! zero-count higher orders. Scale is 0-100. Pure function, no state.

use std::collections::HashMap;

/// Highest n-gram order considered.
const MAX_ORDER: usize = 4;

/// Score lexical overlap between a candidate and a single reference.
///
/// Returns a value in [0, 100]. A non-empty candidate scored against an
/// identical reference yields exactly 100; an empty candidate or
/// reference yields 0. Zero-count higher-order precisions are smoothed so
/// partially overlapping pairs stay above zero.
pub fn bleu(candidate: &str, reference: &str) -> f64 {
    let cand = tokenize(candidate);
    let refr = tokenize(reference);

    if cand.is_empty() || refr.is_empty() {
        return 0.0;
    }

    let max_order = MAX_ORDER.min(cand.len());
    let mut log_precision_sum = 0.0;

    for order in 1..=max_order {
        let cand_counts = ngram_counts(&cand, order);
        let ref_counts = ngram_counts(&refr, order);

        let total: usize = cand_counts.values().sum();
        let clipped: usize = cand_counts
            .iter()
            .map(|(gram, count)| (*count).min(*ref_counts.get(gram).unwrap_or(&0)))
            .sum();

        // No shared unigrams means no lexical overlap at all.
        if order == 1 && clipped == 0 {
            return 0.0;
        }

        // Epsilon smoothing keeps the geometric mean alive when a higher
        // order has no matches.
        let precision = if clipped > 0 {
            clipped as f64 / total as f64
        } else {
            1.0 / (2.0 * total as f64)
        };
        log_precision_sum += precision.ln();
    }

    let geometric_mean = (log_precision_sum / max_order as f64).exp();
    let brevity = brevity_penalty(cand.len(), refr.len());

    (geometric_mean * brevity * 100.0).clamp(0.0, 100.0)
}

fn tokenize(s: &str) -> Vec<String> {
    s.split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

fn ngram_counts(tokens: &[String], order: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();
    for gram in tokens.windows(order) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

fn brevity_penalty(candidate_len: usize, reference_len: usize) -> f64 {
    if candidate_len >= reference_len {
        1.0
    } else {
        (1.0 - reference_len as f64 / candidate_len as f64).exp()
    }
}
