// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Plain-text evaluation report
//!
//! Downstream tooling scrapes this textual shape, so it stays stable:
//! per-query blocks of Query / Reference / Generated Answer / BLEU
//! Score / Hallucination Score (two decimals), then the two averages.

use clausemark::{EvaluationResult, EvaluationSummary};
use std::fmt::Write;

/// Render results and summary in the stable console shape.
pub fn render_report(results: &[EvaluationResult], summary: &EvaluationSummary) -> String {
    let mut out = String::new();

    for result in results {
        // Infallible writes into a String.
        let _ = writeln!(out, "Query: {}", result.query);
        let _ = writeln!(out, "Reference: {}", result.reference);
        let _ = writeln!(out, "Generated Answer: {}", result.generated_answer);
        let _ = writeln!(out, "BLEU Score: {:.2}", result.bleu_score);
        let _ = writeln!(out, "Hallucination Score: {:.2}", result.hallucination_score);
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "Average BLEU Score: {:.2}", summary.average_bleu_score);
    let _ = writeln!(
        out,
        "Average Hallucination Score: {:.2}",
        summary.average_hallucination_score
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<EvaluationResult>, EvaluationSummary) {
        let results = vec![EvaluationResult {
            query: "Is there a non-compete?".into(),
            reference: "Yes, 12 months.".into(),
            generated_answer: "Yes, for 12 months after termination.".into(),
            bleu_score: 21.371,
            hallucination_score: 0.125,
        }];
        let summary = EvaluationSummary::of(&results);
        (results, summary)
    }

    #[test]
    fn report_preserves_the_observed_shape() {
        let (results, summary) = sample();
        let report = render_report(&results, &summary);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Query: Is there a non-compete?");
        assert_eq!(lines[1], "Reference: Yes, 12 months.");
        assert_eq!(
            lines[2],
            "Generated Answer: Yes, for 12 months after termination."
        );
        assert_eq!(lines[3], "BLEU Score: 21.37");
        assert_eq!(lines[4], "Hallucination Score: 0.13");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "Average BLEU Score: 21.37");
        assert_eq!(lines[7], "Average Hallucination Score: 0.13");
    }

    #[test]
    fn scores_round_to_two_decimals() {
        let (results, summary) = sample();
        let report = render_report(&results, &summary);
        assert!(report.contains("BLEU Score: 21.37"));
        assert!(!report.contains("21.371"));
    }
}
