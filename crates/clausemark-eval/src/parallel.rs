// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Order-preserving concurrent evaluation
//!
//! Per-query work is independent model inference, so queries may run
//! concurrently; results are reassembled in original query order before
//! averaging, which keeps the semantics identical to the sequential
//! [`Evaluator`](crate::Evaluator).

use crate::evaluator::{check_preconditions, evaluate_one, AnswerModule, EvaluatorConfig};
use clausemark::{EvaluationResult, EvaluationSummary, HallucinationScorer, QueryRecord, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::info;

/// Default number of queries in flight at once.
const DEFAULT_CONCURRENCY: usize = 8;

/// Concurrent evaluation harness with bounded in-flight queries
pub struct ParallelEvaluator {
    scorer: Arc<HallucinationScorer>,
    config: EvaluatorConfig,
    concurrency: usize,
}

impl ParallelEvaluator {
    /// Create a concurrent harness with default configuration
    pub fn new(scorer: Arc<HallucinationScorer>) -> Self {
        Self {
            scorer,
            config: EvaluatorConfig::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Set the harness configuration
    pub fn with_config(mut self, config: EvaluatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set how many queries may be in flight at once (minimum 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Evaluate every query against its reference, concurrently.
    ///
    /// Same preconditions, error semantics, and result ordering as the
    /// sequential harness: the i-th result corresponds to the i-th
    /// query regardless of completion order.
    pub async fn evaluate<A: AnswerModule>(
        &self,
        module: &A,
        queries: &[String],
        references: &[String],
    ) -> Result<(Vec<EvaluationResult>, EvaluationSummary)> {
        check_preconditions(queries, references)?;
        info!(
            total = queries.len(),
            concurrency = self.concurrency,
            "starting concurrent evaluation"
        );

        let results: Vec<EvaluationResult> = stream::iter(
            queries
                .iter()
                .zip(references)
                .enumerate()
                .map(|(index, (query, reference))| {
                    evaluate_one(&self.scorer, &self.config, module, index, query, reference)
                }),
        )
        .buffered(self.concurrency)
        .try_collect()
        .await?;

        let summary = EvaluationSummary::of(&results);
        Ok((results, summary))
    }

    /// Evaluate a parsed dataset of query records, concurrently.
    pub async fn evaluate_records<A: AnswerModule>(
        &self,
        module: &A,
        records: &[QueryRecord],
    ) -> Result<(Vec<EvaluationResult>, EvaluationSummary)> {
        let queries: Vec<String> = records.iter().map(|r| r.question.clone()).collect();
        let references: Vec<String> =
            records.iter().map(|r| r.reference_answer.clone()).collect();
        self.evaluate(module, &queries, &references).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::AnswerFn;
    use clausemark::{Error, HeuristicEntailment, HeuristicExtractor};

    fn scorer() -> Arc<HallucinationScorer> {
        Arc::new(HallucinationScorer::new(
            Arc::new(HeuristicExtractor::new()),
            Arc::new(HeuristicEntailment::new()),
        ))
    }

    #[tokio::test]
    async fn preconditions_match_the_sequential_harness() {
        let evaluator = ParallelEvaluator::new(scorer());
        let module = AnswerFn::new(|q: &str| q.to_string());
        let err = evaluator.evaluate(&module, &[], &[]).await.unwrap_err();
        assert!(matches!(err, Error::EmptyDataset));
    }

    #[tokio::test]
    async fn results_keep_query_order_under_concurrency() {
        use async_trait::async_trait;
        use std::time::Duration;

        struct Jittery;

        #[async_trait]
        impl crate::evaluator::AnswerModule for Jittery {
            async fn answer(&self, query: &str) -> anyhow::Result<String> {
                // Earlier queries finish later.
                let index: u64 = query.trim_start_matches("query ").parse().unwrap();
                tokio::time::sleep(Duration::from_millis(40u64.saturating_sub(index * 10))).await;
                Ok(query.to_string())
            }
        }

        let queries: Vec<String> = (0..4).map(|i| format!("query {i}")).collect();
        let references = queries.clone();

        let evaluator = ParallelEvaluator::new(scorer()).with_concurrency(4);
        let (results, _) = evaluator
            .evaluate(&Jittery, &queries, &references)
            .await
            .unwrap();

        let order: Vec<&str> = results.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(order, ["query 0", "query 1", "query 2", "query 3"]);
    }

    #[tokio::test]
    async fn concurrent_and_sequential_agree() {
        let queries: Vec<String> = vec![
            "Is there a non-compete?".into(),
            "What is the governing law?".into(),
        ];
        let references: Vec<String> =
            vec!["Yes, 12 months.".into(), "Delaware law governs.".into()];
        let module = AnswerFn::new(|q: &str| format!("Answer about {q}"));

        let sequential = crate::Evaluator::new(scorer())
            .evaluate(&module, &queries, &references)
            .await
            .unwrap();
        let concurrent = ParallelEvaluator::new(scorer())
            .evaluate(&module, &queries, &references)
            .await
            .unwrap();

        for (s, c) in sequential.0.iter().zip(&concurrent.0) {
            assert_eq!(s.query, c.query);
            assert!((s.bleu_score - c.bleu_score).abs() < 1e-9);
            assert!((s.hallucination_score - c.hallucination_score).abs() < 1e-9);
        }
        assert!(
            (sequential.1.average_bleu_score - concurrent.1.average_bleu_score).abs() < 1e-9
        );
    }
}
