// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Sequential evaluation harness

use async_trait::async_trait;
use clausemark::{
    bleu, Error, EvaluationResult, EvaluationSummary, HallucinationScorer, QueryRecord, Result,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Answer-generation collaborator
///
/// Typically the retrieval layer of the pipeline under evaluation. The
/// contract is to return the empty string, not an error, when no
/// relevant content is found for a query.
#[async_trait]
pub trait AnswerModule: Send + Sync {
    /// Produce a generated answer for one query.
    async fn answer(&self, query: &str) -> anyhow::Result<String>;
}

/// Adapter turning a plain closure into an [`AnswerModule`]
pub struct AnswerFn<F>(F);

impl<F> AnswerFn<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    /// Wrap an infallible answer closure
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F> AnswerModule for AnswerFn<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    async fn answer(&self, query: &str) -> anyhow::Result<String> {
        Ok((self.0)(query))
    }
}

/// Harness configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluatorConfig {
    /// Deadline for answering and scoring a single query.
    ///
    /// Model inference is a failure-prone external call; with a deadline
    /// set, an expiry surfaces as
    /// [`Error::ScoringTimeout`] carrying the query index. No deadline
    /// by default.
    pub per_query_timeout: Option<Duration>,
}

impl EvaluatorConfig {
    /// Set the per-query deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.per_query_timeout = Some(timeout);
        self
    }
}

/// Sequential evaluation harness
///
/// Processes queries in order, one at a time. A scorer failure aborts
/// the batch with the failing query index attached; no partial results
/// are returned.
pub struct Evaluator {
    scorer: Arc<HallucinationScorer>,
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Create a harness with default configuration
    pub fn new(scorer: Arc<HallucinationScorer>) -> Self {
        Self::with_config(scorer, EvaluatorConfig::default())
    }

    /// Create a harness with explicit configuration
    pub fn with_config(scorer: Arc<HallucinationScorer>, config: EvaluatorConfig) -> Self {
        Self { scorer, config }
    }

    /// Evaluate every query against its reference.
    ///
    /// Fails with [`Error::InvalidInput`] on a length mismatch and
    /// [`Error::EmptyDataset`] on zero queries. The i-th result always
    /// corresponds to the i-th query.
    pub async fn evaluate<A: AnswerModule>(
        &self,
        module: &A,
        queries: &[String],
        references: &[String],
    ) -> Result<(Vec<EvaluationResult>, EvaluationSummary)> {
        check_preconditions(queries, references)?;

        let mut results = Vec::with_capacity(queries.len());
        for (index, (query, reference)) in queries.iter().zip(references).enumerate() {
            let result =
                evaluate_one(&self.scorer, &self.config, module, index, query, reference).await?;
            results.push(result);
        }

        let summary = EvaluationSummary::of(&results);
        info!(
            total = results.len(),
            average_bleu = summary.average_bleu_score,
            average_hallucination = summary.average_hallucination_score,
            "evaluation complete"
        );
        Ok((results, summary))
    }

    /// Evaluate a parsed dataset of query records.
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

/// Shared precondition checks for both evaluators.
pub(crate) fn check_preconditions(queries: &[String], references: &[String]) -> Result<()> {
    if queries.len() != references.len() {
        return Err(Error::InvalidInput {
            queries: queries.len(),
            references: references.len(),
        });
    }
    if queries.is_empty() {
        return Err(Error::EmptyDataset);
    }
    Ok(())
}

/// Answer and score a single query, attaching index context to failures.
pub(crate) async fn evaluate_one<A: AnswerModule>(
    scorer: &HallucinationScorer,
    config: &EvaluatorConfig,
    module: &A,
    index: usize,
    query: &str,
    reference: &str,
) -> Result<EvaluationResult> {
    let scored = async {
        let generated = module.answer(query).await.map_err(|e| Error::ScoringModel {
            index,
            scorer: "answer generation",
            message: format!("{e:#}"),
        })?;

        let bleu_score = bleu(&generated, reference);
        let hallucination_score = scorer
            .score(&generated, reference)
            .await
            .map_err(|e| e.at_query(index, "hallucination"))?;

        debug!(index, bleu_score, hallucination_score, "scored query");
        Ok(EvaluationResult {
            query: query.to_string(),
            reference: reference.to_string(),
            generated_answer: generated,
            bleu_score,
            hallucination_score,
        })
    };

    match config.per_query_timeout {
        Some(timeout) => tokio::time::timeout(timeout, scored)
            .await
            .map_err(|_| Error::ScoringTimeout { index, timeout })?,
        None => scored.await,
    }
}
