// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Clausemark CLI tool

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use clausemark::{
    parse_qa_pairs, parse_qa_pairs_strict, EntailmentClassifier, EntityExtractor,
    HallucinationScorer, HeuristicEntailment, HeuristicExtractor, QueryRecord,
};
use clausemark_client::{HfNerProvider, HfNliProvider, InferenceConfig, Retry, RetryConfig};
use clausemark_eval::{render_report, AnswerFn, Evaluator, EvaluatorConfig, ParallelEvaluator};
use console::style;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "clausemark")]
#[command(about = "Contract Q&A answer-quality evaluation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a Q/A dataset and show what it contains
    Parse {
        /// Path to the Q:/A: dataset file
        #[arg(short, long)]
        dataset: PathBuf,

        /// Reject unbalanced Q:/A: markers instead of dropping them
        #[arg(long)]
        strict: bool,
    },

    /// Evaluate generated answers against a dataset's references
    Eval {
        /// Path to the Q:/A: dataset file
        #[arg(short, long)]
        dataset: PathBuf,

        /// Generated answers, one line per dataset question
        #[arg(short, long)]
        answers: PathBuf,

        /// Reject unbalanced Q:/A: markers instead of dropping them
        #[arg(long)]
        strict: bool,

        /// Scoring backend
        #[arg(long, value_enum, default_value = "heuristic")]
        backend: Backend,

        /// NER model id for the hf backend
        #[arg(long, default_value = "dslim/bert-base-NER")]
        ner_model: String,

        /// NLI model id for the hf backend
        #[arg(long, default_value = "roberta-large-mnli")]
        nli_model: String,

        /// Inference endpoint base URL for the hf backend
        #[arg(long)]
        endpoint: Option<String>,

        /// Bearer token for the hf backend
        #[arg(long, env = "CLAUSEMARK_API_TOKEN")]
        api_token: Option<String>,

        /// Per-query deadline in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Queries in flight at once
        #[arg(long, default_value_t = 1)]
        concurrency: usize,

        /// Retries per inference call for the hf backend
        #[arg(long, default_value_t = 3)]
        retries: u32,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Deterministic model-free scoring
    Heuristic,
    /// Hugging Face Inference-style NER and NLI endpoints
    Hf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { dataset, strict } => {
            let records = load_dataset(&dataset, strict)?;
            println!(
                "{} {} pairs",
                style("Parsed:").bold(),
                style(records.len()).green()
            );
            for (i, record) in records.iter().enumerate() {
                println!("  {} {}", style(format!("Q{i}:")).dim(), record.question);
                println!(
                    "  {} {}",
                    style(format!("A{i}:")).dim(),
                    record.reference_answer
                );
            }
        }

        Commands::Eval {
            dataset,
            answers,
            strict,
            backend,
            ner_model,
            nli_model,
            endpoint,
            api_token,
            timeout_secs,
            concurrency,
            retries,
        } => {
            let records = load_dataset(&dataset, strict)?;
            let module = load_answers(&answers, &records)?;

            let scorer = build_scorer(
                backend, &ner_model, &nli_model, endpoint, api_token, retries,
            );
            let mut config = EvaluatorConfig::default();
            if let Some(secs) = timeout_secs {
                config = config.with_timeout(Duration::from_secs(secs));
            }

            let (results, summary) = if concurrency > 1 {
                ParallelEvaluator::new(scorer)
                    .with_config(config)
                    .with_concurrency(concurrency)
                    .evaluate_records(&module, &records)
                    .await?
            } else {
                Evaluator::with_config(scorer, config)
                    .evaluate_records(&module, &records)
                    .await?
            };

            println!("{}", style("EVALUATION").bold().underlined());
            println!();
            print!("{}", render_report(&results, &summary));
        }
    }

    Ok(())
}

fn load_dataset(path: &PathBuf, strict: bool) -> anyhow::Result<Vec<QueryRecord>> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("reading dataset {}", path.display()))?;
    let records = if strict {
        parse_qa_pairs_strict(&input)?
    } else {
        parse_qa_pairs(&input)
    };
    anyhow::ensure!(
        !records.is_empty(),
        "no Q:/A: pairs found in {}",
        path.display()
    );
    Ok(records)
}

/// Build an answer module from precomputed answers, one line per
/// question in dataset order.
///
/// Questions beyond the end of the answer file get the empty string, the
/// same contract as a retrieval layer that found nothing.
fn load_answers(
    path: &PathBuf,
    records: &[QueryRecord],
) -> anyhow::Result<AnswerFn<impl Fn(&str) -> String + Send + Sync>> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("reading answers {}", path.display()))?;
    let by_question: HashMap<String, String> = records
        .iter()
        .map(|r| r.question.clone())
        .zip(input.lines().map(str::to_string).chain(std::iter::repeat(String::new())))
        .collect();

    Ok(AnswerFn::new(move |query: &str| {
        by_question.get(query).cloned().unwrap_or_default()
    }))
}

fn build_scorer(
    backend: Backend,
    ner_model: &str,
    nli_model: &str,
    endpoint: Option<String>,
    api_token: Option<String>,
    retries: u32,
) -> Arc<HallucinationScorer> {
    let (extractor, classifier): (Arc<dyn EntityExtractor>, Arc<dyn EntailmentClassifier>) =
        match backend {
            Backend::Heuristic => (
                Arc::new(HeuristicExtractor::new()),
                Arc::new(HeuristicEntailment::new()),
            ),
            Backend::Hf => {
                let configure = |model: &str| {
                    let mut config = InferenceConfig::for_model(model);
                    if let Some(endpoint) = &endpoint {
                        config = config.with_endpoint(endpoint.clone());
                    }
                    if let Some(token) = &api_token {
                        config = config.with_api_token(token.clone());
                    }
                    config
                };
                let retry = RetryConfig {
                    max_retries: retries,
                    ..RetryConfig::default()
                };
                (
                    Arc::new(Retry::with_config(
                        HfNerProvider::new(configure(ner_model)),
                        retry,
                    )),
                    Arc::new(Retry::with_config(
                        HfNliProvider::new(configure(nli_model)),
                        retry,
                    )),
                )
            }
        };

    Arc::new(HallucinationScorer::new(extractor, classifier))
}
