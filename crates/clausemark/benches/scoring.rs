// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Benchmarks for the pure scoring paths with the model-free backends.
//!
//! These measure scorer overhead itself, without inference latency.

use clausemark::{bleu, HeuristicEntailment, HeuristicExtractor};

use criterion::{criterion_group, criterion_main, Criterion};

const GENERATED: &str = "Yes, the agreement contains a non-compete clause binding the \
Employee for 12 months after termination within the State of Delaware.";
const REFERENCE: &str = "Yes. The non-compete runs for 12 months after termination and \
is governed by Delaware law.";

fn bench_bleu(c: &mut Criterion) {
    c.bench_function("bleu_sentence_pair", |b| {
        b.iter(|| bleu(GENERATED, REFERENCE))
    });

    c.bench_function("bleu_identical", |b| b.iter(|| bleu(REFERENCE, REFERENCE)));
}

fn bench_heuristic_backends(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");

    let extractor = HeuristicExtractor::new();
    c.bench_function("heuristic_extract", |b| {
        b.iter(|| {
            rt.block_on(async {
                use clausemark::EntityExtractor;
                extractor.extract_entities(GENERATED).await.unwrap()
            })
        })
    });

    let classifier = HeuristicEntailment::new();
    c.bench_function("heuristic_entailment", |b| {
        b.iter(|| {
            rt.block_on(async {
                use clausemark::EntailmentClassifier;
                classifier
                    .score_entailment(REFERENCE, GENERATED)
                    .await
                    .unwrap()
            })
        })
    });
}

criterion_group!(benches, bench_bleu, bench_heuristic_backends);
criterion_main!(benches);
