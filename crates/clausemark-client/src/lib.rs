// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Model-inference backends for Clausemark
//!
//! HTTP implementations of the core [`EntityExtractor`] and
//! [`EntailmentClassifier`](clausemark::EntailmentClassifier) seams
//! against Hugging Face Inference-style endpoints, plus a bounded
//! retry-with-backoff wrapper for transient failures.
//!
//! [`EntityExtractor`]: clausemark::EntityExtractor

#![warn(missing_docs)]

pub mod config;
pub mod ner;
pub mod nli;
pub mod retry;

pub use config::InferenceConfig;
pub use ner::HfNerProvider;
pub use nli::HfNliProvider;
pub use retry::{Retry, RetryConfig};
