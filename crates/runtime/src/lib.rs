// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # runtime
//!
//! Loading and evaluation for a two-layer MNIST digit classifier.
//!
//! The runtime takes:
//! - Two raw `f32` weight dumps, read by [`WeightLoader`].
//! - A CSV dataset of images and one-hot labels, read into an [`MnistDataset`].
//!
//! And classifies samples with the forward pass
//! `log_softmax(relu(x · w1) · w2)`, decoding each output with
//! [`get_prediction`] and each label with [`get_true_label`].
//!
//! # Type-State Pipeline
//! ```text
//! InferenceEngine<Idle> → InferenceEngine<Ready>
//! ```
//! The transition is compile-time checked.
//!
//! # Async Execution
//! [`InferenceEngine::evaluate`] spreads samples over tokio's blocking pool,
//! one contiguous chunk per configured worker.

mod config;
mod dataset;
mod engine;
mod error;
mod metrics;
mod model;
mod prediction;
mod weight_loader;

pub use config::RuntimeConfig;
pub use dataset::{MnistDataset, CSV_FIELDS};
pub use engine::{EngineState, Idle, InferenceEngine, Prediction, Ready};
pub use error::RuntimeError;
pub use metrics::{EvaluationMetrics, EvaluationReport, SampleResult};
pub use model::{ModelWeights, HIDDEN_DIM, IMAGE_SIDE, INPUT_DIM, NUM_CLASSES};
pub use prediction::{get_prediction, get_true_label};
pub use weight_loader::{TruncationPolicy, WeightFileInfo, WeightLoader};
