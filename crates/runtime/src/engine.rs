// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The inference engine with a type-state enforced pipeline.
//!
//! ```text
//! InferenceEngine<Idle>
//!     │  .load_weights()
//!     ▼
//! InferenceEngine<Ready>
//!     │  .predict() / .evaluate()
//!     ▼
//!   Prediction / EvaluationReport
//! ```
//!
//! Loading consumes the idle engine and returns a ready one, so predicting
//! without weights is a compile error.

use crate::{
    get_prediction, EvaluationMetrics, EvaluationReport, MnistDataset, ModelWeights,
    RuntimeConfig, RuntimeError, SampleResult,
};
use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;
use tensor_core::Tensor;
use tokio::task::JoinSet;

// ── Type-state markers ─────────────────────────────────────────

/// Engine is configured but holds no weights.
#[derive(Debug)]
pub struct Idle;

/// Weights are loaded; the engine can classify samples.
#[derive(Debug)]
pub struct Ready {
    weights: Arc<ModelWeights>,
}

/// Marker trait for engine states.
pub trait EngineState: std::fmt::Debug {}
impl EngineState for Idle {}
impl EngineState for Ready {}

// ── Prediction ─────────────────────────────────────────────────

/// The model's answer for a single sample.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Prediction {
    /// Index of the highest log-probability; the first one wins ties.
    pub class: usize,
    /// Log-probabilities for every class.
    pub log_probs: Vec<f32>,
}

impl Prediction {
    /// Probability assigned to the predicted class.
    pub fn confidence(&self) -> f32 {
        self.log_probs.get(self.class).map_or(0.0, |lp| lp.exp())
    }
}

// ── Engine ─────────────────────────────────────────────────────

/// The digit classification engine.
///
/// # Example
/// ```no_run
/// use runtime::{InferenceEngine, MnistDataset, RuntimeConfig};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), runtime::RuntimeError> {
/// let config = RuntimeConfig::default();
/// let dataset = Arc::new(MnistDataset::load_csv(&config.data_path, config.max_rows)?);
/// let engine = InferenceEngine::new(config).load_weights()?;
/// let report = engine.evaluate(&dataset, 10).await?;
/// println!("{}", report.metrics.summary());
/// # Ok(())
/// # }
/// ```
pub struct InferenceEngine<S: EngineState = Idle> {
    config: RuntimeConfig,
    state: S,
}

impl<S: EngineState> InferenceEngine<S> {
    /// Returns the engine configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }
}

// ── Idle → Ready ───────────────────────────────────────────────

impl InferenceEngine<Idle> {
    /// Creates a new engine from the given configuration.
    pub fn new(config: RuntimeConfig) -> Self {
        tracing::info!(
            "engine created (w1 '{}', w2 '{}')",
            config.w1_path.display(),
            config.w2_path.display(),
        );
        Self { config, state: Idle }
    }

    /// Loads both weight files named in the configuration.
    /// Transitions to the `Ready` state.
    pub fn load_weights(self) -> Result<InferenceEngine<Ready>, RuntimeError> {
        self.config.validate()?;
        let start = Instant::now();
        let weights = ModelWeights::load(&self.config)?;
        tracing::info!(
            "weights loaded in {:.2}ms ({} → {} → {})",
            start.elapsed().as_secs_f64() * 1000.0,
            weights.input_dim(),
            weights.w1().shape().dims()[1],
            weights.num_classes(),
        );
        Ok(Self::from_weights(self.config, weights))
    }

    /// Builds a ready engine around weights that are already in memory.
    pub fn from_weights(config: RuntimeConfig, weights: ModelWeights) -> InferenceEngine<Ready> {
        InferenceEngine {
            config,
            state: Ready {
                weights: Arc::new(weights),
            },
        }
    }
}

// ── Ready: run inference ───────────────────────────────────────

impl InferenceEngine<Ready> {
    /// Returns the loaded weights.
    pub fn weights(&self) -> &ModelWeights {
        &self.state.weights
    }

    /// Classifies a single `[1, input]` sample.
    pub fn predict(&self, sample: &Tensor) -> Result<Prediction, RuntimeError> {
        let output = self.state.weights.forward(sample)?;
        let log_probs = output.row_slice(0)?.to_vec();
        output.release();
        Ok(Prediction {
            class: get_prediction(&log_probs),
            log_probs,
        })
    }

    /// Classifies the first `limit` samples of `dataset` (all of them if
    /// it is shorter).
    ///
    /// Samples are split into contiguous chunks, one per worker, and each
    /// chunk runs on tokio's blocking pool. Results come back in dataset
    /// order regardless of which worker finished first.
    pub async fn evaluate(
        &self,
        dataset: &Arc<MnistDataset>,
        limit: usize,
    ) -> Result<EvaluationReport, RuntimeError> {
        let run_start = Instant::now();
        let count = limit.min(dataset.len());
        let workers = self.config.resolve_threads().clamp(1, count.max(1));
        let chunk = count.div_ceil(workers).max(1);

        tracing::debug!("evaluating {count} samples on {workers} workers");

        let mut tasks = JoinSet::new();
        for start in (0..count).step_by(chunk) {
            let range = start..(start + chunk).min(count);
            let weights = Arc::clone(&self.state.weights);
            let dataset = Arc::clone(dataset);
            tasks.spawn_blocking(move || classify_range(&weights, &dataset, range));
        }

        let mut results = Vec::with_capacity(count);
        while let Some(joined) = tasks.join_next().await {
            let chunk_results = joined.map_err(|e| RuntimeError::Worker(e.to_string()))??;
            results.extend(chunk_results);
        }
        results.sort_by_key(|r| r.index);

        let mut metrics = EvaluationMetrics::new(workers);
        for result in &results {
            metrics.record_sample(result);
        }
        metrics.finalise(run_start.elapsed());
        tracing::info!("{}", metrics.summary());
        tracing::debug!("{}", metrics.timing_summary());

        Ok(EvaluationReport { results, metrics })
    }
}

impl<S: EngineState> std::fmt::Debug for InferenceEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceEngine")
            .field("state", &std::any::type_name::<S>())
            .field("w1_path", &self.config.w1_path)
            .field("w2_path", &self.config.w2_path)
            .finish()
    }
}

/// Classifies dataset rows `range` in order, stopping at the first error.
fn classify_range(
    weights: &ModelWeights,
    dataset: &MnistDataset,
    range: Range<usize>,
) -> Result<Vec<SampleResult>, RuntimeError> {
    range
        .map(|index| classify_sample(weights, dataset, index))
        .collect()
}

fn classify_sample(
    weights: &ModelWeights,
    dataset: &MnistDataset,
    index: usize,
) -> Result<SampleResult, RuntimeError> {
    let sample = dataset.sample(index)?;
    let start = Instant::now();
    let output = weights.forward(&sample)?;
    let compute_duration = start.elapsed();
    sample.release();

    let log_probs = output.row_slice(0)?.to_vec();
    output.release();

    let predicted = get_prediction(&log_probs);
    let actual = dataset.true_label(index)?;
    tracing::debug!(index, predicted, actual, "sample classified");

    Ok(SampleResult {
        index,
        predicted,
        actual,
        correct: predicted == actual,
        log_probs,
        compute_duration,
    })
}
