// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Evaluation metrics.
//!
//! [`EvaluationMetrics`] tallies correct predictions and collects timing
//! for an evaluation run. Per-sample outcomes are kept in
//! [`SampleResult`]s and bundled with the metrics in an
//! [`EvaluationReport`].

use std::time::Duration;

/// Outcome of classifying one sample.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SampleResult {
    /// Row index of the sample in the dataset.
    pub index: usize,
    /// Class chosen by the model.
    pub predicted: usize,
    /// Class decoded from the label.
    pub actual: usize,
    /// `predicted == actual`.
    pub correct: bool,
    /// Log-probabilities produced for the sample.
    pub log_probs: Vec<f32>,
    /// Time spent in the forward pass.
    pub compute_duration: Duration,
}

/// Aggregate metrics for an evaluation run.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct EvaluationMetrics {
    /// Number of samples evaluated.
    pub samples: usize,
    /// Number of samples whose prediction matched the label.
    pub correct: usize,
    /// Total wall-clock time for the run.
    pub total_duration: Duration,
    /// Sum of per-sample forward pass times.
    pub total_compute_duration: Duration,
    /// Number of blocking workers the run was spread across.
    pub num_workers: usize,
}

impl EvaluationMetrics {
    /// Creates an empty metrics container.
    pub fn new(num_workers: usize) -> Self {
        Self {
            num_workers,
            ..Default::default()
        }
    }

    /// Records one sample outcome.
    pub fn record_sample(&mut self, result: &SampleResult) {
        self.samples += 1;
        if result.correct {
            self.correct += 1;
        }
        self.total_compute_duration += result.compute_duration;
    }

    /// Finalises metrics with the total wall-clock time.
    pub fn finalise(&mut self, total: Duration) {
        self.total_duration = total;
    }

    /// Percentage of correctly classified samples, `0.0` if none were run.
    pub fn accuracy(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        self.correct as f64 * 100.0 / self.samples as f64
    }

    /// Returns samples per second throughput.
    pub fn samples_per_second(&self) -> f64 {
        let secs = self.total_duration.as_secs_f64();
        if secs <= 0.0 || self.samples == 0 {
            return 0.0;
        }
        self.samples as f64 / secs
    }

    /// The one-line accuracy report printed at the end of a run.
    pub fn summary(&self) -> String {
        format!(
            "Correctly predicted {} out of {} digits, accuracy = {:.1}%",
            self.correct,
            self.samples,
            self.accuracy(),
        )
    }

    /// Timing breakdown suitable for verbose CLI output.
    pub fn timing_summary(&self) -> String {
        format!(
            "Evaluation: {:.2}ms total, {:.2}ms compute across {} workers ({:.1} samples/s)",
            self.total_duration.as_secs_f64() * 1000.0,
            self.total_compute_duration.as_secs_f64() * 1000.0,
            self.num_workers,
            self.samples_per_second(),
        )
    }
}

/// Per-sample results in dataset order, plus the aggregate metrics.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EvaluationReport {
    pub results: Vec<SampleResult>,
    pub metrics: EvaluationMetrics,
}
