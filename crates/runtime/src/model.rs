// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The two-layer classifier: weights and forward pass.
//!
//! ```text
//! sample [1, 784] ─ matmul w1 ─▶ [1, 128] ─ relu ─▶ [1, 128] ─ matmul w2 ─▶ [1, 10] ─ log_softmax ─▶ [1, 10]
//! ```

use crate::{RuntimeConfig, RuntimeError, WeightLoader};
use tensor_core::{log_softmax, matmul, relu, Shape, Tensor, TensorError};

/// Pixels per input image (28 × 28).
pub const INPUT_DIM: usize = IMAGE_SIDE * IMAGE_SIDE;
/// Width of the hidden layer.
pub const HIDDEN_DIM: usize = 128;
/// Number of output classes (digits 0–9).
pub const NUM_CLASSES: usize = 10;
/// Side length of a square input image.
pub const IMAGE_SIDE: usize = 28;

/// Weight matrices of the classifier.
///
/// `w1` is `[input, hidden]` and `w2` is `[hidden, classes]`. Both are
/// read-only once constructed, so a single `ModelWeights` can be shared by
/// many concurrent forward passes behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ModelWeights {
    w1: Tensor,
    w2: Tensor,
}

impl ModelWeights {
    /// Wraps two weight matrices after checking that they chain.
    ///
    /// # Errors
    /// Returns [`TensorError::ShapeMismatch`] unless both are rank 2 and
    /// `w1`'s column count equals `w2`'s row count.
    pub fn new(w1: Tensor, w2: Tensor) -> Result<Self, TensorError> {
        if !w1.shape().is_matmul_compatible(w2.shape()) {
            return Err(TensorError::ShapeMismatch {
                op: "model weights (w1 vs w2)",
                lhs: w1.shape().clone(),
                rhs: w2.shape().clone(),
            });
        }
        Ok(Self { w1, w2 })
    }

    /// All-zero weights of the standard 784 → 128 → 10 shape.
    pub fn zeros() -> Result<Self, TensorError> {
        Ok(Self {
            w1: Tensor::zeros(Self::w1_shape()?),
            w2: Tensor::zeros(Self::w2_shape()?),
        })
    }

    /// Loads both weight files named in `config`.
    pub fn load(config: &RuntimeConfig) -> Result<Self, RuntimeError> {
        let loader = WeightLoader::new(config.truncation_policy());
        let w1 = loader.load(&config.w1_path, Self::w1_shape()?)?;
        let w2 = loader.load(&config.w2_path, Self::w2_shape()?)?;
        Ok(Self::new(w1, w2)?)
    }

    /// Shape of the standard first layer, `[784, 128]`.
    pub fn w1_shape() -> Result<Shape, TensorError> {
        Shape::matrix(INPUT_DIM, HIDDEN_DIM)
    }

    /// Shape of the standard second layer, `[128, 10]`.
    pub fn w2_shape() -> Result<Shape, TensorError> {
        Shape::matrix(HIDDEN_DIM, NUM_CLASSES)
    }

    /// First layer weights.
    pub fn w1(&self) -> &Tensor {
        &self.w1
    }

    /// Second layer weights.
    pub fn w2(&self) -> &Tensor {
        &self.w2
    }

    /// Number of input features the model expects.
    pub fn input_dim(&self) -> usize {
        self.w1.shape().dims()[0]
    }

    /// Number of output classes.
    pub fn num_classes(&self) -> usize {
        self.w2.shape().dims()[1]
    }

    /// Runs one forward pass over `samples` (`[batch, input]`) and returns
    /// per-row log-probabilities (`[batch, classes]`).
    ///
    /// Each intermediate tensor is released as soon as the next stage has
    /// consumed it.
    pub fn forward(&self, samples: &Tensor) -> Result<Tensor, TensorError> {
        let hidden = matmul(samples, &self.w1)?;
        let activated = relu(&hidden);
        hidden.release();

        let logits = matmul(&activated, &self.w2)?;
        activated.release();

        let log_probs = log_softmax(&logits)?;
        logits.release();

        Ok(log_probs)
    }
}
