// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Rectified Linear Unit (ReLU) activation.

use crate::Tensor;

/// Applies `max(0, x)` element-wise and returns a new tensor of the same shape.
///
/// NaN inputs map to `0.0`.
pub fn relu(input: &Tensor) -> Tensor {
    let mut output = Tensor::zeros(input.shape().clone());
    for (d, &x) in output.as_mut_slice().iter_mut().zip(input.as_slice()) {
        *d = relu_scalar(x);
    }
    output
}

#[inline(always)]
fn relu_scalar(x: f32) -> f32 {
    x.max(0.0)
}
