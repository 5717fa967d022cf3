// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor operations.

use crate::Shape;

/// Errors that can occur during tensor allocation and kernel execution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TensorError {
    /// A requested shape is empty, contains a zero dimension, or overflows.
    #[error("invalid shape {dims:?}: {reason}")]
    InvalidShape {
        dims: Vec<usize>,
        reason: &'static str,
    },

    /// Two tensors have incompatible shapes for the requested operation.
    #[error("incompatible shapes for {op}: {lhs} vs {rhs}")]
    ShapeMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },

    /// The provided buffer length does not match the element count of the shape.
    #[error("buffer size mismatch: expected {expected} elements, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// A bulk write supplied more values than the tensor can hold.
    #[error("bulk write of {requested} values exceeds tensor capacity {capacity}")]
    BufferOverflow { capacity: usize, requested: usize },

    /// The kernel does not handle tensors of this rank.
    #[error("{op} does not support rank-{rank} tensors")]
    UnsupportedRank { op: &'static str, rank: usize },

    /// A row index lies outside the tensor.
    #[error("row {index} out of bounds for tensor with {len} rows")]
    IndexOutOfBounds { index: usize, len: usize },
}
