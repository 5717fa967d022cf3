// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor kernels.
//!
//! Every kernel borrows its inputs, never mutates them, and returns a
//! freshly allocated output tensor. Shape checks happen before the output
//! is allocated.

mod log_softmax_op;
mod matmul_op;
mod relu_op;

pub use log_softmax_op::log_softmax;
pub use matmul_op::matmul;
pub use relu_op::relu;
