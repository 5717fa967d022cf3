// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Owned `f32` tensors and the three kernels needed to run a small
//! feed-forward classifier forward.
//!
//! This crate provides:
//! - [`Tensor`]: an owned, contiguous, row-major `f32` buffer plus its [`Shape`].
//! - [`Shape`]: a validated dimension list (rank ≥ 1, every dimension > 0).
//! - Allocation and lifecycle: [`create_zero_tensor`] and [`free_tensor`].
//! - Kernels: [`matmul`], [`relu`], [`log_softmax`].
//!
//! # Ownership
//! Kernels borrow their inputs and always return a freshly allocated output.
//! Releasing a tensor consumes it, so a released tensor cannot be read again
//! and cannot be released twice:
//!
//! ```compile_fail
//! use tensor_core::{create_zero_tensor, free_tensor};
//! let t = create_zero_tensor(&[2, 2]).unwrap();
//! free_tensor(t);
//! free_tensor(t); // error[E0382]: use of moved value
//! ```

mod error;
mod ops;
mod shape;
mod tensor;

pub use error::TensorError;
pub use ops::{log_softmax, matmul, relu};
pub use shape::Shape;
pub use tensor::{create_zero_tensor, free_tensor, Tensor};
