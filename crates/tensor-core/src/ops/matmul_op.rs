// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Matrix multiplication operation.

use crate::{Shape, Tensor, TensorError};

/// Performs matrix multiplication: `lhs @ rhs`.
///
/// Both inputs must be 2-D tensors with compatible inner dimensions:
/// `lhs` is `[M, K]` and `rhs` is `[K, N]`. The result is a new `[M, N]`
/// tensor. Operands are used exactly as supplied; there is no broadcasting
/// and no implicit transpose.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if either input is not rank 2 or
/// the inner dimensions differ. Nothing is allocated in that case.
///
/// # Examples
/// ```
/// use tensor_core::{matmul, Shape, Tensor};
/// let a = Tensor::from_vec(Shape::matrix(1, 2).unwrap(), vec![1.0, 2.0]).unwrap();
/// let b = Tensor::from_vec(Shape::matrix(2, 1).unwrap(), vec![3.0, 4.0]).unwrap();
/// assert_eq!(matmul(&a, &b).unwrap().as_slice(), &[11.0]);
/// ```
pub fn matmul(lhs: &Tensor, rhs: &Tensor) -> Result<Tensor, TensorError> {
    if !lhs.shape().is_matmul_compatible(rhs.shape()) {
        return Err(TensorError::ShapeMismatch {
            op: "matmul",
            lhs: lhs.shape().clone(),
            rhs: rhs.shape().clone(),
        });
    }

    let lhs_dims = lhs.shape().dims();
    let m = lhs_dims[0];
    let k = lhs_dims[1];
    let n = rhs.shape().dims()[1];

    let mut output = Tensor::zeros(Shape::matrix(m, n)?);
    matmul_f32_generic(lhs.as_slice(), rhs.as_slice(), output.as_mut_slice(), m, k, n);

    Ok(output)
}

/// Portable f32 matrix multiplication into a zeroed `c`.
///
/// ikj loop order: the inner loop is a saxpy over a row of `c` and a row
/// of `b`, both sequential in memory.
fn matmul_f32_generic(a: &[f32], b: &[f32], c: &mut [f32], m: usize, k: usize, n: usize) {
    for i in 0..m {
        let c_row = &mut c[i * n..(i + 1) * n];
        for p in 0..k {
            let a_ip = a[i * k + p];
            let b_row = &b[p * n..(p + 1) * n];
            for (c_ij, &b_pj) in c_row.iter_mut().zip(b_row) {
                *c_ij += a_ip * b_pj;
            }
        }
    }
}
