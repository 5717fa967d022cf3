// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Log-softmax normalization.

use crate::{Tensor, TensorError};

/// Computes log-softmax along each row:
/// `output[r][j] = x[r][j] - max_r - ln(sum_j exp(x[r][j] - max_r))`.
///
/// The row maximum is subtracted before exponentiation so that large inputs
/// cannot overflow `exp` and the largest term is always `exp(0) = 1`, which
/// keeps the sum away from zero.
///
/// Accepts a `[rows, cols]` matrix; a rank-1 tensor is treated as a single
/// row.
///
/// # Errors
/// Returns [`TensorError::UnsupportedRank`] for tensors of rank > 2.
pub fn log_softmax(input: &Tensor) -> Result<Tensor, TensorError> {
    if input.rank() > 2 {
        return Err(TensorError::UnsupportedRank {
            op: "log_softmax",
            rank: input.rank(),
        });
    }

    let (num_rows, cols) = input.shape().rows_and_cols();
    let mut output = Tensor::zeros(input.shape().clone());
    let src = input.as_slice();
    let dst = output.as_mut_slice();

    for row in 0..num_rows {
        let offset = row * cols;
        let row_src = &src[offset..offset + cols];
        let row_dst = &mut dst[offset..offset + cols];

        let max_val = row_src.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let sum: f32 = row_src.iter().map(|&x| (x - max_val).exp()).sum();
        let log_sum = sum.ln();

        for (d, &x) in row_dst.iter_mut().zip(row_src) {
            *d = x - max_val - log_sum;
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    fn approx_eq(a: &[f32], b: &[f32], tol: f32) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < tol)
    }

    fn row_prob_sums(t: &Tensor) -> Vec<f32> {
        (0..t.num_rows())
            .map(|r| t.row_slice(r).unwrap().iter().map(|x| x.exp()).sum())
            .collect()
    }

    #[test]
    fn test_log_softmax_all_zero_row() {
        let input = Tensor::zeros(Shape::matrix(1, 10).unwrap());
        let output = log_softmax(&input).unwrap();
        let expected = -(10.0f32).ln();
        assert!(approx_eq(output.as_slice(), &[expected; 10], 1e-6));
        assert!((expected + 2.302585).abs() < 1e-6);
    }

    #[test]
    fn test_log_softmax_rows_sum_to_one() {
        let input = Tensor::from_vec(
            Shape::matrix(3, 4).unwrap(),
            vec![
                1.0, 2.0, 3.0, 4.0, //
                -1.0, 0.5, 0.25, 8.0, //
                0.0, 0.0, 0.0, 0.0,
            ],
        )
        .unwrap();
        let output = log_softmax(&input).unwrap();
        for sum in row_prob_sums(&output) {
            assert!((sum - 1.0).abs() < 1e-5, "row sums to {sum}");
        }
    }

    #[test]
    fn test_log_softmax_known_values() {
        // log_softmax([1, 2, 3]) = [-2.4076, -1.4076, -0.4076]
        let input = Tensor::from_vec(Shape::vector(3).unwrap(), vec![1.0, 2.0, 3.0]).unwrap();
        let output = log_softmax(&input).unwrap();
        assert!(approx_eq(output.as_slice(), &[-2.4076, -1.4076, -0.4076], 1e-4));
    }

    #[test]
    fn test_log_softmax_large_values() {
        // exp(1000) overflows without the max-subtraction trick.
        let input = Tensor::from_vec(
            Shape::matrix(1, 3).unwrap(),
            vec![1000.0, 1001.0, 1002.0],
        )
        .unwrap();
        let output = log_softmax(&input).unwrap();
        assert!(output.as_slice().iter().all(|x| x.is_finite()));
        assert!(approx_eq(output.as_slice(), &[-2.4076, -1.4076, -0.4076], 1e-3));
        assert!((row_prob_sums(&output)[0] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_log_softmax_very_negative_values() {
        // exp(-1000) underflows to zero without the max-subtraction trick.
        let input = Tensor::from_vec(
            Shape::matrix(1, 2).unwrap(),
            vec![-1000.0, -1000.0],
        )
        .unwrap();
        let output = log_softmax(&input).unwrap();
        let expected = -(2.0f32).ln();
        assert!(approx_eq(output.as_slice(), &[expected, expected], 1e-5));
    }

    #[test]
    fn test_log_softmax_rows_are_independent() {
        let input = Tensor::from_vec(
            Shape::matrix(2, 2).unwrap(),
            vec![0.0, 0.0, 100.0, 100.0],
        )
        .unwrap();
        let output = log_softmax(&input).unwrap();
        let half = -(2.0f32).ln();
        assert!(approx_eq(output.as_slice(), &[half; 4], 1e-5));
    }

    #[test]
    fn test_log_softmax_rejects_rank_3() {
        let input = Tensor::zeros(Shape::new(vec![2, 2, 2]).unwrap());
        assert_eq!(
            log_softmax(&input).unwrap_err(),
            TensorError::UnsupportedRank {
                op: "log_softmax",
                rank: 3
            }
        );
    }
}
