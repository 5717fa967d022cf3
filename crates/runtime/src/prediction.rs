// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Decoding class indices from output and label rows.

/// Returns the index of the largest value in `logits`.
///
/// Ties go to the lowest index: a later value must be strictly greater to
/// replace the current maximum. Returns `0` for an empty slice.
///
/// # Examples
/// ```
/// use runtime::get_prediction;
/// assert_eq!(get_prediction(&[0.1, 0.1, 5.0, 0.0]), 2);
/// assert_eq!(get_prediction(&[3.0, 3.0, 1.0]), 0);
/// ```
pub fn get_prediction(logits: &[f32]) -> usize {
    first_extremum(logits, |candidate, best| candidate > best)
}

/// Returns the index of the smallest value in a negated one-hot label row.
///
/// The true class holds `-1.0` and every other slot `0.0`, so the minimum
/// marks the class. Ties go to the lowest index. Returns `0` for an empty
/// slice.
///
/// # Examples
/// ```
/// use runtime::get_true_label;
/// assert_eq!(get_true_label(&[0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]), 2);
/// ```
pub fn get_true_label(labels: &[f32]) -> usize {
    first_extremum(labels, |candidate, best| candidate < best)
}

fn first_extremum(values: &[f32], replaces: impl Fn(f32, f32) -> bool) -> usize {
    let Some((&first, rest)) = values.split_first() else {
        return 0;
    };
    let mut best_idx = 0;
    let mut best = first;
    for (i, &v) in rest.iter().enumerate() {
        if replaces(v, best) {
            best = v;
            best_idx = i + 1;
        }
    }
    best_idx
}
