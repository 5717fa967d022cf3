// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! MNIST-style CSV dataset loading.
//!
//! Each record is a comma-separated line of `784 + 10` numbers: the 28×28
//! image in row-major order followed by a one-hot label. Label fields are
//! negated on load, so the in-memory label row holds `-1.0` at the true
//! class and `0.0` elsewhere. The true class is recovered with
//! [`get_true_label`](crate::get_true_label), which looks for the minimum.

use crate::{get_true_label, RuntimeError, INPUT_DIM, NUM_CLASSES};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tensor_core::{Shape, Tensor};

/// Number of fields every CSV record must provide.
pub const CSV_FIELDS: usize = INPUT_DIM + NUM_CLASSES;

/// Images and labels loaded from a CSV file.
///
/// `images` is `[n, 784]` and `labels` is `[n, 10]`, where `n` is the number
/// of records read.
#[derive(Debug, Clone)]
pub struct MnistDataset {
    images: Tensor,
    labels: Tensor,
}

impl MnistDataset {
    /// Loads at most `max_rows` records from the CSV file at `path`.
    ///
    /// # Errors
    /// - [`RuntimeError::FileOpen`] if the file cannot be opened.
    /// - [`RuntimeError::CsvFormat`] if any record has fewer than
    ///   [`CSV_FIELDS`] fields or a field is not a number. The whole load
    ///   fails; no partial dataset is returned.
    /// - [`RuntimeError::EmptyDataset`] if the file has no records.
    pub fn load_csv(path: &Path, max_rows: usize) -> Result<Self, RuntimeError> {
        let file = File::open(path).map_err(|source| RuntimeError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_reader(BufReader::new(file), max_rows).map_err(|e| match e {
            RuntimeError::EmptyDataset { .. } => RuntimeError::EmptyDataset {
                path: path.to_path_buf(),
            },
            RuntimeError::Io { source, .. } => RuntimeError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        tracing::info!(
            "dataset: loaded {} records from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parses at most `max_rows` records from any buffered reader.
    ///
    /// Blank lines are skipped. Fields past the first [`CSV_FIELDS`] are
    /// ignored.
    pub fn from_reader<R: BufRead>(reader: R, max_rows: usize) -> Result<Self, RuntimeError> {
        let mut pixels = Vec::new();
        let mut labels = Vec::new();
        let mut rows = 0usize;

        for (line_idx, line) in reader.lines().enumerate() {
            if rows >= max_rows {
                break;
            }
            let line = line.map_err(|source| RuntimeError::Io {
                path: "<reader>".into(),
                source,
            })?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }

            parse_record(line, line_idx + 1, &mut pixels, &mut labels)?;
            rows += 1;
        }

        if rows == 0 {
            return Err(RuntimeError::EmptyDataset {
                path: "<reader>".into(),
            });
        }

        let images = Tensor::from_vec(Shape::matrix(rows, INPUT_DIM)?, pixels)?;
        let labels = Tensor::from_vec(Shape::matrix(rows, NUM_CLASSES)?, labels)?;
        Ok(Self { images, labels })
    }

    /// Builds a dataset from already populated tensors.
    ///
    /// # Errors
    /// Returns [`RuntimeError::Tensor`] with a shape mismatch unless `images`
    /// is `[n, 784]` and `labels` is `[n, 10]`.
    pub fn from_tensors(images: Tensor, labels: Tensor) -> Result<Self, RuntimeError> {
        let img_dims = images.shape().dims();
        let lbl_dims = labels.shape().dims();
        let valid = images.rank() == 2
            && labels.rank() == 2
            && img_dims[1] == INPUT_DIM
            && lbl_dims[1] == NUM_CLASSES
            && img_dims[0] == lbl_dims[0];
        if !valid {
            return Err(tensor_core::TensorError::ShapeMismatch {
                op: "dataset (images vs labels)",
                lhs: images.shape().clone(),
                rhs: labels.shape().clone(),
            }
            .into());
        }
        Ok(Self { images, labels })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.images.num_rows()
    }

    /// `true` if the dataset holds no samples; a constructed dataset never does.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All images, `[n, 784]`.
    pub fn images(&self) -> &Tensor {
        &self.images
    }

    /// All negated one-hot labels, `[n, 10]`.
    pub fn labels(&self) -> &Tensor {
        &self.labels
    }

    /// Borrows the 784 pixels of sample `index`.
    pub fn image(&self, index: usize) -> Result<&[f32], RuntimeError> {
        Ok(self.images.row_slice(index)?)
    }

    /// Copies sample `index` into a fresh `[1, 784]` tensor.
    pub fn sample(&self, index: usize) -> Result<Tensor, RuntimeError> {
        Ok(self.images.row(index)?)
    }

    /// Borrows the 10 label fields of sample `index`.
    pub fn label(&self, index: usize) -> Result<&[f32], RuntimeError> {
        Ok(self.labels.row_slice(index)?)
    }

    /// Decodes the true class of sample `index`.
    pub fn true_label(&self, index: usize) -> Result<usize, RuntimeError> {
        Ok(get_true_label(self.label(index)?))
    }
}

/// Parses one CSV record, appending its pixels and negated label fields.
fn parse_record(
    line: &str,
    line_no: usize,
    pixels: &mut Vec<f32>,
    labels: &mut Vec<f32>,
) -> Result<(), RuntimeError> {
    let mut found = 0usize;
    for (i, field) in line.split(',').take(CSV_FIELDS).enumerate() {
        let value: f32 = field.trim().parse().map_err(|_| RuntimeError::CsvFormat {
            line: line_no,
            detail: format!("field {} is not a number: '{}'", i + 1, field.trim()),
        })?;
        if i < INPUT_DIM {
            pixels.push(value);
        } else {
            labels.push(-value);
        }
        found += 1;
    }

    if found < CSV_FIELDS {
        return Err(RuntimeError::CsvFormat {
            line: line_no,
            detail: format!("not enough columns: expected {CSV_FIELDS}, found {found}"),
        });
    }
    Ok(())
}
