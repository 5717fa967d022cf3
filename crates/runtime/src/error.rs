// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the inference runtime.

use std::path::PathBuf;

/// Errors that can occur while loading data or running inference.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A weight or data file could not be opened.
    #[error("cannot open '{}': {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading, mapping or writing an already opened file failed.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A weight file holds fewer bytes than its declared shape requires.
    #[error(
        "weight file '{}' is incomplete: expected {expected_bytes} bytes, found {actual_bytes}",
        .path.display()
    )]
    WeightsIncomplete {
        path: PathBuf,
        expected_bytes: usize,
        actual_bytes: usize,
    },

    /// A weight file holds more bytes than its declared shape allows.
    #[error(
        "weight file '{}' is larger than expected: expected {expected_bytes} bytes, found {actual_bytes}",
        .path.display()
    )]
    WeightsOversized {
        path: PathBuf,
        expected_bytes: usize,
        actual_bytes: usize,
    },

    /// A CSV record is malformed. `line` is 1-based.
    #[error("CSV format error on line {line}: {detail}")]
    CsvFormat { line: usize, detail: String },

    /// The data file contained no records.
    #[error("dataset '{}' contains no records", .path.display())]
    EmptyDataset { path: PathBuf },

    /// A tensor operation failed.
    #[error("tensor error: {0}")]
    Tensor(#[from] tensor_core::TensorError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// A blocking evaluation worker panicked or was cancelled.
    #[error("evaluation worker failed: {0}")]
    Worker(String),
}
