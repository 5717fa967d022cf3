// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Weight loading from raw `f32` dump files with memory-mapped I/O.
//!
//! A weight file is a headerless sequence of native-endian IEEE-754 `f32`
//! values in row-major order. The file carries no shape, so the caller
//! supplies the expected [`Shape`] and the loader checks the byte length
//! against it before decoding:
//!
//! - exact length: decoded into a new tensor.
//! - too long: [`RuntimeError::WeightsOversized`].
//! - too short: [`RuntimeError::WeightsIncomplete`], unless the loader was
//!   built with [`TruncationPolicy::ZeroPad`], in which case the values that
//!   are present are written and the tail stays zero.

use crate::RuntimeError;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tensor_core::{Shape, Tensor};

const F32_BYTES: usize = std::mem::size_of::<f32>();

/// How a weight file shorter than its declared shape is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub enum TruncationPolicy {
    /// Fail with [`RuntimeError::WeightsIncomplete`].
    #[default]
    Reject,
    /// Keep the values that are present and leave the rest at zero.
    ZeroPad,
}

/// Size report for a weight file, produced without decoding it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct WeightFileInfo {
    /// Bytes the declared shape requires.
    pub expected_bytes: usize,
    /// Bytes actually present on disk.
    pub actual_bytes: usize,
}

impl WeightFileInfo {
    /// Number of whole `f32` values present in the file.
    pub fn actual_elements(&self) -> usize {
        self.actual_bytes / F32_BYTES
    }

    /// Number of `f32` values the declared shape requires.
    pub fn expected_elements(&self) -> usize {
        self.expected_bytes / F32_BYTES
    }

    /// `true` if the file length matches the declared shape exactly.
    pub fn is_complete(&self) -> bool {
        self.actual_bytes == self.expected_bytes
    }
}

/// Loads and stores raw weight tensors.
///
/// Uses `memmap2` for reading so the file is decoded straight from the
/// page cache into the tensor buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightLoader {
    policy: TruncationPolicy,
}

impl WeightLoader {
    /// Creates a loader with the given truncation policy.
    pub fn new(policy: TruncationPolicy) -> Self {
        Self { policy }
    }

    /// Creates a loader that rejects short files.
    pub fn strict() -> Self {
        Self::new(TruncationPolicy::Reject)
    }

    /// Returns the truncation policy in effect.
    pub fn policy(&self) -> TruncationPolicy {
        self.policy
    }

    /// Reads the file at `path` into a new tensor of `shape`.
    pub fn load(&self, path: &Path, shape: Shape) -> Result<Tensor, RuntimeError> {
        let file = open(path)?;
        let info = file_info(&file, path, &shape)?;

        if info.actual_bytes > info.expected_bytes {
            return Err(RuntimeError::WeightsOversized {
                path: path.to_path_buf(),
                expected_bytes: info.expected_bytes,
                actual_bytes: info.actual_bytes,
            });
        }

        if !info.is_complete() {
            match self.policy {
                TruncationPolicy::Reject => {
                    return Err(RuntimeError::WeightsIncomplete {
                        path: path.to_path_buf(),
                        expected_bytes: info.expected_bytes,
                        actual_bytes: info.actual_bytes,
                    });
                }
                TruncationPolicy::ZeroPad => {
                    tracing::warn!(
                        "weight file '{}' holds {} of {} values; zero-padding the rest",
                        path.display(),
                        info.actual_elements(),
                        info.expected_elements(),
                    );
                }
            }
        }

        let mut tensor = Tensor::zeros(shape);
        if info.actual_bytes == 0 {
            return Ok(tensor);
        }

        let mmap = unsafe { memmap2::Mmap::map(&file) }.map_err(|source| RuntimeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let whole_bytes = info.actual_elements() * F32_BYTES;
        decode_ne_f32(&mmap[..whole_bytes], tensor.as_mut_slice());

        tracing::info!(
            "weight loader: read {} ({} values, shape {})",
            path.display(),
            info.actual_elements(),
            tensor.shape(),
        );

        Ok(tensor)
    }

    /// Reports the size of the file at `path` against `shape` without
    /// reading its contents.
    pub fn inspect(path: &Path, shape: &Shape) -> Result<WeightFileInfo, RuntimeError> {
        let file = open(path)?;
        file_info(&file, path, shape)
    }

    /// Writes `tensor` to `path` in the raw weight layout, replacing any
    /// existing file.
    pub fn save(path: &Path, tensor: &Tensor) -> Result<(), RuntimeError> {
        let io_err = |source: std::io::Error| RuntimeError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut bytes = Vec::with_capacity(tensor.size_bytes());
        for value in tensor.as_slice() {
            bytes.extend_from_slice(&value.to_ne_bytes());
        }

        let mut file = File::create(path).map_err(|source| RuntimeError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        file.write_all(&bytes).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;

        tracing::debug!("weight loader: wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

fn open(path: &Path) -> Result<File, RuntimeError> {
    File::open(path).map_err(|source| RuntimeError::FileOpen {
        path: path.to_path_buf(),
        source,
    })
}

fn file_info(file: &File, path: &Path, shape: &Shape) -> Result<WeightFileInfo, RuntimeError> {
    let metadata = file.metadata().map_err(|source| RuntimeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(WeightFileInfo {
        expected_bytes: shape.size_bytes(),
        actual_bytes: metadata.len() as usize,
    })
}

/// Decodes native-endian `f32`s from `src` into the front of `dst`.
fn decode_ne_f32(src: &[u8], dst: &mut [f32]) {
    for (d, chunk) in dst.iter_mut().zip(src.chunks_exact(F32_BYTES)) {
        *d = f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("digit_rt_wl_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    fn write_raw(path: &Path, values: &[f32]) {
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
        std::fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_roundtrip_bit_exact() {
        let path = temp_path("roundtrip.weights");
        let values = vec![
            0.0f32,
            -0.0,
            1.5,
            -3.25e-7,
            f32::MAX,
            f32::MIN_POSITIVE,
            f32::EPSILON,
            123_456.5,
        ];
        let tensor = Tensor::from_vec(Shape::matrix(2, 4).unwrap(), values.clone()).unwrap();

        WeightLoader::save(&path, &tensor).unwrap();
        let loaded = WeightLoader::strict()
            .load(&path, Shape::matrix(2, 4).unwrap())
            .unwrap();

        let original_bits: Vec<u32> = values.iter().map(|v| v.to_bits()).collect();
        let loaded_bits: Vec<u32> = loaded.as_slice().iter().map(|v| v.to_bits()).collect();
        assert_eq!(original_bits, loaded_bits);
    }

    #[test]
    fn test_native_byte_layout() {
        let path = temp_path("layout.weights");
        let tensor = Tensor::from_vec(Shape::vector(2).unwrap(), vec![1.0, -2.0]).unwrap();
        WeightLoader::save(&path, &tensor).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
        assert_eq!(&bytes[4..8], &(-2.0f32).to_ne_bytes());
    }

    #[test]
    fn test_short_file_rejected() {
        let path = temp_path("short.weights");
        write_raw(&path, &[1.0, 2.0, 3.0]);

        let err = WeightLoader::strict()
            .load(&path, Shape::matrix(2, 2).unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::WeightsIncomplete {
                expected_bytes: 16,
                actual_bytes: 12,
                ..
            }
        ));
    }

    #[test]
    fn test_short_file_zero_padded() {
        let path = temp_path("short_padded.weights");
        write_raw(&path, &[1.0, 2.0, 3.0]);

        let loader = WeightLoader::new(TruncationPolicy::ZeroPad);
        let t = loader.load(&path, Shape::matrix(2, 2).unwrap()).unwrap();
        assert_eq!(t.as_slice(), &[1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn test_partial_trailing_value_is_dropped_when_padding() {
        let path = temp_path("ragged.weights");
        let mut bytes: Vec<u8> = 7.0f32.to_ne_bytes().to_vec();
        bytes.extend_from_slice(&[0xAB, 0xCD]);
        std::fs::write(&path, bytes).unwrap();

        assert!(WeightLoader::strict()
            .load(&path, Shape::vector(2).unwrap())
            .is_err());

        let t = WeightLoader::new(TruncationPolicy::ZeroPad)
            .load(&path, Shape::vector(2).unwrap())
            .unwrap();
        assert_eq!(t.as_slice(), &[7.0, 0.0]);
    }

    #[test]
    fn test_empty_file_zero_padded() {
        let path = temp_path("empty.weights");
        std::fs::write(&path, b"").unwrap();

        let t = WeightLoader::new(TruncationPolicy::ZeroPad)
            .load(&path, Shape::vector(3).unwrap())
            .unwrap();
        assert_eq!(t.as_slice(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_oversized_file_rejected() {
        let path = temp_path("long.weights");
        write_raw(&path, &[1.0; 5]);

        let err = WeightLoader::new(TruncationPolicy::ZeroPad)
            .load(&path, Shape::matrix(2, 2).unwrap())
            .unwrap_err();
        assert!(matches!(err, RuntimeError::WeightsOversized { .. }));
    }

    #[test]
    fn test_missing_file() {
        let path = temp_path("does_not_exist.weights");
        let err = WeightLoader::strict()
            .load(&path, Shape::vector(1).unwrap())
            .unwrap_err();
        assert!(matches!(err, RuntimeError::FileOpen { .. }));
        assert!(err.to_string().contains("does_not_exist.weights"));
    }

    #[test]
    fn test_inspect() {
        let path = temp_path("inspect.weights");
        write_raw(&path, &[0.5; 6]);

        let info = WeightLoader::inspect(&path, &Shape::matrix(2, 4).unwrap()).unwrap();
        assert_eq!(info.expected_bytes, 32);
        assert_eq!(info.actual_bytes, 24);
        assert_eq!(info.actual_elements(), 6);
        assert_eq!(info.expected_elements(), 8);
        assert!(!info.is_complete());
    }

    #[test]
    fn test_default_policy_is_reject() {
        assert_eq!(WeightLoader::default().policy(), TruncationPolicy::Reject);
    }
}
