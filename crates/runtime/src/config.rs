// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Runtime configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! data_path = "mnist_test.csv"
//! w1_path = "w1.weights"
//! w2_path = "w2.weights"
//! num_samples = 10
//! max_rows = 60000
//! num_threads = 4
//! zero_pad_short_weights = false
//! ```

use crate::TruncationPolicy;
use std::path::{Path, PathBuf};

/// Configuration for the inference runtime.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RuntimeConfig {
    /// CSV file with one sample per line (784 pixels followed by 10 label fields).
    pub data_path: PathBuf,
    /// Raw `f32` dump of the first layer weights, `[784, 128]`.
    pub w1_path: PathBuf,
    /// Raw `f32` dump of the second layer weights, `[128, 10]`.
    pub w2_path: PathBuf,
    /// Number of leading samples to evaluate.
    #[serde(default = "default_num_samples")]
    pub num_samples: usize,
    /// Maximum number of CSV rows to load.
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    /// Number of evaluation workers (defaults to number of online CPU cores).
    pub num_threads: Option<usize>,
    /// Accept short weight files and leave the missing tail at zero.
    #[serde(default)]
    pub zero_pad_short_weights: bool,
}

fn default_num_samples() -> usize {
    10
}

fn default_max_rows() -> usize {
    60_000
}

impl RuntimeConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, super::RuntimeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            super::RuntimeError::ConfigError(format!(
                "cannot read config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, super::RuntimeError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| {
            super::RuntimeError::ConfigError(format!("TOML parse error: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, super::RuntimeError> {
        toml::to_string_pretty(self).map_err(|e| {
            super::RuntimeError::ConfigError(format!("TOML serialise error: {e}"))
        })
    }

    /// Checks that numeric settings are usable.
    pub fn validate(&self) -> Result<(), super::RuntimeError> {
        if self.num_samples == 0 {
            return Err(super::RuntimeError::ConfigError(
                "num_samples must be at least 1".into(),
            ));
        }
        if self.max_rows == 0 {
            return Err(super::RuntimeError::ConfigError(
                "max_rows must be at least 1".into(),
            ));
        }
        if self.num_threads == Some(0) {
            return Err(super::RuntimeError::ConfigError(
                "num_threads must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Resolves the number of evaluation workers.
    pub fn resolve_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        })
    }

    /// Returns how short weight files are treated.
    pub fn truncation_policy(&self) -> TruncationPolicy {
        if self.zero_pad_short_weights {
            TruncationPolicy::ZeroPad
        } else {
            TruncationPolicy::Reject
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("mnist_test.csv"),
            w1_path: PathBuf::from("w1.weights"),
            w2_path: PathBuf::from("w2.weights"),
            num_samples: default_num_samples(),
            max_rows: default_max_rows(),
            num_threads: None,
            zero_pad_short_weights: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = RuntimeConfig::default();
        assert_eq!(c.num_samples, 10);
        assert_eq!(c.max_rows, 60_000);
        assert_eq!(c.w1_path, PathBuf::from("w1.weights"));
        assert_eq!(c.truncation_policy(), TruncationPolicy::Reject);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
data_path = "/tmp/mnist.csv"
w1_path = "/tmp/w1.weights"
w2_path = "/tmp/w2.weights"
num_samples = 25
num_threads = 2
zero_pad_short_weights = true
"#;
        let c = RuntimeConfig::from_toml(toml).unwrap();
        assert_eq!(c.data_path, PathBuf::from("/tmp/mnist.csv"));
        assert_eq!(c.num_samples, 25);
        assert_eq!(c.max_rows, 60_000);
        assert_eq!(c.num_threads, Some(2));
        assert_eq!(c.truncation_policy(), TruncationPolicy::ZeroPad);
    }

    #[test]
    fn test_from_toml_missing_paths() {
        assert!(RuntimeConfig::from_toml("num_samples = 3").is_err());
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = RuntimeConfig {
            num_threads: Some(3),
            ..Default::default()
        };
        let toml = c.to_toml().unwrap();
        let back = RuntimeConfig::from_toml(&toml).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let c = RuntimeConfig {
            num_samples: 0,
            ..Default::default()
        };
        assert!(c.validate().is_err());

        let c = RuntimeConfig {
            max_rows: 0,
            ..Default::default()
        };
        assert!(c.validate().is_err());

        let c = RuntimeConfig {
            num_threads: Some(0),
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_resolve_threads() {
        let c = RuntimeConfig {
            num_threads: Some(8),
            ..Default::default()
        };
        assert_eq!(c.resolve_threads(), 8);

        let c2 = RuntimeConfig::default();
        assert!(c2.resolve_threads() >= 1);
    }

    #[test]
    fn test_from_file_missing() {
        let path = std::env::temp_dir().join("digit_rt_no_such_config.toml");
        assert!(matches!(
            RuntimeConfig::from_file(&path),
            Err(crate::RuntimeError::ConfigError(_))
        ));
    }
}
