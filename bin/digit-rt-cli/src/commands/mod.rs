// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared CLI plumbing.

pub mod init_weights;
pub mod inspect;
pub mod run;

use runtime::RuntimeConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `-v` count picks the default level (`warn`, `info`, `debug`, `trace`);
/// `RUST_LOG` takes precedence when set. Logs go to stderr so `--json`
/// output on stdout stays parseable.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();
}

/// Reads the `--config` file if one was given, otherwise the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<RuntimeConfig> {
    match path {
        Some(path) => {
            let config = RuntimeConfig::from_file(path)?;
            tracing::info!("configuration loaded from {}", path.display());
            Ok(config)
        }
        None => Ok(RuntimeConfig::default()),
    }
}

/// Applies `--w1` / `--w2` on top of the configuration.
pub fn override_weights(config: &mut RuntimeConfig, w1: Option<PathBuf>, w2: Option<PathBuf>) {
    if let Some(w1) = w1 {
        config.w1_path = w1;
    }
    if let Some(w2) = w2 {
        config.w2_path = w2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn test_override_weights() {
        let mut config = RuntimeConfig::default();
        override_weights(&mut config, Some("a.weights".into()), None);
        assert_eq!(config.w1_path, PathBuf::from("a.weights"));
        assert_eq!(config.w2_path, PathBuf::from("w2.weights"));
    }
}
