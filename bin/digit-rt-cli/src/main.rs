// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # digit-rt
//!
//! Command-line interface for the digit-rt MNIST classifier.
//!
//! ## Usage
//! ```bash
//! # Classify the first 10 test digits
//! digit-rt run --data mnist_test.csv --w1 w1.weights --w2 w2.weights
//!
//! # Check weight files against the expected layer shapes
//! digit-rt inspect --w1 w1.weights --w2 w2.weights
//!
//! # Write zero-filled weight files for a smoke test
//! digit-rt init-weights --out-dir ./weights
//! ```

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "digit-rt",
    about = "Two-layer MLP inference for MNIST handwritten digits",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (CLI arguments override its values).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the leading samples of a CSV dataset and report accuracy.
    Run {
        /// CSV file with 784 pixels and 10 label fields per line.
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// First layer weight file, [784, 128].
        #[arg(long)]
        w1: Option<PathBuf>,

        /// Second layer weight file, [128, 10].
        #[arg(long)]
        w2: Option<PathBuf>,

        /// Number of samples to classify.
        #[arg(short = 'n', long)]
        num_samples: Option<usize>,

        /// Number of evaluation workers.
        #[arg(short, long)]
        threads: Option<usize>,

        /// Skip the ASCII rendering of each digit.
        #[arg(long)]
        no_digits: bool,

        /// Print the full report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Compare weight file sizes with the expected layer shapes.
    Inspect {
        /// First layer weight file, [784, 128].
        #[arg(long)]
        w1: Option<PathBuf>,

        /// Second layer weight file, [128, 10].
        #[arg(long)]
        w2: Option<PathBuf>,
    },

    /// Write constant-filled weight files of the expected sizes.
    InitWeights {
        /// Directory to write w1.weights and w2.weights into.
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Value every weight is set to.
        #[arg(long, default_value_t = 0.0)]
        value: f32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    let mut config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            data,
            w1,
            w2,
            num_samples,
            threads,
            no_digits,
            json,
        } => {
            if let Some(data) = data {
                config.data_path = data;
            }
            commands::override_weights(&mut config, w1, w2);
            if let Some(n) = num_samples {
                config.num_samples = n;
            }
            if threads.is_some() {
                config.num_threads = threads;
            }
            commands::run::execute(config, !no_digits, json).await
        }
        Commands::Inspect { w1, w2 } => {
            commands::override_weights(&mut config, w1, w2);
            commands::inspect::execute(config).await
        }
        Commands::InitWeights { out_dir, value } => {
            commands::init_weights::execute(out_dir, value).await
        }
    }
}
