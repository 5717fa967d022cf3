// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `digit-rt inspect` command: check weight files against the layer shapes.

use runtime::{ModelWeights, RuntimeConfig, WeightLoader};
use std::path::Path;
use tensor_core::Shape;

pub async fn execute(config: RuntimeConfig) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║             digit-rt · Weight Inspector             ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    println!(
        "  {:<4} {:<32} {:<11} {:>12} {:>10} {:>10}  {}",
        "Name", "Path", "Shape", "Bytes", "Values", "Expected", "Status",
    );
    println!("  {}", "-".repeat(94));

    let w1_ok = report_file("w1", &config.w1_path, &ModelWeights::w1_shape()?)?;
    let w2_ok = report_file("w2", &config.w2_path, &ModelWeights::w2_shape()?)?;
    println!();

    if w1_ok && w2_ok {
        println!("  Both weight files match the 784 → 128 → 10 network.");
    } else {
        println!("  Weight files do not match; `run` will refuse to load them.");
    }
    println!();

    Ok(())
}

/// Prints one table row; returns whether the file is complete.
fn report_file(name: &str, path: &Path, shape: &Shape) -> anyhow::Result<bool> {
    let info = WeightLoader::inspect(path, shape)?;
    let status = if info.is_complete() {
        "ok"
    } else if info.actual_bytes < info.expected_bytes {
        "SHORT"
    } else {
        "TOO LONG"
    };
    println!(
        "  {:<4} {:<32} {:<11} {:>12} {:>10} {:>10}  {}",
        name,
        truncate(&path.display().to_string(), 32),
        shape.to_string(),
        info.actual_bytes,
        info.actual_elements(),
        info.expected_elements(),
        status,
    );
    Ok(info.is_complete())
}

/// Truncates a string with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}
