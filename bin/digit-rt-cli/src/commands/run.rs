// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `digit-rt run` command: classify test digits and report accuracy.
//!
//! Drives the type-state pipeline:
//! ```text
//! InferenceEngine<Idle> → load_weights → <Ready> → evaluate
//! ```

use runtime::{EvaluationReport, InferenceEngine, MnistDataset, RuntimeConfig, IMAGE_SIDE};
use std::sync::Arc;

pub async fn execute(config: RuntimeConfig, show_digits: bool, json: bool) -> anyhow::Result<()> {
    config.validate()?;

    if !json {
        println!("╔══════════════════════════════════════════════════════╗");
        println!("║             digit-rt · MNIST Classifier             ║");
        println!("╚══════════════════════════════════════════════════════╝");
        println!();
        println!("  Config:");
        println!("   Data:     {}", config.data_path.display());
        println!("   W1:       {}", config.w1_path.display());
        println!("   W2:       {}", config.w2_path.display());
        println!("   Samples:  {}", config.num_samples);
        println!("   Workers:  {}", config.resolve_threads());
        println!();
    }

    // ── Load ───────────────────────────────────────────────────
    let dataset = Arc::new(MnistDataset::load_csv(&config.data_path, config.max_rows)?);
    let limit = config.num_samples;
    let engine = InferenceEngine::new(config).load_weights()?;

    // ── Evaluate ───────────────────────────────────────────────
    let report = engine.evaluate(&dataset, limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &dataset, show_digits)?;
    }

    Ok(())
}

fn print_report(
    report: &EvaluationReport,
    dataset: &MnistDataset,
    show_digits: bool,
) -> anyhow::Result<()> {
    for result in &report.results {
        println!();
        println!("===== Sample {} =====", result.index + 1);
        if show_digits {
            println!("Digit Image:");
            print!("{}", render_digit(dataset.image(result.index)?));
        }
        println!("Predicted: {}", result.predicted);
        println!("Actual: {}", result.actual);
        if result.correct {
            println!("Correct! [OK]");
        } else {
            println!("Wrong! [X]");
        }
    }

    println!();
    println!("Summary: {}", report.metrics.summary());
    Ok(())
}

/// Renders a 28×28 image as text, two characters per pixel.
///
/// `> 0.5` → `##`, `> 0.2` → `++`, `> 0.0` → `..`, anything else blank.
pub fn render_digit(pixels: &[f32]) -> String {
    let mut out = String::with_capacity(pixels.len() * 2 + IMAGE_SIDE);
    for row in pixels.chunks(IMAGE_SIDE) {
        for &p in row {
            out.push_str(if p > 0.5 {
                "##"
            } else if p > 0.2 {
                "++"
            } else if p > 0.0 {
                ".."
            } else {
                "  "
            });
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use runtime::INPUT_DIM;

    #[test]
    fn test_render_thresholds() {
        let mut pixels = vec![0.0f32; INPUT_DIM];
        pixels[..5].copy_from_slice(&[0.9, 0.5, 0.3, 0.2, 0.01]);
        pixels[IMAGE_SIDE] = -1.0;

        let art = render_digit(&pixels);
        let lines: Vec<&str> = art.lines().collect();

        assert_eq!(lines.len(), IMAGE_SIDE);
        assert!(lines.iter().all(|l| l.len() == IMAGE_SIDE * 2));
        assert!(lines[0].starts_with("##++++....  "));
        assert_eq!(lines[1], " ".repeat(IMAGE_SIDE * 2));
    }

    #[test]
    fn test_render_blank_image() {
        let art = render_digit(&[0.0; INPUT_DIM]);
        assert!(art.chars().all(|c| c == ' ' || c == '\n'));
        assert_eq!(art.matches('\n').count(), IMAGE_SIDE);
    }
}
