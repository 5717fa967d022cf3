// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `digit-rt init-weights` command: write constant weight files.
//!
//! The files have the exact sizes `run` expects, which makes them useful for
//! smoke-testing the pipeline without trained weights.

use runtime::{ModelWeights, WeightLoader};
use std::path::{Path, PathBuf};
use tensor_core::{Shape, Tensor};

pub async fn execute(out_dir: PathBuf, value: f32) -> anyhow::Result<()> {
    std::fs::create_dir_all(&out_dir)?;

    for (file, shape) in [
        ("w1.weights", ModelWeights::w1_shape()?),
        ("w2.weights", ModelWeights::w2_shape()?),
    ] {
        let path = out_dir.join(file);
        write_constant(&path, shape, value)?;
    }

    println!(
        "  Wrote w1.weights and w2.weights (all {value}) to {}",
        out_dir.display()
    );
    Ok(())
}

fn write_constant(path: &Path, shape: Shape, value: f32) -> anyhow::Result<()> {
    let mut tensor = Tensor::zeros(shape);
    tensor.fill(value);
    WeightLoader::save(path, &tensor)?;
    tracing::info!("wrote {} ({})", path.display(), tensor.shape());
    tensor.release();
    Ok(())
}
