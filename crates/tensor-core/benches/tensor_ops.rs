// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for tensor kernels at the classifier's layer sizes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tensor_core::{log_softmax, matmul, relu, Shape, Tensor};

fn ramp(rows: usize, cols: usize) -> Tensor {
    let values = (0..rows * cols)
        .map(|i| ((i % 97) as f32 - 48.0) / 48.0)
        .collect();
    Tensor::from_vec(Shape::matrix(rows, cols).unwrap(), values).unwrap()
}

fn bench_matmul(c: &mut Criterion) {
    let sample = ramp(1, 784);
    let w1 = ramp(784, 128);
    let batch = ramp(64, 784);

    c.bench_function("matmul 1x784 @ 784x128", |b| {
        b.iter(|| matmul(black_box(&sample), black_box(&w1)).unwrap())
    });
    c.bench_function("matmul 64x784 @ 784x128", |b| {
        b.iter(|| matmul(black_box(&batch), black_box(&w1)).unwrap())
    });
}

fn bench_relu(c: &mut Criterion) {
    let hidden = ramp(64, 128);
    c.bench_function("relu 64x128", |b| b.iter(|| relu(black_box(&hidden))));
}

fn bench_log_softmax(c: &mut Criterion) {
    let logits = ramp(64, 10);
    c.bench_function("log_softmax 64x10", |b| {
        b.iter(|| log_softmax(black_box(&logits)).unwrap())
    });
}

criterion_group!(benches, bench_matmul, bench_relu, bench_log_softmax);
criterion_main!(benches);
