//! Decomposition and matrix-building cost of the templates
//!
//! - Multiplier decomposition scaling with register width
//! - Dense matrix of a small multiplier
//! - PrepSelPrep construction scaling with term count

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qop_core::{IntoOp, Op, Operator, Wires};
use qop_gates::{LinearCombination, PauliX, PauliZ};
use qop_templates::{Multiplier, PrepSelPrep};

fn registers(width: usize) -> (Wires, Wires) {
    let x = Wires::indices(0..width).unwrap();
    let work = Wires::indices(width..2 * width + 2).unwrap();
    (x, work)
}

fn bench_multiplier_decomposition(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiplier_decomposition");

    for width in [2usize, 4, 8, 16] {
        let (x, work) = registers(width);
        let modulus = (1u64 << width) - 1;
        let op = Multiplier::new(2, x, Some(modulus), work).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(width), &op, |b, op| {
            b.iter(|| black_box(op.decomposition().unwrap()));
        });
    }

    group.finish();
}

fn bench_multiplier_matrix(c: &mut Criterion) {
    let (x, work) = registers(2);
    let op = Multiplier::new(2, x, Some(3), work).unwrap();
    c.bench_function("multiplier_matrix_6_wires", |b| {
        b.iter(|| black_box(op.matrix().unwrap()));
    });
}

fn lcu(terms: usize) -> LinearCombination {
    let ops: Vec<Op> = (0..terms)
        .map(|i| {
            let wire = Wires::indices([8 + i % 3]).unwrap();
            if i % 2 == 0 {
                PauliZ::new(wire).unwrap().into_op()
            } else {
                PauliX::new(wire).unwrap().into_op()
            }
        })
        .collect();
    let coeffs: Vec<f64> = (0..terms).map(|i| 1.0 / (i + 1) as f64).collect();
    LinearCombination::from_real(&coeffs, ops).unwrap()
}

fn bench_prepselprep_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepselprep_construction");

    for terms in [2usize, 8, 32, 128] {
        let sum = lcu(terms);
        let control = Wires::indices(0..7).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(terms), &sum, |b, sum| {
            b.iter(|| black_box(PrepSelPrep::new(sum.clone(), control.clone()).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_multiplier_decomposition,
    bench_multiplier_matrix,
    bench_prepselprep_construction
);
criterion_main!(benches);
