//! Criterion micro-benchmarks for elementwise dispatch and reductions.

use criterion::{criterion_group, criterion_main, Criterion};
use gridfield_bench::{reference_scalar_field, reference_vector_field};
use gridfield_core::AxisArg;
use gridfield_field::{BinaryOp, Kwargs, Method, Operand, UnaryOp};
use gridfield_field::Field;
use std::hint::black_box;

/// Benchmark: Field + Field on the reference grid.
fn bench_add_fields(c: &mut Criterion) {
    let a = reference_vector_field(1);
    let b = reference_vector_field(2);

    c.bench_function("add_vector_fields_131k", |bench| {
        bench.iter(|| black_box((&a + &b).unwrap()));
    });
}

/// Benchmark: scalar field broadcast over a vector field.
fn bench_broadcast_scalar_vector(c: &mut Criterion) {
    let s = reference_scalar_field(3);
    let v = reference_vector_field(4);

    c.bench_function("broadcast_scalar_times_vector", |bench| {
        bench.iter(|| black_box((&s * &v).unwrap()));
    });
}

/// Benchmark: unary ufunc through the dispatch entry point.
fn bench_unary_dispatch(c: &mut Criterion) {
    let s = reference_scalar_field(5);

    c.bench_function("sqrt_dispatch", |bench| {
        bench.iter(|| {
            let out = Field::array_ufunc(
                &UnaryOp::Sqrt,
                Method::Call,
                &[Operand::from(&s)],
                &Kwargs::default(),
            )
            .unwrap();
            black_box(out);
        });
    });
}

/// Benchmark: full and partial sums.
fn bench_reductions(c: &mut Criterion) {
    let v = reference_vector_field(6);

    c.bench_function("sum_all_spatial_axes", |bench| {
        bench.iter(|| black_box(v.sum(Some(AxisArg::All)).unwrap()));
    });
    c.bench_function("max_over_z", |bench| {
        bench.iter(|| black_box(v.reduce(BinaryOp::Maximum, Some(AxisArg::single(0))).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_add_fields,
    bench_broadcast_scalar_vector,
    bench_unary_dispatch,
    bench_reductions
);
criterion_main!(benches);
