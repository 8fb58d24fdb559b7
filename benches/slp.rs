//! Benchmarks for queries and rewrites on deep programs.
//!
//! The programs denote words far too long to expand, so these measure the
//! per-assignment cost of each pass.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use slpcore::{Slp, Terminal};

/// A Fibonacci-style program `f(i) = f(i-1).f(i-2)*` over two letters.
fn fibonacci(depth: usize) -> Slp {
    let mut lines = vec!["a".to_string(), "b".to_string()];
    for i in 2..depth {
        lines.push(format!("#{}.#{}*", i - 1, i - 2));
    }
    Slp::parse(&lines).unwrap()
}

fn bench_length(c: &mut Criterion) {
    let slp = fibonacci(80);
    c.bench_function("length_fibonacci_80", |b| {
        b.iter(|| black_box(&slp).length().unwrap());
    });
}

fn bench_signed_count(c: &mut Criterion) {
    let slp = fibonacci(80);
    let a = Terminal::new("a");
    c.bench_function("signed_count_fibonacci_80", |b| {
        b.iter(|| black_box(&slp).signed_count(black_box(&a)).unwrap());
    });
}

fn bench_substitute(c: &mut Criterion) {
    let slp = fibonacci(10_000);
    let replacement = Slp::parse(&["x.y", "#0.#0*"]).unwrap();
    c.bench_function("substitute_fibonacci_10k", |b| {
        b.iter(|| black_box(&slp).substitute("a", black_box(&replacement)).unwrap());
    });
}

fn bench_power(c: &mut Criterion) {
    let slp = fibonacci(1_000);
    c.bench_function("power_2_pow_40_minus_1", |b| {
        b.iter(|| black_box(&slp).power(black_box((1i64 << 40) - 1)).unwrap());
    });
}

fn bench_binary_form(c: &mut Criterion) {
    let mut lines = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    for i in 3..5_000 {
        lines.push(format!("#{}.a.#{}*.b.#{}", i - 1, i - 2, i - 3));
    }
    let slp = Slp::parse(&lines).unwrap();
    c.bench_function("binary_form_5k_wide", |b| {
        b.iter(|| black_box(&slp).to_binary_form().unwrap());
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_length, bench_signed_count, bench_substitute, bench_power, bench_binary_form
}
criterion_main!(benches);
