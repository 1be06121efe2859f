use ark_harness::execution::{line_diff, normalize_newlines};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_compare(c: &mut Criterion) {
    let expected: String = (0..500).map(|i| format!("line {i}\r\n")).collect();
    let mut actual = normalize_newlines(&expected);
    actual.push_str("Error: unexpected tail\n");

    c.bench_function("normalize_newlines", |b| {
        b.iter(|| normalize_newlines(black_box(&expected)))
    });

    c.bench_function("line_diff", |b| {
        b.iter(|| line_diff(black_box(&expected), black_box(&actual)))
    });
}

criterion_group!(benches, bench_compare);
criterion_main!(benches);
