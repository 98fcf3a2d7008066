use cflat::lexer;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

static SNIPPET: &str = include_str!("big.cb");

fn criterion_benchmark(c: &mut Criterion) {
    let input = SNIPPET.repeat(512);
    c.bench_function("lexer", |b| {
        b.iter(|| {
            let tokens = lexer::lex(black_box(&input));
            black_box(tokens.len());
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
