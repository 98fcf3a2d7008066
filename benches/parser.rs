use cflat::{lexer, parser};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

static SNIPPET: &str = include_str!("big.cb");

fn criterion_benchmark(c: &mut Criterion) {
    let input = SNIPPET.repeat(512);
    let tokens = lexer::lex(&input);

    c.bench_function("parser", |b| {
        b.iter(|| {
            let program = parser::parse(black_box(&tokens)).expect("bench input must parse");
            black_box(program.functions.len());
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
