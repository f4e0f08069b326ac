//! Lexer benchmarks.
//!
//! Run with: `cargo bench --package jotc-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use jotc_lex::Lexer;
use jotc_util::Handler;

fn lexer_token_count(source: &str) -> usize {
    let mut handler = Handler::new();
    let lexer = Lexer::new(source, &mut handler);
    lexer.count()
}

fn bench_lexer_keywords(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    let source = "var x = 42; fun main() { var y = x + 1; return y; }";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("simple_var", |b| b.iter(|| lexer_token_count(black_box("var x = 42;"))));

    group.bench_function("function_with_body", |b| b.iter(|| lexer_token_count(black_box(source))));

    group.finish();
}

fn bench_lexer_complex(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_complex");

    let source = r#"
        fun fibonacci(n: int32) int32 {
            if n <= 1 {
                return n;
            }
            return fibonacci(n - 1) + fibonacci(n - 2);
        }

        struct Point {
            x: int32;
            y: int32;
        }

        enum Color {
            Red;
            Green;
            Blue;
        }

        fun draw(point: Point*) void {
            var area = point.x * point.y;
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("complex_source", |b| b.iter(|| lexer_token_count(black_box(source))));

    group.finish();
}

fn bench_lexer_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_strings");

    group.bench_function("short_string", |b| {
        b.iter(|| lexer_token_count(black_box("var s = \"hello\";")))
    });

    group.bench_function("long_string", |b| {
        let source =
            "var s = \"This is a longer string that contains some text for benchmarking purposes.\";";
        b.iter(|| lexer_token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_numbers");

    group.bench_function("integer", |b| b.iter(|| lexer_token_count(black_box("var x = 123456;"))));

    group.bench_function("float", |b| b.iter(|| lexer_token_count(black_box("var x = 3.14159;"))));

    group.bench_function("long_digit_run", |b| {
        b.iter(|| lexer_token_count(black_box("var x = 12345678901234567890;")))
    });

    group.finish();
}

fn bench_lexer_identifiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_identifiers");

    group.bench_function("short_ident", |b| b.iter(|| lexer_token_count(black_box("var x = 42;"))));

    group.bench_function("long_ident", |b| {
        b.iter(|| lexer_token_count(black_box("var very_long_variable_name = 42;")))
    });

    group.bench_function("many_ident", |b| {
        b.iter(|| {
            lexer_token_count(black_box(
                "var a = 1; var b = 2; var c = 3; var d = 4; var e = 5;",
            ))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_lexer_keywords,
    bench_lexer_complex,
    bench_lexer_strings,
    bench_lexer_numbers,
    bench_lexer_identifiers
);
criterion_main!(benches);
