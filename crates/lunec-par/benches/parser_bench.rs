//! Parser benchmarks.
//!
//! Run with: `cargo bench --package lunec-par`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use lunec_lex::{Lexer, Token};
use lunec_par::Parser;
use lunec_util::SourceFile;

fn prepare(text: String) -> (SourceFile, Vec<Token>) {
    let source = SourceFile::from_str("bench.ln", text);
    let tokens = Lexer::new(&source).tokenize().expect("benchmark input lexes");
    (source, tokens)
}

fn bench_expression_rerooting(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    // A long alternating chain exercises the climb/splice loop.
    let mut text = String::from("def x = 1");
    for i in 0..200 {
        let op = ["+", "*", "-", "/", "^"][i % 5];
        text.push_str(&format!(" {op} {i}"));
    }
    text.push(';');
    let (source, tokens) = prepare(text);

    group.throughput(Throughput::Elements(tokens.len() as u64));
    group.bench_function("operator_chain", |b| {
        b.iter(|| Parser::parse(black_box(&source), black_box(&tokens)).unwrap())
    });

    group.finish();
}

fn bench_module(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_module");

    let mut text = String::from("module bench;\n");
    for i in 0..100 {
        text.push_str(&format!(
            "def value_{i} : fn(a = int, b = int) => {{ def t = a * {i}; t + b; }};\n"
        ));
    }
    let (source, tokens) = prepare(text);

    group.throughput(Throughput::Elements(tokens.len() as u64));
    group.bench_function("module_with_functions", |b| {
        b.iter(|| Parser::parse(black_box(&source), black_box(&tokens)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_expression_rerooting, bench_module);
criterion_main!(benches);
