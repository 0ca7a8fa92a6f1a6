//! Benchmarks for JSON extraction and tag normalization.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use publishflow::extract::extract_json;
use publishflow::text::normalize_tags;

const WHOLE: &str = r#"{"thought":"t","message":"m","data":{"tags":["a","b","c"]}}"#;
const FENCED: &str = "Here you go:\n```json\n{\"thought\":\"t\",\"message\":\"m\",\"data\":{}}\n```\nThanks";
const BRACES: &str = "Answer: {\"thought\":\"t\",\"message\":\"m\",\"data\":{}} -- end";

fn extract_benchmark(c: &mut Criterion) {
    c.bench_function("extract_whole", |b| b.iter(|| extract_json(black_box(WHOLE))));
    c.bench_function("extract_fenced", |b| b.iter(|| extract_json(black_box(FENCED))));
    c.bench_function("extract_outer_braces", |b| {
        b.iter(|| extract_json(black_box(BRACES)))
    });
    c.bench_function("extract_garbage", |b| {
        b.iter(|| extract_json(black_box("no json here at all")))
    });
}

fn tags_benchmark(c: &mut Criterion) {
    let raw = ["LLMs", "LLMs", "data science", " Deep Learning ", "ML Ops"];
    c.bench_function("normalize_tags", |b| b.iter(|| normalize_tags(black_box(&raw))));
}

criterion_group!(benches, extract_benchmark, tags_benchmark);
criterion_main!(benches);
