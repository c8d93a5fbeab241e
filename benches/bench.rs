//! Criterion benchmarks for analyze request assembly.
//!
//! - Query parameter binding
//! - Structured body parsing (JSON and YAML)
//! - Raw-text fallback for large plain bodies

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use sarissa_analyze::config::AnalyzeConfig;
use sarissa_analyze::rest::{RequestParams, RestAnalyzeAction, RestRequest, request_from_params};
use std::hint::black_box;

/// Generate a JSON body with `filters` token filters, every other one inline.
fn generate_json_body(texts: usize, filters: usize) -> String {
    let texts: Vec<String> = (0..texts)
        .map(|i| format!("\"document {i} about search engines\""))
        .collect();
    let filters: Vec<String> = (0..filters)
        .map(|i| {
            if i % 2 == 0 {
                format!("\"filter_{i}\"")
            } else {
                format!("{{\"type\": \"stop\", \"stopwords\": [\"a\", \"the\", \"w{i}\"]}}")
            }
        })
        .collect();

    format!(
        "{{\"text\": [{}], \"tokenizer\": {{\"type\": \"ngram\", \"min_gram\": 2}}, \"filter\": [{}], \"explain\": true}}",
        texts.join(", "),
        filters.join(", ")
    )
}

fn bench_param_binding(c: &mut Criterion) {
    let query = "index=books&text=a,b,c&analyzer=standard&filter=lowercase,stop,snowball&char_filter=html_strip&explain=true";
    let config = AnalyzeConfig::default();

    c.bench_function("param_binding", |b| {
        b.iter(|| {
            let params = RequestParams::from_query_string(black_box(query));
            black_box(request_from_params(&params, &config))
        })
    });
}

fn bench_body_parsing(c: &mut Criterion) {
    let action = RestAnalyzeAction::new(AnalyzeConfig::default());
    let mut group = c.benchmark_group("body_parsing");

    for (texts, filters) in [(1, 2), (100, 10), (1000, 50)] {
        let body = generate_json_body(texts, filters);
        group.throughput(Throughput::Bytes(body.len() as u64));
        let request = RestRequest::new(RequestParams::new()).with_body(body);

        group.bench_function(format!("json_{texts}x{filters}"), |b| {
            b.iter(|| black_box(action.prepare_request(black_box(&request)).unwrap()))
        });
    }

    let yaml = "---\ntext:\n  - quick brown fox\n  - lazy dog\ntokenizer: whitespace\nfilter:\n  - lowercase\n  - type: stop\n    stopwords: [a, the]\n";
    let request = RestRequest::new(RequestParams::new()).with_body(yaml);
    group.bench_function("yaml_small", |b| {
        b.iter(|| black_box(action.prepare_request(black_box(&request)).unwrap()))
    });

    group.finish();
}

fn bench_raw_text_fallback(c: &mut Criterion) {
    let action = RestAnalyzeAction::new(AnalyzeConfig::default());
    let body = "plain words without structure ".repeat(10_000);
    let request = RestRequest::new(RequestParams::new()).with_body(body.as_str());

    let mut group = c.benchmark_group("raw_text");
    group.throughput(Throughput::Bytes(body.len() as u64));
    group.bench_function("fallback_300k", |b| {
        b.iter(|| black_box(action.prepare_request(black_box(&request)).unwrap()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_param_binding,
    bench_body_parsing,
    bench_raw_text_fallback
);
criterion_main!(benches);
