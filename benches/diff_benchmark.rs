//! Benchmarks for parsing and diffing specifications.
//!
//! Run with: cargo bench --bench diff_benchmark

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use oas_compare::diff::DiffEngine;
use oas_compare::parsers::parse_spec_str;
use oas_compare::{compare, SpecFile};
use serde_json::{json, Map, Value};
use std::hint::black_box;

/// Generate a synthetic OpenAPI document with `size` paths and `size / 2` models.
///
/// `revision` changes a slice of parameters, removes a few paths and adds a
/// few models, so two revisions of the same size diff realistically.
fn generate_spec(size: usize, revision: usize) -> String {
    let mut paths = Map::new();
    for i in 0..size {
        if revision > 0 && i % 20 == 0 {
            continue;
        }
        let limit_max = if revision > 0 && i % 10 == 1 { 500 } else { 100 };
        let item = json!({
            "get": {
                "operationId": format!("list{i}"),
                "parameters": [
                    {"name": "limit", "in": "query", "schema": {"type": "integer", "maximum": limit_max}},
                    {"name": "offset", "in": "query", "schema": {"type": "integer"}}
                ],
                "responses": {"200": {"description": "ok"}, "404": {"description": "missing"}}
            },
            "post": {
                "operationId": format!("create{i}"),
                "requestBody": {"content": {"application/json": {"schema": {"$ref": format!("#/components/schemas/Model{}", i / 2)}}}},
                "responses": {"201": {"description": "created"}}
            }
        });
        paths.insert(format!("/resources{i}"), item);
    }

    let mut schemas = Map::new();
    for i in 0..(size / 2 + revision * 5) {
        let mut required = vec!["id"];
        if revision > 0 && i % 7 == 0 {
            required.push("name");
        }
        schemas.insert(
            format!("Model{i}"),
            json!({
                "type": "object",
                "required": required,
                "properties": {"id": {"type": "string"}, "name": {"type": "string"}}
            }),
        );
    }

    let doc: Value = json!({
        "openapi": "3.0.1",
        "info": {"title": "Bench", "version": format!("{revision}")},
        "paths": paths,
        "components": {"schemas": schemas}
    });
    doc.to_string()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for size in [50, 500] {
        let text = generate_spec(size, 0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse_spec_str(black_box(text)));
        });
    }
    group.finish();
}

fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");
    for size in [50, 500] {
        let base = parse_spec_str(&generate_spec(size, 0)).expect("generated spec parses");
        let target = parse_spec_str(&generate_spec(size, 1)).expect("generated spec parses");
        let engine = DiffEngine::new();
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(base, target),
            |b, (base, target)| {
                b.iter(|| engine.diff(black_box(base), black_box(target)));
            },
        );
    }
    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let base = SpecFile::new("v1.json", generate_spec(200, 0));
    let target = SpecFile::new("v2.json", generate_spec(200, 1));
    c.bench_function("compare_200_paths", |b| {
        b.iter(|| compare(black_box(&base), black_box(&target)));
    });
}

criterion_group!(benches, bench_parse, bench_diff, bench_compare);
criterion_main!(benches);
