//! Benchmark suite for completion resolution
//!
//! This benchmark measures:
//! - Enclosing-block detection at increasing nesting depth
//! - Resolution cost as the number of closed blocks before the cursor grows
//! - Protocol item conversion for the component catalog

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use alloy_language_server::completion::{enclosing_chain, innermost_block, resolve_completions};
use alloy_language_server::lsp::convert::{InsertMode, to_lsp_completion_items};
use alloy_language_server::schema::SchemaRegistry;

/// Generate a document of `components` closed scrape components
fn generate_flat_config(components: usize) -> String {
    let mut code = String::new();

    for i in 0..components {
        code.push_str(&format!("prometheus.scrape \"scraper_{}\" {{\n", i));
        code.push_str("  targets = [\n");
        code.push_str(&format!("    {{ __address__ = \"host-{}:9090\" }},\n", i));
        code.push_str("  ]\n");
        code.push_str("  forward_to = [prometheus.remote_write.default.receiver] // {\n");
        code.push_str("}\n\n");
    }

    code
}

/// Generate `depth` nested blocks left open at the cursor
fn generate_nested_config(depth: usize) -> String {
    let mut code = String::new();

    for level in 0..depth {
        code.push_str(&"  ".repeat(level));
        code.push_str(&format!("block_{} \"label\" {{\n", level));
        code.push_str(&"  ".repeat(level + 1));
        code.push_str(&format!("attribute_{} = \"value {{}}\"\n", level));
    }
    code.push_str(&"  ".repeat(depth));

    code
}

/// Benchmark innermost-block detection with the cursor at the deepest level
fn bench_nesting_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("nesting_depth");

    for depth in &[1, 5, 20, 100] {
        let code = generate_nested_config(*depth);

        group.throughput(Throughput::Elements(*depth as u64));
        group.bench_with_input(BenchmarkId::new("innermost_block", depth), &code, |b, code| {
            b.iter(|| innermost_block(black_box(code)));
        });
        group.bench_with_input(BenchmarkId::new("enclosing_chain", depth), &code, |b, code| {
            b.iter(|| enclosing_chain(black_box(code)));
        });
    }

    group.finish();
}

/// Benchmark resolution at the end of documents with many closed components
fn bench_document_size(c: &mut Criterion) {
    let registry = SchemaRegistry::builtin().unwrap();
    let mut group = c.benchmark_group("document_size");

    for components in &[10, 100, 1000] {
        let top_level = generate_flat_config(*components);
        let mut inside = top_level.clone();
        inside.push_str("loki.write \"local\" {\n  endpoint {\n    ");

        group.throughput(Throughput::Bytes(top_level.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("top_level", components),
            &top_level,
            |b, code| {
                b.iter(|| resolve_completions(&registry, black_box(code), code.len()));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("inside_block", components),
            &inside,
            |b, code| {
                b.iter(|| resolve_completions(&registry, black_box(code), code.len()));
            },
        );
    }

    group.finish();
}

/// Benchmark conversion of the full component catalog into protocol items
fn bench_conversion(c: &mut Criterion) {
    let registry = SchemaRegistry::builtin().unwrap();
    let items = registry.top_level_items();
    let mut group = c.benchmark_group("conversion");

    group.throughput(Throughput::Elements(items.len() as u64));
    for mode in [InsertMode::Snippet, InsertMode::PlainText] {
        group.bench_function(format!("{:?}", mode), |b| {
            b.iter(|| to_lsp_completion_items(black_box(items), mode));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_nesting_depth, bench_document_size, bench_conversion);
criterion_main!(benches);
