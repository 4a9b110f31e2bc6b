//! Benchmarks for the typographer and Markdown rendering.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use runbook::markdown::Markdown;
use runbook::typography;
use runbook::{RenderConfig, Traversal};

const PARAGRAPH: &str = "Acme(tm) has run this service since 2009... Really?... \
    Page the on-call -- then the backup --- and wait!!!!! Values are 5 +- 1,, \
    (c) Acme, (r) Acme, (p) 3. Long rule: ----------. ";

fn sample_markdown() -> String {
    let mut source = String::new();
    for i in 0..200 {
        source.push_str(&format!("## Step {i} -- check the logs...\n\n"));
        source.push_str(PARAGRAPH);
        source.push_str("\n\n```\nkubectl get pods -- -o wide\n```\n\n");
        source.push_str("- first (c) item\n- second ![alt -- text](x.png) item\n\n");
    }
    source
}

// ============================================================================
// Scanner Benchmarks
// ============================================================================

fn bench_replace_dense(c: &mut Criterion) {
    let text = PARAGRAPH.repeat(100);
    c.bench_function("replace_dense", |b| {
        b.iter(|| typography::replace(black_box(&text)));
    });
}

fn bench_replace_clean(c: &mut Criterion) {
    let text = "No punctuation to rewrite here at all and nothing to match ".repeat(200);
    c.bench_function("replace_clean", |b| {
        b.iter(|| typography::replace(black_box(&text)));
    });
}

// ============================================================================
// Rendering Benchmarks
// ============================================================================

fn bench_render(c: &mut Criterion) {
    let source = sample_markdown();
    let mut group = c.benchmark_group("render");

    let plain = Markdown::with_config(RenderConfig::new().with_typographer(false));
    group.bench_function("plain", |b| b.iter(|| plain.render(black_box(&source))));

    let shallow = Markdown::new();
    group.bench_function("typographer", |b| {
        b.iter(|| shallow.render(black_box(&source)))
    });

    let deep = Markdown::with_config(RenderConfig::new().with_traversal(Traversal::Deep));
    group.bench_function("typographer_deep", |b| {
        b.iter(|| deep.render(black_box(&source)))
    });

    group.finish();
}

criterion_group!(scanner, bench_replace_dense, bench_replace_clean);
criterion_group!(rendering, bench_render);
criterion_main!(scanner, rendering);
