//! Benchmarks for document rendering.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mdpage::formatter::TermFormatter;
use mdpage::render::island::Extraction;
use mdpage::render::{RenderOptions, render_document};
use mdpage::style::default_style_sheet;

fn bench_render_sample(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/sample.md");
    let styles = default_style_sheet();
    let formatter = TermFormatter::new(styles.clone()).unwrap();
    let options = RenderOptions::default();

    c.bench_function("render_sample", |b| {
        b.iter(|| render_document(&formatter, &styles, &options, black_box(md)).unwrap())
    });
}

fn bench_extract_only(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/sample.md");
    c.bench_function("extract_islands", |b| {
        b.iter(|| {
            Extraction::new(black_box(md))
                .code_blocks("go", |fence| fence.source.to_string())
                .tables(|rows| rows.join("\n"))
                .links(|label, _| label.to_string())
        })
    });
}

criterion_group!(benches, bench_render_sample, bench_extract_only);
criterion_main!(benches);
