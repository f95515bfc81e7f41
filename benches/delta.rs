//! Benchmarks for delta slicing and markdown rendering.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use quillkit::delta::{Attributes, Delta, DeltaOp};
use quillkit::markdown;

fn sample_document() -> Delta {
    let header = Attributes {
        header: Some(3),
        ..Attributes::default()
    };
    let bold = Attributes {
        bold: Some(true),
        ..Attributes::default()
    };
    let mut delta = Delta::new();
    for section in 0..50 {
        delta.push(DeltaOp::text(format!("Section {section}")));
        delta.push(DeltaOp::text_with("\n", header.clone()));
        delta.push(DeltaOp::text("Some plain prose followed by "));
        delta.push(DeltaOp::text_with("emphasis", bold.clone()));
        delta.push(DeltaOp::text(" and a trailing sentence.\n"));
    }
    delta
}

fn bench_slice(c: &mut Criterion) {
    let delta = sample_document();
    let mid = delta.len() / 2;
    c.bench_function("slice_half", |b| {
        b.iter(|| delta.slice(black_box(mid), black_box(mid + 200)))
    });
}

fn bench_render_markdown(c: &mut Criterion) {
    let delta = sample_document();
    c.bench_function("render_markdown", |b| {
        b.iter(|| markdown::render(black_box(&delta)))
    });
}

criterion_group!(benches, bench_slice, bench_render_markdown);
criterion_main!(benches);
