//! Benchmarks for the scan pipeline.
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use prism_buffer::TextBuffer;
use prism_syntax::{CommentMap, HighlightMode, scan};

/// Generates a component-like document with `blocks` repeated sections.
fn generate_document(blocks: usize) -> String {
    (0..blocks)
        .map(|i| {
            format!(
                "// block {i}\n\
                 <div class=\"flex items-center md:hover:!bg-[#0af] p-{}\">\n\
                 \x20 <span className={{cn(\"text-sm\", active && 'font-bold', `grid-cols-[1fr_2fr] ${{extra}}`)}}>x</span>\n\
                 \x20 /* <p class=\"hidden\"> */\n\
                 </div>\n",
                i % 8
            )
        })
        .collect()
}

fn bench_comment_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("comment_map");

    for size in [10, 100, 1000] {
        let text = generate_document(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| CommentMap::build(black_box(text)))
        });
    }

    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");

    for size in [10, 100, 1000] {
        let text = generate_document(size);
        let middle = text.len() / 2;

        group.bench_with_input(BenchmarkId::new("full", size), &text, |b, text| {
            b.iter(|| scan(black_box(text), None, HighlightMode::Full))
        });
        group.bench_with_input(BenchmarkId::new("cursor", size), &text, |b, text| {
            b.iter(|| scan(black_box(text), Some(middle), HighlightMode::Cursor))
        });
    }

    group.finish();
}

/// A keystroke: edit the rope, then rescan the whole text.
fn bench_edit_and_rescan(c: &mut Criterion) {
    let text = generate_document(200);

    c.bench_function("edit_and_rescan", |b| {
        b.iter_with_setup(
            || TextBuffer::from(text.as_str()),
            |mut buffer| {
                let _ = buffer.insert(30, "x");
                black_box(scan(&buffer.text(), None, HighlightMode::Full))
            },
        )
    });
}

criterion_group!(benches, bench_comment_map, bench_scan, bench_edit_and_rescan);
criterion_main!(benches);
