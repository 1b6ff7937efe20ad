use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use fold_core::{FoldingEditor, LineNumberMode};

fn large_source(block_count: usize) -> String {
    let mut out = String::with_capacity(block_count * 96);
    for i in 0..block_count {
        out.push_str(&format!(
            "/* block {i} */\nfn item_{i}(x: u32) -> u32 {{\n    let v = [x, x + 1];\n    v[0]\n}}\n"
        ));
    }
    out
}

fn bench_rebuild(c: &mut Criterion) {
    let text = large_source(10_000);
    let mut editor = FoldingEditor::new(&text);
    editor.end_dispatch();

    c.bench_function("rebuild/50k_lines", |b| {
        b.iter(|| {
            black_box(editor.rebuild());
        })
    });
}

fn bench_typing_with_debounce(c: &mut Criterion) {
    let text = large_source(10_000);
    c.bench_function("typing_middle/100_inserts_one_rebuild", |b| {
        b.iter_batched(
            || {
                let mut editor = FoldingEditor::new(&text);
                editor.end_dispatch();
                editor
            },
            |mut editor| {
                let mut offset = editor.document().char_count() / 2;
                for _ in 0..100 {
                    editor.insert(offset, "x");
                    offset += 1;
                }
                black_box(editor.end_dispatch());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_visibility_queries(c: &mut Criterion) {
    let text = large_source(10_000);
    let mut editor = FoldingEditor::new(&text);
    editor.end_dispatch();
    editor.collapse_all();
    let visibility = editor.visibility();
    let line_count = visibility.line_count();

    c.bench_function("visibility/display_numbers_all_lines", |b| {
        b.iter(|| {
            let mut visible = 0usize;
            for line in 0..line_count {
                if visibility.display_line_number(black_box(line)).is_some() {
                    visible += 1;
                }
            }
            black_box(visible);
        })
    });
}

fn bench_gutter_rows(c: &mut Criterion) {
    let text = large_source(10_000);
    let mut editor = FoldingEditor::new(&text);
    editor.end_dispatch();
    editor.collapse_all();

    c.bench_function("gutter/60_rows", |b| {
        b.iter(|| {
            let gutter = editor.gutter(LineNumberMode::Relative, 25_000);
            black_box(gutter.rows(black_box(5_000), 60));
        })
    });
}

criterion_group!(
    benches,
    bench_rebuild,
    bench_typing_with_debounce,
    bench_visibility_queries,
    bench_gutter_rows
);
criterion_main!(benches);
