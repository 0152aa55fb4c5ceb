use criterion::{Criterion, criterion_group, criterion_main};
use scriptline_engine::editing::{
    Classification, Editor, EditorKey, EditorSettings, Geometry, Line, Paginator,
};

fn generate_screenplay(scenes: usize) -> Vec<Line> {
    let mut lines = Vec::with_capacity(scenes * 5);
    for scene in 0..scenes {
        lines.push(Line::new(
            Classification::SceneHeading,
            format!("INT. LOCATION {scene} - DAY"),
        ));
        lines.push(Line::new(Classification::Action, "Something happens."));
        lines.push(Line::new(Classification::Character, "SOMEONE"));
        lines.push(Line::new(Classification::Dialogue, "Says something."));
        lines.push(Line::new(Classification::Transition, "CUT TO:"));
    }
    lines
}

fn bench_pagination(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagination");

    let paginator = Paginator::new(1120.0).unwrap();
    let geometry: Geometry = (0..5000).map(|i| 20.0 + (i % 7) as f64 * 4.0).collect();

    group.bench_function("compute_5000_lines", |b| {
        b.iter(|| {
            let breaks = paginator.compute(std::hint::black_box(5000), &geometry);
            std::hint::black_box(breaks);
        });
    });

    group.finish();
}

fn bench_split_and_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("editing");
    group.sample_size(10);

    let lines = generate_screenplay(200);

    group.bench_function("split_then_merge", |b| {
        let mut editor = Editor::new(lines.clone(), &EditorSettings::default(), ()).unwrap();
        b.iter(|| {
            editor.handle_key(EditorKey::NewLine).unwrap();
            let outcome = editor.handle_key(EditorKey::DeleteBackward).unwrap();
            std::hint::black_box(outcome);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_pagination, bench_split_and_merge);
criterion_main!(benches);
