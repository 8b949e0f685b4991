use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lignum_paint::{RasterSurface, Rgba, StrokeHistory};

/// A wobbly path across the whole canvas, roughly what a fast mouse drag produces.
fn setup_stroke_points() -> Vec<(i32, i32)> {
    (0..2_000)
        .map(|i| {
            let t = i as f32 * 0.01;
            let x = 400.0 + t.cos() * (50.0 + t * 15.0);
            let y = 300.0 + t.sin() * (50.0 + t * 10.0);
            (x as i32, y as i32)
        })
        .collect()
}

fn canvas() -> RasterSurface {
    RasterSurface::new(800, 600, Rgba::WHITE).unwrap()
}

fn bench_stamp_line(c: &mut Criterion) {
    let mut surface = canvas();
    surface.set_pen_color(Rgba::BLACK);

    c.bench_function("stamp_line", |b| {
        b.iter(|| {
            surface.stamp_line(black_box(10), black_box(20), black_box(790), black_box(580));
        });
    });
}

fn bench_undo_redo(c: &mut Criterion) {
    let points = setup_stroke_points();
    let mut surface = canvas();
    let mut history = StrokeHistory::new();

    history.on_pointer_down(&mut surface, points[0], Rgba::BLACK);
    for &p in &points[1..] {
        history.on_pointer_move(&mut surface, p);
    }
    history.on_pointer_up();

    // replays the whole stroke twice per iteration
    c.bench_function("undo_redo_2000_points", |b| {
        b.iter(|| {
            history.undo(black_box(&mut surface));
            history.redo(black_box(&mut surface));
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_stamp_line, bench_undo_redo
);

criterion_main!(benches);
