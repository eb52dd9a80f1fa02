use criterion::{black_box, criterion_group, criterion_main, Criterion};
use isokit::{DrawList, GridConfig, Scene, SceneConfig};
use std::time::Instant;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render-frame");
    group.sample_size(20);

    let config = SceneConfig {
        seed: 1234.into(),
        grid: GridConfig {
            rows: 64,
            cols: 64,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut scene = Scene::new(config).unwrap();
    let mut frame = DrawList::new();
    group.bench_function("64x64 frame", |b| {
        b.iter(|| {
            frame.clear();
            scene.render_frame(black_box(Instant::now()), &mut frame, &());
        })
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
