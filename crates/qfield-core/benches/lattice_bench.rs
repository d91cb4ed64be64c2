use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qfield_core::{Lattice, LatticeConfig, LineStyle, QuadraticField, Scene, Viewport};

fn bench_square_free_check(c: &mut Criterion) {
    c.bench_function("square_free_1e9", |b| {
        b.iter(|| black_box(qfield_core::is_square_free(black_box(1_000_000_007))));
    });
}

fn bench_lattice_points(c: &mut Criterion) {
    let lattice = Lattice::new(&QuadraticField::new(-3).unwrap());
    let viewport = Viewport::new(-20.0, 20.0, -20.0, 20.0).unwrap();
    c.bench_function("lattice_points_in_40x40", |b| {
        b.iter(|| black_box(lattice.points_in(&viewport).unwrap()));
    });
}

fn bench_build_scene(c: &mut Criterion) {
    let field = QuadraticField::new(-7).unwrap();
    let config = LatticeConfig {
        connect_dots: LineStyle::Dashed,
        plot_circles: true,
        ..Default::default()
    };
    c.bench_function("build_scene_default", |b| {
        b.iter(|| black_box(Scene::build(&field, &config, config.viewport).unwrap()));
    });
}

fn bench_build_and_clip(c: &mut Criterion) {
    let field = QuadraticField::new(-7).unwrap();
    let config = LatticeConfig { plot_circles: true, ..Default::default() };
    c.bench_function("build_and_clip_scene", |b| {
        b.iter(|| {
            let mut scene = Scene::build(&field, &config, config.viewport).unwrap();
            scene.clip();
            black_box(scene)
        });
    });
}

criterion_group!(
    benches,
    bench_square_free_check,
    bench_lattice_points,
    bench_build_scene,
    bench_build_and_clip,
);
criterion_main!(benches);
