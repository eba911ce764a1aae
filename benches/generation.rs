use criterion::{black_box, criterion_group, criterion_main, Criterion};
use voronoi_cell_sphere::{
    build_cell_sphere, generate_cell_sphere, sample_sphere_points_seeded, PlanetConfigBuilder,
};

fn benchmark_sampling(c: &mut Criterion) {
    c.bench_function("sample_r5_d0.25", |b| {
        b.iter(|| sample_sphere_points_seeded(black_box(42), 5.0, 0.25, 1.4))
    });

    c.bench_function("sample_r20_d0.25", |b| {
        b.iter(|| sample_sphere_points_seeded(black_box(42), 20.0, 0.25, 1.4))
    });
}

fn benchmark_build(c: &mut Criterion) {
    let points = sample_sphere_points_seeded(42, 20.0, 0.25, 1.4);

    c.bench_function("build_r20", |b| {
        b.iter(|| build_cell_sphere(black_box(&points)))
    });
}

fn benchmark_generate(c: &mut Criterion) {
    let config = PlanetConfigBuilder::new().seed(42).build().unwrap();

    c.bench_function("generate_default", |b| {
        b.iter(|| generate_cell_sphere(black_box(&config)))
    });
}

criterion_group!(benches, benchmark_sampling, benchmark_build, benchmark_generate);
criterion_main!(benches);
