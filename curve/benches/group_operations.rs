use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use curve::{generators, Affine, Group, RandomField, ScalarField};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn random_scalar(rng: &mut StdRng) -> ScalarField {
    ScalarField::random(rng)
}

fn bench_affine_double(c: &mut Criterion) {
    let g = generators::generator_g();
    c.bench_function("affine_double", |bencher| {
        bencher.iter(|| black_box(black_box(&g).double()))
    });
}

fn bench_affine_add(c: &mut Criterion) {
    let g = generators::generator_g();
    let h = generators::generator_h();
    c.bench_function("affine_add", |bencher| {
        bencher.iter(|| black_box(black_box(g.clone()) + black_box(h.clone())))
    });
}

fn bench_affine_scalar_mul(c: &mut Criterion) {
    let g = generators::generator_g();
    let mut rng = StdRng::seed_from_u64(42);
    let scalar = random_scalar(&mut rng);

    c.bench_function("affine_scalar_mul", |bencher| {
        bencher.iter(|| black_box(black_box(&g).scalar_mul(black_box(&scalar))))
    });
}

fn bench_affine_scalar_mul_windowed(c: &mut Criterion) {
    let g = generators::generator_g();
    let mut rng = StdRng::seed_from_u64(42);
    let scalar = random_scalar(&mut rng);

    c.bench_function("affine_scalar_mul_windowed", |bencher| {
        bencher.iter(|| black_box(black_box(&g).scalar_mul_windowed(black_box(&scalar))))
    });
}

fn bench_affine_msm(c: &mut Criterion) {
    let mut group = c.benchmark_group("affine_msm");

    for size in [2, 4, 8, 16, 32].iter() {
        let mut rng = StdRng::seed_from_u64(12345);
        let g = generators::generator_g();
        let h = generators::generator_h();

        let points: Vec<Affine> = (0..*size)
            .map(|i| {
                if i % 2 == 0 {
                    g.mul_u64(i as u64 + 1)
                } else {
                    h.mul_u64(i as u64 + 1)
                }
            })
            .collect();

        let scalars: Vec<ScalarField> = (0..*size).map(|_| random_scalar(&mut rng)).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |bencher, _| {
            bencher.iter(|| {
                black_box(<Affine as Group>::multi_scalar_mul(
                    black_box(&points),
                    black_box(&scalars),
                ))
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_affine_double,
    bench_affine_add,
    bench_affine_scalar_mul,
    bench_affine_scalar_mul_windowed,
    bench_affine_msm
);
criterion_main!(benches);
