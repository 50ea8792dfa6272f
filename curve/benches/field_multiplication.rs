use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve::{BaseField, RandomField, ScalarField};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_base_field_mul(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let a = BaseField::random(&mut rng);
    let b = BaseField::random(&mut rng);
    c.bench_function("base_field_mul", |bencher| {
        bencher.iter(|| black_box(black_box(a.clone()) * black_box(b.clone())))
    });
}

fn bench_base_field_inverse(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let a = BaseField::random(&mut rng);
    c.bench_function("base_field_inverse", |bencher| {
        bencher.iter(|| black_box(black_box(a.clone()).inverse()))
    });
}

fn bench_scalar_field_mul(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let a = ScalarField::random(&mut rng);
    let b = ScalarField::random(&mut rng);
    c.bench_function("scalar_field_mul", |bencher| {
        bencher.iter(|| black_box(black_box(a.clone()) * black_box(b.clone())))
    });
}

criterion_group!(
    benches,
    bench_base_field_mul,
    bench_base_field_inverse,
    bench_scalar_field_mul
);
criterion_main!(benches);
