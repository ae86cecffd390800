use criterion::{criterion_group, criterion_main, Criterion};
use mldsa_core::{fips202, ml_dsa_44, ml_dsa_65, ml_dsa_87, ntt, poly, Poly};


pub fn criterion_benchmark(c: &mut Criterion) {
    let rho = [0x42u8; 32];
    let seed = [0x17u8; 64];

    let mut state = [0u64; 25];
    c.bench_function("keccak f1600", |b| b.iter(|| fips202::keccak_f1600(&mut state)));

    let a = Poly(core::array::from_fn(|n| (n as i32 * 2731) % 1_000_000 - 500_000));
    c.bench_function("ntt forward", |b| b.iter(|| ntt::ntt(&a)));
    let a_hat = ntt::ntt(&a);
    c.bench_function("ntt inverse tomont", |b| b.iter(|| ntt::inv_ntt_tomont(&a_hat)));
    c.bench_function("pointwise montgomery", |b| {
        b.iter(|| poly::pointwise_montgomery(&a_hat, &a_hat))
    });

    c.bench_function("ml_dsa_44 expand_a", |b| b.iter(|| ml_dsa_44::expand_a(&rho)));
    c.bench_function("ml_dsa_65 expand_a", |b| b.iter(|| ml_dsa_65::expand_a(&rho)));
    c.bench_function("ml_dsa_87 expand_a", |b| b.iter(|| ml_dsa_87::expand_a(&rho)));

    c.bench_function("ml_dsa_44 uniform_eta vec", |b| {
        b.iter(|| ml_dsa_44::polyvecl_uniform_eta(&seed, 0))
    });
    c.bench_function("ml_dsa_65 uniform_gamma1 vec", |b| {
        b.iter(|| ml_dsa_65::polyvecl_uniform_gamma1(&seed, 0))
    });

    c.bench_function("ml_dsa_44 challenge", |b| {
        b.iter(|| ml_dsa_44::poly_challenge(&[0x99u8; ml_dsa_44::CTILDEBYTES]))
    });
    c.bench_function("ml_dsa_87 challenge", |b| {
        b.iter(|| ml_dsa_87::poly_challenge(&[0x99u8; ml_dsa_87::CTILDEBYTES]))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
