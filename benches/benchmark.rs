use criterion::{Criterion, criterion_group, criterion_main};

use akcn_mlwe::{akcn_mlwe_2, akcn_mlwe_3, akcn_mlwe_4};
use akcn_mlwe::traits::{Decaps, Encaps, KeyGen};

#[allow(clippy::redundant_closure)]
pub fn criterion_benchmark(c: &mut Criterion) {
    let (ek_2, dk_2) = akcn_mlwe_2::KG::try_keygen().unwrap();
    let (_, ct_2) = ek_2.try_encaps().unwrap();
    let (ek_3, dk_3) = akcn_mlwe_3::KG::try_keygen().unwrap();
    let (_, ct_3) = ek_3.try_encaps().unwrap();
    let (ek_4, dk_4) = akcn_mlwe_4::KG::try_keygen().unwrap();
    let (_, ct_4) = ek_4.try_encaps().unwrap();

    c.bench_function("akcn_mlwe_2 KeyGen", |b| b.iter(|| akcn_mlwe_2::KG::try_keygen()));
    c.bench_function("akcn_mlwe_2 Encaps", |b| b.iter(|| ek_2.try_encaps()));
    c.bench_function("akcn_mlwe_2 Decaps", |b| b.iter(|| dk_2.try_decaps(&ct_2)));

    c.bench_function("akcn_mlwe_3 KeyGen", |b| b.iter(|| akcn_mlwe_3::KG::try_keygen()));
    c.bench_function("akcn_mlwe_3 Encaps", |b| b.iter(|| ek_3.try_encaps()));
    c.bench_function("akcn_mlwe_3 Decaps", |b| b.iter(|| dk_3.try_decaps(&ct_3)));

    c.bench_function("akcn_mlwe_4 KeyGen", |b| b.iter(|| akcn_mlwe_4::KG::try_keygen()));
    c.bench_function("akcn_mlwe_4 Encaps", |b| b.iter(|| ek_4.try_encaps()));
    c.bench_function("akcn_mlwe_4 Decaps", |b| b.iter(|| dk_4.try_decaps(&ct_4)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
