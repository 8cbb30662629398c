use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ct_core::{Claim, CompactionMapping};
use ct_mapper::ClaimTypeMapper;
use rand::seq::SliceRandom;

fn mappings(n: usize) -> Vec<CompactionMapping> {
    (0..n)
        .map(|i| {
            CompactionMapping::new(
                format!("http://schemas.example.org/ws/2005/05/identity/claims/type{i}"),
                format!("t{i}"),
            )
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    for &n in &[10usize, 100, 1000] {
        let set = mappings(n);
        c.bench_function(&format!("build_mapper_{n}"), |b| {
            b.iter(|| black_box(ClaimTypeMapper::new(black_box(set.clone())).unwrap()))
        });
    }
}

fn bench_lookup(c: &mut Criterion) {
    let set = mappings(100);
    let mapper = ClaimTypeMapper::new(set.clone()).unwrap();
    let mut rng = rand::thread_rng();
    let mut keys: Vec<String> = set.iter().map(|m| m.expanded.clone()).collect();
    keys.extend((0..100).map(|i| format!("urn:unmapped:{i}")));
    keys.shuffle(&mut rng);

    c.bench_function("compact_type_mixed", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(mapper.compact_type(black_box(key)).unwrap());
            }
        })
    });

    let table = mapper.snapshot();
    c.bench_function("compact_claim_snapshot", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(table.compact_claim(Claim::new(key.as_str(), "value")).unwrap());
            }
        })
    });
}

criterion_group!(benches, bench_build, bench_lookup);
criterion_main!(benches);
