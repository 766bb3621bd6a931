use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hiyaku::{apply_potions, level_to_exp, unapply_potions, PotionCount, PotionId};

fn bench_pipeline(c: &mut Criterion) {
    let counts = PotionId::ALL
        .into_iter()
        .fold(PotionCount::new(), |counts, id| counts.with(id, 10));
    let start = level_to_exp(200, 0).expect("level 200 is in the table");
    let after = apply_potions(start, &counts).expect("60 potions from 200 fit the table");

    c.bench_function("apply_potions 6x10", |b| {
        b.iter(|| apply_potions(black_box(start), black_box(&counts)))
    });
    c.bench_function("unapply_potions 6x10", |b| {
        b.iter(|| unapply_potions(black_box(after), black_box(&counts)))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
