use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use delve_core::*;
use std::hint::black_box;

fn bench_flood_fill(c: &mut Criterion) {
    let empty = MineLayout::from_mine_coords(Coord::MAX, &[]).unwrap();
    c.bench_function("flood_fill_empty_255", |b| {
        b.iter_batched(
            || BoardEngine::from_layout(empty.clone()),
            |mut engine| black_box(engine.reveal((127, 127)).unwrap()),
            BatchSize::LargeInput,
        )
    });

    c.bench_function("new_board_meadow", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            black_box(BoardEngine::new(BoardConfig::MEADOW, RandomMinePlacer::new(seed)).unwrap())
        })
    });
}

criterion_group!(benches, bench_flood_fill);
criterion_main!(benches);
