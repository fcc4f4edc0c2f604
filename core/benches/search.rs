use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use mazerun_core::{Grid, MazeConfig, MazeGenerator, RandomMazeGenerator, Replay, solve};
use std::hint::black_box;

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [(8, 8), (32, 32), (128, 128)] {
        let config = MazeConfig::with_size(size).expect("valid size");
        let grids: Vec<Grid> = (0..16)
            .map(|seed| RandomMazeGenerator::new(seed).generate(config))
            .collect();

        group.bench_function(format!("solve {}x{}", size.0, size.1), |b| {
            b.iter(|| {
                for grid in &grids {
                    black_box(solve(black_box(grid), 0));
                }
            })
        });

        group.bench_function(format!("replay {}x{}", size.0, size.1), |b| {
            b.iter_batched(
                || grids.clone(),
                |grids| {
                    for grid in &grids {
                        black_box(Replay::search(grid, 0).count());
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let config = MazeConfig::with_size((128, 128)).expect("valid size");
    c.bench_function("generate 128x128", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            black_box(RandomMazeGenerator::new(seed).generate(config))
        })
    });
}

criterion_group!(benches, bench_search, bench_generate);
criterion_main!(benches);
