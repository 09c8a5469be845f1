//! Simulator throughput benchmarks: raids per second at a few roster sizes.
//!
//! Run with: `cargo bench --bench simulator`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use raidsim::combat::{
    simulate_raid_with, BossProfile, Combatant, RaidConfig, Rng, TraceMode,
};

fn roster(size: i64) -> Vec<Combatant> {
    (0..size)
        .map(|i| Combatant::new(format!("member_{i}"), 80 + i * 5, 300))
        .collect()
}

fn boss() -> BossProfile {
    BossProfile {
        attack: 200,
        health: 12_000,
        speed: 10,
    }
}

fn bench_simulator(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulator");
    group.sample_size(100);
    group.throughput(Throughput::Elements(1));

    for size in [2_i64, 8, 32] {
        let team = roster(size);
        for (label, trace_mode) in [("trace_off", TraceMode::Off), ("trace_on", TraceMode::Entries)] {
            let config = RaidConfig {
                trace_mode,
                ..RaidConfig::default()
            };
            group.bench_with_input(BenchmarkId::new(label, size), &team, |b, team| {
                let mut seed = 0_u64;
                b.iter(|| {
                    seed = seed.wrapping_add(1);
                    let mut rng = Rng::new(seed);
                    black_box(simulate_raid_with(team, &boss(), config, &mut rng))
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_simulator);
criterion_main!(benches);
