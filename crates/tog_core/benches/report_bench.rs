//! Report generation over a full roster, mid-quarter.
//!
//! The live display recomputes the report and position board on every tick,
//! so both must stay cheap for 25 players.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tog_core::{MatchTracker, PositionCategory, Timestamp};

fn running_tracker(players: usize) -> MatchTracker {
    let mut tracker = MatchTracker::default();
    let names: Vec<String> = (1..=players).map(|i| format!("Player {}", i)).collect();
    tracker.set_roster(&names);

    tracker.start_quarter(Timestamp::ZERO);
    for (i, name) in names.iter().enumerate() {
        let position = PositionCategory::BOARD_ORDER[i % 4];
        tracker.change_position(name, position, Timestamp::from_secs(i as f64));
    }
    tracker.tick(Timestamp::from_secs(60.0));
    tracker
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");

    for players in [4, 12, 25] {
        let tracker = running_tracker(players);
        let now = Timestamp::from_secs(75.0);

        group.bench_with_input(BenchmarkId::new("report", players), &players, |b, _| {
            b.iter(|| tracker.report(black_box(now)));
        });
        group.bench_with_input(BenchmarkId::new("position_board", players), &players, |b, _| {
            b.iter(|| tracker.position_board(black_box(now)));
        });
    }

    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    c.bench_function("tick_25_players", |b| {
        let mut tracker = running_tracker(25);
        let mut now = 60.0;
        b.iter(|| {
            now += 1.0;
            tracker.tick(black_box(Timestamp::from_secs(now)))
        });
    });
}

criterion_group!(benches, bench_report, bench_tick);
criterion_main!(benches);
