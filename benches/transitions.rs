use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use avalon_tracker::{
    add_player, add_quest, add_round, create_initial_state, player_id_set, update_approvals,
    update_fails, validate_game_state, GameState, PlayerId,
};

// === Helpers ===

/// Five seated players and `quests` quests of two resolved rounds each.
fn build_state(quests: usize) -> GameState {
    let ids: Vec<PlayerId> = (1..=5).map(PlayerId::new).collect();
    let mut state = create_initial_state();
    for &id in &ids {
        state = add_player(&state, id, "");
    }

    for q in 0..quests {
        state = add_quest(&state);
        for r in 0..2 {
            let king = ids[(q * 2 + r) % ids.len()];
            state = add_round(&state, q, &ids[..2], king).expect("quest exists");
            state = update_approvals(&state, q, r, &ids[..3]).expect("quest exists");
            state = update_fails(&state, q, r, (r % 2) as i64).expect("quest exists");
        }
    }
    state
}

// === Transitions ===

fn bench_add_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_round");
    for &quests in &[1usize, 5, 25] {
        let state = build_state(quests);
        let team = [PlayerId::new(1), PlayerId::new(2)];
        group.bench_with_input(BenchmarkId::from_parameter(quests), &state, |b, state| {
            b.iter(|| black_box(add_round(state, quests - 1, &team, PlayerId::new(3))));
        });
    }
    group.finish();
}

fn bench_update_fails(c: &mut Criterion) {
    let state = build_state(5);
    c.bench_function("update_fails", |b| {
        b.iter(|| black_box(update_fails(&state, 4, 1, 2)));
    });
}

fn bench_clone(c: &mut Criterion) {
    let state = build_state(25);
    c.bench_function("state_clone", |b| b.iter(|| black_box(state.clone())));
}

// === Validation ===

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_game_state");
    let valid = player_id_set(1_i64..=5);
    for &quests in &[1usize, 5, 25] {
        let state = build_state(quests);
        group.bench_with_input(BenchmarkId::from_parameter(quests), &state, |b, state| {
            b.iter(|| black_box(validate_game_state(state, &valid)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_add_round,
    bench_update_fails,
    bench_clone,
    bench_validate,
);
criterion_main!(benches);
