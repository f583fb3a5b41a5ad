use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use snake_common::games::SessionRng;
use snake_common::games::snake::{Direction, GameState, Point, SnakeSettings, Steering, StepOutcome};

/// Serpentine walk over the board: right along even rows, left along odd ones,
/// restarting on every collision.
fn play_ticks(ticks: usize) -> u64 {
    let settings = SnakeSettings::default();
    let mut rng = SessionRng::new(7);
    let mut state = GameState::fresh(&settings, &mut rng);
    let mut steering = Steering::new(settings.initial_length);
    let mut rounds = 0;

    for _ in 0..ticks {
        let head = state.head();
        let wanted = match (head.y % 2 == 0, head.x) {
            (true, x) if x == settings.board_size - 1 => Direction::Down,
            (false, 0) => Direction::Down,
            (true, _) => Direction::Right,
            (false, _) => Direction::Left,
        };
        steering.turn(wanted);

        let (next, outcome) = state.step(&mut steering, &settings, &mut rng);
        if let StepOutcome::Ended(_) = outcome {
            rounds += 1;
            state = GameState::fresh(&settings, &mut rng);
            steering = Steering::new(settings.initial_length);
        } else {
            state = next;
        }
    }
    rounds
}

fn bench_long_snake_tick(c: &mut Criterion) {
    let settings = SnakeSettings::default();
    let snake: Vec<Point> = (0..settings.board_size)
        .flat_map(|y| (0..settings.board_size).map(move |x| Point::new(x, y)))
        .skip(2)
        .collect();
    let state = GameState {
        food: Point::new(1, 0),
        snake,
        death_reason: None,
        score: 0,
        tick: 0,
    };

    c.bench_function("tick_long_snake_eats_food", |b| {
        let mut rng = SessionRng::new(1);
        b.iter(|| {
            let mut steering = Steering {
                direction: Direction::Left,
                target_length: state.snake.len(),
            };
            black_box(state.step(&mut steering, &settings, &mut rng))
        })
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("play_10k_ticks", |b| b.iter(|| play_ticks(black_box(10_000))));
    bench_long_snake_tick(c);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
