use std::collections::HashSet;

use crate::games::SessionRng;
use super::settings::SnakeSettings;
use super::types::{DeathReason, Direction, Point};

const FOOD_SAMPLE_ATTEMPTS: usize = 64;

/// Immutable snapshot of one round. A new value is built for every tick and
/// published whole, it is never edited in place once observers can see it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub food: Point,
    /// Head first, then the body in trailing order.
    pub snake: Vec<Point>,
    pub death_reason: Option<DeathReason>,
    pub score: u32,
    pub tick: u64,
}

/// Direction and length goal of the snake. They are read and written together
/// under the engine lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Steering {
    pub direction: Direction,
    pub target_length: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Frozen,
    Moved { ate_food: bool },
    Ended(DeathReason),
}

impl Steering {
    pub fn new(initial_length: usize) -> Self {
        Self {
            direction: Direction::Right,
            target_length: initial_length,
        }
    }

    /// Returns false when `requested` would reverse the snake onto itself.
    pub fn turn(&mut self, requested: Direction) -> bool {
        if requested.is_opposite(&self.direction) {
            return false;
        }
        self.direction = requested;
        true
    }

    pub fn score(&self, initial_length: usize) -> u32 {
        self.target_length.saturating_sub(initial_length) as u32
    }
}

impl GameState {
    /// Single segment in the middle of the board, food anywhere else.
    pub fn fresh(settings: &SnakeSettings, rng: &mut SessionRng) -> Self {
        let center = Point::new(settings.board_size / 2, settings.board_size / 2);
        let occupied = HashSet::from([center]);
        // Validated boards are at least 4x4, so a free cell always exists.
        let food = place_food(settings.board_size, &occupied, rng).unwrap_or(center);

        Self {
            food,
            snake: vec![center],
            death_reason: None,
            score: 0,
            tick: 0,
        }
    }

    pub fn head(&self) -> Point {
        self.snake[0]
    }

    pub fn is_game_over(&self) -> bool {
        self.death_reason.is_some()
    }

    /// Computes the state one tick later. `steering.target_length` grows by one
    /// when food is eaten; everything else is read-only.
    pub fn step(
        &self,
        steering: &mut Steering,
        settings: &SnakeSettings,
        rng: &mut SessionRng,
    ) -> (GameState, StepOutcome) {
        if self.is_game_over() {
            return (self.clone(), StepOutcome::Frozen);
        }

        let new_head = self.head() + steering.direction;

        let collision = if !new_head.is_inside(settings.board_size) {
            Some(DeathReason::WallCollision)
        } else if self.snake.contains(&new_head) {
            Some(DeathReason::SelfCollision)
        } else {
            None
        };

        if let Some(reason) = collision {
            let ended = GameState {
                death_reason: Some(reason),
                tick: self.tick + 1,
                ..self.clone()
            };
            return (ended, StepOutcome::Ended(reason));
        }

        let ate_food = new_head == self.food;
        let mut food = self.food;
        let mut death_reason = None;

        if ate_food {
            steering.target_length += 1;

            let mut occupied: HashSet<Point> = self.snake.iter().copied().collect();
            occupied.insert(new_head);
            match place_food(settings.board_size, &occupied, rng) {
                Some(position) => food = position,
                None => death_reason = Some(DeathReason::BoardFilled),
            }
        }

        let mut snake = Vec::with_capacity(steering.target_length);
        snake.push(new_head);
        snake.extend(self.snake.iter().take(steering.target_length - 1).copied());

        let next = GameState {
            food,
            snake,
            death_reason,
            score: steering.score(settings.initial_length),
            tick: self.tick + 1,
        };

        let outcome = match death_reason {
            Some(reason) => StepOutcome::Ended(reason),
            None => StepOutcome::Moved { ate_food },
        };

        (next, outcome)
    }
}

/// Uniformly random free cell, or `None` when every cell is occupied.
/// Rejection sampling first; a crowded board falls back to drawing from the
/// enumerated free cells, which keeps the distribution uniform.
pub fn place_food(board_size: i32, occupied: &HashSet<Point>, rng: &mut SessionRng) -> Option<Point> {
    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let candidate = Point::new(
            rng.random_range(0..board_size),
            rng.random_range(0..board_size),
        );
        if !occupied.contains(&candidate) {
            return Some(candidate);
        }
    }

    let free: Vec<Point> = (0..board_size)
        .flat_map(|y| (0..board_size).map(move |x| Point::new(x, y)))
        .filter(|p| !occupied.contains(p))
        .collect();

    if free.is_empty() {
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}
