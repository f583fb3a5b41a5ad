use std::ops::Deref;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_stream::wrappers::WatchStream;

use crate::{log, Username};
use crate::games::SessionRng;
use crate::leaderboard::Leaderboard;
use super::game_state::{GameState, StepOutcome, Steering};
use super::settings::SnakeSettings;
use super::types::Direction;

struct SessionCore {
    steering: Steering,
    rng: SessionRng,
}

struct SessionShared {
    username: Username,
    settings: SnakeSettings,
    core: Mutex<SessionCore>,
    state_tx: watch::Sender<Arc<GameState>>,
    leaderboard: Leaderboard,
}

/// One player's round: authoritative state plus the commands that act on it.
///
/// Every mutation (tick, turn, reset) runs under one lock and ends with a
/// single publish of a fresh [`GameState`], so observers only ever see whole
/// snapshots. Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct SnakeSession {
    shared: Arc<SessionShared>,
}

impl SnakeSession {
    pub fn new(
        username: Username,
        settings: SnakeSettings,
        leaderboard: Leaderboard,
        mut rng: SessionRng,
    ) -> Self {
        let initial = GameState::fresh(&settings, &mut rng);
        let (state_tx, _) = watch::channel(Arc::new(initial));

        Self {
            shared: Arc::new(SessionShared {
                username,
                core: Mutex::new(SessionCore {
                    steering: Steering::new(settings.initial_length),
                    rng,
                }),
                settings,
                state_tx,
                leaderboard,
            }),
        }
    }

    pub fn username(&self) -> &Username {
        &self.shared.username
    }

    pub fn settings(&self) -> &SnakeSettings {
        &self.shared.settings
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.shared.leaderboard
    }

    pub fn current_state(&self) -> Arc<GameState> {
        self.shared.state_tx.borrow().clone()
    }

    /// Receiver that is notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<GameState>> {
        self.shared.state_tx.subscribe()
    }

    /// Stream yielding the current snapshot first, then each new one.
    pub fn state_stream(&self) -> WatchStream<Arc<GameState>> {
        WatchStream::new(self.subscribe())
    }

    pub async fn steering(&self) -> Steering {
        self.shared.core.lock().await.steering
    }

    /// Reversals are ignored; any other direction replaces the current one.
    pub async fn change_direction(&self, requested: Direction) {
        let mut core = self.shared.core.lock().await;
        core.steering.turn(requested);
    }

    pub async fn change_direction_delta(&self, dx: i32, dy: i32) {
        match Direction::from_delta(dx, dy) {
            Some(direction) => self.change_direction(direction).await,
            None => log!("[{}] ignoring non-unit direction ({}, {})", self.shared.username, dx, dy),
        }
    }

    /// Starts a new round immediately, whatever the current state.
    pub async fn reset(&self) {
        let mut core = self.shared.core.lock().await;
        core.steering = Steering::new(self.shared.settings.initial_length);
        let fresh = GameState::fresh(&self.shared.settings, &mut core.rng);
        log!(
            "[{}] new round, food at ({}, {})",
            self.shared.username,
            fresh.food.x,
            fresh.food.y
        );
        self.shared.state_tx.send_replace(Arc::new(fresh));
    }

    /// Advances the round by one tick. A finished round is left untouched and
    /// nothing is published for it.
    pub async fn step(&self) -> StepOutcome {
        let mut core = self.shared.core.lock().await;
        let current = self.shared.state_tx.borrow().clone();

        let SessionCore { steering, rng } = &mut *core;
        let (next, outcome) = current.step(steering, &self.shared.settings, rng);

        match outcome {
            StepOutcome::Frozen => return outcome,
            StepOutcome::Moved { ate_food: true } => {
                log!(
                    "[{}] ate food at ({}, {}). Score: {}",
                    self.shared.username,
                    next.head().x,
                    next.head().y,
                    next.score
                );
            }
            StepOutcome::Moved { ate_food: false } => {}
            StepOutcome::Ended(reason) => {
                let score = steering.score(self.shared.settings.initial_length);
                log!("[{}] round over ({:?}) with score {}", self.shared.username, reason, score);
                self.shared
                    .leaderboard
                    .submit_score(&self.shared.username, score)
                    .await;
            }
        }

        self.shared.state_tx.send_replace(Arc::new(next));
        outcome
    }

    /// Ticks forever on the configured period. The first tick fires one full
    /// period after the call.
    pub async fn run(self) {
        let period = self.shared.settings.tick_interval;
        let mut tick_interval_timer = interval_at(Instant::now() + period, period);
        tick_interval_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tick_interval_timer.tick().await;
            self.step().await;
        }
    }

    #[cfg(test)]
    async fn force(&self, state: GameState, steering: Steering) {
        let mut core = self.shared.core.lock().await;
        core.steering = steering;
        self.shared.state_tx.send_replace(Arc::new(state));
    }
}

/// A [`SnakeSession`] with its tick loop running on the tokio runtime.
/// Dropping the engine stops the loop.
pub struct SnakeEngine {
    session: SnakeSession,
    tick_task: JoinHandle<()>,
}

impl SnakeEngine {
    /// Must be called from within a tokio runtime.
    pub fn start(session: SnakeSession) -> Self {
        log!(
            "[{}] starting engine, tick every {:?}",
            session.username(),
            session.settings().tick_interval
        );
        let tick_task = tokio::spawn(session.clone().run());
        Self { session, tick_task }
    }

    pub fn session(&self) -> &SnakeSession {
        &self.session
    }
}

impl Deref for SnakeEngine {
    type Target = SnakeSession;

    fn deref(&self) -> &SnakeSession {
        &self.session
    }
}

impl Drop for SnakeEngine {
    fn drop(&mut self) {
        self.tick_task.abort();
    }
}
