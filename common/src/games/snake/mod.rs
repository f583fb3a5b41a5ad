mod game_state;
mod session;
mod settings;
mod types;

pub use game_state::{place_food, GameState, StepOutcome, Steering};
pub use session::{SnakeEngine, SnakeSession};
pub use settings::{SnakeConfig, SnakeSettings};
pub use types::{DeathReason, Direction, Point, BOARD_SIZE, INITIAL_LENGTH};
