mod input;
mod snake_runner;

pub use input::spawn_line_reader;
pub use snake_runner::run_snake_game;
