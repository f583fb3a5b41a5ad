mod config;
mod offline;
mod render;

use clap::Parser;
use std::io::BufReader;

use snake_common::games::SessionRng;
use snake_common::games::snake::{SnakeEngine, SnakeSession, SnakeSettings};
use snake_common::{log, logger, Leaderboard};

use config::{get_config_manager, DEFAULT_CONFIG_FILE_NAME};
use offline::{run_snake_game, spawn_line_reader};

#[derive(Parser)]
#[command(name = "snake_console")]
struct Args {
    /// Name the round's score is recorded under
    #[arg(long)]
    username: Option<String>,

    #[arg(long, default_value = DEFAULT_CONFIG_FILE_NAME)]
    config: String,

    /// Seed for food placement, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Console".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = get_config_manager(&args.config).get_config()?;
    let username = config.resolve_username(args.username.as_deref())?;

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Session seed: {}", rng.seed());

    let leaderboard = Leaderboard::new(config.snake.leaderboard_capacity as usize);
    let session = SnakeSession::new(
        username,
        SnakeSettings::from(&config.snake),
        leaderboard,
        rng,
    );
    let engine = SnakeEngine::start(session);

    println!("Steer with w/a/s/d, r to restart, top for scores, q to quit (each followed by Enter).");

    // Stdin stays on its own thread so ctrl-c can end the process mid-read.
    let mut command_rx = spawn_line_reader(BufReader::new(std::io::stdin()));
    let mut stdout = std::io::stdout();

    tokio::select! {
        result = run_snake_game(engine.session(), &mut command_rx, &mut stdout) => result?,
        _ = tokio::signal::ctrl_c() => log!("Interrupted"),
    }

    drop(engine);
    log!("Bye");

    Ok(())
}
