use std::io::Write;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::WatchStream;

use snake_common::games::snake::SnakeSession;
use snake_common::log;

use super::input::{parse_command, ConsoleCommand};
use crate::render::{render_board, render_leaderboard};

/// Drives one session from input lines and writes a frame for every
/// published snapshot. Returns when the player quits or every sender is gone.
pub async fn run_snake_game<W: Write>(
    session: &SnakeSession,
    command_rx: &mut mpsc::UnboundedReceiver<String>,
    out: &mut W,
) -> std::io::Result<()> {
    let board_size = session.settings().board_size;
    let mut states = WatchStream::from_changes(session.subscribe());

    write!(out, "{}", render_board(&session.current_state(), board_size))?;
    out.flush()?;

    loop {
        tokio::select! {
            Some(state) = states.next() => {
                write!(out, "{}", render_board(&state, board_size))?;
                if state.is_game_over() {
                    let top = session.leaderboard().top_scores().await;
                    write!(out, "{}", render_leaderboard(&top))?;
                }
                out.flush()?;
            }
            line = command_rx.recv() => {
                let Some(line) = line else {
                    log!("[{}] input closed", session.username());
                    break;
                };

                match parse_command(&line) {
                    Some(ConsoleCommand::Turn(direction)) => session.change_direction(direction).await,
                    Some(ConsoleCommand::Reset) => session.reset().await,
                    Some(ConsoleCommand::ShowScores) => {
                        let top = session.leaderboard().top_scores().await;
                        write!(out, "{}", render_leaderboard(&top))?;
                        out.flush()?;
                    }
                    Some(ConsoleCommand::Quit) => break,
                    None => writeln!(out, "Unknown command: {}", line.trim())?,
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_common::games::SessionRng;
    use snake_common::games::snake::{Direction, SnakeEngine, SnakeSettings};
    use snake_common::{Leaderboard, Username};

    fn engine(seed: u64) -> SnakeEngine {
        SnakeEngine::start(SnakeSession::new(
            Username::parse("console").unwrap(),
            SnakeSettings::default(),
            Leaderboard::default(),
            SessionRng::new(seed),
        ))
    }

    fn queued(lines: &[&str]) -> mpsc::UnboundedReceiver<String> {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        for line in lines {
            command_tx.send(line.to_string()).unwrap();
        }
        command_rx
    }

    #[tokio::test(start_paused = true)]
    async fn test_commands_reach_the_session() {
        let engine = engine(4);
        let mut out = Vec::new();
        let mut command_rx = queued(&["s", "top", "fly", "q"]);

        run_snake_game(engine.session(), &mut command_rx, &mut out)
            .await
            .unwrap();

        assert_eq!(engine.steering().await.direction, Direction::Down);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("+----------------+\n"));
        assert!(text.contains("Leaderboard is empty"));
        assert!(text.contains("Unknown command: fly"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reversal_from_console_is_ignored() {
        let engine = engine(4);
        let mut out = Vec::new();

        let mut command_rx = queued(&["a"]);

        run_snake_game(engine.session(), &mut command_rx, &mut out)
            .await
            .unwrap();

        assert_eq!(engine.steering().await.direction, Direction::Right);
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_over_frame_shows_leaderboard() {
        let engine = engine(4);
        let session = engine.session().clone();
        let (command_tx, mut command_rx) = mpsc::unbounded_channel();

        let runner = tokio::spawn(async move {
            let mut out = Vec::new();
            run_snake_game(&session, &mut command_rx, &mut out)
                .await
                .unwrap();
            String::from_utf8(out).unwrap()
        });

        // Heading up from (8,8) the snake leaves the board within nine ticks.
        command_tx.send("w".to_string()).unwrap();
        tokio::time::sleep(std::time::Duration::from_secs(3)).await;
        command_tx.send("q".to_string()).unwrap();

        let text = runner.await.unwrap();
        assert!(text.contains("GAME OVER (WallCollision)"));
        assert!(text.contains(" 1. console"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_channel_ends_the_game() {
        let engine = engine(4);
        let mut out = Vec::new();
        let (command_tx, mut command_rx) = mpsc::unbounded_channel::<String>();
        command_tx.send("d".to_string()).unwrap();
        drop(command_tx);

        run_snake_game(engine.session(), &mut command_rx, &mut out)
            .await
            .unwrap();

        assert_eq!(engine.steering().await.direction, Direction::Right);
        assert!(engine.current_state().death_reason.is_none());
    }
}
