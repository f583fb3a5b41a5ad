use std::io::BufRead;
use tokio::sync::mpsc;

use snake_common::games::snake::Direction;
use snake_common::log;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Turn(Direction),
    Reset,
    ShowScores,
    Quit,
}

/// One command per line, case-insensitive. `None` for anything unrecognized.
pub fn parse_command(line: &str) -> Option<ConsoleCommand> {
    let command = match line.trim().to_ascii_lowercase().as_str() {
        "w" | "up" => ConsoleCommand::Turn(Direction::Up),
        "a" | "left" => ConsoleCommand::Turn(Direction::Left),
        "s" | "down" => ConsoleCommand::Turn(Direction::Down),
        "d" | "right" => ConsoleCommand::Turn(Direction::Right),
        "r" | "reset" => ConsoleCommand::Reset,
        "top" | "scores" => ConsoleCommand::ShowScores,
        "q" | "quit" | "exit" => ConsoleCommand::Quit,
        _ => return None,
    };
    Some(command)
}

/// Reads lines on a plain OS thread and forwards them to the returned
/// receiver. Blocking reads stay off the runtime, so shutting the runtime down
/// never waits for the next line. The channel closes at end of input.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::UnboundedReceiver<String>
where
    R: BufRead + Send + 'static,
{
    let (line_tx, line_rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });

    line_rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_keys_and_words() {
        assert_eq!(parse_command("w"), Some(ConsoleCommand::Turn(Direction::Up)));
        assert_eq!(parse_command(" LEFT \n"), Some(ConsoleCommand::Turn(Direction::Left)));
        assert_eq!(parse_command("s"), Some(ConsoleCommand::Turn(Direction::Down)));
        assert_eq!(parse_command("right"), Some(ConsoleCommand::Turn(Direction::Right)));
        assert_eq!(parse_command("r"), Some(ConsoleCommand::Reset));
        assert_eq!(parse_command("top"), Some(ConsoleCommand::ShowScores));
        assert_eq!(parse_command("quit"), Some(ConsoleCommand::Quit));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("jump"), None);
    }

    #[tokio::test]
    async fn test_line_reader_forwards_lines_then_closes() {
        let mut line_rx = spawn_line_reader(Cursor::new(b"w\nreset\n".to_vec()));

        assert_eq!(line_rx.recv().await.as_deref(), Some("w"));
        assert_eq!(line_rx.recv().await.as_deref(), Some("reset"));
        assert_eq!(line_rx.recv().await, None);
    }
}
