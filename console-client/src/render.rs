use snake_common::games::snake::{GameState, Point};
use snake_common::LeaderboardEntry;

pub fn render_board(state: &GameState, board_size: i32) -> String {
    let width = board_size as usize;
    let mut out = String::with_capacity((width + 3) * (width + 4));

    let border = format!("+{}+\n", "-".repeat(width));
    out.push_str(&border);
    for y in 0..board_size {
        out.push('|');
        for x in 0..board_size {
            let cell = Point::new(x, y);
            let glyph = if state.snake.first() == Some(&cell) {
                '@'
            } else if state.snake.contains(&cell) {
                'o'
            } else if state.food == cell {
                '*'
            } else {
                ' '
            };
            out.push(glyph);
        }
        out.push_str("|\n");
    }
    out.push_str(&border);

    match state.death_reason {
        Some(reason) => out.push_str(&format!(
            "GAME OVER ({:?}). Score: {}. Type r to play again.\n",
            reason, state.score
        )),
        None => out.push_str(&format!("Score: {}  Tick: {}\n", state.score, state.tick)),
    }
    out
}

pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "Leaderboard is empty\n".to_string();
    }
    let mut out = String::from("Top scores:\n");
    for (rank, entry) in entries.iter().enumerate() {
        out.push_str(&format!("{:>2}. {:<16} {}\n", rank + 1, entry.username, entry.score));
    }
    out
}
