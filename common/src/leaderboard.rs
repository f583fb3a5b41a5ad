use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{log, Username};

pub const DEFAULT_LEADERBOARD_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub username: Username,
    pub score: u32,
}

/// Best score per username, highest first. Cloning shares the same table, so
/// one store can be handed to any number of game sessions.
#[derive(Clone)]
pub struct Leaderboard {
    entries: Arc<Mutex<Vec<LeaderboardEntry>>>,
    capacity: usize,
}

impl std::fmt::Debug for Leaderboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Leaderboard").field("capacity", &self.capacity).finish()
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(DEFAULT_LEADERBOARD_CAPACITY)
    }
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keeps the higher of the stored and submitted score for `username`.
    /// Equal scores stay in submission order; the lowest entry past capacity
    /// is dropped.
    pub async fn submit_score(&self, username: &Username, score: u32) {
        let mut entries = self.entries.lock().await;

        match entries.iter_mut().find(|e| e.username == *username) {
            Some(existing) if score > existing.score => {
                log!("[leaderboard] {} improved {} -> {}", username, existing.score, score);
                existing.score = score;
            }
            Some(_) => return,
            None => entries.push(LeaderboardEntry {
                username: username.clone(),
                score,
            }),
        }

        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(self.capacity);
    }

    pub async fn top_scores(&self) -> Vec<LeaderboardEntry> {
        self.entries.lock().await.clone()
    }
}
