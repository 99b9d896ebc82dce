// Lifecycle of a game: Open until finished, then Finished for good.

use crate::modules::golf::core::model::Game;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Open,
    Finished { completed_at: DateTime<Utc> },
}

impl GameState {
    pub fn of(game: &Game) -> Self {
        match game.completed_at {
            None => GameState::Open,
            Some(completed_at) => GameState::Finished { completed_at },
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, GameState::Open)
    }
}
