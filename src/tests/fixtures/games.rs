// Shared test fixture for games.
// Defaults are read from ./src/tests/fixtures/json/game.json.

use crate::modules::golf::core::model::{Game, HoleResult};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;

// JSON -> DTO (transport shape)
#[derive(Debug, Clone, Deserialize)]
pub struct GameDto {
    pub id: String,
    pub season_id: String,
    pub location_id: String,
    pub course_id: String,
    pub starting_hole: u32,
    pub started_at: DateTime<Utc>,
    pub player_ids: Vec<String>,
}

pub struct GameBuilder {
    inner: Game,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl GameBuilder {
    pub fn new() -> Self {
        let json_str = fs::read_to_string("./src/tests/fixtures/json/game.json").unwrap();
        let dto: GameDto = serde_json::from_str(&json_str).unwrap();

        Self {
            inner: Game {
                id: dto.id,
                season_id: dto.season_id,
                location_id: dto.location_id,
                course_id: dto.course_id,
                starting_hole: dto.starting_hole,
                started_at: dto.started_at,
                completed_at: None,
                player_ids: dto.player_ids,
                hole_results: Vec::new(),
            },
        }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn season_id(mut self, v: impl Into<String>) -> Self {
        self.inner.season_id = v.into();
        self
    }

    pub fn location_id(mut self, v: impl Into<String>) -> Self {
        self.inner.location_id = v.into();
        self
    }

    pub fn course_id(mut self, v: impl Into<String>) -> Self {
        self.inner.course_id = v.into();
        self
    }

    pub fn starting_hole(mut self, v: u32) -> Self {
        self.inner.starting_hole = v;
        self
    }

    pub fn started_at(mut self, v: DateTime<Utc>) -> Self {
        self.inner.started_at = v;
        self
    }

    pub fn completed_at(mut self, v: DateTime<Utc>) -> Self {
        self.inner.completed_at = Some(v);
        self
    }

    pub fn players(mut self, v: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.inner.player_ids = v.into_iter().map(Into::into).collect();
        self
    }

    pub fn hole(mut self, v: HoleResult) -> Self {
        self.inner.hole_results.push(v);
        self
    }

    pub fn build(self) -> Game {
        self.inner
    }
}
