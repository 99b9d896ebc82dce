use crate::modules::golf::core::model::{Course, CourseLocation, Game, HoleResult, Player, Season};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("version mismatch on game {game_id}: expected {expected} hole results, actual {actual}")]
    VersionMismatch {
        game_id: String,
        expected: usize,
        actual: usize,
    },

    #[error("game {0} is missing from the store")]
    GameMissing(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Which games to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameFilter<'a> {
    Season(&'a str),
    Course(&'a str),
    Participant(&'a str),
}

impl GameFilter<'_> {
    pub fn matches(&self, game: &Game) -> bool {
        match self {
            GameFilter::Season(season_id) => game.season_id == *season_id,
            GameFilter::Course(course_id) => game.course_id == *course_id,
            GameFilter::Participant(player_id) => game.is_participant(player_id),
        }
    }
}

/// Storage seam for players, seasons, locations and games.
///
/// Listing order is backend-defined; callers sort what they expose.
#[async_trait]
pub trait GolfStore: Send + Sync {
    async fn insert_player(&self, player: Player) -> Result<(), StoreError>;
    async fn delete_player(&self, player_id: &str) -> Result<(), StoreError>;
    async fn list_players(&self) -> Result<Vec<Player>, StoreError>;
    async fn count_players(&self) -> Result<usize, StoreError>;

    async fn insert_season(&self, season: Season) -> Result<(), StoreError>;
    async fn list_seasons(&self) -> Result<Vec<Season>, StoreError>;

    /// Locations are a catalog shared by id. Upserting replaces the location
    /// and its courses for every season linked to it, then links it to
    /// `season_id`.
    async fn upsert_location(
        &self,
        season_id: &str,
        location: CourseLocation,
    ) -> Result<(), StoreError>;
    async fn list_locations(&self, season_id: &str) -> Result<Vec<CourseLocation>, StoreError>;
    async fn find_course(
        &self,
        location_id: &str,
        course_id: &str,
    ) -> Result<Option<Course>, StoreError>;

    async fn insert_game(&self, game: Game) -> Result<(), StoreError>;
    async fn load_game(&self, game_id: &str) -> Result<Option<Game>, StoreError>;
    async fn list_games(&self, filter: GameFilter<'_>) -> Result<Vec<Game>, StoreError>;

    /// Appends only if the game still holds `expected_len` hole results.
    async fn append_hole_result(
        &self,
        game_id: &str,
        expected_len: usize,
        result: HoleResult,
    ) -> Result<Game, StoreError>;
    async fn complete_game(
        &self,
        game_id: &str,
        completed_at: DateTime<Utc>,
    ) -> Result<Game, StoreError>;
}

pub mod in_memory;
pub mod json_file;
