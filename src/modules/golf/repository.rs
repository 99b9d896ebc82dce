// Public contract of the golf module.
//
// Purpose
// - One async interface for every caller (HTTP, GraphQL, tests), independent of
//   where games are stored.
//
// Responsibilities
// - `GolfService` routes each operation to its use case handler. Any GolfStore
//   gives the same observable behaviour through it.

use crate::modules::golf::core::model::{
    CourseLocation, Game, HoleResult, Player, PlayerScorecard, Season, SeasonStanding,
};
use crate::modules::golf::errors::GolfError;
use crate::modules::golf::use_cases::organize_season::handler::OrganizeSeasonHandler;
use crate::modules::golf::use_cases::play_game::command::StartGame;
use crate::modules::golf::use_cases::play_game::handler::PlayGameHandler;
use crate::modules::golf::use_cases::register_player::handler::RegisterPlayerHandler;
use crate::modules::golf::use_cases::season_stats::aggregation::SeasonStatsHandler;
use crate::shared::core::primitives::{Clock, IdGenerator};
use crate::shared::infrastructure::golf_store::GolfStore;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

#[async_trait]
pub trait GolfRepository: Send + Sync {
    async fn add_player(&self, name: &str) -> Result<Player, GolfError>;
    async fn remove_player(&self, player_id: &str) -> Result<(), GolfError>;
    async fn list_players(&self) -> Result<Vec<Player>, GolfError>;

    async fn create_season(&self, name: &str) -> Result<Season, GolfError>;
    async fn list_seasons(&self) -> Result<Vec<Season>, GolfError>;

    async fn add_location(
        &self,
        season_id: &str,
        location: CourseLocation,
    ) -> Result<CourseLocation, GolfError>;
    async fn list_locations(&self, season_id: &str) -> Result<Vec<CourseLocation>, GolfError>;

    async fn start_game(&self, command: StartGame) -> Result<Game, GolfError>;
    async fn record_hole_result(
        &self,
        game_id: &str,
        result: HoleResult,
    ) -> Result<Game, GolfError>;
    async fn finish_game(&self, game_id: &str) -> Result<Game, GolfError>;

    async fn player_scorecards(&self, player_id: &str)
    -> Result<Vec<PlayerScorecard>, GolfError>;
    async fn season_standings(&self, season_id: &str) -> Result<Vec<SeasonStanding>, GolfError>;
    async fn course_rankings(&self, course_id: &str) -> Result<Vec<PlayerScorecard>, GolfError>;

    /// `exported_on` falls back to the current date.
    async fn export_season_stats_csv(
        &self,
        season_id: &str,
        exported_on: Option<NaiveDate>,
    ) -> Result<String, GolfError>;
}

pub struct GolfService<TStore>
where
    TStore: GolfStore + 'static,
{
    players: RegisterPlayerHandler<TStore>,
    seasons: OrganizeSeasonHandler<TStore>,
    games: PlayGameHandler<TStore>,
    stats: SeasonStatsHandler<TStore>,
}

impl<TStore> GolfService<TStore>
where
    TStore: GolfStore + 'static,
{
    pub fn new(store: Arc<TStore>, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            players: RegisterPlayerHandler::new(store.clone(), ids.clone()),
            seasons: OrganizeSeasonHandler::new(store.clone(), clock.clone(), ids.clone()),
            games: PlayGameHandler::new(store.clone(), clock.clone(), ids),
            stats: SeasonStatsHandler::new(store, clock),
        }
    }
}

#[async_trait]
impl<TStore> GolfRepository for GolfService<TStore>
where
    TStore: GolfStore + 'static,
{
    async fn add_player(&self, name: &str) -> Result<Player, GolfError> {
        self.players.add_player(name).await
    }

    async fn remove_player(&self, player_id: &str) -> Result<(), GolfError> {
        self.players.remove_player(player_id).await
    }

    async fn list_players(&self) -> Result<Vec<Player>, GolfError> {
        self.players.list_players().await
    }

    async fn create_season(&self, name: &str) -> Result<Season, GolfError> {
        self.seasons.create_season(name).await
    }

    async fn list_seasons(&self) -> Result<Vec<Season>, GolfError> {
        self.seasons.list_seasons().await
    }

    async fn add_location(
        &self,
        season_id: &str,
        location: CourseLocation,
    ) -> Result<CourseLocation, GolfError> {
        self.seasons.add_location(season_id, location).await
    }

    async fn list_locations(&self, season_id: &str) -> Result<Vec<CourseLocation>, GolfError> {
        self.seasons.list_locations(season_id).await
    }

    async fn start_game(&self, command: StartGame) -> Result<Game, GolfError> {
        self.games.start_game(command).await
    }

    async fn record_hole_result(
        &self,
        game_id: &str,
        result: HoleResult,
    ) -> Result<Game, GolfError> {
        self.games.record_hole_result(game_id, result).await
    }

    async fn finish_game(&self, game_id: &str) -> Result<Game, GolfError> {
        self.games.finish_game(game_id).await
    }

    async fn player_scorecards(
        &self,
        player_id: &str,
    ) -> Result<Vec<PlayerScorecard>, GolfError> {
        self.stats.player_scorecards(player_id).await
    }

    async fn season_standings(&self, season_id: &str) -> Result<Vec<SeasonStanding>, GolfError> {
        self.stats.season_standings(season_id).await
    }

    async fn course_rankings(&self, course_id: &str) -> Result<Vec<PlayerScorecard>, GolfError> {
        self.stats.course_rankings(course_id).await
    }

    async fn export_season_stats_csv(
        &self,
        season_id: &str,
        exported_on: Option<NaiveDate>,
    ) -> Result<String, GolfError> {
        self.stats
            .export_season_stats_csv(season_id, exported_on)
            .await
    }
}
