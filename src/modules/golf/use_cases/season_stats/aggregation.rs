// Scorecards, standings and rankings composed from stored games.
//
// Purpose
// - Run the scoring functions over collections of games and shape the results.
//
// Responsibilities
// - Read only. Unknown seasons, courses and players give empty results.
// - Order every list deterministically: games by start time then id, standings
//   and rankings by score descending then player id.
// - Keep scorecards whose course cannot be resolved, named "Unknown Course".

use crate::modules::golf::core::model::{Game, PlayerScorecard, SeasonStanding};
use crate::modules::golf::core::scoring::{hole_in_ones_for_player, score_for_player};
use crate::modules::golf::errors::GolfError;
use crate::modules::golf::use_cases::season_stats::export::format_season_stats_csv;
use crate::shared::core::primitives::Clock;
use crate::shared::infrastructure::golf_store::{GameFilter, GolfStore};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

pub const UNKNOWN_COURSE: &str = "Unknown Course";

fn sort_games(games: &mut [Game]) {
    games.sort_by(|a, b| {
        a.started_at
            .cmp(&b.started_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

pub fn scorecard(game: &Game, player_id: &str, course_name: &str) -> PlayerScorecard {
    PlayerScorecard {
        player_id: player_id.to_string(),
        course_name: course_name.to_string(),
        score: score_for_player(game, player_id),
        date_played: game.date_played(),
        hole_in_one_count: hole_in_ones_for_player(game, player_id),
    }
}

/// Totals per participant across `games`, highest score first, ties by player id.
pub fn standings_for(games: &[Game]) -> Vec<SeasonStanding> {
    let mut totals: BTreeMap<&str, SeasonStanding> = BTreeMap::new();
    for game in games {
        for player_id in &game.player_ids {
            let standing = totals
                .entry(player_id.as_str())
                .or_insert_with(|| SeasonStanding {
                    player_id: player_id.clone(),
                    score: 0,
                    hole_in_one_count: 0,
                });
            standing.score += score_for_player(game, player_id);
            standing.hole_in_one_count += hole_in_ones_for_player(game, player_id);
        }
    }
    let mut standings: Vec<SeasonStanding> = totals.into_values().collect();
    standings.sort_by(|a, b| b.score.cmp(&a.score));
    standings
}

/// Highest score first, then player id, then earliest date.
pub fn rank_scorecards(scorecards: &mut [PlayerScorecard]) {
    scorecards.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.player_id.cmp(&b.player_id))
            .then_with(|| a.date_played.cmp(&b.date_played))
    });
}

pub struct SeasonStatsHandler<TStore>
where
    TStore: GolfStore + 'static,
{
    store: Arc<TStore>,
    clock: Arc<dyn Clock>,
}

impl<TStore> SeasonStatsHandler<TStore>
where
    TStore: GolfStore + 'static,
{
    pub fn new(store: Arc<TStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Resolves the course through the game's own location.
    async fn course_name(
        &self,
        game: &Game,
        known: &mut HashMap<(String, String), String>,
    ) -> Result<String, GolfError> {
        let key = (game.location_id.clone(), game.course_id.clone());
        if let Some(name) = known.get(&key) {
            return Ok(name.clone());
        }
        let name = match self.store.find_course(&key.0, &key.1).await? {
            Some(course) => course.name,
            None => {
                tracing::debug!(location_id = %key.0, course_id = %key.1, "course not found, using placeholder");
                UNKNOWN_COURSE.to_string()
            }
        };
        known.insert(key, name.clone());
        Ok(name)
    }

    /// One scorecard per game the player took part in, oldest game first.
    pub async fn player_scorecards(
        &self,
        player_id: &str,
    ) -> Result<Vec<PlayerScorecard>, GolfError> {
        let mut games = self
            .store
            .list_games(GameFilter::Participant(player_id))
            .await?;
        sort_games(&mut games);

        let mut course_names = HashMap::new();
        let mut scorecards = Vec::with_capacity(games.len());
        for game in &games {
            let course_name = self.course_name(game, &mut course_names).await?;
            scorecards.push(scorecard(game, player_id, &course_name));
        }
        tracing::debug!(%player_id, count = scorecards.len(), "player scorecards computed");
        Ok(scorecards)
    }

    pub async fn season_standings(&self, season_id: &str) -> Result<Vec<SeasonStanding>, GolfError> {
        let mut games = self.store.list_games(GameFilter::Season(season_id)).await?;
        sort_games(&mut games);
        let standings = standings_for(&games);
        tracing::debug!(%season_id, games = games.len(), players = standings.len(), "season standings computed");
        Ok(standings)
    }

    /// A scorecard for every participant of every game on the course.
    pub async fn course_rankings(&self, course_id: &str) -> Result<Vec<PlayerScorecard>, GolfError> {
        let mut games = self.store.list_games(GameFilter::Course(course_id)).await?;
        sort_games(&mut games);

        let mut course_names = HashMap::new();
        let mut rankings = Vec::new();
        for game in &games {
            let course_name = self.course_name(game, &mut course_names).await?;
            rankings.extend(
                game.player_ids
                    .iter()
                    .map(|player_id| scorecard(game, player_id, &course_name)),
            );
        }
        rank_scorecards(&mut rankings);
        Ok(rankings)
    }

    /// `exported_on` defaults to today's date on the injected clock.
    pub async fn export_season_stats_csv(
        &self,
        season_id: &str,
        exported_on: Option<NaiveDate>,
    ) -> Result<String, GolfError> {
        let standings = self.season_standings(season_id).await?;
        let player_names: HashMap<String, String> = self
            .store
            .list_players()
            .await?
            .into_iter()
            .map(|player| (player.id, player.name))
            .collect();
        let exported_on = exported_on.unwrap_or_else(|| self.clock.today());
        tracing::info!(%season_id, rows = standings.len(), %exported_on, "season stats exported");
        Ok(format_season_stats_csv(
            season_id,
            &standings,
            &player_names,
            exported_on,
        ))
    }
}
