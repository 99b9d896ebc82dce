// Durable implementation of the GolfStore port backed by one JSON file.
//
// Purpose
// - Persist the normalized golf schema (players, seasons, locations, courses,
//   season_locations, games, game_players, hole_results, hole_result_players).
//
// Responsibilities
// - Apply each mutation to a copy of the tables, write it atomically on the
//   blocking pool, then swap it in. A failed write leaves the file and the
//   in-memory copy untouched.
// - Keep join rows consistent: replacing a location replaces its courses.

use crate::modules::golf::core::model::{Course, CourseLocation, Game, HoleResult, Player, Season};
use crate::shared::infrastructure::golf_store::{GameFilter, GolfStore, StoreError};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

const TABLES_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlayerRow {
    id: String,
    name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SeasonRow {
    id: String,
    name: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LocationRow {
    id: String,
    name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CourseRow {
    id: String,
    location_id: String,
    name: String,
    hole_count: u32,
    position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SeasonLocationRow {
    season_id: String,
    location_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GameRow {
    id: String,
    season_id: String,
    location_id: String,
    course_id: String,
    starting_hole: u32,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GamePlayerRow {
    game_id: String,
    player_id: String,
    position: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HoleResultRow {
    id: String,
    game_id: String,
    hole_number: u32,
    sequence: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
enum HoleOutcome {
    Win,
    Loss,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HoleResultPlayerRow {
    hole_result_id: String,
    player_id: String,
    outcome_type: Option<HoleOutcome>,
    hole_in_one: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GolfTables {
    version: u32,
    players: Vec<PlayerRow>,
    seasons: Vec<SeasonRow>,
    locations: Vec<LocationRow>,
    courses: Vec<CourseRow>,
    season_locations: Vec<SeasonLocationRow>,
    games: Vec<GameRow>,
    game_players: Vec<GamePlayerRow>,
    hole_results: Vec<HoleResultRow>,
    hole_result_players: Vec<HoleResultPlayerRow>,
}

impl Default for GolfTables {
    fn default() -> Self {
        Self {
            version: TABLES_VERSION,
            players: Vec::new(),
            seasons: Vec::new(),
            locations: Vec::new(),
            courses: Vec::new(),
            season_locations: Vec::new(),
            games: Vec::new(),
            game_players: Vec::new(),
            hole_results: Vec::new(),
            hole_result_players: Vec::new(),
        }
    }
}

impl GolfTables {
    fn courses_of(&self, location_id: &str) -> Vec<Course> {
        let mut rows: Vec<&CourseRow> = self
            .courses
            .iter()
            .filter(|course| course.location_id == location_id)
            .collect();
        rows.sort_by_key(|course| course.position);
        rows.into_iter()
            .map(|course| Course {
                id: course.id.clone(),
                name: course.name.clone(),
                hole_count: course.hole_count,
            })
            .collect()
    }

    fn hole_results_of(&self, game_id: &str) -> Vec<HoleResult> {
        let mut rows: Vec<&HoleResultRow> = self
            .hole_results
            .iter()
            .filter(|hole| hole.game_id == game_id)
            .collect();
        rows.sort_by_key(|hole| hole.sequence);
        rows.into_iter()
            .map(|hole| {
                let mut result = HoleResult::hole(hole.hole_number);
                for player in self
                    .hole_result_players
                    .iter()
                    .filter(|player| player.hole_result_id == hole.id)
                {
                    match player.outcome_type {
                        Some(HoleOutcome::Win) => {
                            result.winners.insert(player.player_id.clone());
                        }
                        Some(HoleOutcome::Loss) => {
                            result.losers.insert(player.player_id.clone());
                        }
                        None => {}
                    }
                    if player.hole_in_one {
                        result.hole_in_one_players.insert(player.player_id.clone());
                    }
                }
                result
            })
            .collect()
    }

    fn game(&self, row: &GameRow) -> Game {
        let mut participants: Vec<&GamePlayerRow> = self
            .game_players
            .iter()
            .filter(|participant| participant.game_id == row.id)
            .collect();
        participants.sort_by_key(|participant| participant.position);
        Game {
            id: row.id.clone(),
            season_id: row.season_id.clone(),
            location_id: row.location_id.clone(),
            course_id: row.course_id.clone(),
            starting_hole: row.starting_hole,
            started_at: row.started_at,
            completed_at: row.completed_at,
            player_ids: participants
                .into_iter()
                .map(|participant| participant.player_id.clone())
                .collect(),
            hole_results: self.hole_results_of(&row.id),
        }
    }

    fn game_by_id(&self, game_id: &str) -> Option<Game> {
        self.games
            .iter()
            .find(|row| row.id == game_id)
            .map(|row| self.game(row))
    }

    fn push_hole_result(&mut self, game_id: &str, sequence: usize, result: HoleResult) {
        let hole_result_id = format!("{game_id}#{sequence}");
        self.hole_results.push(HoleResultRow {
            id: hole_result_id.clone(),
            game_id: game_id.to_string(),
            hole_number: result.hole_number,
            sequence,
        });
        for player_id in result.mentioned_players() {
            let outcome_type = if result.winners.contains(player_id) {
                Some(HoleOutcome::Win)
            } else if result.losers.contains(player_id) {
                Some(HoleOutcome::Loss)
            } else {
                None
            };
            self.hole_result_players.push(HoleResultPlayerRow {
                hole_result_id: hole_result_id.clone(),
                player_id: player_id.to_string(),
                outcome_type,
                hole_in_one: result.hole_in_one_players.contains(player_id),
            });
        }
    }
}

fn load_tables(path: &Path) -> Result<GolfTables, StoreError> {
    if !path.exists() {
        return Ok(GolfTables::default());
    }
    let file = File::open(path).map_err(|err| {
        StoreError::Backend(format!("failed to open {}: {err}", path.display()))
    })?;
    let tables: GolfTables = serde_json::from_reader(file).map_err(|err| {
        StoreError::Backend(format!("failed to read {}: {err}", path.display()))
    })?;
    if tables.version != TABLES_VERSION {
        return Err(StoreError::Backend(format!(
            "unsupported golf data version: {}",
            tables.version
        )));
    }
    Ok(tables)
}

fn save_tables(path: &Path, tables: &GolfTables) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            StoreError::Backend(format!("failed to create {}: {err}", parent.display()))
        })?;
    }
    let mut file = AtomicWriteFile::open(path).map_err(|err| {
        StoreError::Backend(format!("failed to open {}: {err}", path.display()))
    })?;
    serde_json::to_writer_pretty(&mut file, tables)
        .map_err(|err| StoreError::Backend(format!("failed to serialize golf data: {err}")))?;
    file.commit().map_err(|err| {
        StoreError::Backend(format!("failed to save {}: {err}", path.display()))
    })?;
    Ok(())
}

pub struct JsonFileGolfStore {
    path: PathBuf,
    tables: RwLock<GolfTables>,
}

impl JsonFileGolfStore {
    /// Opens the data file, starting empty when it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tables = load_tables(&path)?;
        tracing::debug!(path = %path.display(), games = tables.games.len(), "golf data loaded");
        Ok(Self {
            path,
            tables: RwLock::new(tables),
        })
    }

    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut GolfTables) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.tables.write().await;
        let mut next = guard.clone();
        let outcome = change(&mut next)?;
        let path = self.path.clone();
        let next = tokio::task::spawn_blocking(move || save_tables(&path, &next).map(|()| next))
            .await
            .map_err(|err| StoreError::Backend(format!("golf data write task failed: {err}")))??;
        *guard = next;
        Ok(outcome)
    }
}

#[async_trait::async_trait]
impl GolfStore for JsonFileGolfStore {
    async fn insert_player(&self, player: Player) -> Result<(), StoreError> {
        self.mutate(|tables| {
            tables.players.retain(|row| row.id != player.id);
            tables.players.push(PlayerRow {
                id: player.id,
                name: player.name,
            });
            Ok(())
        })
        .await
    }

    async fn delete_player(&self, player_id: &str) -> Result<(), StoreError> {
        self.mutate(|tables| {
            tables.players.retain(|row| row.id != player_id);
            Ok(())
        })
        .await
    }

    async fn list_players(&self) -> Result<Vec<Player>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .players
            .iter()
            .map(|row| Player {
                id: row.id.clone(),
                name: row.name.clone(),
            })
            .collect())
    }

    async fn count_players(&self) -> Result<usize, StoreError> {
        Ok(self.tables.read().await.players.len())
    }

    async fn insert_season(&self, season: Season) -> Result<(), StoreError> {
        self.mutate(|tables| {
            tables.seasons.retain(|row| row.id != season.id);
            tables.seasons.push(SeasonRow {
                id: season.id,
                name: season.name,
                created_at: season.created_at,
            });
            Ok(())
        })
        .await
    }

    async fn list_seasons(&self) -> Result<Vec<Season>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .seasons
            .iter()
            .map(|row| Season {
                id: row.id.clone(),
                name: row.name.clone(),
                created_at: row.created_at,
            })
            .collect())
    }

    async fn upsert_location(
        &self,
        season_id: &str,
        location: CourseLocation,
    ) -> Result<(), StoreError> {
        self.mutate(|tables| {
            tables.locations.retain(|row| row.id != location.id);
            tables.courses.retain(|row| row.location_id != location.id);
            tables.locations.push(LocationRow {
                id: location.id.clone(),
                name: location.name,
            });
            for (position, course) in location.courses.into_iter().enumerate() {
                tables.courses.push(CourseRow {
                    id: course.id,
                    location_id: location.id.clone(),
                    name: course.name,
                    hole_count: course.hole_count,
                    position,
                });
            }
            let link = SeasonLocationRow {
                season_id: season_id.to_string(),
                location_id: location.id,
            };
            if !tables.season_locations.contains(&link) {
                tables.season_locations.push(link);
            }
            Ok(())
        })
        .await
    }

    async fn list_locations(&self, season_id: &str) -> Result<Vec<CourseLocation>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .season_locations
            .iter()
            .filter(|link| link.season_id == season_id)
            .filter_map(|link| tables.locations.iter().find(|row| row.id == link.location_id))
            .map(|row| CourseLocation {
                id: row.id.clone(),
                name: row.name.clone(),
                courses: tables.courses_of(&row.id),
            })
            .collect())
    }

    async fn find_course(
        &self,
        location_id: &str,
        course_id: &str,
    ) -> Result<Option<Course>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .courses
            .iter()
            .find(|row| row.location_id == location_id && row.id == course_id)
            .map(|row| Course {
                id: row.id.clone(),
                name: row.name.clone(),
                hole_count: row.hole_count,
            }))
    }

    async fn insert_game(&self, game: Game) -> Result<(), StoreError> {
        self.mutate(|tables| {
            tables.games.retain(|row| row.id != game.id);
            tables.game_players.retain(|row| row.game_id != game.id);
            tables.games.push(GameRow {
                id: game.id.clone(),
                season_id: game.season_id,
                location_id: game.location_id,
                course_id: game.course_id,
                starting_hole: game.starting_hole,
                started_at: game.started_at,
                completed_at: game.completed_at,
            });
            for (position, player_id) in game.player_ids.into_iter().enumerate() {
                tables.game_players.push(GamePlayerRow {
                    game_id: game.id.clone(),
                    player_id,
                    position,
                });
            }
            for (sequence, result) in game.hole_results.into_iter().enumerate() {
                tables.push_hole_result(&game.id, sequence, result);
            }
            Ok(())
        })
        .await
    }

    async fn load_game(&self, game_id: &str) -> Result<Option<Game>, StoreError> {
        Ok(self.tables.read().await.game_by_id(game_id))
    }

    async fn list_games(&self, filter: GameFilter<'_>) -> Result<Vec<Game>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .games
            .iter()
            .map(|row| tables.game(row))
            .filter(|game| filter.matches(game))
            .collect())
    }

    async fn append_hole_result(
        &self,
        game_id: &str,
        expected_len: usize,
        result: HoleResult,
    ) -> Result<Game, StoreError> {
        self.mutate(|tables| {
            if !tables.games.iter().any(|row| row.id == game_id) {
                return Err(StoreError::GameMissing(game_id.to_string()));
            }
            let actual = tables
                .hole_results
                .iter()
                .filter(|hole| hole.game_id == game_id)
                .count();
            if actual != expected_len {
                return Err(StoreError::VersionMismatch {
                    game_id: game_id.to_string(),
                    expected: expected_len,
                    actual,
                });
            }
            tables.push_hole_result(game_id, actual, result);
            tables
                .game_by_id(game_id)
                .ok_or_else(|| StoreError::GameMissing(game_id.to_string()))
        })
        .await
    }

    async fn complete_game(
        &self,
        game_id: &str,
        completed_at: DateTime<Utc>,
    ) -> Result<Game, StoreError> {
        self.mutate(|tables| {
            let row = tables
                .games
                .iter_mut()
                .find(|row| row.id == game_id)
                .ok_or_else(|| StoreError::GameMissing(game_id.to_string()))?;
            row.completed_at = Some(completed_at);
            tables
                .game_by_id(game_id)
                .ok_or_else(|| StoreError::GameMissing(game_id.to_string()))
        })
        .await
    }
}
