// In memory implementation of the GolfStore port.
//
// Purpose
// - Support handler tests and local development without a data file.
//
// Responsibilities
// - Keep every collection indexed by id behind a single RwLock, so writes are
//   serialized and reads observe a consistent snapshot.
// - Hold locations as one catalog linked to seasons, like the durable store.
// - Enforce the expected hole-result count on append.

use crate::modules::golf::core::model::{Course, CourseLocation, Game, HoleResult, Player, Season};
use crate::shared::infrastructure::golf_store::{GameFilter, GolfStore, StoreError};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    players: HashMap<String, Player>,
    seasons: HashMap<String, Season>,
    locations: Vec<CourseLocation>,
    season_locations: Vec<(String, String)>,
    games: HashMap<String, Game>,
}

#[derive(Default)]
pub struct InMemoryGolfStore {
    tables: RwLock<Tables>,
    is_offline: bool,
    delay_append_ms: AtomicU64,
}

impl InMemoryGolfStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub fn set_delay_append_ms(&self, ms: u64) {
        self.delay_append_ms.store(ms, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.is_offline {
            return Err(StoreError::Backend("Golf store offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl GolfStore for InMemoryGolfStore {
    async fn insert_player(&self, player: Player) -> Result<(), StoreError> {
        self.ensure_online()?;
        self.tables
            .write()
            .await
            .players
            .insert(player.id.clone(), player);
        Ok(())
    }

    async fn delete_player(&self, player_id: &str) -> Result<(), StoreError> {
        self.ensure_online()?;
        self.tables.write().await.players.remove(player_id);
        Ok(())
    }

    async fn list_players(&self) -> Result<Vec<Player>, StoreError> {
        self.ensure_online()?;
        Ok(self.tables.read().await.players.values().cloned().collect())
    }

    async fn count_players(&self) -> Result<usize, StoreError> {
        self.ensure_online()?;
        Ok(self.tables.read().await.players.len())
    }

    async fn insert_season(&self, season: Season) -> Result<(), StoreError> {
        self.ensure_online()?;
        self.tables
            .write()
            .await
            .seasons
            .insert(season.id.clone(), season);
        Ok(())
    }

    async fn list_seasons(&self) -> Result<Vec<Season>, StoreError> {
        self.ensure_online()?;
        Ok(self.tables.read().await.seasons.values().cloned().collect())
    }

    async fn upsert_location(
        &self,
        season_id: &str,
        location: CourseLocation,
    ) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let link = (season_id.to_string(), location.id.clone());
        tables.locations.retain(|known| known.id != location.id);
        tables.locations.push(location);
        if !tables.season_locations.contains(&link) {
            tables.season_locations.push(link);
        }
        Ok(())
    }

    async fn list_locations(&self, season_id: &str) -> Result<Vec<CourseLocation>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .season_locations
            .iter()
            .filter(|(linked_season, _)| linked_season == season_id)
            .filter_map(|(_, location_id)| {
                tables.locations.iter().find(|known| &known.id == location_id)
            })
            .cloned()
            .collect())
    }

    async fn find_course(
        &self,
        location_id: &str,
        course_id: &str,
    ) -> Result<Option<Course>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .locations
            .iter()
            .find(|location| location.id == location_id)
            .and_then(|location| location.course(course_id))
            .cloned())
    }

    async fn insert_game(&self, game: Game) -> Result<(), StoreError> {
        self.ensure_online()?;
        self.tables.write().await.games.insert(game.id.clone(), game);
        Ok(())
    }

    async fn load_game(&self, game_id: &str) -> Result<Option<Game>, StoreError> {
        self.ensure_online()?;
        Ok(self.tables.read().await.games.get(game_id).cloned())
    }

    async fn list_games(&self, filter: GameFilter<'_>) -> Result<Vec<Game>, StoreError> {
        self.ensure_online()?;
        Ok(self
            .tables
            .read()
            .await
            .games
            .values()
            .filter(|game| filter.matches(game))
            .cloned()
            .collect())
    }

    async fn append_hole_result(
        &self,
        game_id: &str,
        expected_len: usize,
        result: HoleResult,
    ) -> Result<Game, StoreError> {
        self.ensure_online()?;
        let delay = self.delay_append_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        let mut tables = self.tables.write().await;
        let game = tables
            .games
            .get_mut(game_id)
            .ok_or_else(|| StoreError::GameMissing(game_id.to_string()))?;
        let actual = game.hole_results.len();
        if actual != expected_len {
            return Err(StoreError::VersionMismatch {
                game_id: game_id.to_string(),
                expected: expected_len,
                actual,
            });
        }
        game.hole_results.push(result);
        Ok(game.clone())
    }

    async fn complete_game(
        &self,
        game_id: &str,
        completed_at: DateTime<Utc>,
    ) -> Result<Game, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let game = tables
            .games
            .get_mut(game_id)
            .ok_or_else(|| StoreError::GameMissing(game_id.to_string()))?;
        game.completed_at = Some(completed_at);
        Ok(game.clone())
    }
}

#[cfg(test)]
mod golf_in_memory_store_tests {
    use super::*;
    use crate::modules::golf::core::model::HoleResult;
    use crate::tests::fixtures::games::GameBuilder;
    use crate::tests::fixtures::locations::riverside_location;
    use rstest::{fixture, rstest};

    #[fixture]
    fn before_each() -> (Game, InMemoryGolfStore) {
        let game = GameBuilder::new().players(["alice", "bob"]).build();
        (game, InMemoryGolfStore::new())
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_append_hole_results_in_insertion_order(before_each: (Game, InMemoryGolfStore)) {
        let (game, store) = before_each;
        store.insert_game(game.clone()).await.unwrap();
        store
            .append_hole_result(&game.id, 0, HoleResult::hole(3).won_by(["alice"]))
            .await
            .expect("first append failed");
        let updated = store
            .append_hole_result(&game.id, 1, HoleResult::hole(1).won_by(["bob"]))
            .await
            .expect("second append failed");
        let holes: Vec<u32> = updated.hole_results.iter().map(|r| r.hole_number).collect();
        assert_eq!(holes, vec![3, 1]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_to_append_if_the_wrong_length_is_expected(
        before_each: (Game, InMemoryGolfStore),
    ) {
        let (game, store) = before_each;
        store.insert_game(game.clone()).await.unwrap();
        let result = store
            .append_hole_result(&game.id, 2, HoleResult::hole(1))
            .await;
        match result {
            Err(StoreError::VersionMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 0);
            }
            other => panic!("expected VersionMismatch, got {other:?}"),
        }
        let stored = store.load_game(&game.id).await.unwrap().unwrap();
        assert!(stored.hole_results.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_a_missing_game_on_append(before_each: (Game, InMemoryGolfStore)) {
        let (_, store) = before_each;
        let result = store
            .append_hole_result("game-nope", 0, HoleResult::hole(1))
            .await;
        assert!(matches!(result, Err(StoreError::GameMissing(id)) if id == "game-nope"));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_filter_games(before_each: (Game, InMemoryGolfStore)) {
        let (game, store) = before_each;
        let other = GameBuilder::new()
            .id("game-0002")
            .season_id("season-other")
            .course_id("course-other")
            .players(["carol"])
            .build();
        store.insert_game(game.clone()).await.unwrap();
        store.insert_game(other).await.unwrap();

        let by_season = store.list_games(GameFilter::Season(&game.season_id)).await.unwrap();
        let by_course = store.list_games(GameFilter::Course("course-other")).await.unwrap();
        let by_player = store.list_games(GameFilter::Participant("bob")).await.unwrap();

        assert_eq!(by_season.len(), 1);
        assert_eq!(by_course[0].id, "game-0002");
        assert_eq!(by_player[0].id, game.id);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_replace_a_location_with_the_same_id(before_each: (Game, InMemoryGolfStore)) {
        let (_, store) = before_each;
        let mut location = riverside_location();
        store.upsert_location("season-1", location.clone()).await.unwrap();
        location.name = "Riverside Links".into();
        store.upsert_location("season-1", location).await.unwrap();

        let locations = store.list_locations("season-1").await.unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].name, "Riverside Links");
        assert_eq!(
            store
                .find_course("location-riverside", "course-front")
                .await
                .unwrap()
                .unwrap()
                .name,
            "Front Nine"
        );
        assert!(store.list_locations("season-2").await.unwrap().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_share_a_location_between_seasons(before_each: (Game, InMemoryGolfStore)) {
        let (_, store) = before_each;
        let mut location = riverside_location();
        store.upsert_location("season-1", location.clone()).await.unwrap();
        location.courses.truncate(1);
        location.courses[0].name = "Front Nine (new)".into();
        store.upsert_location("season-2", location.clone()).await.unwrap();

        assert_eq!(store.list_locations("season-1").await.unwrap(), vec![location.clone()]);
        assert_eq!(store.list_locations("season-2").await.unwrap(), vec![location]);
        assert!(
            store
                .find_course("location-riverside", "course-back")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_the_store_is_offline(before_each: (Game, InMemoryGolfStore)) {
        let (game, mut store) = before_each;
        store.toggle_offline();
        let result = store.insert_game(game).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Golf store offline"));
    }
}
