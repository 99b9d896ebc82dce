use crate::modules::golf::core::model::{CourseLocation, Season};
use crate::modules::golf::errors::GolfError;
use crate::modules::golf::use_cases::organize_season::decide::decide_create_season;
use crate::shared::core::primitives::{Clock, IdGenerator};
use crate::shared::infrastructure::golf_store::GolfStore;
use std::sync::Arc;

pub struct OrganizeSeasonHandler<TStore>
where
    TStore: GolfStore + 'static,
{
    store: Arc<TStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl<TStore> OrganizeSeasonHandler<TStore>
where
    TStore: GolfStore + 'static,
{
    pub fn new(store: Arc<TStore>, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, clock, ids }
    }

    pub async fn create_season(&self, name: &str) -> Result<Season, GolfError> {
        let player_count = self.store.count_players().await?;
        if let Err(reason) = decide_create_season(player_count) {
            tracing::warn!(%reason, "season rejected");
            return Err(reason.into());
        }

        let season = Season {
            id: self.ids.next_id(),
            name: name.trim().to_string(),
            created_at: self.clock.now(),
        };
        self.store.insert_season(season.clone()).await?;
        tracing::info!(season_id = %season.id, "season created");
        Ok(season)
    }

    /// Newest first; seasons created at the same instant are ordered by id.
    pub async fn list_seasons(&self) -> Result<Vec<Season>, GolfError> {
        let mut seasons = self.store.list_seasons().await?;
        seasons.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(seasons)
    }

    pub async fn add_location(
        &self,
        season_id: &str,
        location: CourseLocation,
    ) -> Result<CourseLocation, GolfError> {
        self.store
            .upsert_location(season_id, location.clone())
            .await?;
        tracing::info!(%season_id, location_id = %location.id, courses = location.courses.len(), "location added");
        Ok(location)
    }

    /// Sorted by name, then id. Courses keep the order they were added in.
    pub async fn list_locations(&self, season_id: &str) -> Result<Vec<CourseLocation>, GolfError> {
        let mut locations = self.store.list_locations(season_id).await?;
        locations.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(locations)
    }
}

#[cfg(test)]
mod organize_season_handler_tests {
    use super::*;
    use crate::modules::golf::core::model::{Course, Player};
    use crate::modules::golf::use_cases::organize_season::decide::SeasonDecideError;
    use crate::shared::core::primitives::{FixedClock, SequentialIds};
    use crate::shared::infrastructure::golf_store::in_memory::InMemoryGolfStore;
    use crate::tests::fixtures::locations::riverside_location;
    use chrono::{Duration, TimeZone, Utc};
    use rstest::{fixture, rstest};

    type BeforeEachReturn = (
        Arc<InMemoryGolfStore>,
        Arc<FixedClock>,
        OrganizeSeasonHandler<InMemoryGolfStore>,
    );

    #[fixture]
    fn before_each() -> BeforeEachReturn {
        let store = Arc::new(InMemoryGolfStore::new());
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).unwrap(),
        ));
        let handler = OrganizeSeasonHandler::new(
            store.clone(),
            clock.clone(),
            Arc::new(SequentialIds::new("season")),
        );
        (store, clock, handler)
    }

    async fn with_a_player(store: &InMemoryGolfStore) {
        store
            .insert_player(Player {
                id: "player-0001".into(),
                name: "Alice".into(),
            })
            .await
            .unwrap();
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_a_season_without_players(before_each: BeforeEachReturn) {
        let (store, _, handler) = before_each;
        let result = handler.create_season("Spring").await;
        assert!(matches!(
            result,
            Err(GolfError::PreconditionFailed(SeasonDecideError::NoPlayers))
        ));
        assert!(store.list_seasons().await.unwrap().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_create_a_season_stamped_by_the_clock(before_each: BeforeEachReturn) {
        let (store, clock, handler) = before_each;
        with_a_player(&store).await;

        let season = handler.create_season("  Spring 2024 ").await.unwrap();
        assert_eq!(season.id, "season-0001");
        assert_eq!(season.name, "Spring 2024");
        assert_eq!(season.created_at, clock.now());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_the_newest_season_first(before_each: BeforeEachReturn) {
        let (store, clock, handler) = before_each;
        with_a_player(&store).await;

        handler.create_season("Spring").await.unwrap();
        clock.advance(Duration::days(90));
        handler.create_season("Summer").await.unwrap();

        let names: Vec<String> = handler
            .list_seasons()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Summer", "Spring"]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_locations_by_name(before_each: BeforeEachReturn) {
        let (_, _, handler) = before_each;
        let hillside = CourseLocation {
            id: "location-hillside".into(),
            name: "Hillside".into(),
            courses: vec![Course {
                id: "course-hill".into(),
                name: "Hill Eighteen".into(),
                hole_count: 18,
            }],
        };
        handler
            .add_location("season-0001", riverside_location())
            .await
            .unwrap();
        handler.add_location("season-0001", hillside).await.unwrap();

        let locations = handler.list_locations("season-0001").await.unwrap();
        let names: Vec<&str> = locations.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Hillside", "Riverside"]);
        assert_eq!(locations[1].courses[0].id, "course-front");
        assert!(handler.list_locations("season-0002").await.unwrap().is_empty());
    }
}
