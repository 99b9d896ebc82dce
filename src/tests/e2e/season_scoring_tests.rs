// End to end scenarios through the repository facade on the in-memory store.

use crate::modules::golf::core::model::HoleResult;
use crate::modules::golf::core::scoring::{hole_in_ones_for_player, score_for_player};
use crate::modules::golf::repository::{GolfRepository, GolfService};
use crate::modules::golf::use_cases::play_game::command::StartGame;
use crate::shared::core::primitives::{FixedClock, SequentialIds};
use crate::shared::infrastructure::golf_store::in_memory::InMemoryGolfStore;
use crate::tests::fixtures::locations::riverside_location;
use chrono::{NaiveDate, TimeZone, Utc};
use std::sync::Arc;

fn service() -> GolfService<InMemoryGolfStore> {
    GolfService::new(
        Arc::new(InMemoryGolfStore::new()),
        Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        )),
        Arc::new(SequentialIds::new("id")),
    )
}

#[tokio::test]
async fn scores_a_two_hole_game_as_a_draw_with_one_hole_in_one() {
    let golf = service();
    let a = golf.add_player("A").await.unwrap();
    let b = golf.add_player("B").await.unwrap();
    let season = golf.create_season("Spring").await.unwrap();
    golf.add_location(&season.id, riverside_location())
        .await
        .unwrap();

    let game = golf
        .start_game(StartGame {
            season_id: season.id.clone(),
            location_id: "location-riverside".into(),
            course_id: "course-front".into(),
            starting_hole: 1,
            player_ids: vec![a.id.clone(), b.id.clone()],
        })
        .await
        .unwrap();
    golf.record_hole_result(
        &game.id,
        HoleResult::hole(1).won_by([a.id.as_str()]).lost_by([b.id.as_str()]),
    )
    .await
    .unwrap();
    let game = golf
        .record_hole_result(
            &game.id,
            HoleResult::hole(2)
                .won_by([b.id.as_str()])
                .lost_by([a.id.as_str()])
                .hole_in_one_by([a.id.as_str()]),
        )
        .await
        .unwrap();

    assert_eq!(score_for_player(&game, &a.id), 0);
    assert_eq!(score_for_player(&game, &b.id), 0);
    assert_eq!(hole_in_ones_for_player(&game, &a.id), 1);
    assert_eq!(hole_in_ones_for_player(&game, &b.id), 0);

    let scorecards = golf.player_scorecards(&a.id).await.unwrap();
    assert_eq!(scorecards.len(), 1);
    assert_eq!(scorecards[0].course_name, "Front Nine");
    assert_eq!(scorecards[0].hole_in_one_count, 1);

    let rankings = golf.course_rankings("course-front").await.unwrap();
    assert_eq!(rankings.len(), 2);
    assert!(rankings.iter().all(|card| card.score == 0));
}

#[tokio::test]
async fn exports_a_single_standing_exactly() {
    let golf = service();
    let alice = golf.add_player("Alice").await.unwrap();
    let bob = golf.add_player("Bob").await.unwrap();
    let season = golf.create_season("s1").await.unwrap();

    let game = golf
        .start_game(StartGame {
            season_id: season.id.clone(),
            location_id: "location-riverside".into(),
            course_id: "course-front".into(),
            starting_hole: 1,
            player_ids: vec![alice.id.clone()],
        })
        .await
        .unwrap();
    for hole in 1..=3 {
        let result = HoleResult::hole(hole).won_by([alice.id.as_str()]);
        let result = if hole == 2 {
            result.hole_in_one_by([alice.id.as_str()])
        } else {
            result
        };
        golf.record_hole_result(&game.id, result).await.unwrap();
    }
    golf.remove_player(&bob.id).await.unwrap();

    let csv = golf
        .export_season_stats_csv(&season.id, NaiveDate::from_ymd_opt(2024, 5, 1))
        .await
        .unwrap();
    assert_eq!(
        csv,
        format!(
            "Season,Player,Score,HoleInOnes,ExportedOn\n{},Alice,3,1,2024-05-01",
            season.id
        )
    );
}

#[tokio::test]
async fn keeps_history_after_a_player_is_removed() {
    let golf = service();
    let alice = golf.add_player("Alice").await.unwrap();
    let bob = golf.add_player("Bob").await.unwrap();
    let season = golf.create_season("Spring").await.unwrap();
    let game = golf
        .start_game(StartGame {
            season_id: season.id.clone(),
            location_id: "location-riverside".into(),
            course_id: "course-front".into(),
            starting_hole: 1,
            player_ids: vec![alice.id.clone(), bob.id.clone()],
        })
        .await
        .unwrap();
    golf.record_hole_result(
        &game.id,
        HoleResult::hole(1).won_by([bob.id.as_str()]).lost_by([alice.id.as_str()]),
    )
    .await
    .unwrap();

    golf.remove_player(&bob.id).await.unwrap();

    let standings = golf.season_standings(&season.id).await.unwrap();
    assert_eq!(standings[0].player_id, bob.id);
    assert_eq!(standings[0].score, 1);
    let csv = golf
        .export_season_stats_csv(&season.id, None)
        .await
        .unwrap();
    assert!(csv.contains(",Unknown,1,0,2024-05-01"));
}

#[tokio::test]
async fn lists_are_stable_without_mutations() {
    let golf = service();
    golf.add_player("Zed").await.unwrap();
    golf.add_player("Amy").await.unwrap();
    let season = golf.create_season("Spring").await.unwrap();
    golf.add_location(&season.id, riverside_location())
        .await
        .unwrap();

    assert_eq!(
        golf.list_players().await.unwrap(),
        golf.list_players().await.unwrap()
    );
    assert_eq!(
        golf.list_seasons().await.unwrap(),
        golf.list_seasons().await.unwrap()
    );
    assert_eq!(
        golf.list_locations(&season.id).await.unwrap(),
        golf.list_locations(&season.id).await.unwrap()
    );
    assert_eq!(golf.list_players().await.unwrap()[0].name, "Amy");
}
