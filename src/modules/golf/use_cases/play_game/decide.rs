// Pure decision functions for playing a game.
//
// Purpose
// - Validate a change against the current game and produce what should be stored.
//
// Responsibilities
// - Starting keeps the first occurrence of each participant id.
// - A hole result may only mention participants, and nobody can both win and lose it.
// - A finished game accepts no more hole results and cannot be finished again.
// - Never perform input or output.

use crate::modules::golf::core::model::{Game, HoleResult};
use crate::modules::golf::core::state::GameState;
use crate::modules::golf::use_cases::play_game::command::StartGame;
use crate::modules::golf::use_cases::play_game::decision::{Decision, GameDecideError};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

pub fn decide_start_game(command: StartGame, game_id: String, started_at: DateTime<Utc>) -> Game {
    let mut seen = HashSet::new();
    let player_ids = command
        .player_ids
        .into_iter()
        .filter(|player_id| seen.insert(player_id.clone()))
        .collect();

    Game {
        id: game_id,
        season_id: command.season_id,
        location_id: command.location_id,
        course_id: command.course_id,
        starting_hole: command.starting_hole,
        started_at,
        completed_at: None,
        player_ids,
        hole_results: Vec::new(),
    }
}

pub fn decide_record_hole_result(
    state: &GameState,
    game: &Game,
    result: HoleResult,
) -> Decision<HoleResult> {
    if !state.is_open() {
        return Decision::Rejected {
            reason: GameDecideError::GameAlreadyFinished,
        };
    }
    if let Some(player_id) = result.winners.intersection(&result.losers).next() {
        return Decision::Rejected {
            reason: GameDecideError::WinnerAlsoLoser {
                player_id: player_id.clone(),
                hole_number: result.hole_number,
            },
        };
    }
    if let Some(player_id) = result
        .mentioned_players()
        .into_iter()
        .find(|player_id| !game.is_participant(player_id))
    {
        return Decision::Rejected {
            reason: GameDecideError::NotAParticipant {
                player_id: player_id.to_string(),
            },
        };
    }
    Decision::Accepted { change: result }
}

pub fn decide_finish_game(state: &GameState, now: DateTime<Utc>) -> Decision<DateTime<Utc>> {
    match state {
        GameState::Open => Decision::Accepted { change: now },
        GameState::Finished { .. } => Decision::Rejected {
            reason: GameDecideError::GameAlreadyFinished,
        },
    }
}
