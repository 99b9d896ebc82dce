// Pure scoring over a game's hole results.
//
// Boundaries
// - No input or output. Unknown player ids score zero.

use crate::modules::golf::core::model::Game;

/// Net score: holes won minus holes lost.
pub fn score_for_player(game: &Game, player_id: &str) -> i32 {
    game.hole_results
        .iter()
        .map(|result| {
            let won = i32::from(result.winners.contains(player_id));
            let lost = i32::from(result.losers.contains(player_id));
            won - lost
        })
        .sum()
}

pub fn hole_in_ones_for_player(game: &Game, player_id: &str) -> u32 {
    game.hole_results
        .iter()
        .filter(|result| result.hole_in_one_players.contains(player_id))
        .count() as u32
}
