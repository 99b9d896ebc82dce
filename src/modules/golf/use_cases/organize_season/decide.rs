// Pure decision for opening a season.
//
// Responsibilities
// - A season needs at least one registered player.
// - Never perform input or output.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeasonDecideError {
    #[error("Create at least one player before starting a season.")]
    NoPlayers,
}

pub fn decide_create_season(player_count: usize) -> Result<(), SeasonDecideError> {
    if player_count == 0 {
        return Err(SeasonDecideError::NoPlayers);
    }
    Ok(())
}

#[cfg(test)]
mod organize_season_decide_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::no_players(0, Err(SeasonDecideError::NoPlayers))]
    #[case::one_player(1, Ok(()))]
    #[case::many_players(12, Ok(()))]
    fn it_should_decide_on_the_player_count(
        #[case] player_count: usize,
        #[case] expected: Result<(), SeasonDecideError>,
    ) {
        assert_eq!(decide_create_season(player_count), expected);
    }
}
