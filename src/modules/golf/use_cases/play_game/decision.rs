#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GameDecideError {
    #[error("game is already finished")]
    GameAlreadyFinished,

    #[error("player {player_id} cannot both win and lose hole {hole_number}")]
    WinnerAlsoLoser { player_id: String, hole_number: u32 },

    #[error("player {player_id} is not playing this game")]
    NotAParticipant { player_id: String },
}

/// What a decide function concluded. `T` is the change to persist.
#[derive(Debug, PartialEq, Eq)]
pub enum Decision<T> {
    Accepted { change: T },
    Rejected { reason: GameDecideError },
}
