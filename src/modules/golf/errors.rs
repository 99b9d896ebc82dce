use crate::modules::golf::use_cases::organize_season::decide::SeasonDecideError;
use crate::modules::golf::use_cases::play_game::decision::GameDecideError;
use crate::shared::infrastructure::golf_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GolfError {
    #[error("game {0} not found")]
    GameNotFound(String),

    #[error("precondition failed: {0}")]
    PreconditionFailed(#[from] SeasonDecideError),

    #[error("domain rejected: {0}")]
    Rejected(#[from] GameDecideError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for GolfError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::GameMissing(game_id) => GolfError::GameNotFound(game_id),
            other => GolfError::Store(other),
        }
    }
}
