use crate::modules::golf::core::model::{Game, HoleResult};
use crate::modules::golf::core::state::GameState;
use crate::modules::golf::errors::GolfError;
use crate::modules::golf::use_cases::play_game::command::StartGame;
use crate::modules::golf::use_cases::play_game::decide::{
    decide_finish_game, decide_record_hole_result, decide_start_game,
};
use crate::modules::golf::use_cases::play_game::decision::Decision;
use crate::shared::core::primitives::{Clock, IdGenerator};
use crate::shared::infrastructure::golf_store::GolfStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::sync::Mutex;

type GameLocks = StdMutex<HashMap<String, Arc<Mutex<()>>>>;

/// A share of one game's lock. The map entry goes away with its last lease.
struct GameLease<'a> {
    locks: &'a GameLocks,
    game_id: String,
    lock: Arc<Mutex<()>>,
}

impl Drop for GameLease<'_> {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // Leases are only cloned under the map lock: two holders means the map and us.
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.game_id);
        }
    }
}

/// Starts games and applies hole results and completion to them.
///
/// Mutations on the same game are serialized by a per-game lock, held only
/// while a known game has callers; the store's expected-length check catches
/// writers outside this handler.
pub struct PlayGameHandler<TStore>
where
    TStore: GolfStore + 'static,
{
    store: Arc<TStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    game_locks: GameLocks,
}

impl<TStore> PlayGameHandler<TStore>
where
    TStore: GolfStore + 'static,
{
    pub fn new(store: Arc<TStore>, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            store,
            clock,
            ids,
            game_locks: StdMutex::new(HashMap::new()),
        }
    }

    fn lease(&self, game_id: &str) -> GameLease<'_> {
        let lock = self
            .game_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(game_id.to_string())
            .or_default()
            .clone();
        GameLease {
            locks: &self.game_locks,
            game_id: game_id.to_string(),
            lock,
        }
    }

    async fn load(&self, game_id: &str) -> Result<Game, GolfError> {
        self.store
            .load_game(game_id)
            .await?
            .ok_or_else(|| GolfError::GameNotFound(game_id.to_string()))
    }

    pub async fn start_game(&self, command: StartGame) -> Result<Game, GolfError> {
        let game = decide_start_game(command, self.ids.next_id(), self.clock.now());
        self.store.insert_game(game.clone()).await?;
        tracing::info!(
            game_id = %game.id,
            season_id = %game.season_id,
            course_id = %game.course_id,
            players = game.player_ids.len(),
            "game started"
        );
        Ok(game)
    }

    pub async fn record_hole_result(
        &self,
        game_id: &str,
        result: HoleResult,
    ) -> Result<Game, GolfError> {
        self.load(game_id).await?;
        let lease = self.lease(game_id);
        let _guard = lease.lock.lock().await;

        let game = self.load(game_id).await?;
        let state = GameState::of(&game);

        match decide_record_hole_result(&state, &game, result) {
            Decision::Accepted { change } => {
                let hole_number = change.hole_number;
                let updated = self
                    .store
                    .append_hole_result(game_id, game.hole_results.len(), change)
                    .await?;
                tracing::info!(%game_id, hole_number, recorded = updated.hole_results.len(), "hole result recorded");
                Ok(updated)
            }
            Decision::Rejected { reason } => {
                tracing::warn!(%game_id, %reason, "hole result rejected");
                Err(reason.into())
            }
        }
    }

    pub async fn finish_game(&self, game_id: &str) -> Result<Game, GolfError> {
        self.load(game_id).await?;
        let lease = self.lease(game_id);
        let _guard = lease.lock.lock().await;

        let game = self.load(game_id).await?;
        match decide_finish_game(&GameState::of(&game), self.clock.now()) {
            Decision::Accepted { change } => {
                let finished = self.store.complete_game(game_id, change).await?;
                tracing::info!(%game_id, "game finished");
                Ok(finished)
            }
            Decision::Rejected { reason } => {
                tracing::warn!(%game_id, %reason, "finish rejected");
                Err(reason.into())
            }
        }
    }
}
