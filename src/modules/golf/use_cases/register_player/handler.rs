use crate::modules::golf::core::model::Player;
use crate::modules::golf::errors::GolfError;
use crate::shared::core::primitives::IdGenerator;
use crate::shared::infrastructure::golf_store::GolfStore;
use std::sync::Arc;

pub struct RegisterPlayerHandler<TStore>
where
    TStore: GolfStore + 'static,
{
    store: Arc<TStore>,
    ids: Arc<dyn IdGenerator>,
}

impl<TStore> RegisterPlayerHandler<TStore>
where
    TStore: GolfStore + 'static,
{
    pub fn new(store: Arc<TStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    pub async fn add_player(&self, name: &str) -> Result<Player, GolfError> {
        let player = Player {
            id: self.ids.next_id(),
            name: name.trim().to_string(),
        };
        self.store.insert_player(player.clone()).await?;
        tracing::info!(player_id = %player.id, "player added");
        Ok(player)
    }

    /// Games and hole results that mention the player are left as they are.
    pub async fn remove_player(&self, player_id: &str) -> Result<(), GolfError> {
        self.store.delete_player(player_id).await?;
        tracing::info!(%player_id, "player removed");
        Ok(())
    }

    /// Sorted by name, then id.
    pub async fn list_players(&self) -> Result<Vec<Player>, GolfError> {
        let mut players = self.store.list_players().await?;
        players.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        tracing::debug!(count = players.len(), "players listed");
        Ok(players)
    }
}

#[cfg(test)]
mod register_player_handler_tests {
    use super::*;
    use crate::shared::core::primitives::SequentialIds;
    use crate::shared::infrastructure::golf_store::in_memory::InMemoryGolfStore;
    use rstest::{fixture, rstest};

    #[fixture]
    fn before_each() -> RegisterPlayerHandler<InMemoryGolfStore> {
        RegisterPlayerHandler::new(
            Arc::new(InMemoryGolfStore::new()),
            Arc::new(SequentialIds::new("player")),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_trim_the_name_and_assign_an_id(
        before_each: RegisterPlayerHandler<InMemoryGolfStore>,
    ) {
        let player = before_each.add_player("  Alice \n").await.unwrap();
        assert_eq!(player.id, "player-0001");
        assert_eq!(player.name, "Alice");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_players_by_name_then_id(
        before_each: RegisterPlayerHandler<InMemoryGolfStore>,
    ) {
        before_each.add_player("Carol").await.unwrap();
        before_each.add_player("Alice").await.unwrap();
        before_each.add_player("Alice").await.unwrap();

        let players = before_each.list_players().await.unwrap();
        let listed: Vec<(&str, &str)> = players
            .iter()
            .map(|p| (p.name.as_str(), p.id.as_str()))
            .collect();
        assert_eq!(
            listed,
            vec![
                ("Alice", "player-0002"),
                ("Alice", "player-0003"),
                ("Carol", "player-0001"),
            ]
        );
        assert_eq!(before_each.list_players().await.unwrap(), players);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_remove_a_player(before_each: RegisterPlayerHandler<InMemoryGolfStore>) {
        let alice = before_each.add_player("Alice").await.unwrap();
        before_each.add_player("Bob").await.unwrap();
        before_each.remove_player(&alice.id).await.unwrap();

        let players = before_each.list_players().await.unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Bob");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_the_store_is_offline() {
        let mut store = InMemoryGolfStore::new();
        store.toggle_offline();
        let handler = RegisterPlayerHandler::new(Arc::new(store), Arc::new(SequentialIds::new("p")));
        let result = handler.add_player("Alice").await;
        assert!(matches!(result, Err(GolfError::Store(_))));
    }
}
