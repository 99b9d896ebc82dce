use crate::modules::golf::repository::{GolfRepository, GolfService};
use crate::shared::core::primitives::{Clock, IdGenerator};
use crate::shared::infrastructure::golf_store::GolfStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn GolfRepository>,
    pub ids: Arc<dyn IdGenerator>,
}

impl AppState {
    pub fn new<TStore>(store: Arc<TStore>, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self
    where
        TStore: GolfStore + 'static,
    {
        Self {
            repository: Arc::new(GolfService::new(store, clock, ids.clone())),
            ids,
        }
    }
}
