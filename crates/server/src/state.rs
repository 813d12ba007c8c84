use std::sync::Arc;

use service::ship::repository::{memory::MemoryShipRepository, ShipRepository};
use service::ship::ShipService;

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub ships: Arc<ShipService<dyn ShipRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn ShipRepository>) -> Self {
        Self { ships: Arc::new(ShipService::new(repo)) }
    }

    /// State over an empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryShipRepository::new()))
    }
}
