use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QuerySelect, TransactionTrait};
use tracing::debug;

use crate::errors::ServiceError;
use models::ship;

use super::{NewShip, Ship};

/// Read-modify-write step run by [`ShipRepository::update_with`].
/// Returning an error aborts the update without persisting anything.
pub type ShipMutation = Box<dyn FnOnce(&mut Ship) -> Result<(), ServiceError> + Send>;

/// Persistence contract consumed by the ship service.
#[async_trait]
pub trait ShipRepository: Send + Sync {
    /// Insert a ship and return it with its assigned id.
    async fn save(&self, ship: NewShip) -> Result<Ship, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Ship>, ServiceError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError>;
    /// Every stored ship, ordered by id.
    async fn find_all(&self) -> Result<Vec<Ship>, ServiceError>;
    /// Atomically load the ship at `id`, run `mutation` on it and persist the
    /// result. `Ok(None)` when no ship exists at `id`.
    async fn update_with(&self, id: i64, mutation: ShipMutation) -> Result<Option<Ship>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmShipRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ShipRepository for SeaOrmShipRepository {
    async fn save(&self, ship: NewShip) -> Result<Ship, ServiceError> {
        Ok(ship::insert(&self.db, ship).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Ship>, ServiceError> {
        Ok(ship::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let n = ship::Entity::find_by_id(id).count(&self.db).await?;
        Ok(n > 0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        ship::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Ship>, ServiceError> {
        Ok(ship::list_all(&self.db).await?)
    }

    async fn update_with(&self, id: i64, mutation: ShipMutation) -> Result<Option<Ship>, ServiceError> {
        let txn = self.db.begin().await?;
        // Row lock held until commit; an early return drops `txn`, which rolls back.
        let Some(mut current) = ship::Entity::find_by_id(id).lock_exclusive().one(&txn).await? else {
            txn.rollback().await?;
            return Ok(None);
        };
        mutation(&mut current)?;
        let saved = ship::overwrite(&txn, current).await?;
        txn.commit().await?;
        debug!(id, "ship row rewritten");
        Ok(Some(saved))
    }
}

/// In-memory repository for tests and the `memory` storage backend.
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use tokio::sync::RwLock;

    #[derive(Default)]
    struct State {
        rows: BTreeMap<i64, Ship>,
        last_id: i64,
    }

    #[derive(Default)]
    pub struct MemoryShipRepository {
        state: RwLock<State>,
    }

    impl MemoryShipRepository {
        pub fn new() -> Self { Self::default() }

        pub async fn len(&self) -> usize { self.state.read().await.rows.len() }

        pub async fn is_empty(&self) -> bool { self.len().await == 0 }
    }

    #[async_trait]
    impl ShipRepository for MemoryShipRepository {
        async fn save(&self, ship: NewShip) -> Result<Ship, ServiceError> {
            let mut state = self.state.write().await;
            state.last_id += 1;
            let stored = ship.with_id(state.last_id);
            state.rows.insert(stored.id, stored.clone());
            Ok(stored)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Ship>, ServiceError> {
            Ok(self.state.read().await.rows.get(&id).cloned())
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.state.read().await.rows.contains_key(&id))
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
            self.state.write().await.rows.remove(&id);
            Ok(())
        }

        async fn find_all(&self) -> Result<Vec<Ship>, ServiceError> {
            Ok(self.state.read().await.rows.values().cloned().collect())
        }

        async fn update_with(&self, id: i64, mutation: ShipMutation) -> Result<Option<Ship>, ServiceError> {
            let mut state = self.state.write().await;
            let Some(mut working) = state.rows.get(&id).cloned() else {
                return Ok(None);
            };
            mutation(&mut working)?;
            state.rows.insert(id, working.clone());
            Ok(Some(working))
        }
    }
}
