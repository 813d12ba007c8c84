use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::ShipDraft;
use super::query::{self, ShipCriteria, SortField};
use super::rating::rating_of;
use super::repository::ShipRepository;
use super::validation;
use super::Ship;
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Application service encapsulating ship business rules.
/// Validates payloads, keeps ratings current and answers list/count queries.
pub struct ShipService<R: ShipRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ShipRepository + ?Sized> ShipService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Validate and store a new ship.
    ///
    /// # Examples
    /// ```
    /// use service::ship::{ShipService, ShipDraft, ShipType, repository::memory::MemoryShipRepository};
    /// use chrono::TimeZone;
    /// use std::sync::Arc;
    /// let svc = ShipService::new(Arc::new(MemoryShipRepository::new()));
    /// let draft = ShipDraft {
    ///     name: Some("Eagle".into()),
    ///     planet: Some("Earth".into()),
    ///     ship_type: Some(ShipType::Transport),
    ///     prod_date: Some(chrono::Utc.with_ymd_and_hms(3000, 7, 1, 12, 0, 0).unwrap()),
    ///     speed: Some(0.5),
    ///     crew_size: Some(50),
    ///     ..Default::default()
    /// };
    /// let ship = tokio_test::block_on(svc.create(draft)).unwrap();
    /// assert!(!ship.is_used);
    /// assert_eq!(ship.rating, 2.0);
    /// ```
    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: ShipDraft) -> Result<Ship, ServiceError> {
        let mut ship = validation::into_new_ship(draft)?;
        ship.rating = super::rating::compute_rating(ship.speed, ship.is_used, &ship.prod_date);
        let stored = self.repo.save(ship).await?;
        info!(id = stored.id, name = %stored.name, rating = stored.rating, "ship_created");
        Ok(stored)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Ship, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("ship"))
    }

    /// Apply the present fields of `draft` to the ship at `id` and recompute
    /// its rating, as one atomic read-modify-write.
    ///
    /// A missing ship wins over a missing payload: both yield an error, but
    /// `NotFound` is reported first.
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: i64, draft: Option<ShipDraft>) -> Result<Ship, ServiceError> {
        let Some(draft) = draft else {
            if !self.repo.exists_by_id(id).await? {
                return Err(ServiceError::not_found("ship"));
            }
            return Err(ServiceError::Validation("update payload is required".into()));
        };

        let mutation = Box::new(move |ship: &mut Ship| -> Result<(), ServiceError> {
            validation::apply_updates(&draft, ship)?;
            ship.rating = rating_of(ship);
            Ok(())
        });
        let updated = self
            .repo
            .update_with(id, mutation)
            .await?
            .ok_or_else(|| ServiceError::not_found("ship"))?;
        info!(id, rating = updated.rating, "ship_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(ServiceError::not_found("ship"));
        }
        self.repo.delete_by_id(id).await?;
        info!(id, "ship_deleted");
        Ok(())
    }

    /// All ships matching `criteria`, in store order.
    pub async fn find(&self, criteria: &ShipCriteria) -> Result<Vec<Ship>, ServiceError> {
        let all = self.repo.find_all().await?;
        let total = all.len();
        let found = query::filter(all, criteria);
        debug!(total, matched = found.len(), "ships_filtered");
        Ok(found)
    }

    /// One page of matching ships ordered ascending by `order`.
    pub async fn list(
        &self,
        criteria: &ShipCriteria,
        order: Option<&str>,
        page: Pagination,
    ) -> Result<Vec<Ship>, ServiceError> {
        let found = self.find(criteria).await?;
        Ok(query::paginate(found, SortField::resolve(order), page))
    }

    pub async fn count(&self, criteria: &ShipCriteria) -> Result<usize, ServiceError> {
        Ok(self.find(criteria).await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::repository::memory::MemoryShipRepository;
    use crate::test_support::{complete_draft, mid_year};
    use models::ship::ShipType;

    fn service() -> (ShipService<MemoryShipRepository>, Arc<MemoryShipRepository>) {
        let repo = Arc::new(MemoryShipRepository::new());
        (ShipService::new(Arc::clone(&repo)), repo)
    }

    fn draft(name: &str, speed: f64, year: i32) -> ShipDraft {
        ShipDraft {
            name: Some(name.into()),
            speed: Some(speed),
            prod_date: Some(mid_year(year)),
            ..complete_draft()
        }
    }

    #[tokio::test]
    async fn create_defaults_is_used_and_computes_rating() -> Result<(), anyhow::Error> {
        let (svc, _) = service();
        let mut d = complete_draft();
        d.is_used = None;
        let ship = svc.create(d).await?;
        assert!(ship.id > 0);
        assert!(!ship.is_used);
        assert_eq!(ship.rating, 2.0);
        assert_eq!(svc.get_by_id(ship.id).await?, ship);
        Ok(())
    }

    #[tokio::test]
    async fn create_rounds_speed_before_rating() -> Result<(), anyhow::Error> {
        let (svc, _) = service();
        let ship = svc.create(draft("Swift", 0.987, 3019)).await?;
        assert_eq!(ship.speed, 0.99);
        assert_eq!(ship.rating, 79.2);
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_invalid_and_stores_nothing() {
        let (svc, repo) = service();
        let mut d = complete_draft();
        d.crew_size = Some(0);
        assert!(matches!(svc.create(d).await, Err(ServiceError::Validation(_))));
        let mut d = complete_draft();
        d.ship_type = None;
        assert!(matches!(svc.create(d).await, Err(ServiceError::Validation(_))));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let (svc, _) = service();
        assert!(matches!(svc.get_by_id(9).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_regardless_of_payload() {
        let (svc, _) = service();
        for payload in [None, Some(ShipDraft::default()), Some(ShipDraft { speed: Some(5.0), ..Default::default() })] {
            assert!(matches!(svc.update(3, payload).await, Err(ServiceError::NotFound(_))));
        }
    }

    #[tokio::test]
    async fn update_without_payload_is_validation_error() -> Result<(), anyhow::Error> {
        let (svc, _) = service();
        let ship = svc.create(complete_draft()).await?;
        assert!(matches!(svc.update(ship.id, None).await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_changes_only_present_fields_and_rerates() -> Result<(), anyhow::Error> {
        let (svc, _) = service();
        let before = svc.create(complete_draft()).await?;
        let patch = ShipDraft { is_used: Some(true), ship_type: Some(ShipType::Military), ..Default::default() };
        let after = svc.update(before.id, Some(patch)).await?;
        assert!(after.is_used);
        assert_eq!(after.ship_type, ShipType::Military);
        assert_eq!(after.rating, 1.0);
        assert_eq!(after.name, before.name);
        assert_eq!(after.planet, before.planet);
        assert_eq!(after.prod_date, before.prod_date);
        assert_eq!(after.speed, before.speed);
        assert_eq!(after.crew_size, before.crew_size);
        Ok(())
    }

    #[tokio::test]
    async fn empty_update_keeps_ship() -> Result<(), anyhow::Error> {
        let (svc, _) = service();
        let before = svc.create(complete_draft()).await?;
        let after = svc.update(before.id, Some(ShipDraft::default())).await?;
        assert_eq!(after, before);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_update_is_all_or_nothing() -> Result<(), anyhow::Error> {
        let (svc, _) = service();
        let before = svc.create(complete_draft()).await?;
        let patch = ShipDraft {
            name: Some("Renamed".into()),
            crew_size: Some(10_000),
            ..Default::default()
        };
        assert!(matches!(svc.update(before.id, Some(patch)).await, Err(ServiceError::Validation(_))));
        assert_eq!(svc.get_by_id(before.id).await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn out_of_range_update_fields_are_rejected() -> Result<(), anyhow::Error> {
        let (svc, _) = service();
        let before = svc.create(complete_draft()).await?;
        let patches = [
            ShipDraft { prod_date: Some(mid_year(2799)), ..Default::default() },
            ShipDraft { prod_date: Some(mid_year(3020)), ..Default::default() },
            ShipDraft { speed: Some(0.001), ..Default::default() },
            ShipDraft { speed: Some(1.2), ..Default::default() },
            ShipDraft { planet: Some(String::new()), ..Default::default() },
        ];
        for patch in patches {
            let res = svc.update(before.id, Some(patch.clone())).await;
            assert!(matches!(res, Err(ServiceError::Validation(_))), "{patch:?}");
        }
        assert_eq!(svc.get_by_id(before.id).await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_empty_planet() {
        let (svc, repo) = service();
        let mut d = complete_draft();
        d.planet = Some(String::new());
        match svc.create(d).await {
            Err(ServiceError::Validation(msg)) => assert!(msg.starts_with("planet"), "{msg}"),
            other => panic!("expected planet validation error, got {other:?}"),
        }
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn update_prod_date_recomputes_rating() -> Result<(), anyhow::Error> {
        let (svc, _) = service();
        let before = svc.create(complete_draft()).await?;
        let patch = ShipDraft { prod_date: Some(mid_year(3019)), ..Default::default() };
        let after = svc.update(before.id, Some(patch)).await?;
        assert_eq!(after.rating, 40.0);
        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found_and_store_unchanged() -> Result<(), anyhow::Error> {
        let (svc, repo) = service();
        svc.create(complete_draft()).await?;
        assert!(matches!(svc.delete(99).await, Err(ServiceError::NotFound(_))));
        assert_eq!(repo.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_ship() -> Result<(), anyhow::Error> {
        let (svc, _) = service();
        let ship = svc.create(complete_draft()).await?;
        svc.delete(ship.id).await?;
        assert!(matches!(svc.get_by_id(ship.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_sorts_and_pages() -> Result<(), anyhow::Error> {
        let (svc, _) = service();
        for (name, speed) in [("A", 0.9), ("B", 0.1), ("C", 0.5), ("D", 0.3), ("E", 0.7)] {
            svc.create(draft(name, speed, 3000)).await?;
        }
        let page = svc
            .list(&ShipCriteria::default(), Some("speed"), Pagination::from_parts(Some(1), Some(2)))
            .await?;
        let names: Vec<_> = page.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["C", "E"]);

        let fast = ShipCriteria { min_speed: Some(0.5), ..Default::default() };
        assert_eq!(svc.count(&fast).await?, 3);
        let page = svc.list(&fast, None, Pagination::default()).await?;
        assert_eq!(page.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 3, 5]);
        assert_eq!(svc.count(&ShipCriteria::default()).await?, 5);
        Ok(())
    }
}
