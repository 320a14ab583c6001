use std::sync::Arc;

use models::ship;
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::pagination::PageRequest;
use crate::ship::domain::ShipPayload;
use crate::ship::rating::{compute_rating, round2};
use crate::ship::repository::ShipRepository;
use crate::ship::specification::{ShipFilter, ShipOrder};
use crate::ship::validator;

/// Application service encapsulating the ship business rules.
///
/// Validation runs before any mutating repository call, so a rejected
/// payload never reaches storage. `update` is read-then-write without a
/// transaction: a delete racing between the two is not guarded against.
pub struct ShipService<R: ShipRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ShipRepository + ?Sized> ShipService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Validate a full payload, derive the rating and store it.
    #[instrument(skip_all)]
    pub async fn create(&self, mut payload: ShipPayload) -> Result<ship::Model, ServiceError> {
        if payload.is_used.is_none() {
            payload.is_used = Some(false);
        }
        validator::check_required_data(&payload)?;

        payload.speed = payload.speed.map(round2);
        let rating = match (payload.speed, payload.is_used, payload.prod_date) {
            (Some(speed), Some(is_used), Some(prod_date)) => compute_rating(speed, is_used, prod_date)?,
            _ => return Err(ServiceError::Validation("speed and prodDate are required".into())),
        };
        let record = payload.into_record(None, rating)?;
        let created = self.repo.save(record).await?;
        info!(id = created.id, rating = created.rating, "created ship");
        Ok(created)
    }

    #[instrument(skip(self, filter))]
    pub async fn read_all(&self, filter: &ShipFilter, order: ShipOrder, page: PageRequest) -> Result<Vec<ship::Model>, ServiceError> {
        let ships = self.repo.find_all(filter, order, page).await?;
        debug!(count = ships.len(), "listed ships");
        Ok(ships)
    }

    pub async fn count_all(&self, filter: &ShipFilter) -> Result<u64, ServiceError> {
        self.repo.count(filter).await
    }

    pub async fn read(&self, id: i64) -> Result<ship::Model, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("ship"))
    }

    /// Partial update: present fields overwrite, absent fields keep the stored
    /// value. The payload is validated as received, before the merge.
    #[instrument(skip(self, payload))]
    pub async fn update(&self, payload: ShipPayload, id: i64) -> Result<ship::Model, ServiceError> {
        validator::check_existing_data(&payload)?;
        let existing = self.read(id).await?;

        let mut incoming = payload;
        incoming.speed = incoming.speed.map(round2);
        let merged = ShipPayload::from(&existing).merge(incoming);

        let rating = match (merged.speed, merged.is_used, merged.prod_date) {
            (Some(speed), Some(is_used), Some(prod_date)) => compute_rating(speed, is_used, prod_date)?,
            _ => existing.rating,
        };
        let record = merged.into_record(Some(existing.id), rating)?;
        let updated = self.repo.save(record).await?;
        info!(id = updated.id, rating = updated.rating, "updated ship");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(ServiceError::not_found("ship"));
        }
        self.repo.delete_by_id(id).await?;
        info!(id, "deleted ship");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::domain::ShipRecord;
    use crate::storage::ship_file_store::FileShipRepository;
    use crate::test_support::{falcon_payload, YEAR_3000_MILLIS};
    use async_trait::async_trait;
    use models::ship::{start_of_year_millis, ShipType};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn service() -> ShipService<FileShipRepository> {
        ShipService::new(FileShipRepository::ephemeral())
    }

    fn page_all() -> PageRequest {
        PageRequest::new(0, 1_000).unwrap()
    }

    /// Counts writes and refuses everything else.
    #[derive(Default)]
    struct CountingRepo {
        saves: AtomicUsize,
    }

    #[async_trait]
    impl ShipRepository for CountingRepo {
        async fn find_all(&self, _: &ShipFilter, _: ShipOrder, _: PageRequest) -> Result<Vec<ship::Model>, ServiceError> { Ok(vec![]) }
        async fn count(&self, _: &ShipFilter) -> Result<u64, ServiceError> { Ok(0) }
        async fn find_by_id(&self, _: i64) -> Result<Option<ship::Model>, ServiceError> { Ok(None) }
        async fn exists_by_id(&self, _: i64) -> Result<bool, ServiceError> { Ok(false) }
        async fn save(&self, ship: ShipRecord) -> Result<ship::Model, ServiceError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(ship.into_model(1))
        }
        async fn delete_by_id(&self, _: i64) -> Result<(), ServiceError> {
            Err(ServiceError::Db("unexpected delete".into()))
        }
    }

    #[tokio::test]
    async fn create_falcon_computes_rating() -> Result<(), anyhow::Error> {
        let svc = service();
        let created = svc.create(falcon_payload()).await?;
        assert_eq!(created.id, 1);
        assert_eq!(created.rating, 2.0);
        assert_eq!(created.speed, 0.5);
        assert_eq!(svc.read(created.id).await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn create_defaults_is_used_and_rounds_speed() -> Result<(), anyhow::Error> {
        let svc = service();
        let payload = ShipPayload { is_used: None, speed: Some(0.456), ..falcon_payload() };
        let created = svc.create(payload).await?;
        assert!(!created.is_used);
        assert_eq!(created.speed, 0.46);
        // 80 * 0.46 / 20
        assert_eq!(created.rating, 1.84);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_create_never_reaches_storage() {
        let repo = Arc::new(CountingRepo::default());
        let svc = ShipService::new(Arc::clone(&repo));
        let bad = [
            ShipPayload { speed: Some(1.5), ..falcon_payload() },
            ShipPayload { name: None, ..falcon_payload() },
            ShipPayload { crew_size: Some(10_000), ..falcon_payload() },
            ShipPayload { prod_date: Some(0), ..falcon_payload() },
        ];
        for payload in bad {
            let err = svc.create(payload).await.unwrap_err();
            assert!(err.is_invalid_input(), "{err}");
        }
        assert_eq!(repo.saves.load(Ordering::SeqCst), 0);

        svc.create(falcon_payload()).await.unwrap();
        assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn update_speed_only_on_used_ship() -> Result<(), anyhow::Error> {
        let svc = service();
        let used = ShipPayload { is_used: Some(true), ..falcon_payload() };
        let created = svc.create(used).await?;
        assert_eq!(created.rating, 1.0);

        let updated = svc.update(ShipPayload { speed: Some(0.8), ..ShipPayload::default() }, created.id).await?;
        assert_eq!(updated.speed, 0.8);
        // 80 * 0.8 * 0.5 / 20
        assert_eq!(updated.rating, 1.6);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.planet, created.planet);
        assert_eq!(updated.ship_type, created.ship_type);
        assert_eq!(updated.prod_date, created.prod_date);
        assert_eq!(updated.crew_size, created.crew_size);
        assert!(updated.is_used);
        assert_eq!(svc.read(created.id).await?, updated);
        Ok(())
    }

    #[tokio::test]
    async fn update_overwrites_every_present_field() -> Result<(), anyhow::Error> {
        let svc = service();
        let created = svc.create(falcon_payload()).await?;
        let prod_date = start_of_year_millis(3010).unwrap();
        let patch = ShipPayload {
            name: Some("Moth".into()),
            planet: Some("Io".into()),
            ship_type: Some(ShipType::Military),
            prod_date: Some(prod_date),
            is_used: Some(true),
            speed: Some(0.3),
            crew_size: Some(7),
        };
        let updated = svc.update(patch, created.id).await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Moth");
        assert_eq!(updated.planet, "Io");
        assert_eq!(updated.ship_type, ShipType::Military);
        assert_eq!(updated.prod_date, prod_date);
        assert_eq!(updated.crew_size, 7);
        // 80 * 0.3 * 0.5 / 10
        assert_eq!(updated.rating, 1.2);
        Ok(())
    }

    #[tokio::test]
    async fn empty_update_keeps_record() -> Result<(), anyhow::Error> {
        let svc = service();
        let created = svc.create(falcon_payload()).await?;
        let updated = svc.update(ShipPayload::default(), created.id).await?;
        assert_eq!(updated, created);
        Ok(())
    }

    #[tokio::test]
    async fn update_rejects_invalid_payload_before_lookup() -> Result<(), anyhow::Error> {
        let svc = service();
        let created = svc.create(falcon_payload()).await?;
        let err = svc.update(ShipPayload { crew_size: Some(0), ..ShipPayload::default() }, created.id).await.unwrap_err();
        assert!(err.is_invalid_input());
        // invalid wins over missing
        let err = svc.update(ShipPayload { name: Some(String::new()), ..ShipPayload::default() }, 999).await.unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(svc.read(created.id).await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id_are_not_found() {
        let svc = service();
        let err = svc.update(ShipPayload::default(), 999_999).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        let err = svc.delete(999_999).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(matches!(svc.read(999_999).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_is_hard() -> Result<(), anyhow::Error> {
        let svc = service();
        let created = svc.create(falcon_payload()).await?;
        svc.delete(created.id).await?;
        assert!(matches!(svc.read(created.id).await, Err(ServiceError::NotFound(_))));
        assert_eq!(svc.count_all(&ShipFilter::default()).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn count_matches_unpaged_listing() -> Result<(), anyhow::Error> {
        let svc = service();
        for (name, speed, used) in [("Falcon", 0.5, false), ("Fang", 0.9, true), ("Moth", 0.2, false), ("Fury", 0.7, false)] {
            svc.create(ShipPayload { name: Some(name.into()), speed: Some(speed), is_used: Some(used), ..falcon_payload() }).await?;
        }
        let filters = [
            ShipFilter::default(),
            ShipFilter { name: Some("F".into()), ..ShipFilter::default() },
            ShipFilter { name: Some("F".into()), is_used: Some(false), ..ShipFilter::default() },
            ShipFilter { min_speed: Some(0.6), max_rating: Some(2.0), ..ShipFilter::default() },
            ShipFilter { after: Some(YEAR_3000_MILLIS + 1), ..ShipFilter::default() },
        ];
        let mut previous = u64::MAX;
        for f in &filters[..3] {
            let n = svc.count_all(f).await?;
            assert!(n <= previous, "adding a filter widened the result");
            previous = n;
        }
        for f in &filters {
            for order in [ShipOrder::Id, ShipOrder::Speed, ShipOrder::Rating, ShipOrder::CrewSize, ShipOrder::Date] {
                let all = svc.read_all(f, order, page_all()).await?;
                assert_eq!(all.len() as u64, svc.count_all(f).await?);
            }
        }
        assert_eq!(svc.count_all(&filters[2]).await?, 2);
        assert_eq!(svc.count_all(&filters[4]).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn default_page_is_first_three_by_id() -> Result<(), anyhow::Error> {
        let svc = service();
        for _ in 0..5 {
            svc.create(falcon_payload()).await?;
        }
        let page = svc.read_all(&ShipFilter::default(), ShipOrder::default(), PageRequest::default()).await?;
        assert_eq!(page.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        let next = svc.read_all(&ShipFilter::default(), ShipOrder::Id, PageRequest::new(1, 3)?).await?;
        assert_eq!(next.iter().map(|s| s.id).collect::<Vec<_>>(), vec![4, 5]);
        Ok(())
    }

    #[tokio::test]
    async fn stored_decimals_have_two_digits() -> Result<(), anyhow::Error> {
        let svc = service();
        for speed in [0.011, 0.333, 0.505, 0.987, 0.1234] {
            let s = svc.create(ShipPayload { speed: Some(speed), ..falcon_payload() }).await?;
            assert_eq!(s.speed, round2(s.speed));
            assert_eq!(s.rating, round2(s.rating));
        }
        Ok(())
    }
}
