use async_trait::async_trait;
use models::ship;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QuerySelect, Set,
};

use crate::errors::{db_err, ServiceError};
use crate::pagination::PageRequest;
use crate::ship::domain::ShipRecord;
use crate::ship::specification::{ShipFilter, ShipOrder};

/// Storage collaborator for ships. Implementations evaluate the filter
/// themselves; the service never hands them raw query text.
#[async_trait]
pub trait ShipRepository: Send + Sync {
    async fn find_all(&self, filter: &ShipFilter, order: ShipOrder, page: PageRequest) -> Result<Vec<ship::Model>, ServiceError>;
    async fn count(&self, filter: &ShipFilter) -> Result<u64, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<ship::Model>, ServiceError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    /// Insert when `ship.id` is `None`, otherwise overwrite that row.
    async fn save(&self, ship: ShipRecord) -> Result<ship::Model, ServiceError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmShipRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmShipRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn active_model(record: ShipRecord) -> ship::ActiveModel {
    ship::ActiveModel {
        id: record.id.map_or(NotSet, Set),
        name: Set(record.name),
        planet: Set(record.planet),
        ship_type: Set(record.ship_type),
        prod_date: Set(record.prod_date),
        is_used: Set(record.is_used),
        speed: Set(record.speed),
        crew_size: Set(record.crew_size),
        rating: Set(record.rating),
    }
}

#[async_trait]
impl ShipRepository for SeaOrmShipRepository {
    async fn find_all(&self, filter: &ShipFilter, order: ShipOrder, page: PageRequest) -> Result<Vec<ship::Model>, ServiceError> {
        let select = ship::Entity::find().filter(filter.to_condition());
        // PageRequest keeps size and offset within i64
        order
            .apply(select)
            .limit(page.page_size)
            .offset(page.offset())
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn count(&self, filter: &ShipFilter) -> Result<u64, ServiceError> {
        ship::Entity::find()
            .filter(filter.to_condition())
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ship::Model>, ServiceError> {
        ship::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let n = ship::Entity::find_by_id(id).count(&self.db).await.map_err(db_err)?;
        Ok(n > 0)
    }

    async fn save(&self, record: ShipRecord) -> Result<ship::Model, ServiceError> {
        let is_insert = record.id.is_none();
        let am = active_model(record);
        if is_insert {
            am.insert(&self.db).await.map_err(db_err)
        } else {
            am.update(&self.db).await.map_err(db_err)
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        ship::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
