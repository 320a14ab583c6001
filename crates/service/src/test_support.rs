#![cfg(test)]
use migration::MigratorTrait;
use models::db::connect_with_config;
use models::ship::ShipType;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

use crate::ship::domain::{ShipPayload, ShipRecord};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn db_config() -> configs::DatabaseConfig {
    let mut cfg = configs::load_default().map(|c| c.database).unwrap_or_default();
    cfg.normalize_from_env();
    cfg.min_connections = cfg.min_connections.min(1);
    cfg
}

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // Run migrations exactly once, with a throwaway connection
    MIGRATED
        .get_or_init(|| async {
            let db = connect_with_config(&db_config()).await.expect("connect db for migration");
            migration::Migrator::up(&db, None).await.expect("migrate up");
            drop(db);
        })
        .await;

    // Return a fresh connection for the current test's runtime
    let db = connect_with_config(&db_config()).await?;
    Ok(db)
}

/// 3000-01-01T00:00:00Z
pub const YEAR_3000_MILLIS: i64 = 32_503_680_000_000;

pub fn falcon_payload() -> ShipPayload {
    ShipPayload {
        name: Some("Falcon".into()),
        planet: Some("Mars".into()),
        ship_type: Some(ShipType::Transport),
        prod_date: Some(YEAR_3000_MILLIS),
        is_used: Some(false),
        speed: Some(0.5),
        crew_size: Some(10),
    }
}

pub fn falcon_record() -> ShipRecord {
    falcon_payload().into_record(None, 2.0).expect("complete payload")
}
