use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, Statement,
};

use configs::DatabaseConfig;

use crate::db::connect_with_config;
use crate::ship::{self, ShipType};

fn skip() -> bool {
    std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err()
}

async fn setup_test_db() -> Result<DatabaseConnection> {
    // empty url falls back to DATABASE_URL
    let db = connect_with_config(&DatabaseConfig::default()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn active(name: &str) -> ship::ActiveModel {
    ship::ActiveModel {
        name: Set(name.to_string()),
        planet: Set("Mars".into()),
        ship_type: Set(ShipType::Military),
        prod_date: Set(32_503_680_000_000),
        is_used: Set(true),
        speed: Set(0.57),
        crew_size: Set(42),
        rating: Set(1.14),
        ..Default::default()
    }
}

#[tokio::test]
async fn ship_insert_find_delete() -> Result<()> {
    if skip() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let name = format!("entity_{}", std::process::id());
    let created = active(&name).insert(&db).await?;
    assert!(created.id > 0);

    let found = ship::Entity::find()
        .filter(ship::Column::Name.eq(name.clone()))
        .filter(ship::Column::ShipType.eq(ShipType::Military))
        .one(&db)
        .await?;
    assert_eq!(found.as_ref(), Some(&created));

    ship::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(ship::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn ship_type_is_stored_as_wire_name() -> Result<()> {
    if skip() {
        return Ok(());
    }
    let db = setup_test_db().await?;
    let created = active(&format!("raw_{}", std::process::id())).insert(&db).await?;

    let row = db
        .query_one(Statement::from_sql_and_values(
            db.get_database_backend(),
            "SELECT ship_type FROM ship WHERE id = $1",
            [created.id.into()],
        ))
        .await?
        .ok_or_else(|| anyhow::anyhow!("row vanished"))?;
    let stored: String = row.try_get("", "ship_type")?;
    assert_eq!(stored, "MILITARY");

    ship::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}
