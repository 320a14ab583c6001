use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_ship::Ship;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Sortable columns besides the primary key
        for (name, col) in [
            ("idx_ship_prod_date", Ship::ProdDate),
            ("idx_ship_speed", Ship::Speed),
            ("idx_ship_crew_size", Ship::CrewSize),
            ("idx_ship_rating", Ship::Rating),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Ship::Table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ship_type_used")
                    .table(Ship::Table)
                    .col(Ship::ShipType)
                    .col(Ship::IsUsed)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_ship_type_used",
            "idx_ship_rating",
            "idx_ship_crew_size",
            "idx_ship_speed",
            "idx_ship_prod_date",
        ] {
            manager
                .drop_index(Index::drop().if_exists().name(name).table(Ship::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}
