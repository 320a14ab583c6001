//! Create `ship` table.
//! Production date is stored as epoch milliseconds; speed and rating are
//! already rounded to two decimals by the service layer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ship::Table)
                    .if_not_exists()
                    .col(big_integer(Ship::Id).auto_increment().primary_key())
                    .col(string_len(Ship::Name, 50).not_null())
                    .col(string_len(Ship::Planet, 50).not_null())
                    .col(string_len(Ship::ShipType, 16).not_null())
                    .col(big_integer(Ship::ProdDate).not_null())
                    .col(boolean(Ship::IsUsed).not_null().default(false))
                    .col(double(Ship::Speed).not_null())
                    .col(integer(Ship::CrewSize).not_null())
                    .col(double(Ship::Rating).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Ship::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Ship {
    Table,
    Id,
    Name,
    Planet,
    ShipType,
    ProdDate,
    IsUsed,
    Speed,
    CrewSize,
    Rating,
}
