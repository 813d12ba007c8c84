use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Ship: index on prod_date for after/before range filters
        manager
            .create_index(
                Index::create()
                    .name("idx_ship_prod_date")
                    .table(Ship::Table)
                    .col(Ship::ProdDate)
                    .to_owned(),
            )
            .await?;

        // Ship: index on ship_type
        manager
            .create_index(
                Index::create()
                    .name("idx_ship_type")
                    .table(Ship::Table)
                    .col(Ship::ShipType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_ship_prod_date").table(Ship::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_ship_type").table(Ship::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Ship { Table, ProdDate, ShipType }
