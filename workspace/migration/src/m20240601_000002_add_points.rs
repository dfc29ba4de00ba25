use sea_orm_migration::prelude::*;

use crate::m20240518_000001_create_tables::{Customers, DeliveryProviders, ShippingProviders};

#[derive(DeriveIden)]
enum Points {
    Points,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Loyalty counters were introduced after the initial schema
        manager
            .alter_table(
                Table::alter()
                    .table(Customers::Table)
                    .add_column(
                        ColumnDef::new(Points::Points)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(DeliveryProviders::Table)
                    .add_column(
                        ColumnDef::new(Points::Points)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(ShippingProviders::Table)
                    .add_column(
                        ColumnDef::new(Points::Points)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(ShippingProviders::Table)
                    .drop_column(Points::Points)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(DeliveryProviders::Table)
                    .drop_column(Points::Points)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Customers::Table)
                    .drop_column(Points::Points)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
