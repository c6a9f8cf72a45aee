use sea_orm_migration::prelude::*;

use super::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::Id)
                            .string_len(255)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Companies::Name)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Companies::BusinessLine).string_len(255).not_null())
                    .col(ColumnDef::new(Companies::State).string_len(100).not_null())
                    .col(timestamp_column(Companies::CreatedAt))
                    .col(timestamp_column(Companies::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(id_column(Customers::Id))
                    .col(ColumnDef::new(Customers::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Customers::Email).string_len(254).null().unique_key())
                    .col(ColumnDef::new(Customers::Phone).string_len(15).null())
                    .col(ColumnDef::new(Customers::CompanyId).string_len(255).not_null())
                    .col(timestamp_column(Customers::CreatedAt))
                    .col(timestamp_column(Customers::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customers_company")
                            .from(Customers::Table, Customers::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CustomerTiers::Table)
                    .if_not_exists()
                    .col(id_column(CustomerTiers::Id))
                    .col(
                        ColumnDef::new(CustomerTiers::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(CustomerTiers::DiscountPercentage)
                            .big_integer()
                            .not_null(),
                    )
                    .col(timestamp_column(CustomerTiers::CreatedAt))
                    .col(timestamp_column(CustomerTiers::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(id_column(Products::Id))
                    .col(
                        ColumnDef::new(Products::Name)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Products::Description).text().null())
                    .col(
                        ColumnDef::new(Products::Sku)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Products::BasePrice).big_integer().not_null())
                    .col(timestamp_column(Products::CreatedAt))
                    .col(timestamp_column(Products::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CustomerSpecificPrices::Table)
                    .if_not_exists()
                    .col(id_column(CustomerSpecificPrices::Id))
                    .col(
                        ColumnDef::new(CustomerSpecificPrices::CustomerId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerSpecificPrices::ProductId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerSpecificPrices::CustomPrice)
                            .big_integer()
                            .not_null(),
                    )
                    .col(timestamp_column(CustomerSpecificPrices::CreatedAt))
                    .col(timestamp_column(CustomerSpecificPrices::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_prices_customer")
                            .from(CustomerSpecificPrices::Table, CustomerSpecificPrices::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_prices_product")
                            .from(CustomerSpecificPrices::Table, CustomerSpecificPrices::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_customer_prices_customer_product")
                    .table(CustomerSpecificPrices::Table)
                    .col(CustomerSpecificPrices::CustomerId)
                    .col(CustomerSpecificPrices::ProductId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomerSpecificPrices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CustomerTiers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await
    }
}
