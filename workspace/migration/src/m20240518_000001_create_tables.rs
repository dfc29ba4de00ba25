use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create capital table (single logical row, fixed id)
        manager
            .create_table(
                Table::create()
                    .table(Capital::Table)
                    .if_not_exists()
                    .col(integer(Capital::Id).primary_key())
                    .col(decimal_len(Capital::Amount, 16, 4))
                    .col(timestamp(Capital::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Capital::UpdatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_null(Capital::DeletedAt))
                    .to_owned(),
            )
            .await?;

        // Create customers table
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(pk_auto(Customers::Id))
                    .col(string(Customers::FullName))
                    .col(string_null(Customers::PhoneNumber))
                    .col(string_null(Customers::Address))
                    .col(string_null(Customers::Email))
                    .col(text_null(Customers::Notes))
                    .col(timestamp(Customers::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Customers::UpdatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_null(Customers::DeletedAt))
                    .to_owned(),
            )
            .await?;

        // Create delivery_providers table
        manager
            .create_table(
                Table::create()
                    .table(DeliveryProviders::Table)
                    .if_not_exists()
                    .col(pk_auto(DeliveryProviders::Id))
                    .col(string(DeliveryProviders::Name))
                    .col(string(DeliveryProviders::PhoneNumber))
                    .col(timestamp(DeliveryProviders::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(DeliveryProviders::UpdatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_null(DeliveryProviders::DeletedAt))
                    .to_owned(),
            )
            .await?;

        // Create shipping_providers table
        manager
            .create_table(
                Table::create()
                    .table(ShippingProviders::Table)
                    .if_not_exists()
                    .col(pk_auto(ShippingProviders::Id))
                    .col(string(ShippingProviders::Name))
                    .col(string(ShippingProviders::PhoneNumber))
                    .col(decimal_len(ShippingProviders::PricePerKg, 16, 4))
                    .col(string(ShippingProviders::Address))
                    .col(timestamp(ShippingProviders::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(ShippingProviders::UpdatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_null(ShippingProviders::DeletedAt))
                    .to_owned(),
            )
            .await?;

        // Create shipping_sources table
        manager
            .create_table(
                Table::create()
                    .table(ShippingSources::Table)
                    .if_not_exists()
                    .col(pk_auto(ShippingSources::Id))
                    .col(string(ShippingSources::Name))
                    .col(string_null(ShippingSources::Address))
                    .col(timestamp(ShippingSources::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(ShippingSources::UpdatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_null(ShippingSources::DeletedAt))
                    .to_owned(),
            )
            .await?;

        // Create expense_categories table
        manager
            .create_table(
                Table::create()
                    .table(ExpenseCategories::Table)
                    .if_not_exists()
                    .col(pk_auto(ExpenseCategories::Id))
                    .col(string(ExpenseCategories::Name).unique_key())
                    .col(text_null(ExpenseCategories::Description))
                    .col(
                        timestamp(ExpenseCategories::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp(ExpenseCategories::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_null(ExpenseCategories::DeletedAt))
                    .to_owned(),
            )
            .await?;

        // Create expenses table
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(pk_auto(Expenses::Id))
                    .col(string(Expenses::Name))
                    .col(decimal_len(Expenses::Amount, 16, 4))
                    .col(date_null(Expenses::Date))
                    .col(integer_null(Expenses::CategoryId))
                    .col(text_null(Expenses::Description))
                    .col(timestamp(Expenses::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Expenses::UpdatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_null(Expenses::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_category")
                            .from(Expenses::Table, Expenses::CategoryId)
                            .to(ExpenseCategories::Table, ExpenseCategories::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create order_baskets table
        manager
            .create_table(
                Table::create()
                    .table(OrderBaskets::Table)
                    .if_not_exists()
                    .col(pk_auto(OrderBaskets::Id))
                    .col(decimal_len(OrderBaskets::TotalPrice, 16, 4))
                    .col(decimal_len_null(OrderBaskets::TotalPaidPrice, 16, 4))
                    .col(integer(OrderBaskets::NumberOfItems))
                    .col(string_null(OrderBaskets::ItemsLink))
                    .col(decimal_len_null(OrderBaskets::ItemsWeight, 16, 4))
                    .col(decimal_len_null(OrderBaskets::ShippingCharge, 16, 4))
                    .col(timestamp_null(OrderBaskets::ShippedAt))
                    .col(timestamp_null(OrderBaskets::ReceivedAt))
                    .col(
                        string_len(OrderBaskets::Status, 20)
                            .default("shipping"),
                    )
                    .col(text_null(OrderBaskets::Notes))
                    .col(integer(OrderBaskets::ShippingProviderId))
                    .col(integer_null(OrderBaskets::ShippingSourceId))
                    .col(timestamp(OrderBaskets::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(OrderBaskets::UpdatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_null(OrderBaskets::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_basket_shipping_provider")
                            .from(OrderBaskets::Table, OrderBaskets::ShippingProviderId)
                            .to(ShippingProviders::Table, ShippingProviders::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_basket_shipping_source")
                            .from(OrderBaskets::Table, OrderBaskets::ShippingSourceId)
                            .to(ShippingSources::Table, ShippingSources::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create orders table
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(pk_auto(Orders::Id))
                    .col(decimal_len(Orders::TotalPrice, 16, 4))
                    .col(integer(Orders::NumberOfItems))
                    .col(string_null(Orders::ItemsLink))
                    .col(decimal_len_null(Orders::DeliveryCharge, 16, 4))
                    .col(decimal_len_null(Orders::CustomerDeliveryCharge, 16, 4))
                    .col(timestamp_null(Orders::OrderedAt))
                    .col(timestamp_null(Orders::DeliveredAt))
                    .col(boolean(Orders::HasReceivedPrice).default(false))
                    .col(string_null(Orders::BillId))
                    .col(string_len(Orders::Status, 20).default("pending"))
                    .col(text_null(Orders::Notes))
                    .col(integer(Orders::CustomerId))
                    .col(integer(Orders::OrderBasketId))
                    .col(integer_null(Orders::DeliveryProviderId))
                    .col(timestamp(Orders::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Orders::UpdatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_null(Orders::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_customer")
                            .from(Orders::Table, Orders::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_order_basket")
                            .from(Orders::Table, Orders::OrderBasketId)
                            .to(OrderBaskets::Table, OrderBaskets::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_delivery_provider")
                            .from(Orders::Table, Orders::DeliveryProviderId)
                            .to(DeliveryProviders::Table, DeliveryProviders::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create employees table
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(pk_auto(Employees::Id))
                    .col(string(Employees::FullName))
                    .col(string_null(Employees::Email))
                    .col(string_null(Employees::PhoneNumber))
                    .col(decimal_len(Employees::Salary, 16, 4).default(0))
                    .col(timestamp(Employees::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Employees::UpdatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_null(Employees::DeletedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrderBaskets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExpenseCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ShippingSources::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ShippingProviders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DeliveryProviders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Capital::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Capital {
    Table,
    Id,
    Amount,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
pub enum Customers {
    Table,
    Id,
    FullName,
    PhoneNumber,
    Address,
    Email,
    Notes,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
pub enum DeliveryProviders {
    Table,
    Id,
    Name,
    PhoneNumber,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
pub enum ShippingProviders {
    Table,
    Id,
    Name,
    PhoneNumber,
    PricePerKg,
    Address,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
pub enum ShippingSources {
    Table,
    Id,
    Name,
    Address,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
pub enum ExpenseCategories {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
pub enum Expenses {
    Table,
    Id,
    Name,
    Amount,
    Date,
    CategoryId,
    Description,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
pub enum OrderBaskets {
    Table,
    Id,
    TotalPrice,
    TotalPaidPrice,
    NumberOfItems,
    ItemsLink,
    ItemsWeight,
    ShippingCharge,
    ShippedAt,
    ReceivedAt,
    Status,
    Notes,
    ShippingProviderId,
    ShippingSourceId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
pub enum Orders {
    Table,
    Id,
    TotalPrice,
    NumberOfItems,
    ItemsLink,
    DeliveryCharge,
    CustomerDeliveryCharge,
    OrderedAt,
    DeliveredAt,
    HasReceivedPrice,
    BillId,
    Status,
    Notes,
    CustomerId,
    OrderBasketId,
    DeliveryProviderId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
pub enum Employees {
    Table,
    Id,
    FullName,
    Email,
    PhoneNumber,
    Salary,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
