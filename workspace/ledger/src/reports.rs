//! Read-only aggregates over the live rows: the capital balance, money still
//! owed by customers, and per-provider shipping load.

use common::{DateRange, OrderMoneyTotals, ProviderLoad};
use model::entities::{order, order_basket, shipping_provider};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};
use tracing::instrument;

use crate::capital;
use crate::error::Result;

/// Current capital balance. Creates the zero-balance row on first use.
pub async fn get_capital_balance(db: &DatabaseConnection) -> Result<Decimal> {
    Ok(capital::get_or_create(db).await?.amount)
}

async fn sum_column<C: ColumnTrait>(
    db: &DatabaseConnection,
    select: sea_orm::Select<order::Entity>,
    column: C,
) -> Result<Decimal> {
    let total: Option<Option<Decimal>> = select
        .select_only()
        .column_as(column.sum(), "total")
        .into_tuple()
        .one(db)
        .await?;
    Ok(total.flatten().unwrap_or(Decimal::ZERO))
}

/// Total price of live orders whose money the customers still owe.
#[instrument(skip(db))]
pub async fn missing_money_from_all_providers(db: &DatabaseConnection) -> Result<Decimal> {
    sum_column(
        db,
        order::Entity::find()
            .filter(order::Column::DeletedAt.is_null())
            .filter(order::Column::HasReceivedPrice.eq(false)),
        order::Column::TotalPrice,
    )
    .await
}

/// Delivery charges already collected from customers on live, paid orders.
#[instrument(skip(db))]
pub async fn all_received_money_from_orders(db: &DatabaseConnection) -> Result<Decimal> {
    sum_column(
        db,
        order::Entity::find()
            .filter(order::Column::DeletedAt.is_null())
            .filter(order::Column::HasReceivedPrice.eq(true)),
        order::Column::CustomerDeliveryCharge,
    )
    .await
}

/// Both order money aggregates in one shot, for the dashboard.
pub async fn order_money_totals(db: &DatabaseConnection) -> Result<OrderMoneyTotals> {
    Ok(OrderMoneyTotals {
        missing_from_providers: missing_money_from_all_providers(db).await?,
        received_delivery_charges: all_received_money_from_orders(db).await?,
    })
}

/// Basket count and total declared weight per live shipping provider, over
/// the baskets created inside `range`.
#[instrument(skip(db))]
pub async fn shipping_provider_load(
    db: &DatabaseConnection,
    range: &DateRange,
) -> Result<Vec<ProviderLoad>> {
    let providers = shipping_provider::Entity::find()
        .filter(shipping_provider::Column::DeletedAt.is_null())
        .all(db)
        .await?;

    let mut loads = Vec::with_capacity(providers.len());
    for provider in providers {
        let baskets = order_basket::Entity::find()
            .filter(order_basket::Column::ShippingProviderId.eq(provider.id))
            .filter(order_basket::Column::DeletedAt.is_null())
            .filter(order_basket::Column::CreatedAt.gte(range.from))
            .filter(order_basket::Column::CreatedAt.lte(range.to));

        let basket_count = baskets.clone().count(db).await?;
        let total_weight: Option<Option<Decimal>> = baskets
            .select_only()
            .column_as(order_basket::Column::ItemsWeight.sum(), "total")
            .into_tuple()
            .one(db)
            .await?;

        loads.push(ProviderLoad {
            provider_id: provider.id,
            provider_name: provider.name,
            basket_count,
            total_weight: total_weight.flatten().unwrap_or(Decimal::ZERO),
        });
    }
    Ok(loads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baskets::{create_order_basket, NewOrderBasket};
    use crate::orders::{create_order, NewOrder};
    use crate::testing::{new_basket, new_order, seed_customer, seed_shipping_provider, setup_db};
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn order_money_totals_split_by_received_flag() {
        let db = setup_db().await;
        let customer = seed_customer(&db).await;
        let provider = seed_shipping_provider(&db).await;
        let basket = create_order_basket(&db, new_basket(provider.id)).await.unwrap();

        // Unpaid order: its total is missing money.
        create_order(
            &db,
            NewOrder {
                total_price: Decimal::from(120),
                ..new_order(customer.id, basket.id)
            },
        )
        .await
        .unwrap();
        // Paid order: only its customer delivery charge is counted as received.
        create_order(
            &db,
            NewOrder {
                total_price: Decimal::from(80),
                customer_delivery_charge: Some(Decimal::from(7)),
                has_received_price: true,
                ..new_order(customer.id, basket.id)
            },
        )
        .await
        .unwrap();

        let totals = order_money_totals(&db).await.unwrap();
        assert_eq!(totals.missing_from_providers, Decimal::from(120));
        assert_eq!(totals.received_delivery_charges, Decimal::from(7));
    }

    #[tokio::test]
    async fn empty_tables_report_zero() {
        let db = setup_db().await;

        let totals = order_money_totals(&db).await.unwrap();
        assert_eq!(totals.missing_from_providers, Decimal::ZERO);
        assert_eq!(totals.received_delivery_charges, Decimal::ZERO);
        assert_eq!(get_capital_balance(&db).await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn provider_load_counts_only_baskets_in_range() {
        let db = setup_db().await;
        let provider = seed_shipping_provider(&db).await;

        create_order_basket(
            &db,
            NewOrderBasket {
                items_weight: Some(Decimal::from(40)),
                ..new_basket(provider.id)
            },
        )
        .await
        .unwrap();
        create_order_basket(
            &db,
            NewOrderBasket {
                items_weight: Some(Decimal::from(60)),
                ..new_basket(provider.id)
            },
        )
        .await
        .unwrap();

        let now = Utc::now().naive_utc();
        let range = DateRange {
            from: now - Duration::hours(1),
            to: now + Duration::hours(1),
        };
        let loads = shipping_provider_load(&db, &range).await.unwrap();
        assert_eq!(loads.len(), 1);
        assert_eq!(loads[0].provider_id, provider.id);
        assert_eq!(loads[0].basket_count, 2);
        assert_eq!(loads[0].total_weight, Decimal::from(100));

        // A window in the past sees none of them.
        let past = DateRange {
            from: now - Duration::days(2),
            to: now - Duration::days(1),
        };
        let loads = shipping_provider_load(&db, &past).await.unwrap();
        assert_eq!(loads[0].basket_count, 0);
        assert_eq!(loads[0].total_weight, Decimal::ZERO);
    }
}
