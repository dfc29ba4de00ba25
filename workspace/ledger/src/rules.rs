//! Advisory business rules that ride along with a successful reconciliation:
//! loyalty point accrual and basket auto-completion. They run inside the same
//! transaction, after the capital delta has been applied, and use the same
//! old/new diffing discipline.

use chrono::Utc;
use model::entities::{customer, order, order_basket, shipping_provider};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, Set,
};
use tracing::{debug, instrument};

use crate::error::{LedgerError, Result};

/// Customer points earned when an order's total price moves.
pub(crate) fn points_from_price_change(old_total: Decimal, new_total: Decimal) -> i64 {
    (new_total - old_total).floor().to_i64().unwrap_or(0)
}

/// Shipping provider points earned per 100 weight units moved.
pub(crate) fn points_from_weight_change(
    old_weight: Option<Decimal>,
    new_weight: Option<Decimal>,
) -> i64 {
    let diff = new_weight.unwrap_or(Decimal::ZERO) - old_weight.unwrap_or(Decimal::ZERO);
    (diff / Decimal::ONE_HUNDRED).floor().to_i64().unwrap_or(0)
}

#[instrument(skip(conn))]
pub(crate) async fn add_customer_points<C: ConnectionTrait>(
    conn: &C,
    customer_id: i32,
    delta: i64,
) -> Result<()> {
    if delta == 0 {
        return Ok(());
    }
    let row = customer::Entity::find_by_id(customer_id)
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or(LedgerError::NotFound {
            entity: "customer",
            id: customer_id,
        })?;
    debug!(
        "Customer {} points {} -> {}",
        customer_id,
        row.points,
        row.points + delta
    );
    let points = row.points + delta;
    let mut active: customer::ActiveModel = row.into();
    active.points = Set(points);
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(conn).await?;
    Ok(())
}

#[instrument(skip(conn))]
pub(crate) async fn add_shipping_provider_points<C: ConnectionTrait>(
    conn: &C,
    provider_id: i32,
    delta: i64,
) -> Result<()> {
    if delta == 0 {
        return Ok(());
    }
    let row = shipping_provider::Entity::find_by_id(provider_id)
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or(LedgerError::NotFound {
            entity: "shipping provider",
            id: provider_id,
        })?;
    debug!(
        "Shipping provider {} points {} -> {}",
        provider_id,
        row.points,
        row.points + delta
    );
    let points = row.points + delta;
    let mut active: shipping_provider::ActiveModel = row.into();
    active.points = Set(points);
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(conn).await?;
    Ok(())
}

/// Marks the basket completed once every live order in it has collected its
/// price. Runs after any order create/update/soft-delete; baskets with no
/// live orders, rejected baskets, and already-completed baskets are left
/// alone.
#[instrument(skip(conn))]
pub(crate) async fn maybe_complete_basket<C: ConnectionTrait>(
    conn: &C,
    basket_id: i32,
) -> Result<()> {
    let basket = order_basket::Entity::find_by_id(basket_id)
        .filter(order_basket::Column::DeletedAt.is_null())
        .lock_exclusive()
        .one(conn)
        .await?;
    let Some(basket) = basket else {
        return Ok(());
    };
    if matches!(
        basket.status,
        order_basket::OrderBasketStatus::Completed | order_basket::OrderBasketStatus::Rejected
    ) {
        return Ok(());
    }

    let live_orders = order::Entity::find()
        .filter(order::Column::OrderBasketId.eq(basket_id))
        .filter(order::Column::DeletedAt.is_null())
        .count(conn)
        .await?;
    if live_orders == 0 {
        return Ok(());
    }

    let unpaid = order::Entity::find()
        .filter(order::Column::OrderBasketId.eq(basket_id))
        .filter(order::Column::DeletedAt.is_null())
        .filter(order::Column::HasReceivedPrice.eq(false))
        .count(conn)
        .await?;
    if unpaid > 0 {
        return Ok(());
    }

    debug!(
        "All {} orders of basket {} collected, completing basket",
        live_orders, basket_id
    );
    let mut active: order_basket::ActiveModel = basket.into();
    active.status = Set(order_basket::OrderBasketStatus::Completed);
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(conn).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_points_floor_the_difference() {
        let old = Decimal::new(10050, 2); // 100.50
        let new = Decimal::new(15075, 2); // 150.75
        assert_eq!(points_from_price_change(old, new), 50);
    }

    #[test]
    fn shrinking_total_price_removes_points() {
        let old = Decimal::from(200);
        let new = Decimal::new(14950, 2); // 149.50
        assert_eq!(points_from_price_change(old, new), -51);
    }

    #[test]
    fn weight_points_are_per_hundred_units() {
        assert_eq!(
            points_from_weight_change(None, Some(Decimal::from(250))),
            2
        );
        assert_eq!(
            points_from_weight_change(Some(Decimal::from(250)), Some(Decimal::from(420))),
            1
        );
        assert_eq!(points_from_weight_change(None, None), 0);
    }
}
