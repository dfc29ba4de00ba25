//! Order operations. An order's ledger contribution is the collected price
//! (gated by `has_received_price`) minus the delivery cost paid out; every
//! mutation applies only the delta against the locked pre-image.

use chrono::{NaiveDateTime, Utc};
use model::entities::order::OrderStatus;
use model::entities::{customer, delivery_provider, order, order_basket};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, info, instrument};

use crate::contribution::{order_contribution, CapitalContribution};
use crate::error::{LedgerError, Result};
use crate::{capital, rules, validate};

/// Fields for placing a new order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub total_price: Decimal,
    pub number_of_items: i32,
    pub items_link: Option<String>,
    pub delivery_charge: Option<Decimal>,
    pub customer_delivery_charge: Option<Decimal>,
    pub ordered_at: Option<NaiveDateTime>,
    pub has_received_price: bool,
    pub bill_id: Option<String>,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub customer_id: i32,
    pub order_basket_id: i32,
    pub delivery_provider_id: Option<i32>,
}

/// Partial update; `None` leaves the field unchanged.
///
/// Nullable columns are set-only through this struct: `Some` overwrites the
/// stored value, `None` keeps it, and there is no way to clear a field back
/// to NULL via an update.
#[derive(Debug, Clone, Default)]
pub struct OrderChanges {
    pub total_price: Option<Decimal>,
    pub number_of_items: Option<i32>,
    pub items_link: Option<String>,
    pub delivery_charge: Option<Decimal>,
    pub customer_delivery_charge: Option<Decimal>,
    pub ordered_at: Option<NaiveDateTime>,
    pub delivered_at: Option<NaiveDateTime>,
    pub has_received_price: Option<bool>,
    pub bill_id: Option<String>,
    pub status: Option<OrderStatus>,
    pub notes: Option<String>,
    pub customer_id: Option<i32>,
    pub order_basket_id: Option<i32>,
    pub delivery_provider_id: Option<i32>,
}

fn validate_money(
    total_price: Decimal,
    delivery_charge: Option<Decimal>,
    customer_delivery_charge: Option<Decimal>,
) -> Result<()> {
    validate::non_negative("total_price", total_price)?;
    validate::non_negative_opt("delivery_charge", delivery_charge)?;
    validate::non_negative_opt("customer_delivery_charge", customer_delivery_charge)?;
    Ok(())
}

async fn ensure_customer_exists(txn: &DatabaseTransaction, id: i32) -> Result<()> {
    customer::Entity::find_by_id(id)
        .filter(customer::Column::DeletedAt.is_null())
        .one(txn)
        .await?
        .map(|_| ())
        .ok_or(LedgerError::NotFound {
            entity: "customer",
            id,
        })
}

async fn ensure_basket_exists(txn: &DatabaseTransaction, id: i32) -> Result<()> {
    order_basket::Entity::find_by_id(id)
        .filter(order_basket::Column::DeletedAt.is_null())
        .one(txn)
        .await?
        .map(|_| ())
        .ok_or(LedgerError::NotFound {
            entity: "order basket",
            id,
        })
}

async fn ensure_delivery_provider_exists(txn: &DatabaseTransaction, id: i32) -> Result<()> {
    delivery_provider::Entity::find_by_id(id)
        .filter(delivery_provider::Column::DeletedAt.is_null())
        .one(txn)
        .await?
        .map(|_| ())
        .ok_or(LedgerError::NotFound {
            entity: "delivery provider",
            id,
        })
}

/// Places an order: debits the delivery cost and, if the price was already
/// collected, credits the total price.
#[instrument(skip(db, input), fields(customer_id = input.customer_id, basket_id = input.order_basket_id))]
pub async fn create_order(db: &DatabaseConnection, input: NewOrder) -> Result<order::Model> {
    validate_money(
        input.total_price,
        input.delivery_charge,
        input.customer_delivery_charge,
    )?;

    let txn = db.begin().await?;
    ensure_customer_exists(&txn, input.customer_id).await?;
    ensure_basket_exists(&txn, input.order_basket_id).await?;
    if let Some(provider_id) = input.delivery_provider_id {
        ensure_delivery_provider_exists(&txn, provider_id).await?;
    }

    let contribution = order_contribution(
        input.total_price,
        input.has_received_price,
        input.delivery_charge,
    );
    capital::apply_delta(&txn, contribution).await?;

    let now = Utc::now().naive_utc();
    let model = order::ActiveModel {
        total_price: Set(input.total_price),
        number_of_items: Set(input.number_of_items),
        items_link: Set(input.items_link),
        delivery_charge: Set(input.delivery_charge),
        customer_delivery_charge: Set(input.customer_delivery_charge),
        ordered_at: Set(input.ordered_at),
        has_received_price: Set(input.has_received_price),
        bill_id: Set(input.bill_id),
        status: Set(input.status),
        notes: Set(input.notes),
        customer_id: Set(input.customer_id),
        order_basket_id: Set(input.order_basket_id),
        delivery_provider_id: Set(input.delivery_provider_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    rules::maybe_complete_basket(&txn, model.order_basket_id).await?;
    txn.commit().await?;

    info!("Order {} placed, capital delta {}", model.id, contribution);
    Ok(model)
}

/// Updates an order. Toggling `has_received_price` or moving a monetary
/// field applies exactly the incremental delta, never the full new value.
#[instrument(skip(db, changes))]
pub async fn update_order(
    db: &DatabaseConnection,
    id: i32,
    changes: OrderChanges,
) -> Result<order::Model> {
    let txn = db.begin().await?;

    // Pre-image read under lock: two racing updates to the same order must
    // not both diff against the same stale state.
    let old = order::Entity::find_by_id(id)
        .filter(order::Column::DeletedAt.is_null())
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or(LedgerError::NotFound { entity: "order", id })?;

    let new_total_price = changes.total_price.unwrap_or(old.total_price);
    let new_delivery_charge = changes.delivery_charge.or(old.delivery_charge);
    let new_customer_delivery_charge = changes
        .customer_delivery_charge
        .or(old.customer_delivery_charge);
    let new_has_received_price = changes.has_received_price.unwrap_or(old.has_received_price);
    let new_customer_id = changes.customer_id.unwrap_or(old.customer_id);
    let new_basket_id = changes.order_basket_id.unwrap_or(old.order_basket_id);

    validate_money(
        new_total_price,
        new_delivery_charge,
        new_customer_delivery_charge,
    )?;
    if new_customer_id != old.customer_id {
        ensure_customer_exists(&txn, new_customer_id).await?;
    }
    if new_basket_id != old.order_basket_id {
        ensure_basket_exists(&txn, new_basket_id).await?;
    }
    if let Some(provider_id) = changes.delivery_provider_id {
        if Some(provider_id) != old.delivery_provider_id {
            ensure_delivery_provider_exists(&txn, provider_id).await?;
        }
    }

    let new_contribution =
        order_contribution(new_total_price, new_has_received_price, new_delivery_charge);
    let delta = new_contribution - old.contribution();
    capital::apply_delta(&txn, delta).await?;

    // Loyalty accrues on the growth of the order's total, updates only.
    let points = rules::points_from_price_change(old.total_price, new_total_price);
    rules::add_customer_points(&txn, new_customer_id, points).await?;

    let old_basket_id = old.order_basket_id;
    let mut active: order::ActiveModel = old.into();
    active.total_price = Set(new_total_price);
    if let Some(number_of_items) = changes.number_of_items {
        active.number_of_items = Set(number_of_items);
    }
    if let Some(items_link) = changes.items_link {
        active.items_link = Set(Some(items_link));
    }
    active.delivery_charge = Set(new_delivery_charge);
    active.customer_delivery_charge = Set(new_customer_delivery_charge);
    if let Some(ordered_at) = changes.ordered_at {
        active.ordered_at = Set(Some(ordered_at));
    }
    if let Some(delivered_at) = changes.delivered_at {
        active.delivered_at = Set(Some(delivered_at));
    }
    active.has_received_price = Set(new_has_received_price);
    if let Some(bill_id) = changes.bill_id {
        active.bill_id = Set(Some(bill_id));
    }
    if let Some(status) = changes.status {
        active.status = Set(status);
    }
    if let Some(notes) = changes.notes {
        active.notes = Set(Some(notes));
    }
    active.customer_id = Set(new_customer_id);
    active.order_basket_id = Set(new_basket_id);
    if let Some(provider_id) = changes.delivery_provider_id {
        active.delivery_provider_id = Set(Some(provider_id));
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let model = active.update(&txn).await?;

    rules::maybe_complete_basket(&txn, new_basket_id).await?;
    if new_basket_id != old_basket_id {
        // Moving the last unpaid order out may complete the basket it left.
        rules::maybe_complete_basket(&txn, old_basket_id).await?;
    }
    txn.commit().await?;

    debug!("Order {} updated, capital delta {}", model.id, delta);
    Ok(model)
}

/// Soft-deletes an order, reversing whatever contribution it had applied.
/// Deleting an already-deleted order is a no-op that reports success.
#[instrument(skip(db))]
pub async fn delete_order(db: &DatabaseConnection, id: i32) -> Result<()> {
    let txn = db.begin().await?;

    let old = order::Entity::find_by_id(id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or(LedgerError::NotFound { entity: "order", id })?;
    if old.deleted_at.is_some() {
        debug!("Order {} already deleted, nothing to reverse", id);
        return Ok(());
    }

    capital::apply_delta(&txn, -old.contribution()).await?;

    let basket_id = old.order_basket_id;
    let mut active: order::ActiveModel = old.into();
    active.deleted_at = Set(Some(Utc::now().naive_utc()));
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(&txn).await?;

    // The deleted order no longer blocks its basket from completing.
    rules::maybe_complete_basket(&txn, basket_id).await?;
    txn.commit().await?;

    info!("Order {} soft-deleted", id);
    Ok(())
}

/// Fetches a live order by id.
pub async fn get_order(db: &DatabaseConnection, id: i32) -> Result<order::Model> {
    order::Entity::find_by_id(id)
        .filter(order::Column::DeletedAt.is_null())
        .one(db)
        .await?
        .ok_or(LedgerError::NotFound { entity: "order", id })
}

/// Lists live orders, newest first.
pub async fn list_orders(db: &DatabaseConnection) -> Result<Vec<order::Model>> {
    Ok(order::Entity::find()
        .filter(order::Column::DeletedAt.is_null())
        .order_by_desc(order::Column::Id)
        .all(db)
        .await?)
}

/// Lists the live orders of one basket.
pub async fn list_basket_orders(
    db: &DatabaseConnection,
    basket_id: i32,
) -> Result<Vec<order::Model>> {
    Ok(order::Entity::find()
        .filter(order::Column::OrderBasketId.eq(basket_id))
        .filter(order::Column::DeletedAt.is_null())
        .order_by_asc(order::Column::Id)
        .all(db)
        .await?)
}
