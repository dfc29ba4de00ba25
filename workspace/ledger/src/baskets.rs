//! Order basket operations. A basket's ledger effect is the freight cost
//! paid to its shipping provider; the provider's loyalty points follow the
//! basket weight.

use chrono::{NaiveDateTime, Utc};
use model::entities::order_basket::OrderBasketStatus;
use model::entities::{order_basket, shipping_provider, shipping_source};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, info, instrument};

use crate::contribution::{basket_contribution, CapitalContribution};
use crate::error::{LedgerError, Result};
use crate::{capital, rules, validate};

/// Fields for opening a new basket.
#[derive(Debug, Clone)]
pub struct NewOrderBasket {
    pub total_price: Decimal,
    pub total_paid_price: Option<Decimal>,
    pub number_of_items: i32,
    pub items_link: Option<String>,
    pub items_weight: Option<Decimal>,
    pub shipping_charge: Option<Decimal>,
    pub shipped_at: Option<NaiveDateTime>,
    pub status: OrderBasketStatus,
    pub notes: Option<String>,
    pub shipping_provider_id: i32,
    pub shipping_source_id: Option<i32>,
}

/// Partial update; `None` leaves the field unchanged.
///
/// Nullable columns are set-only through this struct: `Some` overwrites the
/// stored value, `None` keeps it, and there is no way to clear a field back
/// to NULL via an update.
#[derive(Debug, Clone, Default)]
pub struct OrderBasketChanges {
    pub total_price: Option<Decimal>,
    pub total_paid_price: Option<Decimal>,
    pub number_of_items: Option<i32>,
    pub items_link: Option<String>,
    pub items_weight: Option<Decimal>,
    pub shipping_charge: Option<Decimal>,
    pub shipped_at: Option<NaiveDateTime>,
    pub received_at: Option<NaiveDateTime>,
    pub status: Option<OrderBasketStatus>,
    pub notes: Option<String>,
    pub shipping_provider_id: Option<i32>,
    pub shipping_source_id: Option<i32>,
}

fn validate_money(
    total_price: Decimal,
    total_paid_price: Option<Decimal>,
    shipping_charge: Option<Decimal>,
    items_weight: Option<Decimal>,
) -> Result<()> {
    validate::non_negative("total_price", total_price)?;
    validate::non_negative_opt("total_paid_price", total_paid_price)?;
    validate::non_negative_opt("shipping_charge", shipping_charge)?;
    validate::non_negative_opt("items_weight", items_weight)?;
    Ok(())
}

async fn ensure_shipping_provider_exists(txn: &DatabaseTransaction, id: i32) -> Result<()> {
    shipping_provider::Entity::find_by_id(id)
        .filter(shipping_provider::Column::DeletedAt.is_null())
        .one(txn)
        .await?
        .map(|_| ())
        .ok_or(LedgerError::NotFound {
            entity: "shipping provider",
            id,
        })
}

async fn ensure_shipping_source_exists(txn: &DatabaseTransaction, id: i32) -> Result<()> {
    shipping_source::Entity::find_by_id(id)
        .filter(shipping_source::Column::DeletedAt.is_null())
        .one(txn)
        .await?
        .map(|_| ())
        .ok_or(LedgerError::NotFound {
            entity: "shipping source",
            id,
        })
}

/// Opens a basket: debits the shipping charge and credits the provider's
/// points with one point per 100 units of declared weight.
#[instrument(skip(db, input), fields(provider_id = input.shipping_provider_id))]
pub async fn create_order_basket(
    db: &DatabaseConnection,
    input: NewOrderBasket,
) -> Result<order_basket::Model> {
    validate_money(
        input.total_price,
        input.total_paid_price,
        input.shipping_charge,
        input.items_weight,
    )?;

    let txn = db.begin().await?;
    ensure_shipping_provider_exists(&txn, input.shipping_provider_id).await?;
    if let Some(source_id) = input.shipping_source_id {
        ensure_shipping_source_exists(&txn, source_id).await?;
    }

    let contribution = basket_contribution(input.shipping_charge);
    capital::apply_delta(&txn, contribution).await?;

    let points = rules::points_from_weight_change(None, input.items_weight);
    rules::add_shipping_provider_points(&txn, input.shipping_provider_id, points).await?;

    let now = Utc::now().naive_utc();
    let model = order_basket::ActiveModel {
        total_price: Set(input.total_price),
        total_paid_price: Set(input.total_paid_price),
        number_of_items: Set(input.number_of_items),
        items_link: Set(input.items_link),
        items_weight: Set(input.items_weight),
        shipping_charge: Set(input.shipping_charge),
        shipped_at: Set(input.shipped_at),
        status: Set(input.status),
        notes: Set(input.notes),
        shipping_provider_id: Set(input.shipping_provider_id),
        shipping_source_id: Set(input.shipping_source_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!("Basket {} opened, capital delta {}", model.id, contribution);
    Ok(model)
}

/// Updates a basket; the shipping charge delta reconciles capital and the
/// weight delta feeds provider points.
#[instrument(skip(db, changes))]
pub async fn update_order_basket(
    db: &DatabaseConnection,
    id: i32,
    changes: OrderBasketChanges,
) -> Result<order_basket::Model> {
    let txn = db.begin().await?;

    let old = order_basket::Entity::find_by_id(id)
        .filter(order_basket::Column::DeletedAt.is_null())
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or(LedgerError::NotFound {
            entity: "order basket",
            id,
        })?;

    let new_total_price = changes.total_price.unwrap_or(old.total_price);
    let new_total_paid_price = changes.total_paid_price.or(old.total_paid_price);
    let new_shipping_charge = changes.shipping_charge.or(old.shipping_charge);
    let new_items_weight = changes.items_weight.or(old.items_weight);
    let new_provider_id = changes.shipping_provider_id.unwrap_or(old.shipping_provider_id);

    validate_money(
        new_total_price,
        new_total_paid_price,
        new_shipping_charge,
        new_items_weight,
    )?;
    if new_provider_id != old.shipping_provider_id {
        ensure_shipping_provider_exists(&txn, new_provider_id).await?;
    }
    if let Some(source_id) = changes.shipping_source_id {
        if Some(source_id) != old.shipping_source_id {
            ensure_shipping_source_exists(&txn, source_id).await?;
        }
    }

    let delta = basket_contribution(new_shipping_charge) - old.contribution();
    capital::apply_delta(&txn, delta).await?;

    let points = rules::points_from_weight_change(old.items_weight, new_items_weight);
    rules::add_shipping_provider_points(&txn, new_provider_id, points).await?;

    let mut active: order_basket::ActiveModel = old.into();
    active.total_price = Set(new_total_price);
    active.total_paid_price = Set(new_total_paid_price);
    if let Some(number_of_items) = changes.number_of_items {
        active.number_of_items = Set(number_of_items);
    }
    if let Some(items_link) = changes.items_link {
        active.items_link = Set(Some(items_link));
    }
    active.items_weight = Set(new_items_weight);
    active.shipping_charge = Set(new_shipping_charge);
    if let Some(shipped_at) = changes.shipped_at {
        active.shipped_at = Set(Some(shipped_at));
    }
    if let Some(received_at) = changes.received_at {
        active.received_at = Set(Some(received_at));
    }
    if let Some(status) = changes.status {
        active.status = Set(status);
    }
    if let Some(notes) = changes.notes {
        active.notes = Set(Some(notes));
    }
    active.shipping_provider_id = Set(new_provider_id);
    if let Some(source_id) = changes.shipping_source_id {
        active.shipping_source_id = Set(Some(source_id));
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    debug!("Basket {} updated, capital delta {}", model.id, delta);
    Ok(model)
}

/// Soft-deletes a basket and restores its shipping charge to the balance.
/// Orders inside the basket are left alone; deleting twice is a no-op.
#[instrument(skip(db))]
pub async fn delete_order_basket(db: &DatabaseConnection, id: i32) -> Result<()> {
    let txn = db.begin().await?;

    let old = order_basket::Entity::find_by_id(id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or(LedgerError::NotFound {
            entity: "order basket",
            id,
        })?;
    if old.deleted_at.is_some() {
        debug!("Basket {} already deleted, nothing to reverse", id);
        return Ok(());
    }

    capital::apply_delta(&txn, -old.contribution()).await?;

    let mut active: order_basket::ActiveModel = old.into();
    active.deleted_at = Set(Some(Utc::now().naive_utc()));
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(&txn).await?;
    txn.commit().await?;

    info!("Basket {} soft-deleted", id);
    Ok(())
}

/// Fetches a live basket by id.
pub async fn get_order_basket(db: &DatabaseConnection, id: i32) -> Result<order_basket::Model> {
    order_basket::Entity::find_by_id(id)
        .filter(order_basket::Column::DeletedAt.is_null())
        .one(db)
        .await?
        .ok_or(LedgerError::NotFound {
            entity: "order basket",
            id,
        })
}

/// Lists live baskets, newest first.
pub async fn list_order_baskets(db: &DatabaseConnection) -> Result<Vec<order_basket::Model>> {
    Ok(order_basket::Entity::find()
        .filter(order_basket::Column::DeletedAt.is_null())
        .order_by_desc(order_basket::Column::Id)
        .all(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::get_capital_balance;
    use crate::testing::{new_basket, seed_shipping_provider, setup_db};

    #[tokio::test]
    async fn shipping_charge_moves_with_its_delta() {
        let db = setup_db().await;
        let provider = seed_shipping_provider(&db).await;

        let basket = create_order_basket(
            &db,
            NewOrderBasket {
                shipping_charge: Some(Decimal::from(20)),
                ..new_basket(provider.id)
            },
        )
        .await
        .unwrap();
        assert_eq!(get_capital_balance(&db).await.unwrap(), Decimal::from(-20));

        // 20 -> 35 applies only the -15 delta.
        update_order_basket(
            &db,
            basket.id,
            OrderBasketChanges {
                shipping_charge: Some(Decimal::from(35)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(get_capital_balance(&db).await.unwrap(), Decimal::from(-35));

        delete_order_basket(&db, basket.id).await.unwrap();
        assert_eq!(get_capital_balance(&db).await.unwrap(), Decimal::ZERO);

        // Idempotent reversal.
        delete_order_basket(&db, basket.id).await.unwrap();
        assert_eq!(get_capital_balance(&db).await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn omitted_fields_survive_a_basket_update() {
        let db = setup_db().await;
        let provider = seed_shipping_provider(&db).await;

        let basket = create_order_basket(
            &db,
            NewOrderBasket {
                shipping_charge: Some(Decimal::from(20)),
                ..new_basket(provider.id)
            },
        )
        .await
        .unwrap();

        let updated = update_order_basket(
            &db,
            basket.id,
            OrderBasketChanges {
                notes: Some("held at customs".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        // Omitted nullable fields keep their stored value.
        assert_eq!(updated.shipping_charge, Some(Decimal::from(20)));
        assert_eq!(get_capital_balance(&db).await.unwrap(), Decimal::from(-20));
    }

    #[tokio::test]
    async fn basket_weight_feeds_provider_points() {
        let db = setup_db().await;
        let provider = seed_shipping_provider(&db).await;

        // 250 units of weight: floor(250 / 100) = 2 points.
        let basket = create_order_basket(
            &db,
            NewOrderBasket {
                items_weight: Some(Decimal::from(250)),
                ..new_basket(provider.id)
            },
        )
        .await
        .unwrap();
        let after_create = shipping_provider::Entity::find_by_id(provider.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after_create.points, 2);

        // 250 -> 420 adds floor(170 / 100) = 1 more point.
        update_order_basket(
            &db,
            basket.id,
            OrderBasketChanges {
                items_weight: Some(Decimal::from(420)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let after_update = shipping_provider::Entity::find_by_id(provider.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after_update.points, 3);
    }

    #[tokio::test]
    async fn basket_without_shipping_charge_is_ledger_neutral() {
        let db = setup_db().await;
        let provider = seed_shipping_provider(&db).await;

        let basket = create_order_basket(&db, new_basket(provider.id)).await.unwrap();
        assert_eq!(get_capital_balance(&db).await.unwrap(), Decimal::ZERO);

        delete_order_basket(&db, basket.id).await.unwrap();
        assert_eq!(get_capital_balance(&db).await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn basket_requires_a_live_shipping_provider() {
        let db = setup_db().await;

        let err = create_order_basket(&db, new_basket(999)).await.unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { .. }));
        assert_eq!(get_capital_balance(&db).await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn negative_charge_is_rejected() {
        let db = setup_db().await;
        let provider = seed_shipping_provider(&db).await;

        let err = create_order_basket(
            &db,
            NewOrderBasket {
                shipping_charge: Some(Decimal::from(-1)),
                ..new_basket(provider.id)
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }
}
