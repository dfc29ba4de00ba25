//! Shared fixtures for the crate's tests: an in-memory database with the
//! full schema applied, plus seed rows for the common foreign keys.

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use model::entities::order::OrderStatus;
use model::entities::order_basket::OrderBasketStatus;
use model::entities::{customer, order_basket, shipping_provider};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, Set};

use crate::baskets::{create_order_basket, NewOrderBasket};
use crate::orders::NewOrder;

pub(crate) async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    db.execute_unprepared("PRAGMA foreign_keys = ON;")
        .await
        .unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub(crate) async fn seed_customer(db: &DatabaseConnection) -> customer::Model {
    let now = Utc::now().naive_utc();
    customer::ActiveModel {
        full_name: Set("Sara Haddad".to_string()),
        phone_number: Set(Some("0912345678".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub(crate) async fn seed_shipping_provider(db: &DatabaseConnection) -> shipping_provider::Model {
    let now = Utc::now().naive_utc();
    shipping_provider::ActiveModel {
        name: Set("Falcon Freight".to_string()),
        phone_number: Set("0998765432".to_string()),
        price_per_kg: Set(Decimal::new(250, 2)),
        address: Set("Dubai".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

/// Basket input with no ledger effect; override what the test cares about.
pub(crate) fn new_basket(shipping_provider_id: i32) -> NewOrderBasket {
    NewOrderBasket {
        total_price: Decimal::ZERO,
        total_paid_price: None,
        number_of_items: 0,
        items_link: None,
        items_weight: None,
        shipping_charge: None,
        shipped_at: None,
        status: OrderBasketStatus::default(),
        notes: None,
        shipping_provider_id,
        shipping_source_id: None,
    }
}

/// Order input for an uncollected 100-unit order with no delivery cost.
pub(crate) fn new_order(customer_id: i32, order_basket_id: i32) -> NewOrder {
    NewOrder {
        total_price: Decimal::from(100),
        number_of_items: 1,
        items_link: None,
        delivery_charge: None,
        customer_delivery_charge: None,
        ordered_at: None,
        has_received_price: false,
        bill_id: None,
        status: OrderStatus::default(),
        notes: None,
        customer_id,
        order_basket_id,
        delivery_provider_id: None,
    }
}

/// Seeds a provider and opens a basket through the real operation, so the
/// shipping charge (if any) is reconciled like production writes are.
pub(crate) async fn seed_basket(
    db: &DatabaseConnection,
    shipping_charge: Option<Decimal>,
) -> order_basket::Model {
    let provider = seed_shipping_provider(db).await;
    create_order_basket(
        db,
        NewOrderBasket {
            shipping_charge,
            ..new_basket(provider.id)
        },
    )
    .await
    .unwrap()
}
