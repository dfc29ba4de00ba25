use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle of a customer order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "boxing")]
    Boxing,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// A customer purchase order, always part of exactly one order basket.
///
/// Capital reflects `-delivery_charge` (money paid out to deliver) plus
/// `total_price` only while `has_received_price` is true: price owed but not
/// yet collected does not count.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub total_price: Decimal,
    pub number_of_items: i32,
    pub items_link: Option<String>,
    /// Cost paid out to the delivery provider.
    pub delivery_charge: Option<Decimal>,
    /// Amount charged to the customer for delivery.
    pub customer_delivery_charge: Option<Decimal>,
    pub ordered_at: Option<DateTime>,
    pub delivered_at: Option<DateTime>,
    /// Whether payment has actually been collected from the customer.
    #[sea_orm(default_value = false)]
    pub has_received_price: bool,
    pub bill_id: Option<String>,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub customer_id: i32,
    pub order_basket_id: i32,
    pub delivery_provider_id: Option<i32>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub deleted_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::order_basket::Entity",
        from = "Column::OrderBasketId",
        to = "super::order_basket::Column::Id"
    )]
    OrderBasket,
    #[sea_orm(
        belongs_to = "super::delivery_provider::Entity",
        from = "Column::DeliveryProviderId",
        to = "super::delivery_provider::Column::Id"
    )]
    DeliveryProvider,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::order_basket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderBasket.def()
    }
}

impl Related<super::delivery_provider::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeliveryProvider.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
