use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle of a shipping basket.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum OrderBasketStatus {
    #[default]
    #[sea_orm(string_value = "shipping")]
    Shipping,
    #[sea_orm(string_value = "received")]
    Received,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// A group of orders shipped together through one shipping provider.
///
/// Capital reflects `-shipping_charge`. A basket auto-completes once every
/// live order in it has collected its price.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "order_baskets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub total_price: Decimal,
    pub total_paid_price: Option<Decimal>,
    pub number_of_items: i32,
    pub items_link: Option<String>,
    pub items_weight: Option<Decimal>,
    /// Cost paid out to the shipping provider.
    pub shipping_charge: Option<Decimal>,
    pub shipped_at: Option<DateTime>,
    pub received_at: Option<DateTime>,
    pub status: OrderBasketStatus,
    pub notes: Option<String>,
    pub shipping_provider_id: i32,
    pub shipping_source_id: Option<i32>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub deleted_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shipping_provider::Entity",
        from = "Column::ShippingProviderId",
        to = "super::shipping_provider::Column::Id"
    )]
    ShippingProvider,
    #[sea_orm(
        belongs_to = "super::shipping_source::Entity",
        from = "Column::ShippingSourceId",
        to = "super::shipping_source::Column::Id"
    )]
    ShippingSource,
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
}

impl Related<super::shipping_provider::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShippingProvider.def()
    }
}

impl Related<super::shipping_source::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShippingSource.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
