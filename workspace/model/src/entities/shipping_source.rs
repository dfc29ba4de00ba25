use sea_orm::entity::prelude::*;

/// Origin warehouse a basket is consolidated at before shipping.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "shipping_sources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub deleted_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_basket::Entity")]
    OrderBasket,
}

impl Related<super::order_basket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderBasket.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
