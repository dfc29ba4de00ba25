use sea_orm::entity::prelude::*;

/// A freight provider that ships whole baskets between countries.
///
/// `points` is a loyalty counter fed by basket weight (one point per 100
/// units of weight moved); `price_per_kg` is informational and used when
/// quoting a basket's shipping charge.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "shipping_providers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub phone_number: String,
    pub price_per_kg: Decimal,
    pub address: String,
    #[sea_orm(default_value = 0)]
    pub points: i64,
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
