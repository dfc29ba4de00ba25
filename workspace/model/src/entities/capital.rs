use sea_orm::entity::prelude::*;

/// Fixed identity of the singleton capital row.
pub const SINGLETON_ID: i32 = 1;

/// The business's single running cash balance.
///
/// Exactly one row exists system-wide, pinned to [`SINGLETON_ID`]. It is a
/// derived ledger, not a bank integration: every money-bearing mutation of an
/// expense, order, or order basket adjusts `amount` by the delta between the
/// entity's old and new contribution. All writes go through the ledger crate;
/// nothing else touches this table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "capital")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub amount: Decimal,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub deleted_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
