use sea_orm::entity::prelude::*;

/// A booked business cost.
///
/// Every unit of `amount` reduces the capital balance by the same unit when
/// the expense is created, and is restored when the expense is soft-deleted.
/// The reconciliation itself lives in the ledger crate.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Positive cost; validated before any ledger reconciliation.
    pub amount: Decimal,
    pub date: Option<Date>,
    pub category_id: Option<i32>,
    pub description: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub deleted_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::expense_category::Entity",
        from = "Column::CategoryId",
        to = "super::expense_category::Column::Id"
    )]
    ExpenseCategory,
}

impl Related<super::expense_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
