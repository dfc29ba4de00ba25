//! Expense operations. Every mutation reconciles the capital balance inside
//! the same transaction that persists the expense row.

use chrono::{NaiveDate, Utc};
use model::entities::{expense, expense_category};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, info, instrument};

use crate::contribution::{expense_contribution, CapitalContribution};
use crate::error::{LedgerError, Result};
use crate::{capital, validate};

/// Fields for booking a new expense.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub name: String,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    pub category_id: Option<i32>,
    pub description: Option<String>,
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ExpenseChanges {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub category_id: Option<i32>,
    pub description: Option<String>,
}

/// Books an expense and debits the capital balance by its amount.
#[instrument(skip(db))]
pub async fn create_expense(db: &DatabaseConnection, input: NewExpense) -> Result<expense::Model> {
    validate::positive("amount", input.amount)?;

    let txn = db.begin().await?;
    capital::apply_delta(&txn, expense_contribution(input.amount)).await?;

    let now = Utc::now().naive_utc();
    let model = expense::ActiveModel {
        name: Set(input.name),
        amount: Set(input.amount),
        date: Set(input.date),
        category_id: Set(input.category_id),
        description: Set(input.description),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!("Expense {} booked for {}", model.id, model.amount);
    Ok(model)
}

/// Updates an expense; only the delta between the old and new amount touches
/// the capital balance.
#[instrument(skip(db))]
pub async fn update_expense(
    db: &DatabaseConnection,
    id: i32,
    changes: ExpenseChanges,
) -> Result<expense::Model> {
    let txn = db.begin().await?;

    // Pre-image read under lock; the delta must be computed against the state
    // this transaction will overwrite, not a stale snapshot.
    let old = expense::Entity::find_by_id(id)
        .filter(expense::Column::DeletedAt.is_null())
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or(LedgerError::NotFound {
            entity: "expense",
            id,
        })?;

    let new_amount = changes.amount.unwrap_or(old.amount);
    validate::positive("amount", new_amount)?;

    let delta = expense_contribution(new_amount) - old.contribution();
    capital::apply_delta(&txn, delta).await?;

    let mut active: expense::ActiveModel = old.into();
    if let Some(name) = changes.name {
        active.name = Set(name);
    }
    active.amount = Set(new_amount);
    if let Some(date) = changes.date {
        active.date = Set(Some(date));
    }
    if let Some(category_id) = changes.category_id {
        active.category_id = Set(Some(category_id));
    }
    if let Some(description) = changes.description {
        active.description = Set(Some(description));
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    debug!("Expense {} updated, capital delta {}", model.id, delta);
    Ok(model)
}

/// Soft-deletes an expense and restores its amount to the capital balance.
/// Deleting an already-deleted expense is a no-op that reports success.
#[instrument(skip(db))]
pub async fn delete_expense(db: &DatabaseConnection, id: i32) -> Result<()> {
    let txn = db.begin().await?;

    let old = expense::Entity::find_by_id(id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or(LedgerError::NotFound {
            entity: "expense",
            id,
        })?;
    if old.deleted_at.is_some() {
        debug!("Expense {} already deleted, nothing to reverse", id);
        return Ok(());
    }

    capital::apply_delta(&txn, -old.contribution()).await?;

    let mut active: expense::ActiveModel = old.into();
    active.deleted_at = Set(Some(Utc::now().naive_utc()));
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(&txn).await?;
    txn.commit().await?;

    info!("Expense {} soft-deleted", id);
    Ok(())
}

/// Fetches a live expense by id.
pub async fn get_expense(db: &DatabaseConnection, id: i32) -> Result<expense::Model> {
    expense::Entity::find_by_id(id)
        .filter(expense::Column::DeletedAt.is_null())
        .one(db)
        .await?
        .ok_or(LedgerError::NotFound {
            entity: "expense",
            id,
        })
}

/// Lists live expenses, newest first.
pub async fn list_expenses(db: &DatabaseConnection) -> Result<Vec<expense::Model>> {
    Ok(expense::Entity::find()
        .filter(expense::Column::DeletedAt.is_null())
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await?)
}

/// Creates an expense category. No ledger effect.
#[instrument(skip(db))]
pub async fn create_expense_category(
    db: &DatabaseConnection,
    name: String,
    description: Option<String>,
) -> Result<expense_category::Model> {
    let now = Utc::now().naive_utc();
    Ok(expense_category::ActiveModel {
        name: Set(name),
        description: Set(description),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?)
}

/// Lists live expense categories.
pub async fn list_expense_categories(
    db: &DatabaseConnection,
) -> Result<Vec<expense_category::Model>> {
    Ok(expense_category::Entity::find()
        .filter(expense_category::Column::DeletedAt.is_null())
        .order_by_asc(expense_category::Column::Name)
        .all(db)
        .await?)
}

/// Fetches a live expense category by id.
pub async fn get_expense_category(
    db: &DatabaseConnection,
    id: i32,
) -> Result<expense_category::Model> {
    expense_category::Entity::find_by_id(id)
        .filter(expense_category::Column::DeletedAt.is_null())
        .one(db)
        .await?
        .ok_or(LedgerError::NotFound {
            entity: "expense category",
            id,
        })
}

/// Renames or redescribes a category. No ledger effect.
#[instrument(skip(db))]
pub async fn update_expense_category(
    db: &DatabaseConnection,
    id: i32,
    name: Option<String>,
    description: Option<String>,
) -> Result<expense_category::Model> {
    let existing = get_expense_category(db, id).await?;

    let mut active: expense_category::ActiveModel = existing.into();
    if let Some(name) = name {
        active.name = Set(name);
    }
    if let Some(description) = description {
        active.description = Set(Some(description));
    }
    active.updated_at = Set(Utc::now().naive_utc());
    Ok(active.update(db).await?)
}

/// Soft-deletes a category. Expenses keep their `category_id`; deleting an
/// already-deleted category is a no-op that reports success.
#[instrument(skip(db))]
pub async fn delete_expense_category(db: &DatabaseConnection, id: i32) -> Result<()> {
    let existing = expense_category::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(LedgerError::NotFound {
            entity: "expense category",
            id,
        })?;
    if existing.deleted_at.is_some() {
        debug!("Expense category {} already deleted", id);
        return Ok(());
    }

    let mut active: expense_category::ActiveModel = existing.into();
    active.deleted_at = Set(Some(Utc::now().naive_utc()));
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(db).await?;

    info!("Expense category {} soft-deleted", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::get_capital_balance;
    use crate::testing::setup_db;

    fn new_expense(amount: i64) -> NewExpense {
        NewExpense {
            name: "Warehouse rent".to_string(),
            amount: Decimal::from(amount),
            date: None,
            category_id: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn booking_updating_and_deleting_an_expense_reconciles_capital() {
        let db = setup_db().await;

        // Booking 50 debits the balance by 50.
        let expense = create_expense(&db, new_expense(50)).await.unwrap();
        assert_eq!(get_capital_balance(&db).await.unwrap(), Decimal::from(-50));

        // Lowering the amount to 30 applies only the +20 delta.
        let expense = update_expense(
            &db,
            expense.id,
            ExpenseChanges {
                amount: Some(Decimal::from(30)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(expense.amount, Decimal::from(30));
        assert_eq!(get_capital_balance(&db).await.unwrap(), Decimal::from(-30));

        // Soft-delete restores the full remaining contribution.
        delete_expense(&db, expense.id).await.unwrap();
        assert_eq!(get_capital_balance(&db).await.unwrap(), Decimal::ZERO);

        // The row is retained, only marked deleted.
        let raw = expense::Entity::find_by_id(expense.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert!(raw.deleted_at.is_some());
    }

    #[tokio::test]
    async fn soft_delete_is_idempotent() {
        let db = setup_db().await;
        let expense = create_expense(&db, new_expense(80)).await.unwrap();

        delete_expense(&db, expense.id).await.unwrap();
        delete_expense(&db, expense.id).await.unwrap();

        // The reversal happened exactly once.
        assert_eq!(get_capital_balance(&db).await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn non_monetary_update_leaves_balance_unchanged() {
        let db = setup_db().await;
        let expense = create_expense(&db, new_expense(25)).await.unwrap();

        update_expense(
            &db,
            expense.id,
            ExpenseChanges {
                name: Some("Office rent".to_string()),
                description: Some("March".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(get_capital_balance(&db).await.unwrap(), Decimal::from(-25));
    }

    #[tokio::test]
    async fn invalid_amounts_are_rejected_before_reconciliation() {
        let db = setup_db().await;

        let err = create_expense(&db, new_expense(0)).await.unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(get_capital_balance(&db).await.unwrap(), Decimal::ZERO);

        let expense = create_expense(&db, new_expense(10)).await.unwrap();
        let err = update_expense(
            &db,
            expense.id,
            ExpenseChanges {
                amount: Some(Decimal::from(-5)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(get_capital_balance(&db).await.unwrap(), Decimal::from(-10));
    }

    #[tokio::test]
    async fn category_crud_never_touches_the_balance() {
        let db = setup_db().await;

        let category = create_expense_category(&db, "Packaging".to_string(), None)
            .await
            .unwrap();
        let renamed = update_expense_category(
            &db,
            category.id,
            Some("Packaging materials".to_string()),
            Some("Boxes and tape".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(renamed.name, "Packaging materials");

        delete_expense_category(&db, category.id).await.unwrap();
        assert!(matches!(
            get_expense_category(&db, category.id).await.unwrap_err(),
            LedgerError::NotFound { .. }
        ));
        assert!(list_expense_categories(&db).await.unwrap().is_empty());
        // Deleting twice still reports success.
        delete_expense_category(&db, category.id).await.unwrap();

        assert_eq!(get_capital_balance(&db).await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn deleted_expenses_are_invisible_to_reads() {
        let db = setup_db().await;
        let expense = create_expense(&db, new_expense(15)).await.unwrap();
        delete_expense(&db, expense.id).await.unwrap();

        assert!(matches!(
            get_expense(&db, expense.id).await.unwrap_err(),
            LedgerError::NotFound { .. }
        ));
        assert!(list_expenses(&db).await.unwrap().is_empty());

        // Updating a deleted expense fails too.
        let err = update_expense(&db, expense.id, ExpenseChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { .. }));
    }
}
