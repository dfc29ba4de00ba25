//! Capital ledger reconciliation for the reshipping back office.
//!
//! Every mutation of an expense, order, or order basket runs inside a single
//! database transaction that also applies the mutation's contribution delta
//! to the singleton capital balance. The balance therefore always equals the
//! sum of the contributions of all live rows.

pub mod baskets;
pub mod capital;
pub mod contribution;
pub mod error;
pub mod expenses;
pub mod orders;
pub mod reports;

mod rules;
mod validate;

#[cfg(test)]
mod testing;

pub use error::{LedgerError, Result};

#[cfg(test)]
mod tests {
    use crate::contribution::CapitalContribution;
    use crate::testing::{new_order, seed_basket, seed_customer, setup_db};
    use crate::{expenses, orders, reports};
    use model::entities::{expense, order, order_basket};
    use rust_decimal::Decimal;
    use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

    async fn sum_live_contributions(db: &DatabaseConnection) -> Decimal {
        let mut total = Decimal::ZERO;
        for e in expense::Entity::find()
            .filter(expense::Column::DeletedAt.is_null())
            .all(db)
            .await
            .unwrap()
        {
            total += e.contribution();
        }
        for o in order::Entity::find()
            .filter(order::Column::DeletedAt.is_null())
            .all(db)
            .await
            .unwrap()
        {
            total += o.contribution();
        }
        for b in order_basket::Entity::find()
            .filter(order_basket::Column::DeletedAt.is_null())
            .all(db)
            .await
            .unwrap()
        {
            total += b.contribution();
        }
        total
    }

    /// After any sequence of operations the balance must equal the sum of
    /// the live rows' contributions.
    #[tokio::test]
    async fn balance_equals_sum_of_live_contributions() {
        let db = setup_db().await;
        let customer = seed_customer(&db).await;
        let basket = seed_basket(&db, Some(Decimal::from(20))).await;

        let expense = expenses::create_expense(
            &db,
            expenses::NewExpense {
                name: "Customs fee".to_string(),
                amount: Decimal::from(45),
                date: None,
                category_id: None,
                description: None,
            },
        )
        .await
        .unwrap();

        let first = orders::create_order(
            &db,
            orders::NewOrder {
                delivery_charge: Some(Decimal::from(10)),
                ..new_order(customer.id, basket.id)
            },
        )
        .await
        .unwrap();
        let second = orders::create_order(
            &db,
            orders::NewOrder {
                total_price: Decimal::from(300),
                has_received_price: true,
                ..new_order(customer.id, basket.id)
            },
        )
        .await
        .unwrap();

        orders::update_order(
            &db,
            first.id,
            orders::OrderChanges {
                has_received_price: Some(true),
                total_price: Some(Decimal::from(150)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        orders::delete_order(&db, second.id).await.unwrap();
        expenses::update_expense(
            &db,
            expense.id,
            expenses::ExpenseChanges {
                amount: Some(Decimal::from(60)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let balance = reports::get_capital_balance(&db).await.unwrap();
        assert_eq!(balance, sum_live_contributions(&db).await);
        // -20 (basket) - 60 (expense) + 150 - 10 (collected first order).
        assert_eq!(balance, Decimal::from(60));
    }
}
