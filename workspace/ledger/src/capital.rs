//! The capital account: one row, one balance, one way to change it.
//!
//! Callers never mutate the balance directly. Reconciliation computes a delta
//! from an entity's old and new contribution and applies it here, inside the
//! same transaction that persists the entity.

use chrono::Utc;
use model::entities::capital;
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, QuerySelect, Set};
use tracing::{debug, instrument, trace};

use crate::error::{LedgerError, Result};

/// Returns the singleton capital account, creating it with a zero balance if
/// absent.
///
/// Creation goes through an insert with on-conflict-do-nothing on the fixed
/// id, so concurrent callers cannot create two rows; the uniqueness
/// constraint decides the race, not a check-then-create.
#[instrument(skip(conn))]
pub async fn get_or_create<C: ConnectionTrait>(conn: &C) -> Result<capital::Model> {
    let now = Utc::now().naive_utc();
    let seed = capital::ActiveModel {
        id: Set(capital::SINGLETON_ID),
        amount: Set(Decimal::ZERO),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let inserted = capital::Entity::insert(seed)
        .on_conflict(
            OnConflict::column(capital::Column::Id)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await;
    match inserted {
        Ok(_) => trace!("Capital row created with zero balance"),
        // The row already existed; the conflict clause swallowed the insert.
        Err(DbErr::RecordNotInserted) => {}
        Err(e) => return Err(e.into()),
    }

    capital::Entity::find_by_id(capital::SINGLETON_ID)
        .one(conn)
        .await?
        .ok_or(LedgerError::NotFound {
            entity: "capital",
            id: capital::SINGLETON_ID,
        })
}

/// Adds `delta` (positive or negative) to the capital balance.
///
/// The row is read with an exclusive row lock so concurrent appliers
/// serialize on it; deltas are additive, so the final balance is independent
/// of the ordering. A zero delta performs no write at all.
///
/// Must be called inside the same transaction as the entity write it is
/// reconciling: a crash between the two then rolls both back together.
#[instrument(skip(conn))]
pub async fn apply_delta<C: ConnectionTrait>(conn: &C, delta: Decimal) -> Result<capital::Model> {
    if delta.is_zero() {
        trace!("Zero delta, skipping capital write");
        return get_or_create(conn).await;
    }

    get_or_create(conn).await?;
    let row = capital::Entity::find_by_id(capital::SINGLETON_ID)
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or(LedgerError::NotFound {
            entity: "capital",
            id: capital::SINGLETON_ID,
        })?;

    let new_amount = row.amount + delta;
    debug!(
        "Applying capital delta {}: balance {} -> {}",
        delta, row.amount, new_amount
    );

    let mut active: capital::ActiveModel = row.into();
    active.amount = Set(new_amount);
    active.updated_at = Set(Utc::now().naive_utc());
    Ok(active.update(conn).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::setup_db;

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let db = setup_db().await;

        let first = get_or_create(&db).await.unwrap();
        let second = get_or_create(&db).await.unwrap();

        assert_eq!(first.id, capital::SINGLETON_ID);
        assert_eq!(first.amount, Decimal::ZERO);
        assert_eq!(second.id, first.id);

        let rows = capital::Entity::find().all(&db).await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn apply_delta_accumulates() {
        let db = setup_db().await;

        apply_delta(&db, Decimal::new(5000, 2)).await.unwrap();
        apply_delta(&db, Decimal::new(-2000, 2)).await.unwrap();
        let row = apply_delta(&db, Decimal::new(500, 2)).await.unwrap();

        assert_eq!(row.amount, Decimal::new(3500, 2));
    }

    #[tokio::test]
    async fn zero_delta_creates_but_does_not_touch_balance() {
        let db = setup_db().await;

        let row = apply_delta(&db, Decimal::ZERO).await.unwrap();
        assert_eq!(row.amount, Decimal::ZERO);
    }
}
