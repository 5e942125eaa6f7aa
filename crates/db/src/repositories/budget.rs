//! Budget repository for monthly budget records.
//!
//! A budget is keyed by owner and month. Saving a budget for a month that
//! already has one overwrites its amount instead of adding a second row.

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;
use xpensify_core::budget::{BudgetRecord, NewBudget};
use xpensify_core::period::PeriodKey;
use xpensify_shared::types::{BudgetId, UserId};

use crate::entities::budgets;

/// Whether an upsert wrote a new row or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No budget existed for the month.
    Created,
    /// The month's budget amount was replaced.
    Updated,
}

/// Budget repository.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the budget of `user_id` for `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored month is malformed.
    pub async fn find_for_period(
        &self,
        user_id: Uuid,
        period: &PeriodKey,
    ) -> Result<Option<BudgetRecord>, DbErr> {
        latest_for_month(&self.db, user_id, &period.to_string())
            .await?
            .map(to_budget_record)
            .transpose()
    }

    /// Lists the budgets of `user_id`, most recent month first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored month is malformed.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<BudgetRecord>, DbErr> {
        let models = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .order_by_desc(budgets::Column::Month)
            .order_by_desc(budgets::Column::UpdatedAt)
            .all(&self.db)
            .await?;

        let mut records = models
            .into_iter()
            .map(to_budget_record)
            .collect::<Result<Vec<_>, _>>()?;
        records.dedup_by(|later, kept| later.period_key == kept.period_key);

        Ok(records)
    }

    /// Saves the budget for a month, overwriting any existing amount.
    ///
    /// Runs as a read-then-write transaction. Two writers racing on the same
    /// month both succeed; readers see whichever row was updated last.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        input: &NewBudget,
    ) -> Result<(BudgetRecord, UpsertOutcome), DbErr> {
        let month = input.period_key.to_string();
        let now: DateTimeWithTimeZone = Utc::now().into();

        let txn = self.db.begin().await?;

        let (model, outcome) = match latest_for_month(&txn, user_id, &month).await? {
            Some(existing) => {
                let mut budget: budgets::ActiveModel = existing.into();
                budget.amount = Set(input.amount);
                budget.updated_at = Set(now);
                (budget.update(&txn).await?, UpsertOutcome::Updated)
            }
            None => {
                let budget = budgets::ActiveModel {
                    id: Set(BudgetId::new().into_inner()),
                    user_id: Set(user_id),
                    month: Set(month),
                    amount: Set(input.amount),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                (budget.insert(&txn).await?, UpsertOutcome::Created)
            }
        };

        txn.commit().await?;

        debug!(budget_id = %model.id, ?outcome, "Saved budget");
        Ok((to_budget_record(model)?, outcome))
    }
}

async fn latest_for_month<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    month: &str,
) -> Result<Option<budgets::Model>, DbErr> {
    budgets::Entity::find()
        .filter(budgets::Column::UserId.eq(user_id))
        .filter(budgets::Column::Month.eq(month))
        .order_by_desc(budgets::Column::UpdatedAt)
        .one(conn)
        .await
}

/// Converts a stored budget row into a domain record.
///
/// # Errors
///
/// Returns `DbErr::Custom` if the stored month is not a valid `YYYY-MM` key.
pub fn to_budget_record(model: budgets::Model) -> Result<BudgetRecord, DbErr> {
    let period_key: PeriodKey = model
        .month
        .trim()
        .parse()
        .map_err(|e| DbErr::Custom(format!("budget {}: {e}", model.id)))?;

    Ok(BudgetRecord {
        id: BudgetId::from_uuid(model.id),
        owner_id: UserId::from_uuid(model.user_id),
        period_key,
        amount: model.amount.normalize(),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
