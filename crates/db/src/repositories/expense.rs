//! Expense repository for database operations.

use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;
use xpensify_core::expense::{ExpenseRecord, NewExpense};
use xpensify_shared::types::{ExpenseId, UserId};

use crate::entities::expenses;

/// Expense repository.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a validated expense for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: &NewExpense,
    ) -> Result<expenses::Model, DbErr> {
        let expense = expenses::ActiveModel {
            id: Set(ExpenseId::new().into_inner()),
            user_id: Set(user_id),
            amount: Set(input.amount),
            description: Set(input.description.clone()),
            expense_date: Set(input.date.into()),
            created_at: Set(Utc::now().into()),
        };

        expense.insert(&self.db).await
    }

    /// Lists every expense of `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<expenses::Model>, DbErr> {
        expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .order_by_desc(expenses::Column::ExpenseDate)
            .order_by_desc(expenses::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Lists the expenses of `user_id` dated within `[start, end]`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_between(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<expenses::Model>, DbErr> {
        expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .filter(expenses::Column::ExpenseDate.between(start, end))
            .order_by_desc(expenses::Column::ExpenseDate)
            .order_by_desc(expenses::Column::CreatedAt)
            .all(&self.db)
            .await
    }
}

/// Converts a stored expense into a record on the owner's local calendar.
#[must_use]
pub fn to_expense_record<Tz: TimeZone>(model: expenses::Model, tz: &Tz) -> ExpenseRecord {
    ExpenseRecord::from_utc(
        ExpenseId::from_uuid(model.id),
        UserId::from_uuid(model.user_id),
        model.amount.normalize(),
        model.description,
        model.expense_date.with_timezone(&Utc),
        tz,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate};
    use rust_decimal_macros::dec;

    fn model(hour: u32) -> expenses::Model {
        let date = NaiveDate::from_ymd_opt(2025, 5, 31)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
            .and_utc();
        expenses::Model {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            amount: dec!(250),
            description: "Taxi".to_string(),
            expense_date: date.fixed_offset(),
            created_at: date.fixed_offset(),
        }
    }

    #[test]
    fn test_to_expense_record_shifts_into_zone() {
        let ist = chrono_tz::Asia::Kolkata;
        let record = to_expense_record(model(20), &ist);

        // 20:00 UTC on 31 May is 01:30 on 1 June in India
        assert_eq!(
            record.date,
            NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(1, 30, 0)
                .unwrap()
        );
        assert_eq!(record.amount, dec!(250));
        assert_eq!(record.description, "Taxi");
    }

    #[test]
    fn test_to_expense_record_keeps_ids() {
        let stored = model(9);
        let (id, user_id) = (stored.id, stored.user_id);

        let record = to_expense_record(stored, &FixedOffset::east_opt(0).unwrap());

        assert_eq!(record.id.into_inner(), id);
        assert_eq!(record.owner_id.into_inner(), user_id);
    }
}
