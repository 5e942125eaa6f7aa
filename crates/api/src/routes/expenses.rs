//! Expense routes: record an expense, list them whole or by week.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;
use xpensify_core::expense::{CreateExpenseInput, ExpenseRecord};
use xpensify_core::week::{WeekFilter, filter_by_week};
use xpensify_db::ExpenseRepository;
use xpensify_db::repositories::expense::to_expense_record;
use xpensify_shared::types::ExpenseId;

use crate::{
    AppState,
    error::{ApiResult, AppJson},
    middleware::AuthUser,
};

/// Creates the expense routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/expenses", get(list_expenses).post(create_expense))
}

/// Query string for listing expenses.
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseListQuery {
    /// `current` or a number of weeks back, 0 to 4.
    pub week: Option<String>,
}

/// An expense as returned to clients, dated on the owner's calendar.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    /// Expense ID.
    pub id: ExpenseId,
    /// Amount spent.
    pub amount: Decimal,
    /// Description.
    pub description: String,
    /// Local date and time.
    pub date: NaiveDateTime,
}

impl From<ExpenseRecord> for ExpenseResponse {
    fn from(record: ExpenseRecord) -> Self {
        Self {
            id: record.id,
            amount: record.amount,
            description: record.description,
            date: record.date,
        }
    }
}

/// Selected week, echoed back with the filtered list.
#[derive(Debug, Serialize)]
pub struct WeekRangeResponse {
    /// "This Week", "Last Week" or "N Weeks Ago".
    pub label: String,
    /// Monday at midnight.
    pub start: NaiveDateTime,
    /// Sunday at the last millisecond.
    pub end: NaiveDateTime,
}

/// POST `/expenses` - Record an expense.
async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(payload): AppJson<CreateExpenseInput>,
) -> ApiResult<impl IntoResponse> {
    let input = payload.validate()?;

    let repo = ExpenseRepository::new((*state.db).clone());
    let expense = repo.create(auth.user_id(), &input).await?;

    info!(
        user_id = %auth.user_id(),
        expense_id = %expense.id,
        "Expense recorded"
    );

    let expense = ExpenseResponse::from(to_expense_record(expense, &state.timezone));
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Expense recorded successfully",
            "expense": expense
        })),
    ))
}

/// GET `/expenses` - List expenses, newest first.
///
/// With `?week=`, only the selected Monday-to-Sunday week is returned and the
/// range is echoed back.
async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ExpenseListQuery>,
) -> ApiResult<Json<Value>> {
    let filter = query
        .week
        .as_deref()
        .map(str::parse::<WeekFilter>)
        .transpose()?;

    let repo = ExpenseRepository::new((*state.db).clone());
    let records: Vec<ExpenseRecord> = repo
        .list_for_user(auth.user_id())
        .await?
        .into_iter()
        .map(|model| to_expense_record(model, &state.timezone))
        .collect();

    let Some(filter) = filter else {
        let expenses: Vec<ExpenseResponse> = records.into_iter().map(Into::into).collect();
        return Ok(Json(json!({
            "message": "Expenses fetched successfully",
            "expenses": expenses
        })));
    };

    let range = filter.range(state.local_now());
    let expenses: Vec<ExpenseResponse> = filter_by_week(&records, &range)
        .into_iter()
        .map(Into::into)
        .collect();

    let range = WeekRangeResponse {
        label: filter.label(),
        start: range.start,
        end: range.end,
    };

    Ok(Json(json!({
        "message": "Expenses fetched successfully",
        "expenses": expenses,
        "range": range
    })))
}
