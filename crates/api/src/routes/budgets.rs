//! Monthly budget routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;
use xpensify_core::budget::{BudgetRecord, SetBudgetInput};
use xpensify_core::period::PeriodKey;
use xpensify_db::{BudgetRepository, UpsertOutcome};
use xpensify_shared::types::BudgetId;

use super::resolve_period;
use crate::{
    AppState,
    error::{ApiResult, AppJson},
    middleware::AuthUser,
};

/// Creates the budget routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budget", get(get_budget).post(set_budget))
        .route("/budgets", get(list_budgets))
}

/// Query string selecting a month.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// `YYYY-MM`; the current month when absent.
    pub month: Option<String>,
}

/// Response for a budget.
#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    /// Budget ID.
    pub id: BudgetId,
    /// Month key.
    pub month: PeriodKey,
    /// Budgeted amount.
    pub amount: Decimal,
    /// Created at timestamp.
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<BudgetRecord> for BudgetResponse {
    fn from(record: BudgetRecord) -> Self {
        Self {
            id: record.id,
            month: record.period_key,
            amount: record.amount,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// GET `/budget` - The budget for one month, or `null`.
async fn get_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<Value>> {
    let period = resolve_period(&state, query.month.as_deref())?;

    let repo = BudgetRepository::new((*state.db).clone());
    let budget = repo
        .find_for_period(auth.user_id(), &period)
        .await?
        .map(BudgetResponse::from);

    let message = if budget.is_some() {
        "Budget found"
    } else {
        "No budget set for this month"
    };

    Ok(Json(json!({ "message": message, "budget": budget })))
}

/// GET `/budgets` - Every budget of the user, most recent month first.
async fn list_budgets(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Value>> {
    let repo = BudgetRepository::new((*state.db).clone());
    let budgets: Vec<BudgetResponse> = repo
        .list_for_user(auth.user_id())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(json!({ "budgets": budgets })))
}

/// POST `/budget` - Set the budget for a month, replacing any existing amount.
async fn set_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(payload): AppJson<SetBudgetInput>,
) -> ApiResult<impl IntoResponse> {
    let input = payload.validate()?;

    let repo = BudgetRepository::new((*state.db).clone());
    let (budget, outcome) = repo.upsert(auth.user_id(), &input).await?;

    info!(
        user_id = %auth.user_id(),
        period = %budget.period_key,
        ?outcome,
        "Budget saved"
    );

    let (status, message) = match outcome {
        UpsertOutcome::Created => (StatusCode::CREATED, "Budget created successfully"),
        UpsertOutcome::Updated => (StatusCode::OK, "Budget updated successfully"),
    };

    Ok((
        status,
        Json(json!({
            "message": message,
            "budget": BudgetResponse::from(budget)
        })),
    ))
}
