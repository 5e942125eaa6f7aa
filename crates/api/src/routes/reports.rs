//! Report routes: the monthly summary and the expense export.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use xpensify_core::expense::ExpenseRecord;
use xpensify_core::reports::{ExportRow, MonthlyReport, ReportService};
use xpensify_db::repositories::expense::to_expense_record;
use xpensify_db::{BudgetRepository, ExpenseRepository};
use xpensify_shared::AppError;

use super::{budgets::MonthQuery, resolve_period};
use crate::{
    AppState,
    error::{ApiError, ApiResult},
    middleware::AuthUser,
};

/// File name offered for the expense export.
pub const EXPORT_FILE_NAME: &str = "Xpensify_Expenses.csv";

const EXPORT_HEADERS: [&str; 3] = ["Date", "Amount", "Description"];

/// Creates the report routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/summary", get(monthly_summary))
        .route("/reports/export", get(export_expenses))
}

/// GET `/reports/summary` - Budget, spending and daily chart for a month.
async fn monthly_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<MonthlyReport>> {
    let period = resolve_period(&state, query.month.as_deref())?;

    let budget = BudgetRepository::new((*state.db).clone())
        .find_for_period(auth.user_id(), &period)
        .await?
        .map(|b| b.amount);

    let (start, end) = state.utc_bounds(&period);
    let expenses: Vec<ExpenseRecord> = ExpenseRepository::new((*state.db).clone())
        .list_between(auth.user_id(), start, end)
        .await?
        .into_iter()
        .map(|model| to_expense_record(model, &state.timezone))
        .collect();

    Ok(Json(ReportService::monthly_report(period, budget, &expenses)))
}

/// GET `/reports/export` - Expenses as a CSV attachment.
///
/// Exports every expense unless `?month=` narrows it to one month.
async fn export_expenses(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MonthQuery>,
) -> ApiResult<impl IntoResponse> {
    let repo = ExpenseRepository::new((*state.db).clone());
    let models = match query.month.as_deref() {
        Some(month) => {
            let period = resolve_period(&state, Some(month))?;
            let (start, end) = state.utc_bounds(&period);
            repo.list_between(auth.user_id(), start, end).await?
        }
        None => repo.list_for_user(auth.user_id()).await?,
    };

    let expenses: Vec<ExpenseRecord> = models
        .into_iter()
        .map(|model| to_expense_record(model, &state.timezone))
        .collect();

    let body = to_csv(&ReportService::export_rows(&expenses))
        .map_err(|e| ApiError(AppError::Internal(format!("CSV export failed: {e}"))))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        body,
    ))
}

/// Writes rows as CSV, header line included even when there are no rows.
fn to_csv(rows: &[ExportRow]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_csv_empty_has_header() {
        let csv = String::from_utf8(to_csv(&[]).unwrap()).unwrap();

        assert_eq!(csv, "Date,Amount,Description\n");
    }

    #[test]
    fn test_to_csv_quotes_commas() {
        let rows = [ExportRow {
            date: "27 May 2025".to_string(),
            amount: dec!(1200.50),
            description: "Groceries, fruit".to_string(),
        }];

        let csv = String::from_utf8(to_csv(&rows).unwrap()).unwrap();

        assert_eq!(
            csv,
            "Date,Amount,Description\n27 May 2025,1200.50,\"Groceries, fruit\"\n"
        );
    }
}
