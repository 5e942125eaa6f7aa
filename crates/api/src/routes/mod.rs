//! API route definitions.

use axum::{Router, middleware};
use xpensify_core::{ValidationError, period::PeriodKey};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod budgets;
pub mod expenses;
pub mod health;
pub mod profile;
pub mod reports;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(profile::routes())
        .merge(expenses::routes())
        .merge(budgets::routes())
        .merge(reports::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}

/// Parses an optional `month` query value, defaulting to the current month.
pub(crate) fn resolve_period(
    state: &AppState,
    month: Option<&str>,
) -> Result<PeriodKey, ValidationError> {
    month.map_or_else(|| Ok(state.current_period()), str::parse)
}
