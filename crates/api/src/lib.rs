//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Authentication middleware
//! - Error to response mapping

pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use xpensify_core::period::{PeriodKey, format_period_key};
use xpensify_shared::JwtService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Zone that owns the calendar: weeks, months and day labels.
    pub timezone: Tz,
}

impl AppState {
    /// Current wall-clock time in the configured zone.
    #[must_use]
    pub fn local_now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.timezone).naive_local()
    }

    /// Month containing the current local date.
    #[must_use]
    pub fn current_period(&self) -> PeriodKey {
        format_period_key(self.local_now().date())
    }

    /// First and last instant of `period` on the local calendar, as UTC.
    #[must_use]
    pub fn utc_bounds(&self, period: &PeriodKey) -> (DateTime<Utc>, DateTime<Utc>) {
        let (start, end) = period.bounds();
        (self.to_utc(start), self.to_utc(end))
    }

    fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        // Wall times skipped by a DST jump have no mapping; treat them as UTC.
        self.timezone
            .from_local_datetime(&local)
            .earliest()
            .map_or_else(|| local.and_utc(), |dt| dt.with_timezone(&Utc))
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
