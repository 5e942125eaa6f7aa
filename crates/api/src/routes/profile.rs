//! Signed-in user profile.

use axum::{Json, Router, routing::get};

use crate::{
    AppState,
    middleware::{AuthUser, CurrentUser},
};

/// GET `/me` - The user resolved from the bearer token.
async fn me(auth: AuthUser) -> Json<CurrentUser> {
    Json(auth.0)
}

/// Creates the profile routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}
