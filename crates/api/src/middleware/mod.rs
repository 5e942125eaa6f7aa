//! Request middleware.

pub mod auth;

pub use auth::{AuthUser, CurrentUser, auth_middleware};
