//! Authentication middleware for protected routes.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::{AppState, error::ApiError};
use xpensify_db::{UserRepository, entities::users};
use xpensify_shared::{AppError, JwtError};

/// The signed-in user, resolved from the token's email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    /// User ID.
    pub id: Uuid,
    /// Email address, the identity key.
    pub email: String,
    /// Display name from the identity provider.
    pub name: Option<String>,
    /// Avatar URL from the identity provider.
    pub image: Option<String>,
}

impl From<users::Model> for CurrentUser {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            image: user.image,
        }
    }
}

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

fn unauthorized(error: &str, message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": error, "message": message })),
    )
        .into_response()
}

/// Authentication middleware that validates JWT tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the JWT service
/// 3. Resolves the user by email, creating it on first sign-in
/// 4. Stores the [`CurrentUser`] in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return unauthorized(
            "missing_token",
            "Authorization header with Bearer token is required",
        );
    };

    let claims = match state.jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(JwtError::Expired) => return unauthorized("token_expired", "Token has expired"),
        Err(e) => {
            warn!(error = %e, "Rejected bearer token");
            return unauthorized("invalid_token", "Invalid or malformed token");
        }
    };

    let repo = UserRepository::new((*state.db).clone());
    let user = match repo
        .find_or_create(
            claims.email(),
            claims.name.as_deref(),
            claims.picture.as_deref(),
        )
        .await
    {
        Ok(user) => user,
        Err(e) => return ApiError::from(e).into_response(),
    };

    request.extensions_mut().insert(CurrentUser::from(user));
    next.run(request).await
}

/// Extractor for the authenticated user.
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let user_id = auth.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub CurrentUser);

impl AuthUser {
    /// Returns the user ID.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.0.id
    }

    /// Returns the user's email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.0.email
    }

    /// Returns the resolved user.
    #[must_use]
    pub const fn user(&self) -> &CurrentUser {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError(AppError::Unauthorized("Authentication required".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc.def", Some("abc.def"))]
    #[case("bearer abc.def", Some("abc.def"))]
    #[case("Basic dXNlcjpwYXNz", None)]
    #[case("abc.def", None)]
    fn test_extract_bearer_token(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_bearer_token(header), expected);
    }

    #[tokio::test]
    async fn test_auth_user_without_middleware_is_unauthorized() {
        let (mut parts, ()) = axum::http::Request::new(()).into_parts();

        let rejection = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        let response = rejection.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "UNAUTHORIZED");
        assert_eq!(body["message"], "Authentication required");
    }

    #[tokio::test]
    async fn test_auth_user_reads_current_user() {
        let user = CurrentUser {
            id: Uuid::from_u128(7),
            email: "asha@example.com".to_string(),
            name: None,
            image: None,
        };
        let mut request = axum::http::Request::new(Body::empty());
        request.extensions_mut().insert(user.clone());
        let (mut parts, _) = request.into_parts();

        let auth = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(auth.user(), &user);
        assert_eq!(auth.email(), "asha@example.com");
    }
}
