//! Error to HTTP response mapping.
//!
//! Handlers return [`ApiError`]; every failure is rendered as
//! `{ "error": <code>, "message": <text> }` with the status from [`AppError`].

use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;
use xpensify_core::ValidationError;
use xpensify_shared::AppError;

/// Result alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Wrapper that turns an [`AppError`] into a response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.0.is_server_error() {
            error!(error = %self.0, "Request failed");
            "An error occurred".to_string()
        } else {
            match &self.0 {
                AppError::Unauthorized(m)
                | AppError::Validation(m)
                | AppError::Database(m)
                | AppError::Internal(m) => m.clone(),
            }
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message,
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

/// JSON body extractor whose rejections use the API error shape.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rstest::rstest;
    use serde_json::Value;

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[rstest]
    #[case(ValidationError::InvalidAmount, "Amount must be a number greater than zero")]
    #[case(ValidationError::MissingField("date"), "Missing required field: date")]
    #[tokio::test]
    async fn test_validation_error_is_bad_request(
        #[case] err: ValidationError,
        #[case] message: &str,
    ) {
        let (status, body) = render(err.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["message"], message);
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let (status, body) = render(DbErr::Custom("connection refused".into()).into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "DATABASE_ERROR");
        assert_eq!(body["message"], "An error occurred");
    }
}
