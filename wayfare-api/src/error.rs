use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use wayfare_core::CoreError;
use wayfare_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFoundError(String),
    #[error("{0}")]
    ConflictError(String),
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::Core(err) => err.kind(),
            AppError::BadRequest(_) => "validation_error",
            AppError::NotFoundError(_) => "not_found",
            AppError::ConflictError(_) => "conflict",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Core(CoreError::ValidationError(_)) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Core(CoreError::CurrencyMismatchError { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Core(CoreError::ConfigurationError(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFoundError(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = if status.is_server_error() {
            tracing::error!("Internal Server Error: {}", self);
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "ok": false,
            "error": error_message,
            "kind": self.kind(),
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(_) => AppError::ConflictError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
