use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use patrimoine_core::errors::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::InvalidDate(_) | CoreError::InvalidRange(_) | CoreError::Validation(_) => {
            StatusCode::BAD_REQUEST
        }
        CoreError::RecordNotFound { .. } => StatusCode::NOT_FOUND,
        CoreError::AlreadyClosed { .. } | CoreError::DuplicateLabel { .. } => StatusCode::CONFLICT,
        CoreError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Core(e) => core_status(e),
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
