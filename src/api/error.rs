use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::address::AddressError;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg),
        };
        (status, Json(ErrorResponse { error, message })).into_response()
    }
}

impl From<AddressError> for ApiError {
    fn from(err: AddressError) -> Self {
        ApiError::Validation(err.to_string())
    }
}
