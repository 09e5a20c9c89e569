use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Item cannot be blank")]
    BlankItem,

    #[error("Item cannot be the same as an existing todo")]
    DuplicateItem,

    #[error("Todo with id {0} not found")]
    NotFound(String),
}

/// JSON body sent with every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub error_code: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BlankItem => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::DuplicateItem => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BlankItem => "blank_item",
            ApiError::DuplicateItem => "duplicate_item",
            ApiError::NotFound(_) => "not_found",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            detail: self.to_string(),
            error_code: Some(self.code().to_string()),
        };

        (self.status(), Json(body)).into_response()
    }
}
