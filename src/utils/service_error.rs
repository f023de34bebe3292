// Service error taxonomy
// The only place where a failure condition becomes an HTTP status code

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::jwt::TokenError;
use crate::store::StoreError;
use crate::utils::password::PasswordError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not allowed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(vec![message.into()])
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Authorization(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::Authentication(_) => "AUTHENTICATION_FAILED",
            ServiceError::Authorization(_) => "FORBIDDEN",
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::Conflict(_) => "CONFLICT",
            ServiceError::Internal => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        let (message, messages) = match self {
            ServiceError::Validation(messages) => ("Invalid request".to_string(), messages),
            ServiceError::Authentication(msg)
            | ServiceError::Authorization(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::Conflict(msg) => (msg.clone(), vec![msg]),
            ServiceError::Internal => {
                let msg = "Internal server error".to_string();
                (msg.clone(), vec![msg])
            }
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "code": code,
                "messages": messages,
            },
            "message": message,
        }));

        (status, body).into_response()
    }
}

// Uniqueness violations are mapped by the caller, which knows which field clashed
impl From<StoreError> for ServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::UniqueViolation(constraint) => {
                ServiceError::Conflict(format!("Duplicate value violates {}", constraint))
            }
            StoreError::NotFound => ServiceError::NotFound("Record not found".to_string()),
            other => {
                tracing::error!(error = %other, "Store operation failed");
                ServiceError::Internal
            }
        }
    }
}

impl From<PasswordError> for ServiceError {
    fn from(error: PasswordError) -> Self {
        tracing::error!(error = %error, "Password operation failed");
        ServiceError::Internal
    }
}

impl From<TokenError> for ServiceError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Encoding(_) => {
                tracing::error!(error = %error, "Failed to sign session token");
                ServiceError::Internal
            }
            other => ServiceError::Authentication(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ServiceError::Validation(crate::utils::validation::collect_messages(&errors))
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::validation(format!("body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        ServiceError::validation(format!("id: {}", rejection.body_text()))
    }
}
