use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum CadastroError {
    #[error("resource not found")]
    NotFound,

    #[error("{0}")]
    Unauthorized(String),

    #[error("request validation failed: {0:?}")]
    Validation(Vec<FieldViolation>),

    #[error("unknown sort property: {0}")]
    InvalidSort(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),
}

impl CadastroError {
    /// Map a unique-constraint failure to `Conflict`, anything else to `DatabaseError`.
    pub fn from_unique(err: SqlxError, message: impl Into<String>) -> Self {
        match err {
            SqlxError::Database(ref db) if db.is_unique_violation() => {
                CadastroError::Conflict(message.into())
            }
            other => CadastroError::DatabaseError(other),
        }
    }
}

impl IntoResponse for CadastroError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            CadastroError::NotFound => return StatusCode::NOT_FOUND.into_response(),
            CadastroError::Unauthorized(message) => {
                return (StatusCode::UNAUTHORIZED, message).into_response();
            }
            CadastroError::Validation(fields) => {
                let body = ApiErrorBody {
                    code: "VALIDATION_FAILED".to_string(),
                    message: "Request body failed validation.".to_string(),
                    fields,
                };
                (StatusCode::BAD_REQUEST, body)
            }
            CadastroError::InvalidSort(property) => {
                let body = ApiErrorBody {
                    code: "INVALID_SORT".to_string(),
                    message: format!("No sortable property named `{property}`."),
                    fields: Vec::new(),
                };
                (StatusCode::BAD_REQUEST, body)
            }
            CadastroError::Conflict(message) => {
                let body = ApiErrorBody {
                    code: "CONFLICT".to_string(),
                    message,
                    fields: Vec::new(),
                };
                (StatusCode::CONFLICT, body)
            }
            CadastroError::DatabaseError(e) => {
                error!(error = %e, "database operation failed");
                let body = ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                    fields: Vec::new(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// A single rejected request field.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: &'static str,
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldViolation>,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
