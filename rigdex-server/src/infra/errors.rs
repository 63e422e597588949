use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use rigdex_core::{CatalogError, Violation};

pub type AppResult<T> = Result<T, AppError>;

/// An HTTP status together with the violations reported to the caller.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub violations: Vec<Violation>,
}

impl AppError {
    pub fn new(status: StatusCode, violations: Vec<Violation>) -> Self {
        Self { status, violations }
    }

    pub fn bad_request(violations: Vec<Violation>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, violations)
    }

    pub fn not_found(violation: Violation) -> Self {
        Self::new(StatusCode::NOT_FOUND, vec![violation])
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            vec![Violation::message(message)],
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self
            .violations
            .iter()
            .map(|violation| violation.message.as_str())
            .collect();
        write!(f, "{}: {}", self.status, messages.join("; "))
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "violations": self.violations }));
        (self.status, body).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(violation) => Self::not_found(violation),
            CatalogError::Invalid(violations) => Self::bad_request(violations),
            // Services translate constraint names they know; anything left
            // over is still a client-side duplicate.
            CatalogError::Conflict(constraint) => {
                tracing::warn!(%constraint, "untranslated unique violation");
                Self::bad_request(vec![Violation::message(format!(
                    "Unique constraint {constraint} violated!"
                ))])
            }
            CatalogError::MissingReference(constraint) => {
                tracing::warn!(%constraint, "untranslated foreign key violation");
                Self::not_found(Violation::new(
                    ["id"],
                    "Referenced entity not found!",
                ))
            }
            CatalogError::Database(err) => {
                tracing::error!(error = ?err, "database operation failed");
                Self::internal("Database operation failed")
            }
            CatalogError::Internal(message) => {
                tracing::error!(%message, "catalog operation failed");
                Self::internal("Internal server error")
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!(error = ?err, "request failed");
        Self::internal("Internal server error")
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(vec![Violation::message(format!(
            "Malformed request body: {}",
            rejection.body_text()
        ))])
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(vec![Violation::new(
            ["id"],
            format!("Invalid ID: {}", rejection.body_text()),
        )])
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(vec![Violation::message(format!(
            "Malformed query string: {}",
            rejection.body_text()
        ))])
    }
}
