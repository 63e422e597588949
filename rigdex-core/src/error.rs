use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single reason a request was rejected, naming the offending fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub param_names: Vec<String>,
    pub message: String,
}

impl Violation {
    pub fn new<I, S>(param_names: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            param_names: param_names.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    /// A violation that is not tied to any request field.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            param_names: Vec::new(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    /// The addressed row, or a row it references, does not exist.
    #[error("{}", .0.message)]
    NotFound(Violation),

    /// The request is well-formed but breaks a catalog rule.
    #[error("{}", join_messages(.0))]
    Invalid(Vec<Violation>),

    /// Storage rejected a write because of a unique constraint.
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    /// Storage rejected a write because a referenced row is gone.
    #[error("foreign key violated: {0}")]
    MissingReference(String),

    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn not_found(violation: Violation) -> Self {
        CatalogError::NotFound(violation)
    }

    pub fn invalid(violation: Violation) -> Self {
        CatalogError::Invalid(vec![violation])
    }

    /// Violations to report to the caller, empty for storage failures.
    pub fn violations(&self) -> &[Violation] {
        match self {
            CatalogError::NotFound(violation) => std::slice::from_ref(violation),
            CatalogError::Invalid(violations) => violations,
            _ => &[],
        }
    }
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            let constraint =
                db_err.constraint().unwrap_or("unknown").to_string();
            return CatalogError::Conflict(constraint);
        }
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_foreign_key_violation()
        {
            let constraint =
                db_err.constraint().unwrap_or("unknown").to_string();
            return CatalogError::MissingReference(constraint);
        }
        CatalogError::Database(err)
    }
}

fn join_messages(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| violation.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, CatalogError>;
