use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::utils::validation::FieldErrors;

pub type Result<T> = std::result::Result<T, Error>;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(#[from] FieldErrors),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            Error::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "validation failed", "fields": fields }),
            ),
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            Error::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An unexpected error occurred" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Error::Validation(FieldErrors::from(err))
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            match db.code().as_deref() {
                Some(UNIQUE_VIOLATION) => return Error::Conflict(conflict_message(db.constraint())),
                Some(FOREIGN_KEY_VIOLATION) => {
                    return Error::BadRequest("Referenced object does not exist".to_string())
                }
                Some(CHECK_VIOLATION) => {
                    return Error::BadRequest(format!(
                        "Value violates constraint {}",
                        db.constraint().unwrap_or("unknown")
                    ))
                }
                _ => {}
            }
        }

        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            other => Error::Database(other),
        }
    }
}

fn conflict_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("students_email_key") => "A student with this email already exists".to_string(),
        Some("applications_student_vacancy_active_idx") => {
            "This student has already applied to this vacancy".to_string()
        }
        Some(name) => format!("Duplicate value violates {}", name),
        None => "Duplicate value".to_string(),
    }
}
