//! Error handling - domain failures rendered as HTML error pages.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header::ContentType};
use std::fmt;

use crate::views;

/// Application-level error type that renders the site's error pages.
///
/// Form-shaped failures (duplicate email, bad credentials, duplicate title)
/// never reach this type: handlers re-render the form with an inline message
/// instead. What lands here is what deserves a status page.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Forbidden,
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::NotFound(detail) => views::error_page(404, "Not Found", detail),
            AppError::Forbidden => {
                views::error_page(403, "Forbidden", "You are not allowed to do that.")
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                views::error_page(500, "Internal Server Error", "Something went wrong.")
            }
        };

        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(body)
    }
}

// Conversion from domain errors.
impl From<inkwell_core::error::DomainError> for AppError {
    fn from(err: inkwell_core::error::DomainError) -> Self {
        match err {
            inkwell_core::error::DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            inkwell_core::error::DomainError::Forbidden => AppError::Forbidden,
            // Credential and duplicate failures are form-level; if one leaks
            // this far it is a programming error, not a user error.
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<inkwell_core::error::RepoError> for AppError {
    fn from(err: inkwell_core::error::RepoError) -> Self {
        match err {
            inkwell_core::error::RepoError::NotFound => {
                AppError::NotFound("Resource not found".to_string())
            }
            inkwell_core::error::RepoError::Constraint(msg) => AppError::Internal(msg),
            inkwell_core::error::RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            inkwell_core::error::RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
