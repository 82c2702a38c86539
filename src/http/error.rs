//! Translation of failures into HTTP responses.
//!
//! This is the only place where task error kinds become status codes.

use super::envelope::{ApiEnvelope, ApiErrorBody, FieldError};
use crate::task::services::{TaskErrorKind, TaskRuleError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Code reported for transport-level validation failures.
pub const VALIDATION_ERROR: &str = "validationError";

/// Code reported for unknown routes.
pub const ROUTE_NOT_FOUND: &str = "routeNotFound";

/// An error response ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorBody {
                code: code.to_owned(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Aggregated transport validation failure.
    #[must_use]
    pub fn validation(details: Vec<FieldError>) -> Self {
        let mut error = Self::new(
            StatusCode::BAD_REQUEST,
            VALIDATION_ERROR,
            "request failed validation",
        );
        error.body.details = Some(details);
        error
    }

    /// Malformed request body or query string.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, VALIDATION_ERROR, message)
    }

    /// Unknown route.
    #[must_use]
    pub fn route_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, ROUTE_NOT_FOUND, "no such route")
    }

    /// Unclassified failure.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            TaskErrorKind::Internal.code(),
            "internal server error",
        )
    }

    /// Returns the HTTP status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the envelope error section.
    #[must_use]
    pub const fn body(&self) -> &ApiErrorBody {
        &self.body
    }
}

/// Maps a rule kind onto its HTTP status.
#[must_use]
pub const fn status_for(kind: TaskErrorKind) -> StatusCode {
    match kind {
        TaskErrorKind::TaskDoesntExist => StatusCode::NOT_FOUND,
        TaskErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        TaskErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        TaskErrorKind::TitleRequired
        | TaskErrorKind::TitleExceedsMaxLength
        | TaskErrorKind::DescriptionExceedsMaxLength
        | TaskErrorKind::TextContainsNul
        | TaskErrorKind::InvalidPriority
        | TaskErrorKind::InvalidStatus
        | TaskErrorKind::DueDateInPast
        | TaskErrorKind::AccountDoesntExist
        | TaskErrorKind::UserDoesntExist
        | TaskErrorKind::TitleAlreadyExists => StatusCode::BAD_REQUEST,
    }
}

impl From<TaskRuleError> for ApiError {
    fn from(err: TaskRuleError) -> Self {
        let kind = err.kind();
        match kind {
            TaskErrorKind::Internal => {
                tracing::error!(error = %err, "unclassified task failure");
                Self::internal()
            }
            TaskErrorKind::StoreUnavailable => {
                tracing::warn!(error = %err, "task store unavailable");
                Self::new(
                    status_for(kind),
                    kind.code(),
                    "task store temporarily unavailable, retry later",
                )
            }
            _ => Self::new(status_for(kind), kind.code(), err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiEnvelope::failure(self.body))).into_response()
    }
}
