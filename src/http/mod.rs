//! REST transport for the task service.
//!
//! Routes live under `/api/v1`. Every response, successful or not, uses the
//! [`ApiEnvelope`] shape, and [`ApiError`] is the only place where task error
//! kinds are turned into status codes.

mod envelope;
mod error;
mod handlers;
mod params;

pub use envelope::{ApiEnvelope, ApiErrorBody, FieldError, HealthView, TaskIdView, TaskView};
pub use error::{ApiError, ROUTE_NOT_FOUND, VALIDATION_ERROR, status_for};

use crate::task::{ports::TaskStore, services::TaskService};
use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use mockable::Clock;
use std::any::Any;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Versioned path prefix shared by every route.
pub const API_PREFIX: &str = "/api/v1";

/// Builds the application router over `service`.
#[must_use]
pub fn router<S, C>(service: TaskService<S, C>) -> Router
where
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/task",
            post(handlers::create_task::<S, C>).get(handlers::list_tasks::<S, C>),
        )
        .route(
            "/task/:id",
            get(handlers::get_task::<S, C>)
                .put(handlers::update_task::<S, C>)
                .delete(handlers::delete_task::<S, C>),
        );

    Router::new()
        .nest(API_PREFIX, api)
        .fallback(handlers::route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = match panic.downcast::<String>() {
        Ok(text) => *text,
        Err(other) => other
            .downcast_ref::<&str>()
            .map(|text| (*text).to_owned())
            .unwrap_or_default(),
    };
    tracing::error!(panic = %detail, "request handler panicked");
    ApiError::internal().into_response()
}
