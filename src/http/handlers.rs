//! Request handlers for the task routes.

use super::{
    envelope::{ApiEnvelope, HealthView, TaskIdView, TaskView},
    error::ApiError,
    params::{self, CreateTaskBody, ListQuery, OwnerQuery, UpdateTaskBody},
};
use crate::task::{domain::TaskId, ports::TaskStore, services::TaskService};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use mockable::Clock;

type Reply<T> = Result<Json<ApiEnvelope<T>>, ApiError>;

fn body<T>(extracted: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    extracted
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::malformed(rejection.body_text()))
}

fn query<T>(extracted: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    extracted
        .map(|Query(value)| value)
        .map_err(|rejection| ApiError::malformed(rejection.body_text()))
}

fn path_id(extracted: Result<Path<String>, PathRejection>) -> Result<TaskId, ApiError> {
    let Path(raw) = extracted.map_err(|rejection| ApiError::malformed(rejection.body_text()))?;
    params::task_id(&raw)
}

pub(super) async fn health() -> Json<ApiEnvelope<HealthView>> {
    Json(ApiEnvelope::ok(HealthView { status: "ok" }))
}

pub(super) async fn create_task<S, C>(
    State(service): State<TaskService<S, C>>,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiEnvelope<TaskIdView>>), ApiError>
where
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let request = body(payload)?.into_request()?;
    let id = service.create_task(request).await?;
    Ok((StatusCode::CREATED, Json(ApiEnvelope::ok(id.into()))))
}

pub(super) async fn list_tasks<S, C>(
    State(service): State<TaskService<S, C>>,
    filters: Result<Query<ListQuery>, QueryRejection>,
) -> Reply<Vec<TaskView>>
where
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let request = query(filters)?.into_request()?;
    let tasks = service.list_tasks(request).await?;
    Ok(Json(ApiEnvelope::ok(
        tasks.iter().map(TaskView::from).collect(),
    )))
}

pub(super) async fn get_task<S, C>(
    State(service): State<TaskService<S, C>>,
    id: Result<Path<String>, PathRejection>,
    keys: Result<Query<OwnerQuery>, QueryRejection>,
) -> Reply<TaskView>
where
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task_id = path_id(id)?;
    let owner = query(keys)?.into_owner()?;
    let task = service.get_task(owner, task_id).await?;
    Ok(Json(ApiEnvelope::ok(TaskView::from(&task))))
}

pub(super) async fn update_task<S, C>(
    State(service): State<TaskService<S, C>>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Reply<TaskIdView>
where
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task_id = path_id(id)?;
    let request = body(payload)?.into_request(task_id)?;
    let updated = service.update_task(request).await?;
    Ok(Json(ApiEnvelope::ok(updated.into())))
}

pub(super) async fn delete_task<S, C>(
    State(service): State<TaskService<S, C>>,
    id: Result<Path<String>, PathRejection>,
    keys: Result<Query<OwnerQuery>, QueryRejection>,
) -> Reply<TaskIdView>
where
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task_id = path_id(id)?;
    let owner = query(keys)?.into_owner()?;
    let deleted = service.delete_task(owner, task_id).await?;
    Ok(Json(ApiEnvelope::ok(deleted.into())))
}

pub(super) async fn route_not_found() -> ApiError {
    ApiError::route_not_found()
}
