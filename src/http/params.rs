//! Transport-level input parsing.
//!
//! Query strings and JSON bodies arrive loosely typed. Every field is checked
//! here and all failures are collected before the service is called, so one
//! response reports every malformed field at once.

use super::{envelope::FieldError, error::ApiError};
use crate::task::{
    domain::{AccountId, TaskId, TaskOwner, UserId},
    services::{CreateTaskRequest, ListTasksRequest, UpdateTaskRequest},
};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

/// `?idAccount&idUser` query.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    id_account: Option<String>,
    id_user: Option<String>,
}

/// `?idAccount&idUser&status?&priority?` query.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    id_account: Option<String>,
    id_user: Option<String>,
    status: Option<String>,
    priority: Option<String>,
}

/// Body of `POST /task`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    id_account: Option<Value>,
    id_user: Option<Value>,
    title: Option<Value>,
    description: Option<Value>,
    priority: Option<Value>,
    due_date: Option<Value>,
}

/// Body of `PUT /task/:id`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskBody {
    id_account: Option<Value>,
    id_user: Option<Value>,
    title: Option<Value>,
    description: Option<Value>,
    priority: Option<Value>,
    due_date: Option<Value>,
    status: Option<Value>,
}

/// Accumulates field failures while coercing raw input.
#[derive(Debug, Default)]
struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn reject(&mut self, field: &str, message: &str) {
        self.0.push(FieldError {
            field: field.to_owned(),
            message: message.to_owned(),
        });
    }

    fn required_id(&mut self, field: &str, raw: Option<&Value>) -> Option<i64> {
        let Some(value) = raw else {
            self.reject(field, "is required");
            return None;
        };
        match integer(value) {
            Some(id) if id > 0 => Some(id),
            _ => {
                self.reject(field, "must be a positive integer");
                None
            }
        }
    }

    fn required_code(&mut self, field: &str, raw: Option<&Value>) -> Option<i64> {
        if raw.is_none() {
            self.reject(field, "is required");
            return None;
        }
        self.optional_code(field, raw)
    }

    fn optional_code(&mut self, field: &str, raw: Option<&Value>) -> Option<i64> {
        let value = raw?;
        let code = integer(value);
        if code.is_none() {
            self.reject(field, "must be an integer");
        }
        code
    }

    fn optional_text(&mut self, field: &str, raw: Option<Value>) -> Option<String> {
        match raw? {
            Value::String(text) => Some(text),
            _ => {
                self.reject(field, "must be a string");
                None
            }
        }
    }

    fn optional_date(&mut self, field: &str, raw: Option<&Value>) -> Option<NaiveDate> {
        let value = raw?;
        let date = value.as_str().and_then(calendar_date);
        if date.is_none() {
            self.reject(field, "must be a date in YYYY-MM-DD form");
        }
        date
    }

    fn owner(&mut self, account: Option<&Value>, user: Option<&Value>) -> Option<TaskOwner> {
        let id_account = self.required_id("idAccount", account);
        let id_user = self.required_id("idUser", user);
        Some(TaskOwner::new(
            AccountId::new(id_account?),
            UserId::new(id_user?),
        ))
    }

    fn finish<T>(self, parsed: Option<T>) -> Result<T, ApiError> {
        match parsed {
            Some(value) if self.0.is_empty() => Ok(value),
            _ => Err(ApiError::validation(self.0)),
        }
    }
}

/// Numbers must be integral; strings are coerced.
fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Accepts a bare date or an RFC 3339 timestamp, keeping the date part.
fn calendar_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|ts| ts.date_naive()))
}

fn text_value(raw: Option<String>) -> Option<Value> {
    raw.map(Value::String)
}

/// Parses the `:id` path segment.
///
/// # Errors
///
/// Returns a `validationError` unless the segment is a positive integer.
pub fn task_id(raw: &str) -> Result<TaskId, ApiError> {
    let mut errors = FieldErrors::default();
    let id = errors.required_id("idTask", Some(&Value::String(raw.to_owned())));
    errors.finish(id.map(TaskId::new))
}

impl OwnerQuery {
    /// Coerces the owner keys.
    ///
    /// # Errors
    ///
    /// Returns a `validationError` listing each missing or malformed key.
    pub fn into_owner(self) -> Result<TaskOwner, ApiError> {
        let mut errors = FieldErrors::default();
        let owner = errors.owner(
            text_value(self.id_account).as_ref(),
            text_value(self.id_user).as_ref(),
        );
        errors.finish(owner)
    }
}

impl ListQuery {
    /// Coerces the listing filters.
    ///
    /// # Errors
    ///
    /// Returns a `validationError` listing each missing or malformed key.
    pub fn into_request(self) -> Result<ListTasksRequest, ApiError> {
        let mut errors = FieldErrors::default();
        let owner = errors.owner(
            text_value(self.id_account).as_ref(),
            text_value(self.id_user).as_ref(),
        );
        let status = errors.optional_code("status", text_value(self.status).as_ref());
        let priority = errors.optional_code("priority", text_value(self.priority).as_ref());

        let request = owner.map(|key| {
            let mut request = ListTasksRequest::new(key);
            if let Some(code) = status {
                request = request.with_status(code);
            }
            if let Some(code) = priority {
                request = request.with_priority(code);
            }
            request
        });
        errors.finish(request)
    }
}

impl CreateTaskBody {
    /// Coerces the body into a create request.
    ///
    /// An absent title is passed on empty so that the rule engine reports it
    /// as `titleRequired`.
    ///
    /// # Errors
    ///
    /// Returns a `validationError` listing each malformed field.
    pub fn into_request(self) -> Result<CreateTaskRequest, ApiError> {
        let mut errors = FieldErrors::default();
        let owner = errors.owner(self.id_account.as_ref(), self.id_user.as_ref());
        let title = errors.optional_text("title", self.title);
        let description = errors.optional_text("description", self.description);
        let priority = errors.optional_code("priority", self.priority.as_ref());
        let due_date = errors.optional_date("dueDate", self.due_date.as_ref());

        let request = owner.map(|key| {
            let mut request = CreateTaskRequest::new(key, title.unwrap_or_default());
            if let Some(text) = description {
                request = request.with_description(text);
            }
            if let Some(code) = priority {
                request = request.with_priority(code);
            }
            if let Some(date) = due_date {
                request = request.with_due_date(date);
            }
            request
        });
        errors.finish(request)
    }
}

impl UpdateTaskBody {
    /// Coerces the body into a full-replacement update of `task_id`.
    ///
    /// # Errors
    ///
    /// Returns a `validationError` listing each missing or malformed field.
    pub fn into_request(self, task_id: TaskId) -> Result<UpdateTaskRequest, ApiError> {
        let mut errors = FieldErrors::default();
        let owner = errors.owner(self.id_account.as_ref(), self.id_user.as_ref());
        let title = errors.optional_text("title", self.title);
        let description = errors.optional_text("description", self.description);
        let priority = errors.required_code("priority", self.priority.as_ref());
        let due_date = errors.optional_date("dueDate", self.due_date.as_ref());
        let status = errors.required_code("status", self.status.as_ref());

        let request = owner.zip(priority).zip(status).map(|((key, priority_code), status_code)| {
            let mut request = UpdateTaskRequest::new(
                key,
                task_id,
                title.unwrap_or_default(),
                priority_code,
                status_code,
            );
            if let Some(text) = description {
                request = request.with_description(text);
            }
            if let Some(date) = due_date {
                request = request.with_due_date(date);
            }
            request
        });
        errors.finish(request)
    }
}
