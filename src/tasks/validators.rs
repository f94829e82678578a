// src/tasks/validators.rs

use chrono::DateTime;

use super::models::{
    CreateTaskRequest, TaskListQuery, UpdateTaskStatusRequest, SORT_COLUMNS, SORT_ORDERS,
    STATUS_VALUES,
};
use crate::common::{ValidationResult, Validator};

pub const MAX_TITLE_CHARS: usize = 255;

pub struct CreateTaskValidator;

impl Validator<CreateTaskRequest> for CreateTaskValidator {
    fn validate(&self, data: &CreateTaskRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require("title", &data.title, "Task title is required");
        if data.title.chars().count() > MAX_TITLE_CHARS {
            result.add_error("title", "Task title must be at most 255 characters");
        }

        result.one_of(
            "status",
            data.status.as_deref().filter(|s| !s.is_empty()),
            &STATUS_VALUES,
            "invalid task status",
        );

        if let Some(due_date) = data.due_date.as_deref().filter(|d| !d.is_empty()) {
            if DateTime::parse_from_rfc3339(due_date).is_err() {
                result.add_error("due_date", "Due date must be an RFC 3339 timestamp");
            }
        }

        result
    }
}

pub struct UpdateTaskStatusValidator;

impl Validator<UpdateTaskStatusRequest> for UpdateTaskStatusValidator {
    fn validate(&self, data: &UpdateTaskStatusRequest) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.require("status", &data.status, "Status is required");
        if !data.status.trim().is_empty() {
            result.one_of("status", Some(&data.status), &STATUS_VALUES, "invalid task status");
        }
        result
    }
}

pub struct TaskListQueryValidator;

impl Validator<TaskListQuery> for TaskListQueryValidator {
    fn validate(&self, data: &TaskListQuery) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.one_of("status", data.status.as_deref(), &STATUS_VALUES, "invalid task status");
        result.one_of(
            "sort_by",
            data.sort_by.as_deref(),
            &SORT_COLUMNS,
            "sort_by must be one of: created_at, updated_at, due_date, status",
        );
        result.one_of(
            "sort_order",
            data.sort_order.as_deref(),
            &SORT_ORDERS,
            "sort_order must be 'asc' or 'desc'",
        );

        if data.limit.is_some_and(|l| l < 0) {
            result.add_error("limit", "limit must not be negative");
        }
        if data.offset.is_some_and(|o| o < 0) {
            result.add_error("offset", "offset must not be negative");
        }

        result
    }
}
