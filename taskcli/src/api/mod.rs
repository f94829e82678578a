// taskcli/src/api/mod.rs
//! # API Module
//!
//! Typed access to the `/api/v1` endpoints. Every operation resolves to an
//! [`Envelope`]; nothing here returns an error.

pub mod client;
pub mod envelope;


use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;
use crate::models::{
    Credentials, EmployeeSummaryData, LoginData, NewTask, NewUser, TaskData, TaskList,
    TaskStatus, UserData, UsersData,
};

pub use client::HttpApi;
pub use envelope::{Envelope, ErrorBody, Status};

#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn register_user(&self, user: &NewUser) -> Envelope<UserData>;
    async fn login(&self, credentials: &Credentials) -> Envelope<LoginData>;
    async fn current_user(&self, token: &str) -> Envelope<UserData>;
    async fn user_by_id(&self, token: &str, user_id: i64) -> Envelope<UserData>;
    async fn all_users(&self, token: &str) -> Envelope<UsersData>;
    async fn create_task(&self, token: &str, task: &NewTask) -> Envelope<TaskData>;
    async fn update_task_status(
        &self,
        token: &str,
        task_id: i64,
        status: TaskStatus,
    ) -> Envelope<TaskData>;
    async fn assign_task(&self, token: &str, task_id: i64, assignee_id: i64) -> Envelope<TaskData>;
    async fn list_tasks(&self, token: &str, query: &TaskQuery) -> Envelope<TaskList>;
    async fn list_assigned_tasks(&self, token: &str, query: &TaskQuery) -> Envelope<TaskList>;
    async fn employee_summary(&self, token: &str) -> Envelope<EmployeeSummaryData>;
}

// ============================================================================
// Task list query
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    DueDate,
    Status,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::DueDate => "due_date",
            SortField::Status => "status",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "created_at" => Ok(SortField::CreatedAt),
            "updated_at" => Ok(SortField::UpdatedAt),
            "due_date" => Ok(SortField::DueDate),
            "status" => Ok(SortField::Status),
            other => Err(QueryError {
                field: "sort_by",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(QueryError {
                field: "sort_order",
                value: other.to_string(),
            }),
        }
    }
}

/// Filters for the task listings. Unset fields never reach the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub status: Option<TaskStatus>,
    pub assignee_id: Option<i64>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl TaskQuery {
    /// Parses raw form input; blank strings mean "unset".
    pub fn from_inputs(
        status: &str,
        assignee_id: &str,
        sort_by: &str,
        sort_order: &str,
    ) -> Result<Self, QueryError> {
        Ok(Self {
            status: parse_blank(status, |s| {
                s.parse::<TaskStatus>().map_err(|_| QueryError {
                    field: "status",
                    value: s.to_string(),
                })
            })?,
            assignee_id: parse_blank(assignee_id, |s| {
                s.parse::<i64>().map_err(|_| QueryError {
                    field: "assignee_id",
                    value: s.to_string(),
                })
            })?,
            sort_by: parse_blank(sort_by, str::parse)?,
            sort_order: parse_blank(sort_order, str::parse)?,
            limit: None,
            offset: None,
        })
    }

    /// Query-string pairs for the set fields only.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(assignee_id) = self.assignee_id {
            pairs.push(("assignee_id", assignee_id.to_string()));
        }
        if let Some(sort_by) = self.sort_by {
            pairs.push(("sort_by", sort_by.as_str().to_string()));
        }
        if let Some(sort_order) = self.sort_order {
            pairs.push(("sort_order", sort_order.as_str().to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

fn parse_blank<T, F>(raw: &str, parse: F) -> Result<Option<T>, QueryError>
where
    F: FnOnce(&str) -> Result<T, QueryError>,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        parse(trimmed).map(Some)
    }
}
