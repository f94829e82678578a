// src/tasks/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use crate::users::UserProfile;

// ============================================================================
// Status
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("invalid task status: {}", s))
    }
}

pub const STATUS_VALUES: [&str; 3] = ["pending", "in_progress", "completed"];
pub const SORT_COLUMNS: [&str; 4] = ["created_at", "updated_at", "due_date", "status"];
pub const SORT_ORDERS: [&str; 2] = ["asc", "desc"];
pub const MAX_PAGE_SIZE: i64 = 100;

// ============================================================================
// Task Models
// ============================================================================

/// Task database row, serialized as-is to clients
#[derive(FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub employer_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    /// RFC 3339 timestamp
    pub due_date: Option<String>,
    pub assignee_id: Option<i64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateTaskStatusRequest {
    #[serde(default)]
    pub status: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct AssignTaskRequest {
    pub assignee_id: Option<i64>,
}

/// Query string for `GET /tasks` and `GET /tasks/assigned`
#[derive(Deserialize, Debug, Default, Clone)]
pub struct TaskListQuery {
    pub status: Option<String>,
    pub assignee_id: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Serialize, Debug)]
pub struct TaskResponse {
    pub task: Task,
}

#[derive(Serialize, Debug)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
    /// Matching rows before limit/offset
    pub total_count: i64,
}

// ============================================================================
// Statistics
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TaskStatistics {
    pub total_tasks: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
}

#[derive(Serialize, Debug, Clone)]
pub struct EmployeeSummary {
    pub employee: UserProfile,
    pub statistics: TaskStatistics,
}

#[derive(Serialize, Debug)]
pub struct EmployeeSummaryResponse {
    pub employees: Vec<EmployeeSummary>,
}

/// Flat row produced by the summary join
#[derive(FromRow, Debug)]
pub(crate) struct EmployeeSummaryRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
    pub total_tasks: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
}

impl From<EmployeeSummaryRow> for EmployeeSummary {
    fn from(row: EmployeeSummaryRow) -> Self {
        EmployeeSummary {
            employee: UserProfile {
                id: row.id,
                name: row.name,
                email: row.email,
                role: row.role,
                created_at: row.created_at,
            },
            statistics: TaskStatistics {
                total_tasks: row.total_tasks,
                pending: row.pending,
                in_progress: row.in_progress,
                completed: row.completed,
            },
        }
    }
}
