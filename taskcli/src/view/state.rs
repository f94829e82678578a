// taskcli/src/view/state.rs

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::api::{SortField, SortOrder, TaskQuery};
use crate::models::{Task, TaskStatus, User};
use crate::tasks::Roster;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    LoggedOut,
    Employer(EmployerDashboard),
    Employee(EmployeeDashboard),
}

impl ViewState {
    pub fn user(&self) -> Option<&User> {
        match self {
            ViewState::LoggedOut => None,
            ViewState::Employer(d) => Some(&d.user),
            ViewState::Employee(d) => Some(&d.user),
        }
    }
}

/// Filter and sort controls of a dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    pub status: Option<TaskStatus>,
    /// Employer dashboard only
    pub assignee_id: Option<i64>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
}

impl TaskFilters {
    pub fn from_query(query: &TaskQuery) -> Self {
        Self {
            status: query.status,
            assignee_id: query.assignee_id,
            sort_by: query.sort_by,
            sort_order: query.sort_order,
        }
    }

    pub fn to_query(&self, limit: u32) -> TaskQuery {
        TaskQuery {
            status: self.status,
            assignee_id: self.assignee_id,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
            limit: Some(limit),
            offset: None,
        }
    }
}

/// Result of the last task list fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskTable {
    Loaded { tasks: Vec<Task>, total_count: i64 },
    Failed,
}

impl Default for TaskTable {
    fn default() -> Self {
        TaskTable::Loaded {
            tasks: Vec::new(),
            total_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployerDashboard {
    pub user: User,
    pub filters: TaskFilters,
    /// `None` until the first successful roster fetch
    pub roster: Option<Roster>,
    pub tasks: TaskTable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDashboard {
    pub user: User,
    pub filters: TaskFilters,
    pub tasks: TaskTable,
}

/// Task creation form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub assignee_id: Option<i64>,
}

/// Credentials to prefill the login form after registering a demo user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPrefill {
    pub email: String,
    pub password: String,
}

/// A user action that did not complete. `Display` is the alert text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// Rejected locally before any request.
    #[error("{0}")]
    Precondition(String),
    #[error("{action}: {message}")]
    Failed {
        action: &'static str,
        message: String,
    },
}

impl ViewError {
    pub(crate) fn precondition(message: &str) -> Self {
        ViewError::Precondition(message.to_string())
    }

    pub(crate) fn failed(action: &'static str, message: impl ToString) -> Self {
        ViewError::Failed {
            action,
            message: message.to_string(),
        }
    }
}
