// taskcli/src/tasks/mod.rs
//! # Tasks Module
//!
//! Session-aware operations over a [`TaskApi`]. Each call resolves the
//! stored token first and fails with [`ServiceError::NoSession`] without
//! touching the network when there is none.

pub mod demo;
pub mod roster;


use tracing::{debug, warn};

use crate::api::{Envelope, TaskApi, TaskQuery};
use crate::error::ServiceError;
use crate::models::{
    Credentials, EmployeeSummary, LoginData, NewTask, NewUser, Role, Task, TaskList,
    TaskStatus, User,
};
use crate::session::SessionStore;

pub use demo::{random_task, random_user};
pub use roster::{Employee, Roster};

pub struct TaskService<A> {
    api: A,
    session: SessionStore,
}

fn into_service<T>(envelope: Envelope<T>) -> Result<T, ServiceError> {
    envelope.into_result().map_err(ServiceError::Api)
}

impl<A: TaskApi> TaskService<A> {
    pub fn new(api: A, session: SessionStore) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn token(&self) -> Result<String, ServiceError> {
        self.session.valid_token().ok_or(ServiceError::NoSession)
    }

    /// Public; no session needed.
    pub async fn register_user(&self, user: &NewUser) -> Result<User, ServiceError> {
        into_service(self.api.register_user(user).await).map(|d| d.user)
    }

    /// Public; does not store the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginData, ServiceError> {
        let credentials = Credentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        into_service(self.api.login(&credentials).await)
    }

    pub async fn current_user(&self) -> Result<User, ServiceError> {
        let token = self.token()?;
        into_service(self.api.current_user(&token).await).map(|d| d.user)
    }

    pub async fn user_by_id(&self, user_id: i64) -> Result<User, ServiceError> {
        let token = self.token()?;
        into_service(self.api.user_by_id(&token, user_id).await).map(|d| d.user)
    }

    pub async fn all_users(&self) -> Result<Vec<User>, ServiceError> {
        let token = self.token()?;
        into_service(self.api.all_users(&token).await).map(|d| d.users)
    }

    pub async fn create_task(&self, task: &NewTask) -> Result<Task, ServiceError> {
        let token = self.token()?;
        into_service(self.api.create_task(&token, task).await).map(|d| d.task)
    }

    pub async fn update_task_status(
        &self,
        task_id: i64,
        status: TaskStatus,
    ) -> Result<Task, ServiceError> {
        let token = self.token()?;
        into_service(self.api.update_task_status(&token, task_id, status).await).map(|d| d.task)
    }

    pub async fn assign_task(&self, task_id: i64, assignee_id: i64) -> Result<Task, ServiceError> {
        let token = self.token()?;
        into_service(self.api.assign_task(&token, task_id, assignee_id).await).map(|d| d.task)
    }

    pub async fn list_tasks(&self, query: &TaskQuery) -> Result<TaskList, ServiceError> {
        let token = self.token()?;
        into_service(self.api.list_tasks(&token, query).await)
    }

    pub async fn list_assigned_tasks(&self, query: &TaskQuery) -> Result<TaskList, ServiceError> {
        let token = self.token()?;
        into_service(self.api.list_assigned_tasks(&token, query).await)
    }

    pub async fn employee_summary(&self) -> Result<Vec<EmployeeSummary>, ServiceError> {
        let token = self.token()?;
        into_service(self.api.employee_summary(&token).await).map(|d| d.employees)
    }

    /// Summary first, then the full directory for the employee list. The
    /// summary's own employees are used when the directory is unavailable.
    pub async fn load_roster(&self) -> Result<Roster, ServiceError> {
        let summaries = self.employee_summary().await?;

        let employees: Vec<Employee> = match self.all_users().await {
            Ok(users) => users
                .iter()
                .filter(|u| u.role == Role::Employee)
                .map(Employee::from)
                .collect(),
            Err(e) => {
                warn!(error = %e, "User directory unavailable; using summary employees");
                summaries
                    .iter()
                    .map(|s| &s.employee)
                    .filter(|u| u.role == Role::Employee)
                    .map(Employee::from)
                    .collect()
            }
        };

        debug!(
            summaries = summaries.len(),
            employees = employees.len(),
            "Loaded roster"
        );
        Ok(Roster {
            summaries,
            employees,
        })
    }
}
