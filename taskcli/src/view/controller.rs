// taskcli/src/view/controller.rs

use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use super::render::{render, View};
use super::state::{
    EmployeeDashboard, EmployerDashboard, LoginPrefill, TaskFilters, TaskForm, TaskTable,
    ViewError, ViewState,
};
use crate::api::{SortField, SortOrder, TaskApi};
use crate::error::ServiceError;
use crate::models::{NewTask, NewUser, Role, Task, TaskList, TaskStatus, User};
use crate::session::SessionState;
use crate::tasks::{random_task, random_user, TaskService};

/// Drives the dashboards. Every operation takes `&mut self`, so one action's
/// fetch and state update finish before the next action can start.
pub struct Controller<A> {
    service: TaskService<A>,
    state: ViewState,
    page_limit: u32,
    initial_filters: TaskFilters,
}

impl<A: TaskApi> Controller<A> {
    pub fn new(service: TaskService<A>, page_limit: u32) -> Self {
        Self {
            service,
            state: ViewState::LoggedOut,
            page_limit,
            initial_filters: TaskFilters::default(),
        }
    }

    /// Filters applied when a dashboard is entered.
    pub fn with_filters(mut self, filters: TaskFilters) -> Self {
        self.initial_filters = filters;
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn service(&self) -> &TaskService<A> {
        &self.service
    }

    /// Resumes a stored session, if it is still valid.
    pub async fn init(&mut self) -> &ViewState {
        match self.service.session().state() {
            SessionState::Valid(session) => self.enter(session.user).await,
            SessionState::Expired => {
                info!("Stored session expired; showing login");
                self.state = ViewState::LoggedOut;
            }
            SessionState::Absent => self.state = ViewState::LoggedOut,
        }
        &self.state
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<&ViewState, ViewError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ViewError::precondition("Please enter email and password"));
        }

        let data = self
            .service
            .login(email, password)
            .await
            .map_err(|e| ViewError::failed("Login failed", e))?;

        self.service
            .session()
            .save(data.user.clone(), data.token, data.token_expiry)
            .map_err(|e| ViewError::failed("Login failed", e))?;

        self.enter(data.user).await;
        Ok(&self.state)
    }

    pub fn logout(&mut self) -> Result<&ViewState, ViewError> {
        self.service
            .session()
            .clear()
            .map_err(|e| ViewError::failed("Logout failed", e))?;
        self.state = ViewState::LoggedOut;
        Ok(&self.state)
    }

    /// Registers the user and remembers it, with its password, as a demo user.
    pub async fn register_user(&mut self, new_user: NewUser) -> Result<LoginPrefill, ViewError> {
        let user = self
            .service
            .register_user(&new_user)
            .await
            .map_err(|e| ViewError::failed("Failed to create user", e))?;

        info!(user_id = user.id, role = %user.role, "Registered demo user");

        self.service
            .session()
            .save_created_user(user, new_user.password.clone())
            .map_err(|e| ViewError::failed("Failed to create user", e))?;

        Ok(LoginPrefill {
            email: new_user.email,
            password: new_user.password,
        })
    }

    pub async fn register_random_user(&mut self) -> Result<LoginPrefill, ViewError> {
        self.register_user(random_user()).await
    }

    pub async fn set_status_filter(&mut self, status: Option<TaskStatus>) -> &ViewState {
        if let Some(filters) = self.filters_mut() {
            filters.status = status;
        }
        self.refresh_tasks().await;
        &self.state
    }

    /// Employer dashboard only.
    pub async fn set_assignee_filter(&mut self, assignee_id: Option<i64>) -> &ViewState {
        if let ViewState::Employer(dashboard) = &mut self.state {
            dashboard.filters.assignee_id = assignee_id;
            self.refresh_tasks().await;
        }
        &self.state
    }

    pub async fn set_sort(
        &mut self,
        sort_by: Option<SortField>,
        sort_order: Option<SortOrder>,
    ) -> &ViewState {
        if let Some(filters) = self.filters_mut() {
            filters.sort_by = sort_by;
            filters.sort_order = sort_order;
        }
        self.refresh_tasks().await;
        &self.state
    }

    /// Replaces every filter at once, with a single list fetch.
    pub async fn apply_filters(&mut self, filters: TaskFilters) -> &ViewState {
        match &mut self.state {
            ViewState::LoggedOut => {}
            ViewState::Employer(dashboard) => dashboard.filters = filters,
            ViewState::Employee(dashboard) => {
                dashboard.filters = TaskFilters {
                    assignee_id: None,
                    ..filters
                }
            }
        }
        self.refresh_tasks().await;
        &self.state
    }

    pub async fn create_task(&mut self, form: TaskForm) -> Result<Task, ViewError> {
        if form.title.trim().is_empty() {
            return Err(ViewError::precondition("Please enter a task title"));
        }

        let description = form.description.trim();
        let new_task = NewTask {
            title: form.title.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            status: TaskStatus::Pending,
            due_date: form.due_date,
            assignee_id: form.assignee_id,
        };

        let task = self
            .service
            .create_task(&new_task)
            .await
            .map_err(|e| ViewError::failed("Failed to create task", e))?;

        self.reload_dashboard().await;
        Ok(task)
    }

    /// Random demo task, assigned to a random roster employee when there is one.
    pub async fn create_random_task(&mut self) -> Result<Task, ViewError> {
        let assignee_id = match &self.state {
            ViewState::Employer(dashboard) => dashboard
                .roster
                .as_ref()
                .and_then(|r| r.employees.choose(&mut rand::thread_rng()))
                .map(|e| e.id),
            _ => None,
        };

        let task = self
            .service
            .create_task(&random_task(assignee_id))
            .await
            .map_err(|e| ViewError::failed("Failed to create random task", e))?;

        self.reload_dashboard().await;
        Ok(task)
    }

    pub async fn assign_task(
        &mut self,
        task_id: i64,
        assignee_id: Option<i64>,
    ) -> Result<Task, ViewError> {
        let assignee_id = assignee_id.ok_or_else(|| {
            ViewError::precondition("Please select an employee to assign the task to.")
        })?;

        let task = self
            .service
            .assign_task(task_id, assignee_id)
            .await
            .map_err(|e| ViewError::failed("Failed to assign task", e))?;

        self.refresh_tasks().await;
        Ok(task)
    }

    pub async fn update_status(
        &mut self,
        task_id: i64,
        status: TaskStatus,
    ) -> Result<Task, ViewError> {
        let task = self
            .service
            .update_task_status(task_id, status)
            .await
            .map_err(|e| ViewError::failed("Failed to update task status", e))?;

        self.reload_dashboard().await;
        Ok(task)
    }

    pub fn render(&self) -> View {
        render(&self.state, &self.service.session().created_users())
    }

    fn filters_mut(&mut self) -> Option<&mut TaskFilters> {
        match &mut self.state {
            ViewState::LoggedOut => None,
            ViewState::Employer(d) => Some(&mut d.filters),
            ViewState::Employee(d) => Some(&mut d.filters),
        }
    }

    /// Role state for `user`, followed by its initial fetches.
    async fn enter(&mut self, user: User) {
        let filters = self.initial_filters.clone();
        debug!(user_id = user.id, role = %user.role, "Entering dashboard");

        self.state = match user.role {
            Role::Employer => ViewState::Employer(EmployerDashboard {
                user,
                filters,
                roster: None,
                tasks: TaskTable::default(),
            }),
            Role::Employee => ViewState::Employee(EmployeeDashboard {
                user,
                filters: TaskFilters {
                    assignee_id: None,
                    ..filters
                },
                tasks: TaskTable::default(),
            }),
        };
        self.reload_dashboard().await;
    }

    /// Roster (only while missing) then the task list.
    async fn reload_dashboard(&mut self) {
        if let ViewState::Employer(dashboard) = &mut self.state {
            if dashboard.roster.is_none() {
                match self.service.load_roster().await {
                    Ok(roster) => dashboard.roster = Some(roster),
                    Err(e) => warn!(error = %e, "Failed to load employee roster"),
                }
            }
        }
        self.refresh_tasks().await;
    }

    /// Re-fetches only the current task list.
    async fn refresh_tasks(&mut self) {
        let limit = self.page_limit;
        match &mut self.state {
            ViewState::LoggedOut => {}
            ViewState::Employer(dashboard) => {
                let query = dashboard.filters.to_query(limit);
                dashboard.tasks = into_table(self.service.list_tasks(&query).await);
            }
            ViewState::Employee(dashboard) => {
                let mut query = dashboard.filters.to_query(limit);
                query.assignee_id = None;
                dashboard.tasks = into_table(self.service.list_assigned_tasks(&query).await);
            }
        }
    }
}

fn into_table(result: Result<TaskList, ServiceError>) -> TaskTable {
    match result {
        Ok(list) => TaskTable::Loaded {
            total_count: list.total_count,
            tasks: list.tasks,
        },
        Err(e) => {
            warn!(error = %e, "Failed to load tasks");
            TaskTable::Failed
        }
    }
}
