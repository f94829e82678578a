// taskcli/src/testing.rs
//! In-process `TaskApi` double for service and controller tests

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::{Envelope, TaskApi, TaskQuery};
use crate::models::{
    Credentials, EmployeeSummary, EmployeeSummaryData, LoginData, NewTask, NewUser, Role, Task,
    TaskData, TaskList, TaskStatistics, TaskStatus, User, UserData, UsersData,
};

/// Canned data. A `None` makes the matching endpoint answer with an error.
#[derive(Default)]
pub(crate) struct FakeState {
    pub calls: Vec<&'static str>,
    pub login: Option<LoginData>,
    pub users: Option<Vec<User>>,
    pub summary: Option<Vec<EmployeeSummary>>,
    pub tasks: Option<Vec<Task>>,
    pub mutation_error: Option<String>,
    pub queries: Vec<TaskQuery>,
    pub created: Vec<NewTask>,
}

#[derive(Clone, Default)]
pub(crate) struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn calls_to(&self, operation: &str) -> usize {
        self.state().calls.iter().filter(|c| **c == operation).count()
    }

    pub fn total_calls(&self) -> usize {
        self.state().calls.len()
    }

    fn record(&self, operation: &'static str) -> MutexGuard<'_, FakeState> {
        let mut state = self.state();
        state.calls.push(operation);
        state
    }
}

pub(crate) fn user(id: i64, name: &str, role: Role) -> User {
    User {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        role,
        created_at: None,
    }
}

pub(crate) fn task(id: i64, title: &str, status: TaskStatus, assignee_id: Option<i64>) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: None,
        status,
        due_date: None,
        assignee_id,
        employer_id: Some(1),
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn summary(employee: User, total_tasks: i64) -> EmployeeSummary {
    EmployeeSummary {
        employee,
        statistics: TaskStatistics {
            total_tasks,
            pending: total_tasks,
            ..Default::default()
        },
    }
}

fn or_error<T>(value: Option<T>, message: &str) -> Envelope<T> {
    match value {
        Some(v) => Envelope::success(v),
        None => Envelope::failure(message),
    }
}

#[async_trait]
impl TaskApi for FakeApi {
    async fn register_user(&self, new_user: &NewUser) -> Envelope<UserData> {
        let mut state = self.record("register_user");
        if let Some(message) = &state.mutation_error {
            return Envelope::failure(message.clone());
        }
        let users = state.users.get_or_insert_with(Vec::new);
        let created = User {
            id: users.len() as i64 + 100,
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            role: new_user.role,
            created_at: None,
        };
        users.push(created.clone());
        Envelope::success(UserData { user: created })
    }

    async fn login(&self, _credentials: &Credentials) -> Envelope<LoginData> {
        let state = self.record("login");
        or_error(state.login.clone(), "invalid credentials")
    }

    async fn current_user(&self, _token: &str) -> Envelope<UserData> {
        let state = self.record("current_user");
        or_error(state.login.clone().map(|l| UserData { user: l.user }), "unauthorized")
    }

    async fn user_by_id(&self, _token: &str, user_id: i64) -> Envelope<UserData> {
        let state = self.record("user_by_id");
        let found = state
            .users
            .as_ref()
            .and_then(|users| users.iter().find(|u| u.id == user_id).cloned());
        or_error(found.map(|user| UserData { user }), "user not found")
    }

    async fn all_users(&self, _token: &str) -> Envelope<UsersData> {
        let state = self.record("all_users");
        or_error(state.users.clone().map(|users| UsersData { users }), "directory unavailable")
    }

    async fn create_task(&self, _token: &str, new_task: &NewTask) -> Envelope<TaskData> {
        let mut state = self.record("create_task");
        if let Some(message) = &state.mutation_error {
            return Envelope::failure(message.clone());
        }
        state.created.push(new_task.clone());
        let tasks = state.tasks.get_or_insert_with(Vec::new);
        let mut created = task(
            tasks.len() as i64 + 1,
            &new_task.title,
            new_task.status,
            new_task.assignee_id,
        );
        created.description = new_task.description.clone();
        created.due_date = new_task.due_date;
        tasks.push(created.clone());
        Envelope::success(TaskData { task: created })
    }

    async fn update_task_status(
        &self,
        _token: &str,
        task_id: i64,
        status: TaskStatus,
    ) -> Envelope<TaskData> {
        let mut state = self.record("update_task_status");
        if let Some(message) = &state.mutation_error {
            return Envelope::failure(message.clone());
        }
        let found = state
            .tasks
            .as_mut()
            .and_then(|tasks| tasks.iter_mut().find(|t| t.id == task_id))
            .map(|t| {
                t.status = status;
                t.clone()
            });
        or_error(found.map(|task| TaskData { task }), "task not found")
    }

    async fn assign_task(&self, _token: &str, task_id: i64, assignee_id: i64) -> Envelope<TaskData> {
        let mut state = self.record("assign_task");
        if let Some(message) = &state.mutation_error {
            return Envelope::failure(message.clone());
        }
        let found = state
            .tasks
            .as_mut()
            .and_then(|tasks| tasks.iter_mut().find(|t| t.id == task_id))
            .map(|t| {
                t.assignee_id = Some(assignee_id);
                t.clone()
            });
        or_error(found.map(|task| TaskData { task }), "task not found")
    }

    async fn list_tasks(&self, _token: &str, query: &TaskQuery) -> Envelope<TaskList> {
        let mut state = self.record("list_tasks");
        state.queries.push(query.clone());
        or_error(
            state.tasks.clone().map(|tasks| TaskList {
                total_count: tasks.len() as i64,
                tasks,
            }),
            "boom",
        )
    }

    async fn list_assigned_tasks(&self, _token: &str, query: &TaskQuery) -> Envelope<TaskList> {
        let mut state = self.record("list_assigned_tasks");
        state.queries.push(query.clone());
        or_error(
            state.tasks.clone().map(|tasks| TaskList {
                total_count: tasks.len() as i64,
                tasks,
            }),
            "boom",
        )
    }

    async fn employee_summary(&self, _token: &str) -> Envelope<EmployeeSummaryData> {
        let state = self.record("employee_summary");
        or_error(
            state.summary.clone().map(|employees| EmployeeSummaryData { employees }),
            "summary unavailable",
        )
    }
}
