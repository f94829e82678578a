use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::query::QueryAs;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use super::models::{
    AssignTaskRequest, CreateTaskRequest, EmployeeSummary, EmployeeSummaryRow, Task,
    TaskListQuery, TaskListResponse, TaskStatus, UpdateTaskStatusRequest, MAX_PAGE_SIZE,
};
use super::validators::{CreateTaskValidator, TaskListQueryValidator, UpdateTaskStatusValidator};
use crate::auth::AuthedUser;
use crate::common::{now_timestamp, ApiError, Validator};
use crate::users::{User, UsersService};

/// Bind value for dynamically assembled queries
enum SqlParam {
    Int(i64),
    Text(String),
}

type SqliteQueryAs<'q, O> = QueryAs<'q, Sqlite, O, SqliteArguments<'q>>;

/// Binds `params` in order, matching the `?` placeholders of the WHERE clause.
fn bind_params<'q, O>(
    mut query: SqliteQueryAs<'q, O>,
    params: &'q [SqlParam],
) -> SqliteQueryAs<'q, O> {
    for param in params {
        query = match param {
            SqlParam::Int(v) => query.bind(*v),
            SqlParam::Text(v) => query.bind(v.as_str()),
        };
    }
    query
}

/// Which rows a listing is scoped to
enum TaskScope {
    Employer(i64),
    Assignee(i64),
}

pub struct TasksService {
    db: SqlitePool,
}

impl TasksService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Creates a task owned by `user`. Employers only.
    pub async fn create_task(
        &self,
        user: &AuthedUser,
        request: CreateTaskRequest,
    ) -> Result<Task, ApiError> {
        user.require_employer("only employers can create tasks")?;
        CreateTaskValidator.validate(&request).into_result()?;

        let status = match request.status.as_deref().filter(|s| !s.is_empty()) {
            Some(s) => s.parse::<TaskStatus>().map_err(ApiError::BadRequest)?,
            None => TaskStatus::Pending,
        };

        if let Some(assignee_id) = request.assignee_id {
            self.require_employee_assignee(assignee_id).await?;
        }

        let due_date = request
            .due_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(normalize_due_date)
            .transpose()?;
        let description = request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        let now = now_timestamp();

        let result = sqlx::query(
            r#"
            INSERT INTO tasks (title, description, status, due_date, employer_id, assignee_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.title.trim())
        .bind(&description)
        .bind(status.as_str())
        .bind(&due_date)
        .bind(user.id)
        .bind(request.assignee_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        let task_id = result.last_insert_rowid();
        info!(
            task_id = task_id,
            employer_id = user.id,
            assignee_id = ?request.assignee_id,
            status = %status,
            "Created task"
        );

        self.get_by_id(task_id).await
    }

    pub async fn find_by_id(&self, task_id: i64) -> Result<Option<Task>, ApiError> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = ?")
            .bind(task_id)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)
    }

    pub async fn get_by_id(&self, task_id: i64) -> Result<Task, ApiError> {
        self.find_by_id(task_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("task not found".to_string()))
    }

    /// Employees may move tasks assigned to them; employers tasks they created.
    pub async fn update_status(
        &self,
        user: &AuthedUser,
        task_id: i64,
        request: UpdateTaskStatusRequest,
    ) -> Result<Task, ApiError> {
        UpdateTaskStatusValidator.validate(&request).into_result()?;
        let status = request
            .status
            .parse::<TaskStatus>()
            .map_err(ApiError::BadRequest)?;

        let task = self.get_by_id(task_id).await?;

        if user.is_employee() && task.assignee_id != Some(user.id) {
            warn!(task_id = task_id, user_id = user.id, "Status update rejected: not the assignee");
            return Err(ApiError::Forbidden(
                "you can only update tasks assigned to you".to_string(),
            ));
        }
        if user.is_employer() && task.employer_id != user.id {
            warn!(task_id = task_id, user_id = user.id, "Status update rejected: not the owner");
            return Err(ApiError::Forbidden(
                "you can only update tasks you created".to_string(),
            ));
        }

        sqlx::query("UPDATE tasks SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(now_timestamp())
            .bind(task_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!(
            task_id = task_id,
            user_id = user.id,
            from = %task.status,
            to = %status,
            "Updated task status"
        );

        self.get_by_id(task_id).await
    }

    /// Any employer may (re)assign any task to an employee.
    pub async fn assign_task(
        &self,
        user: &AuthedUser,
        task_id: i64,
        request: AssignTaskRequest,
    ) -> Result<Task, ApiError> {
        user.require_employer("only employers can assign tasks")?;
        let assignee_id = request
            .assignee_id
            .ok_or_else(|| ApiError::ValidationError("assignee_id: Assignee is required".into()))?;

        self.get_by_id(task_id).await?;
        self.require_employee_assignee(assignee_id).await?;

        sqlx::query("UPDATE tasks SET assignee_id = ?, updated_at = ? WHERE id = ?")
            .bind(assignee_id)
            .bind(now_timestamp())
            .bind(task_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!(task_id = task_id, assignee_id = assignee_id, employer_id = user.id, "Assigned task");

        self.get_by_id(task_id).await
    }

    /// Tasks created by the calling employer.
    pub async fn list_for_employer(
        &self,
        user: &AuthedUser,
        query: TaskListQuery,
    ) -> Result<TaskListResponse, ApiError> {
        user.require_employer("only employers can view all tasks")?;
        TaskListQueryValidator.validate(&query).into_result()?;

        if let Some(assignee_id) = query.assignee_id {
            UsersService::new(self.db.clone())
                .find_by_id(assignee_id)
                .await?
                .ok_or_else(|| ApiError::BadRequest("assignee not found".to_string()))?;
        }

        self.query_tasks(TaskScope::Employer(user.id), &query).await
    }

    /// Tasks assigned to the calling employee. `assignee_id` is ignored.
    pub async fn list_assigned(
        &self,
        user: &AuthedUser,
        mut query: TaskListQuery,
    ) -> Result<TaskListResponse, ApiError> {
        user.require_employee("only employees can view their assigned tasks")?;
        TaskListQueryValidator.validate(&query).into_result()?;
        query.assignee_id = None;

        self.query_tasks(TaskScope::Assignee(user.id), &query).await
    }

    /// Per-employee counts by status. Employees without tasks report zeros.
    pub async fn employee_summary(
        &self,
        user: &AuthedUser,
    ) -> Result<Vec<EmployeeSummary>, ApiError> {
        user.require_employer("only employers can view employee task summaries")?;

        let rows = sqlx::query_as::<_, EmployeeSummaryRow>(
            r#"
            SELECT
                u.id, u.name, u.email, u.role, u.created_at,
                COUNT(t.id) AS total_tasks,
                COALESCE(SUM(CASE WHEN t.status = 'pending' THEN 1 ELSE 0 END), 0) AS pending,
                COALESCE(SUM(CASE WHEN t.status = 'in_progress' THEN 1 ELSE 0 END), 0) AS in_progress,
                COALESCE(SUM(CASE WHEN t.status = 'completed' THEN 1 ELSE 0 END), 0) AS completed
            FROM users u
            LEFT JOIN tasks t ON t.assignee_id = u.id
            WHERE u.role = 'employee'
            GROUP BY u.id, u.name, u.email, u.role, u.created_at
            ORDER BY u.name ASC, u.id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        debug!(requested_by = user.id, employees = rows.len(), "Built employee summary");

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn require_employee_assignee(&self, assignee_id: i64) -> Result<User, ApiError> {
        let assignee = UsersService::new(self.db.clone())
            .find_by_id(assignee_id)
            .await?
            .ok_or_else(|| ApiError::BadRequest("assignee not found".to_string()))?;

        if !assignee.is_employee() {
            return Err(ApiError::BadRequest(
                "tasks can only be assigned to employees".to_string(),
            ));
        }
        Ok(assignee)
    }

    async fn query_tasks(
        &self,
        scope: TaskScope,
        query: &TaskListQuery,
    ) -> Result<TaskListResponse, ApiError> {
        let mut conditions: Vec<&str> = Vec::new();
        let mut params: Vec<SqlParam> = Vec::new();

        match scope {
            TaskScope::Employer(id) => {
                conditions.push("employer_id = ?");
                params.push(SqlParam::Int(id));
            }
            TaskScope::Assignee(id) => {
                conditions.push("assignee_id = ?");
                params.push(SqlParam::Int(id));
            }
        }

        if let Some(status) = &query.status {
            conditions.push("status = ?");
            params.push(SqlParam::Text(status.clone()));
        }

        if let Some(assignee_id) = query.assignee_id {
            conditions.push("assignee_id = ?");
            params.push(SqlParam::Int(assignee_id));
        }

        let where_clause = conditions.join(" AND ");
        let order_clause = order_clause(query);

        let count_sql = format!("SELECT COUNT(*) FROM tasks WHERE {}", where_clause);
        let (total_count,): (i64,) = bind_params(sqlx::query_as(&count_sql), &params)
            .fetch_one(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        // SQLite treats a negative LIMIT as unbounded
        let limit = query.limit.map(|l| l.min(MAX_PAGE_SIZE)).unwrap_or(-1);
        let offset = query.offset.unwrap_or(0);

        let list_sql = format!(
            "SELECT * FROM tasks WHERE {} ORDER BY {} LIMIT ? OFFSET ?",
            where_clause, order_clause
        );
        let tasks = bind_params(sqlx::query_as::<_, Task>(&list_sql), &params)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        debug!(
            total_count = total_count,
            returned = tasks.len(),
            order = %order_clause,
            "Listed tasks"
        );

        Ok(TaskListResponse { tasks, total_count })
    }
}

/// ORDER BY from whitelisted values only; id breaks ties.
fn order_clause(query: &TaskListQuery) -> String {
    let column = match query.sort_by.as_deref() {
        Some("updated_at") => "updated_at",
        Some("due_date") => "due_date",
        Some("status") => "status",
        _ => "created_at",
    };
    let direction = match query.sort_order.as_deref() {
        Some("asc") => "ASC",
        _ => "DESC",
    };
    format!("{column} {direction}, id {direction}")
}

fn normalize_due_date(raw: &str) -> Result<String, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| {
            d.with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true)
        })
        .map_err(|_| ApiError::ValidationError("due_date: Due date must be an RFC 3339 timestamp".into()))
}
