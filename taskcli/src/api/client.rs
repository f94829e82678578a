// taskcli/src/api/client.rs
//! reqwest-backed [`TaskApi`]

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use super::envelope::Envelope;
use super::{TaskApi, TaskQuery};
use crate::config::ClientConfig;
use crate::error::ConfigError;
use crate::models::{
    Credentials, EmployeeSummaryData, LoginData, NewTask, NewUser, TaskData, TaskList,
    TaskStatus, UserData, UsersData,
};

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, &config.api_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends and decodes; every failure comes back as an error envelope.
    /// The HTTP status code is not consulted.
    async fn send<T: DeserializeOwned>(&self, operation: &str, request: RequestBuilder) -> Envelope<T> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(operation, error = %e, "Request failed");
                return Envelope::failure(e.to_string());
            }
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(operation, error = %e, "Failed to read response body");
                return Envelope::failure(e.to_string());
            }
        };

        match serde_json::from_slice::<Envelope<T>>(&bytes) {
            Ok(envelope) => {
                debug!(operation, http_status = %status, success = envelope.is_success(), "Response received");
                envelope
            }
            Err(e) => {
                warn!(operation, http_status = %status, error = %e, "Malformed response body");
                Envelope::failure(format!("malformed response: {}", e))
            }
        }
    }
}

#[async_trait]
impl TaskApi for HttpApi {
    async fn register_user(&self, user: &NewUser) -> Envelope<UserData> {
        let request = self.request(Method::POST, "/users", None).json(user);
        self.send("register_user", request).await
    }

    async fn login(&self, credentials: &Credentials) -> Envelope<LoginData> {
        let request = self.request(Method::POST, "/login", None).json(credentials);
        self.send("login", request).await
    }

    async fn current_user(&self, token: &str) -> Envelope<UserData> {
        let request = self.request(Method::GET, "/users/me", Some(token));
        self.send("current_user", request).await
    }

    async fn user_by_id(&self, token: &str, user_id: i64) -> Envelope<UserData> {
        let request = self.request(Method::GET, &format!("/users/{}", user_id), Some(token));
        self.send("user_by_id", request).await
    }

    async fn all_users(&self, token: &str) -> Envelope<UsersData> {
        let request = self.request(Method::GET, "/users/all", Some(token));
        self.send("all_users", request).await
    }

    async fn create_task(&self, token: &str, task: &NewTask) -> Envelope<TaskData> {
        let request = self.request(Method::POST, "/tasks", Some(token)).json(task);
        self.send("create_task", request).await
    }

    async fn update_task_status(
        &self,
        token: &str,
        task_id: i64,
        status: TaskStatus,
    ) -> Envelope<TaskData> {
        let request = self
            .request(Method::PATCH, &format!("/tasks/{}/status", task_id), Some(token))
            .json(&json!({ "status": status }));
        self.send("update_task_status", request).await
    }

    async fn assign_task(&self, token: &str, task_id: i64, assignee_id: i64) -> Envelope<TaskData> {
        let request = self
            .request(Method::PATCH, &format!("/tasks/{}/assign", task_id), Some(token))
            .json(&json!({ "assignee_id": assignee_id }));
        self.send("assign_task", request).await
    }

    async fn list_tasks(&self, token: &str, query: &TaskQuery) -> Envelope<TaskList> {
        let request = self
            .request(Method::GET, "/tasks", Some(token))
            .query(&query.to_pairs());
        self.send("list_tasks", request).await
    }

    async fn list_assigned_tasks(&self, token: &str, query: &TaskQuery) -> Envelope<TaskList> {
        let request = self
            .request(Method::GET, "/tasks/assigned", Some(token))
            .query(&query.to_pairs());
        self.send("list_assigned_tasks", request).await
    }

    async fn employee_summary(&self, token: &str) -> Envelope<EmployeeSummaryData> {
        let request = self.request(Method::GET, "/employee-summary", Some(token));
        self.send("employee_summary", request).await
    }
}
