//! Full client/server workflow over real HTTP
//!
//! These tests verify:
//! - Register, login, create, assign and status updates end to end
//! - Server-side authorization surfaces as user-facing alert text
//! - Filters, sorting and pagination through the real query string

use e2e_tests::TestServer;
use taskcli::api::{SortField, SortOrder, TaskQuery};
use taskcli::error::ServiceError;
use taskcli::models::{NewUser, Role, TaskStatus};
use taskcli::view::{TaskForm, TaskTable, ViewState};
use taskcli::{Controller, HttpApi};

fn new_user(name: &str, email: &str, role: Role) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password: "password123".to_string(),
        role,
    }
}

async fn logged_in(server: &TestServer, user: NewUser) -> Controller<HttpApi> {
    let mut controller = server.controller().unwrap();
    let prefill = controller.register_user(user).await.unwrap();
    controller
        .login(&prefill.email, &prefill.password)
        .await
        .unwrap();
    controller
}

fn loaded(table: &TaskTable) -> (Vec<String>, i64) {
    match table {
        TaskTable::Loaded { tasks, total_count } => {
            (tasks.iter().map(|t| t.title.clone()).collect(), *total_count)
        }
        TaskTable::Failed => panic!("task list failed to load"),
    }
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = TestServer::start().await.unwrap();

    let body: serde_json::Value = reqwest::get(format!("http://{}/health", server.addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "API is running");
}

#[tokio::test]
async fn test_undecodable_requests_answer_with_error_envelope() {
    let server = TestServer::start().await.unwrap();
    let client = reqwest::Client::new();
    let api = server.api_url();

    let response = client
        .post(format!("{}/users", api))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let response = client
        .post(format!("{}/login", api))
        .json(&serde_json::json!({"email": 5}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "error");

    let response = client.get(format!("{}/no-such-route", api)).send().await.unwrap();
    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"]["message"], "route not found");

    let employer =
        logged_in(&server, new_user("Frank Green", "frank@example.com", Role::Employer)).await;
    let token = employer.service().session().current_token().unwrap();
    let response = client
        .patch(format!("{}/tasks/abc/status", api))
        .bearer_auth(token)
        .json(&serde_json::json!({"status": "completed"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_employer_and_employee_workflow() {
    let server = TestServer::start().await.unwrap();

    let mut employee = server.controller().unwrap();
    let prefill = employee
        .register_user(new_user("Alice Smith", "alice@example.com", Role::Employee))
        .await
        .unwrap();
    assert_eq!(employee.service().session().created_users().len(), 1);

    let mut employer =
        logged_in(&server, new_user("Diana Brown", "diana@example.com", Role::Employer)).await;
    let roster = match employer.state() {
        ViewState::Employer(d) => {
            assert_eq!(d.user.name, "Diana Brown");
            assert_eq!(loaded(&d.tasks), (vec![], 0));
            d.roster.clone().expect("roster loaded")
        }
        other => panic!("expected employer dashboard, got {:?}", other),
    };
    assert_eq!(roster.employees.len(), 1);
    let alice_id = roster.employees[0].id;
    assert_eq!(roster.summaries[0].statistics.total_tasks, 0);

    let due = chrono::Utc::now() + chrono::Duration::days(3);
    let created = employer
        .create_task(TaskForm {
            title: "Write quarterly report".into(),
            description: "Numbers for Q3".into(),
            due_date: Some(due),
            assignee_id: None,
        })
        .await
        .unwrap();
    assert_eq!(created.status, TaskStatus::Pending);
    assert_eq!(created.assignee_id, None);
    assert_eq!(
        created.due_date.map(|d| d.timestamp_millis()),
        Some(due.timestamp_millis())
    );

    let assigned = employer.assign_task(created.id, Some(alice_id)).await.unwrap();
    assert_eq!(assigned.assignee_id, Some(alice_id));

    employee
        .login(&prefill.email, &prefill.password)
        .await
        .unwrap();
    match employee.state() {
        ViewState::Employee(d) => {
            assert_eq!(loaded(&d.tasks), (vec!["Write quarterly report".to_string()], 1))
        }
        other => panic!("expected employee dashboard, got {:?}", other),
    }

    let updated = employee
        .update_status(created.id, TaskStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(updated.status, TaskStatus::InProgress);

    // Employees cannot assign
    let err = employee
        .assign_task(created.id, Some(alice_id))
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("Failed to assign task: "));

    employer.set_status_filter(Some(TaskStatus::InProgress)).await;
    match employer.state() {
        ViewState::Employer(d) => assert_eq!(loaded(&d.tasks).1, 1),
        other => panic!("expected employer dashboard, got {:?}", other),
    }
    employer.set_status_filter(Some(TaskStatus::Completed)).await;
    match employer.state() {
        ViewState::Employer(d) => assert_eq!(loaded(&d.tasks).1, 0),
        other => panic!("expected employer dashboard, got {:?}", other),
    }

    let summary = employer.service().employee_summary().await.unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].statistics.total_tasks, 1);
    assert_eq!(summary[0].statistics.in_progress, 1);

    let text = employer.render().to_string();
    assert!(text.contains("Diana Brown (employer, ID:"));
    assert!(text.contains("Total Tasks: 0"));

    let me = employee.service().current_user().await.unwrap();
    assert_eq!(me.email, "alice@example.com");
    assert_eq!(me.role, Role::Employee);
}

#[tokio::test]
async fn test_login_failures_and_missing_session() {
    let server = TestServer::start().await.unwrap();
    let mut controller = server.controller().unwrap();

    let err = controller
        .login("nobody@example.com", "password123")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Login failed: invalid credentials");
    assert_eq!(controller.state(), &ViewState::LoggedOut);

    assert_eq!(
        controller.service().all_users().await,
        Err(ServiceError::NoSession)
    );

    let err = controller
        .register_user(NewUser {
            password: "short".into(),
            ..new_user("Eve", "eve@example.com", Role::Employee)
        })
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("Failed to create user: "));
}

#[tokio::test]
async fn test_employee_cannot_reach_employer_endpoints() {
    let server = TestServer::start().await.unwrap();
    let employee = logged_in(&server, new_user("Bob Jones", "bob@example.com", Role::Employee)).await;

    let service = employee.service();
    assert!(matches!(service.all_users().await, Err(ServiceError::Api(_))));
    assert!(matches!(service.employee_summary().await, Err(ServiceError::Api(_))));
    assert!(matches!(
        service.list_tasks(&TaskQuery::default()).await,
        Err(ServiceError::Api(_))
    ));
}

#[tokio::test]
async fn test_sorting_and_pagination() {
    let server = TestServer::start().await.unwrap();
    let mut employer =
        logged_in(&server, new_user("Carol White", "carol@example.com", Role::Employer)).await;

    for (title, days) in [("Bravo", 3), ("Alpha", 1), ("Charlie", 2)] {
        employer
            .create_task(TaskForm {
                title: title.into(),
                due_date: Some(chrono::Utc::now() + chrono::Duration::days(days)),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    employer
        .set_sort(Some(SortField::DueDate), Some(SortOrder::Asc))
        .await;
    match employer.state() {
        ViewState::Employer(d) => assert_eq!(
            loaded(&d.tasks),
            (
                vec!["Alpha".to_string(), "Charlie".to_string(), "Bravo".to_string()],
                3
            )
        ),
        other => panic!("expected employer dashboard, got {:?}", other),
    }

    let page = employer
        .service()
        .list_tasks(&TaskQuery {
            sort_by: Some(SortField::DueDate),
            sort_order: Some(SortOrder::Desc),
            limit: Some(2),
            offset: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total_count, 3);
    let titles: Vec<&str> = page.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Charlie", "Alpha"]);

    let err = employer
        .service()
        .list_tasks(&TaskQuery {
            assignee_id: Some(999),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Api(_)));
}
