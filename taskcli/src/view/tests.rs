//! Tests for the dashboard controller and renderer
//!
//! These tests verify:
//! - Login and session resume pick the role dashboard
//! - Local preconditions never reach the network
//! - Filter changes re-fetch only the task list
//! - Failed actions leave the state untouched
//! - Rendering fallbacks and placeholders

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::api::{SortField, SortOrder};
    use crate::models::{LoginData, NewUser, Role, TaskStatus, User};
    use crate::session::SessionStore;
    use crate::tasks::TaskService;
    use crate::testing::{summary, task, user, FakeApi};
    use chrono::Utc;

    fn controller(api: &FakeApi) -> Controller<FakeApi> {
        Controller::new(TaskService::new(api.clone(), SessionStore::in_memory()), 50)
    }

    async fn logged_in_as(api: &FakeApi, who: User) -> Controller<FakeApi> {
        let mut controller = controller(api);
        controller
            .service()
            .session()
            .save(who, "tok".into(), Some(Utc::now().timestamp() + 3600))
            .unwrap();
        controller.init().await;
        controller
    }

    fn seeded() -> FakeApi {
        let api = FakeApi::new();
        {
            let mut state = api.state();
            state.summary = Some(vec![summary(user(2, "Alice", Role::Employee), 1)]);
            state.users = Some(vec![
                user(1, "Boss", Role::Employer),
                user(2, "Alice", Role::Employee),
            ]);
            state.tasks = Some(vec![task(1, "Write report", TaskStatus::Pending, Some(2))]);
        }
        api
    }

    #[tokio::test]
    async fn test_login_enters_employer_dashboard() {
        let api = seeded();
        api.state().login = Some(LoginData {
            token: "abc".into(),
            user: User {
                id: 1,
                name: String::new(),
                email: String::new(),
                role: Role::Employer,
                created_at: None,
            },
            token_expiry: Some(Utc::now().timestamp() + 3600),
        });
        let mut controller = controller(&api);

        let state = controller.login("boss@example.com", "secret1").await.unwrap();
        assert!(matches!(state, ViewState::Employer(d) if d.user.id == 1));
        assert_eq!(
            controller.service().session().current_token(),
            Some("abc".to_string())
        );
        assert_eq!(api.calls_to("employee_summary"), 1);
        assert_eq!(api.calls_to("list_tasks"), 1);

        match controller.render().body {
            ViewBody::Employer(view) => assert_eq!(view.header, " (employer, ID:1)"),
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_login_failure_stays_logged_out() {
        let api = FakeApi::new();
        let mut controller = controller(&api);

        let err = controller.login("a@x.com", "wrong1").await.unwrap_err();
        assert_eq!(err.to_string(), "Login failed: invalid credentials");
        assert_eq!(controller.state(), &ViewState::LoggedOut);
        assert_eq!(controller.service().session().read(), None);
    }

    #[tokio::test]
    async fn test_blank_login_makes_no_request() {
        let api = FakeApi::new();
        let mut controller = controller(&api);

        for (email, password) in [("", "pw"), ("   ", "pw"), ("a@x.com", "")] {
            let err = controller.login(email, password).await.unwrap_err();
            assert_eq!(
                err,
                ViewError::Precondition("Please enter email and password".into())
            );
        }
        assert_eq!(api.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_title_makes_no_request() {
        let api = seeded();
        let mut controller = logged_in_as(&api, user(1, "Boss", Role::Employer)).await;
        let before = api.total_calls();

        let form = TaskForm {
            title: "   ".into(),
            ..Default::default()
        };
        let err = controller.create_task(form).await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter a task title");
        assert_eq!(api.total_calls(), before);
    }

    #[tokio::test]
    async fn test_filter_changes_do_not_refetch_roster() {
        let api = seeded();
        let mut controller = logged_in_as(&api, user(1, "Boss", Role::Employer)).await;
        assert_eq!(api.calls_to("employee_summary"), 1);
        assert_eq!(api.calls_to("all_users"), 1);

        controller.set_status_filter(Some(TaskStatus::Pending)).await;
        controller.set_status_filter(Some(TaskStatus::Completed)).await;
        controller.set_assignee_filter(Some(2)).await;
        controller
            .set_sort(Some(SortField::DueDate), Some(SortOrder::Asc))
            .await;

        assert_eq!(api.calls_to("employee_summary"), 1);
        assert_eq!(api.calls_to("all_users"), 1);
        assert_eq!(api.calls_to("list_tasks"), 5);

        let last = api.state().queries.last().cloned().unwrap();
        assert_eq!(last.status, Some(TaskStatus::Completed));
        assert_eq!(last.assignee_id, Some(2));
        assert_eq!(last.sort_by, Some(SortField::DueDate));
        assert_eq!(last.sort_order, Some(SortOrder::Asc));
        assert_eq!(last.limit, Some(50));
    }

    #[tokio::test]
    async fn test_create_task_sends_pending_and_reloads_table() {
        let api = seeded();
        let mut controller = logged_in_as(&api, user(1, "Boss", Role::Employer)).await;

        let form = TaskForm {
            title: "  Plan sprint ".into(),
            description: "  ".into(),
            due_date: None,
            assignee_id: Some(2),
        };
        let created = controller.create_task(form).await.unwrap();
        assert_eq!(created.title, "Plan sprint");

        let sent = api.state().created[0].clone();
        assert_eq!(sent.status, TaskStatus::Pending);
        assert_eq!(sent.description, None);
        assert_eq!(sent.assignee_id, Some(2));

        assert_eq!(api.calls_to("list_tasks"), 2);
        assert_eq!(api.calls_to("employee_summary"), 1);
        match controller.state() {
            ViewState::Employer(d) => assert!(matches!(
                &d.tasks,
                TaskTable::Loaded { total_count: 2, .. }
            )),
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_roster_is_retried_on_reload() {
        let api = seeded();
        api.state().summary = None;
        let mut controller = logged_in_as(&api, user(1, "Boss", Role::Employer)).await;
        assert!(matches!(controller.state(), ViewState::Employer(d) if d.roster.is_none()));

        api.state().summary = Some(vec![]);
        controller
            .create_task(TaskForm {
                title: "Retry".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(api.calls_to("employee_summary"), 2);
        assert!(matches!(controller.state(), ViewState::Employer(d) if d.roster.is_some()));
    }

    #[tokio::test]
    async fn test_random_task_goes_to_roster_employee() {
        let api = seeded();
        let mut controller = logged_in_as(&api, user(1, "Boss", Role::Employer)).await;

        let created = controller.create_random_task().await.unwrap();
        assert_eq!(created.assignee_id, Some(2));
    }

    #[tokio::test]
    async fn test_assign_requires_an_employee() {
        let api = seeded();
        let mut controller = logged_in_as(&api, user(1, "Boss", Role::Employer)).await;
        let before = api.total_calls();

        let err = controller.assign_task(1, None).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please select an employee to assign the task to."
        );
        assert_eq!(api.total_calls(), before);

        let assigned = controller.assign_task(1, Some(2)).await.unwrap();
        assert_eq!(assigned.assignee_id, Some(2));
        assert_eq!(api.calls_to("employee_summary"), 1);
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_state() {
        let api = seeded();
        let mut controller = logged_in_as(&api, user(1, "Boss", Role::Employer)).await;
        let before = controller.state().clone();
        api.state().mutation_error = Some("database unavailable".into());

        let err = controller
            .create_task(TaskForm {
                title: "Doomed".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to create task: database unavailable");

        let err = controller.assign_task(1, Some(2)).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to assign task: database unavailable");

        let err = controller.create_random_task().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to create random task: database unavailable"
        );

        assert_eq!(controller.state(), &before);
    }

    #[tokio::test]
    async fn test_employee_status_change_reloads_assigned_tasks() {
        let api = seeded();
        let mut controller = logged_in_as(&api, user(2, "Alice", Role::Employee)).await;
        assert_eq!(api.calls_to("list_assigned_tasks"), 1);

        let updated = controller
            .update_status(1, TaskStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(updated.status, TaskStatus::InProgress);
        assert_eq!(api.calls_to("update_task_status"), 1);
        assert_eq!(api.calls_to("list_assigned_tasks"), 2);
        assert_eq!(api.calls_to("list_tasks"), 0);
        assert_eq!(api.calls_to("employee_summary"), 0);

        match controller.state() {
            ViewState::Employee(d) => match &d.tasks {
                TaskTable::Loaded { tasks, .. } => {
                    assert_eq!(tasks[0].status, TaskStatus::InProgress)
                }
                other => panic!("unexpected table: {:?}", other),
            },
            other => panic!("unexpected state: {:?}", other),
        }
        assert!(controller.render().to_string().contains("In Progress"));
    }

    #[tokio::test]
    async fn test_employer_status_change_keeps_roster() {
        let api = seeded();
        let mut controller = logged_in_as(&api, user(1, "Boss", Role::Employer)).await;
        assert_eq!(api.calls_to("employee_summary"), 1);
        assert_eq!(api.calls_to("list_tasks"), 1);

        controller
            .update_status(1, TaskStatus::Completed)
            .await
            .unwrap();
        assert_eq!(api.calls_to("list_tasks"), 2);
        assert_eq!(api.calls_to("employee_summary"), 1);
        assert_eq!(api.calls_to("all_users"), 1);

        match controller.state() {
            ViewState::Employer(d) => {
                assert!(d.roster.is_some());
                match &d.tasks {
                    TaskTable::Loaded { tasks, .. } => {
                        assert_eq!(tasks[0].status, TaskStatus::Completed)
                    }
                    other => panic!("unexpected table: {:?}", other),
                }
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_status_change_keeps_state() {
        let api = seeded();
        let mut controller = logged_in_as(&api, user(2, "Alice", Role::Employee)).await;
        let before = controller.state().clone();
        api.state().mutation_error = Some("task not found".into());

        let err = controller
            .update_status(1, TaskStatus::Completed)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to update task status: task not found"
        );
        assert_eq!(api.calls_to("list_assigned_tasks"), 1);
        assert_eq!(controller.state(), &before);
    }

    #[tokio::test]
    async fn test_list_failure_renders_error_row() {
        let api = seeded();
        api.state().tasks = None;
        let controller = logged_in_as(&api, user(1, "Boss", Role::Employer)).await;

        match controller.state() {
            ViewState::Employer(d) => assert_eq!(d.tasks, TaskTable::Failed),
            other => panic!("unexpected state: {:?}", other),
        }
        assert!(controller.render().to_string().contains("Error loading tasks"));
    }

    #[tokio::test]
    async fn test_employee_dashboard_lists_assigned_tasks() {
        let api = seeded();
        api.state().tasks = Some(vec![]);
        let mut controller = controller(&api).with_filters(TaskFilters {
            assignee_id: Some(7),
            ..Default::default()
        });
        controller
            .service()
            .session()
            .save(user(2, "Alice", Role::Employee), "tok".into(), None)
            .unwrap();

        let state = controller.init().await;
        assert!(matches!(state, ViewState::Employee(_)));
        assert_eq!(api.calls_to("list_assigned_tasks"), 1);
        assert_eq!(api.calls_to("employee_summary"), 0);
        assert_eq!(api.state().queries[0].assignee_id, None);

        let text = controller.render().to_string();
        assert!(text.contains("Alice (employee, ID:2)"));
        assert!(text.contains("No tasks assigned to you."));
    }

    #[tokio::test]
    async fn test_expired_session_shows_login() {
        let api = seeded();
        let mut controller = controller(&api);
        controller
            .service()
            .session()
            .save(
                user(1, "Boss", Role::Employer),
                "tok".into(),
                Some(Utc::now().timestamp() - 10),
            )
            .unwrap();

        assert_eq!(controller.init().await, &ViewState::LoggedOut);
        assert_eq!(api.total_calls(), 0);
        assert_eq!(controller.service().session().read(), None);
        assert_eq!(controller.render().body, ViewBody::Login);
    }

    #[tokio::test]
    async fn test_logout_returns_to_login() {
        let api = seeded();
        let mut controller = logged_in_as(&api, user(1, "Boss", Role::Employer)).await;

        assert_eq!(controller.logout().unwrap(), &ViewState::LoggedOut);
        assert_eq!(controller.service().session().read(), None);
        assert_eq!(controller.init().await, &ViewState::LoggedOut);
    }

    #[tokio::test]
    async fn test_register_user_prefills_login() {
        let api = FakeApi::new();
        let mut controller = controller(&api);

        let prefill = controller
            .register_user(NewUser {
                name: "Carol King".into(),
                email: "carol@example.com".into(),
                password: "password42".into(),
                role: Role::Employee,
            })
            .await
            .unwrap();
        assert_eq!(prefill.email, "carol@example.com");
        assert_eq!(prefill.password, "password42");

        let view = controller.render();
        assert_eq!(view.demo_users.len(), 1);
        assert_eq!(view.demo_users[0].role, "employee");
        assert!(view
            .to_string()
            .contains("Carol King, carol@example.com (employee) ID: 100"));
    }

    #[tokio::test]
    async fn test_render_is_deterministic() {
        let api = seeded();
        let controller = logged_in_as(&api, user(1, "Boss", Role::Employer)).await;

        let first = controller.render();
        let second = controller.render();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_rows_use_fallbacks() {
        let mut described = task(1, "Has it all", TaskStatus::InProgress, Some(2));
        described.description = Some("Details".into());
        let tasks = vec![
            described,
            task(2, "Orphan", TaskStatus::Pending, None),
            task(3, "Stranger", TaskStatus::Completed, Some(9)),
        ];
        let state = ViewState::Employer(EmployerDashboard {
            user: user(1, "Boss", Role::Employer),
            filters: TaskFilters::default(),
            roster: Some(crate::tasks::Roster {
                summaries: vec![summary(user(2, "Alice", Role::Employee), 1)],
                employees: vec![(&user(2, "Alice", Role::Employee)).into()],
            }),
            tasks: TaskTable::Loaded {
                tasks,
                total_count: 3,
            },
        });

        let ViewBody::Employer(view) = render(&state, &[]).body else {
            panic!("expected employer view");
        };
        let TableView::Rows { rows, total_count } = view.table else {
            panic!("expected rows");
        };
        assert_eq!(total_count, 3);
        assert_eq!(rows[0].description, "Details");
        assert_eq!(rows[0].status, "In Progress");
        assert_eq!(rows[0].assignee.as_deref(), Some("Alice"));
        assert_eq!(rows[1].description, "No description");
        assert_eq!(rows[1].due_date, "Not set");
        assert_eq!(rows[1].assignee.as_deref(), Some("Unassigned"));
        assert_eq!(rows[2].assignee.as_deref(), Some("Employee ID: 9"));

        assert_eq!(view.summary[0].lines[0], "Email: alice@example.com");
        assert_eq!(view.summary[0].lines[1], "Total Tasks: 1");
        assert_eq!(
            view.filters,
            "Status: All Statuses | Assignee: All Employees | Sort: created_at desc"
        );
    }

    #[test]
    fn test_empty_employer_table_placeholder() {
        let state = ViewState::Employer(EmployerDashboard {
            user: user(1, "Boss", Role::Employer),
            filters: TaskFilters::default(),
            roster: None,
            tasks: TaskTable::default(),
        });

        let ViewBody::Employer(view) = render(&state, &[]).body else {
            panic!("expected employer view");
        };
        assert_eq!(view.table, TableView::Message("No tasks found"));
    }
}
