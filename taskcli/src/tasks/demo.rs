// taskcli/src/tasks/demo.rs
//! Demo data generators and display labels

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{NewTask, NewUser, Role, TaskStatus};

const TASK_TITLES: [&str; 10] = [
    "Create user authentication",
    "Implement file upload",
    "Fix navigation bug",
    "Design new dashboard",
    "Update documentation",
    "Add dark mode",
    "Optimize database queries",
    "Create mobile responsive layout",
    "Add unit tests",
    "Refactor legacy code",
];

const TASK_DESCRIPTIONS: [&str; 6] = [
    "This task involves implementing the specified feature or fixing the issue.",
    "Please complete this task as soon as possible.",
    "This is a high priority task that needs immediate attention.",
    "Coordinate with the team when implementing this feature.",
    "Make sure to follow the coding standards when implementing this feature.",
    "This task requires thorough testing before deployment.",
];

const FIRST_NAMES: [&str; 8] = [
    "Alice", "Bob", "Charlie", "Diana", "Edward", "Fiona", "George", "Hannah",
];

const SURNAMES: [&str; 9] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Miller", "Davis", "Garcia", "Wilson",
];

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

/// Random title, description and status, due one to seven days from now.
pub fn random_task(assignee_id: Option<i64>) -> NewTask {
    let mut rng = rand::thread_rng();
    let days = rng.gen_range(1..=7);

    NewTask {
        title: pick(&mut rng, &TASK_TITLES).to_string(),
        description: Some(pick(&mut rng, &TASK_DESCRIPTIONS).to_string()),
        status: *TaskStatus::ALL.choose(&mut rng).unwrap_or(&TaskStatus::Pending),
        due_date: Some(Utc::now() + Duration::days(days)),
        assignee_id,
    }
}

/// Random name, matching `first.last<n>@example.com` email and a password
/// long enough for registration.
pub fn random_user() -> NewUser {
    let mut rng = rand::thread_rng();

    let name = format!("{} {}", pick(&mut rng, &FIRST_NAMES), pick(&mut rng, &SURNAMES));
    let email = format!(
        "{}{}@example.com",
        name.to_lowercase().replacen(' ', ".", 1),
        rng.gen_range(0..1000)
    );
    let password = format!("password{}", rng.gen_range(0..1000));
    let role = if rng.gen_bool(0.5) {
        Role::Employee
    } else {
        Role::Employer
    };

    NewUser {
        name,
        email,
        password,
        role,
    }
}

fn pick<R: Rng>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}
