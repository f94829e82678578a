// taskcli/src/shell.rs
//! Command surface shared by the one-shot CLI and the interactive shell.
//! Both parse with the same [`command`] and run through [`execute`].

use std::io::Write;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::{value_parser, Arg, ArgMatches, Command};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::api::{TaskApi, TaskQuery};
use crate::models::{NewUser, Role, TaskStatus, User};
use crate::view::{Controller, LoginPrefill, TaskFilters, TaskForm, ViewError};

pub fn command() -> Command {
    Command::new("taskcli")
        .about("Task Board client")
        .subcommand(
            Command::new("register")
                .about("Register a user and remember it as a demo account")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true))
                .arg(
                    Arg::new("role")
                        .long("role")
                        .default_value("employee")
                        .value_parser(["employee", "employer"]),
                ),
        )
        .subcommand(Command::new("random-user").about("Register a random demo user"))
        .subcommand(Command::new("users").about("List demo users created from this client"))
        .subcommand(
            Command::new("login")
                .about("Log in and show the dashboard")
                .arg(Arg::new("email").required(true))
                .arg(Arg::new("password").required(true)),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the logged-in user's profile"))
        .subcommand(
            Command::new("user").about("Show a user by id").arg(
                Arg::new("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Show the dashboard for the logged-in role")
                .arg(
                    Arg::new("status")
                        .long("status")
                        .default_value("")
                        .help("pending, in_progress or completed"),
                )
                .arg(
                    Arg::new("assignee")
                        .long("assignee")
                        .default_value("")
                        .help("Employee id (employer only)"),
                )
                .arg(
                    Arg::new("sort-by")
                        .long("sort-by")
                        .default_value("")
                        .help("created_at, updated_at, due_date or status"),
                )
                .arg(
                    Arg::new("sort-order")
                        .long("sort-order")
                        .default_value("")
                        .help("asc or desc"),
                ),
        )
        .subcommand(
            Command::new("create-task")
                .about("Create a pending task")
                .arg(Arg::new("title").long("title").default_value(""))
                .arg(Arg::new("description").long("description").default_value(""))
                .arg(
                    Arg::new("due")
                        .long("due")
                        .value_parser(parse_due_date)
                        .help("YYYY-MM-DD or RFC 3339"),
                )
                .arg(
                    Arg::new("assignee")
                        .long("assignee")
                        .value_parser(value_parser!(i64)),
                ),
        )
        .subcommand(Command::new("random-task").about("Create a random demo task"))
        .subcommand(
            Command::new("assign")
                .about("Assign a task to an employee")
                .arg(
                    Arg::new("task")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("employee").value_parser(value_parser!(i64))),
        )
        .subcommand(
            Command::new("status")
                .about("Change a task's status")
                .arg(
                    Arg::new("task")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(
                    Arg::new("status")
                        .required(true)
                        .value_parser(|s: &str| s.parse::<TaskStatus>()),
                ),
        )
}

fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| format!("expected YYYY-MM-DD or RFC 3339, got {:?}", raw))
}

fn text(args: &ArgMatches, id: &str) -> String {
    args.get_one::<String>(id).cloned().unwrap_or_default()
}

fn required<T: Clone + Send + Sync + 'static>(args: &ArgMatches, id: &str) -> Result<T, ViewError> {
    args.get_one::<T>(id)
        .cloned()
        .ok_or_else(|| ViewError::Precondition(format!("missing {}", id)))
}

fn profile(user: &User) -> String {
    format!("{} <{}> ({}, ID:{})", user.name, user.email, user.role, user.id)
}

fn prefill(prefill: &LoginPrefill) -> String {
    format!(
        "User created. Log in with: login {} {}",
        prefill.email, prefill.password
    )
}

/// Filter and sort flags of the `dashboard` command.
pub fn dashboard_filters(args: &ArgMatches) -> Result<TaskFilters, ViewError> {
    let query = TaskQuery::from_inputs(
        &text(args, "status"),
        &text(args, "assignee"),
        &text(args, "sort-by"),
        &text(args, "sort-order"),
    )
    .map_err(|e| ViewError::Precondition(e.to_string()))?;
    Ok(TaskFilters::from_query(&query))
}

/// Runs a single CLI invocation on a fresh controller.
///
/// Dashboard flags seed the controller before the stored session is resumed,
/// so the task list is fetched once with them.
pub async fn run_once<A: TaskApi>(
    controller: Controller<A>,
    matches: &ArgMatches,
) -> Result<String, ViewError> {
    let command = matches.subcommand_name().unwrap_or("dashboard");
    let mut controller = match matches.subcommand() {
        Some(("dashboard", args)) => controller.with_filters(dashboard_filters(args)?),
        _ => controller,
    };

    if !matches!(command, "login" | "logout" | "register" | "random-user" | "users") {
        controller.init().await;
    }
    if command == "dashboard" {
        return Ok(controller.render().to_string());
    }
    execute(&mut controller, matches).await
}

/// Runs one parsed command and returns what to print.
pub async fn execute<A: TaskApi>(
    controller: &mut Controller<A>,
    matches: &ArgMatches,
) -> Result<String, ViewError> {
    let Some((name, args)) = matches.subcommand() else {
        return Ok(controller.render().to_string());
    };
    debug!(command = name, "Executing command");

    match name {
        "register" => {
            let role = text(args, "role")
                .parse::<Role>()
                .map_err(ViewError::Precondition)?;
            let new_user = NewUser {
                name: text(args, "name"),
                email: text(args, "email"),
                password: text(args, "password"),
                role,
            };
            controller.register_user(new_user).await.map(|p| prefill(&p))
        }
        "random-user" => controller.register_random_user().await.map(|p| prefill(&p)),
        "users" => {
            let view = controller.render();
            if view.demo_users.is_empty() {
                return Ok("No users created yet".to_string());
            }
            Ok(view
                .demo_users
                .iter()
                .map(|u| format!("{}, {} ({}) ID: {}", u.name, u.email, u.role, u.id))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        "login" => {
            controller
                .login(&text(args, "email"), &text(args, "password"))
                .await?;
            Ok(controller.render().to_string())
        }
        "logout" => {
            controller.logout()?;
            Ok("Logged out".to_string())
        }
        "whoami" => controller
            .service()
            .current_user()
            .await
            .map(|u| profile(&u))
            .map_err(|e| ViewError::failed("Failed to load profile", e)),
        "user" => {
            let id = required::<i64>(args, "id")?;
            controller
                .service()
                .user_by_id(id)
                .await
                .map(|u| profile(&u))
                .map_err(|e| ViewError::failed("Failed to load user", e))
        }
        "dashboard" => {
            controller.apply_filters(dashboard_filters(args)?).await;
            Ok(controller.render().to_string())
        }
        "create-task" => {
            let form = TaskForm {
                title: text(args, "title"),
                description: text(args, "description"),
                due_date: args.get_one::<DateTime<Utc>>("due").copied(),
                assignee_id: args.get_one::<i64>("assignee").copied(),
            };
            let task = controller.create_task(form).await?;
            Ok(format!("Created task #{}\n\n{}", task.id, controller.render()))
        }
        "random-task" => {
            let task = controller.create_random_task().await?;
            Ok(format!(
                "Created task #{} \"{}\"\n\n{}",
                task.id,
                task.title,
                controller.render()
            ))
        }
        "assign" => {
            let task_id = required::<i64>(args, "task")?;
            let employee = args.get_one::<i64>("employee").copied();
            let task = controller.assign_task(task_id, employee).await?;
            Ok(format!("Assigned task #{}\n\n{}", task.id, controller.render()))
        }
        "status" => {
            let task_id = required::<i64>(args, "task")?;
            let status = required::<TaskStatus>(args, "status")?;
            let task = controller.update_status(task_id, status).await?;
            Ok(format!(
                "Task #{} is now {}\n\n{}",
                task.id,
                task.status.label(),
                controller.render()
            ))
        }
        other => Err(ViewError::Precondition(format!("unknown command: {}", other))),
    }
}

/// Splits a shell line on whitespace; double quotes group words.
pub fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut pending = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                pending = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if pending {
                    words.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }

    if in_quotes {
        return Err("unterminated quote".to_string());
    }
    if pending {
        words.push(current);
    }
    Ok(words)
}

/// Reads commands from stdin until `quit`, `exit` or end of input.
pub async fn run<A: TaskApi>(controller: &mut Controller<A>) -> anyhow::Result<()> {
    println!("{}", controller.render());
    println!("Type `help` for commands, `quit` to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match controller.state().user() {
            Some(user) if !user.name.is_empty() => print!("{}> ", user.name),
            _ => print!("> "),
        }
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let words = match split_words(&line) {
            Ok(words) => words,
            Err(e) => {
                println!("Error: {}", e);
                continue;
            }
        };
        match words.first().map(String::as_str) {
            None => continue,
            Some("quit") | Some("exit") => break,
            Some(_) => {}
        }

        match command().no_binary_name(true).try_get_matches_from(&words) {
            Ok(matches) => match execute(controller, &matches).await {
                Ok(output) => println!("{}", output),
                Err(e) => println!("Error: {}", e),
            },
            Err(e) => {
                let _ = e.print();
            }
        }
    }
    Ok(())
}
