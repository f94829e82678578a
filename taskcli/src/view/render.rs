// taskcli/src/view/render.rs
//! Pure projection of a [`ViewState`] into displayable text. Rendering the
//! same state twice yields the same [`View`].

use std::fmt;

use super::state::{TaskFilters, TaskTable, ViewState};
use crate::models::{Task, User};
use crate::session::DemoUser;
use crate::tasks::Roster;

pub const NO_TASKS: &str = "No tasks found";
pub const NO_ASSIGNED_TASKS: &str = "No tasks assigned to you.";
pub const LOAD_ERROR: &str = "Error loading tasks";

const NO_DESCRIPTION: &str = "No description";
const NOT_SET: &str = "Not set";
const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub demo_users: Vec<DemoUserLine>,
    pub body: ViewBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewBody {
    Login,
    Employer(EmployerView),
    Employee(EmployeeView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoUserLine {
    pub name: String,
    pub email: String,
    pub role: String,
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployerView {
    pub header: String,
    pub filters: String,
    pub summary: Vec<SummaryCard>,
    /// Choices for the assignee selectors
    pub employees: Vec<String>,
    pub table: TableView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeView {
    pub header: String,
    pub filters: String,
    pub table: TableView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub name: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    Rows { rows: Vec<TaskRow>, total_count: i64 },
    Message(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub due_date: String,
    /// Employer table only
    pub assignee: Option<String>,
}

pub fn render(state: &ViewState, demo_users: &[DemoUser]) -> View {
    let demo_users = demo_users
        .iter()
        .map(|d| DemoUserLine {
            name: d.user.name.clone(),
            email: d.user.email.clone(),
            role: d.user.role.to_string(),
            id: d.user.id,
        })
        .collect();

    let body = match state {
        ViewState::LoggedOut => ViewBody::Login,
        ViewState::Employer(dashboard) => {
            let roster = dashboard.roster.as_ref();
            ViewBody::Employer(EmployerView {
                header: header(&dashboard.user),
                filters: filters_line(&dashboard.filters, roster, true),
                summary: roster.map(summary_cards).unwrap_or_default(),
                employees: roster
                    .map(|r| {
                        r.employees
                            .iter()
                            .map(|e| format!("{} (ID: {})", e.name, e.id))
                            .collect()
                    })
                    .unwrap_or_default(),
                table: table(&dashboard.tasks, NO_TASKS, |t| Some(assignee_label(t, roster))),
            })
        }
        ViewState::Employee(dashboard) => ViewBody::Employee(EmployeeView {
            header: header(&dashboard.user),
            filters: filters_line(&dashboard.filters, None, false),
            table: table(&dashboard.tasks, NO_ASSIGNED_TASKS, |_| None),
        }),
    };

    View { demo_users, body }
}

fn header(user: &User) -> String {
    format!("{} ({}, ID:{})", user.name, user.role, user.id)
}

fn filters_line(filters: &TaskFilters, roster: Option<&Roster>, with_assignee: bool) -> String {
    let status = filters
        .status
        .map(|s| s.label().to_string())
        .unwrap_or_else(|| "All Statuses".to_string());
    let sort_by = filters.sort_by.map(|s| s.as_str()).unwrap_or("created_at");
    let sort_order = filters.sort_order.map(|o| o.as_str()).unwrap_or("desc");

    let mut line = format!("Status: {}", status);
    if with_assignee {
        let assignee = match filters.assignee_id {
            None => "All Employees".to_string(),
            Some(id) => roster
                .and_then(|r| r.employee(id))
                .map(|e| e.name.clone())
                .unwrap_or_else(|| format!("Employee ID: {}", id)),
        };
        line.push_str(&format!(" | Assignee: {}", assignee));
    }
    line.push_str(&format!(" | Sort: {} {}", sort_by, sort_order));
    line
}

fn summary_cards(roster: &Roster) -> Vec<SummaryCard> {
    roster
        .summaries
        .iter()
        .map(|s| SummaryCard {
            name: s.employee.name.clone(),
            lines: vec![
                format!("Email: {}", s.employee.email),
                format!("Total Tasks: {}", s.statistics.total_tasks),
                format!("Pending: {}", s.statistics.pending),
                format!("In Progress: {}", s.statistics.in_progress),
                format!("Completed: {}", s.statistics.completed),
            ],
        })
        .collect()
}

fn assignee_label(task: &Task, roster: Option<&Roster>) -> String {
    match task.assignee_id {
        None => UNASSIGNED.to_string(),
        Some(id) => roster
            .and_then(|r| r.employee(id))
            .map(|e| e.name.clone())
            .unwrap_or_else(|| format!("Employee ID: {}", id)),
    }
}

fn table(
    tasks: &TaskTable,
    empty: &'static str,
    assignee: impl Fn(&Task) -> Option<String>,
) -> TableView {
    match tasks {
        TaskTable::Failed => TableView::Message(LOAD_ERROR),
        TaskTable::Loaded { tasks, .. } if tasks.is_empty() => TableView::Message(empty),
        TaskTable::Loaded { tasks, total_count } => TableView::Rows {
            rows: tasks
                .iter()
                .map(|t| TaskRow {
                    id: t.id,
                    title: t.title.clone(),
                    description: t
                        .description
                        .as_deref()
                        .filter(|d| !d.is_empty())
                        .unwrap_or(NO_DESCRIPTION)
                        .to_string(),
                    status: t.status.label().to_string(),
                    due_date: t
                        .due_date
                        .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
                        .unwrap_or_else(|| NOT_SET.to_string()),
                    assignee: assignee(t),
                })
                .collect(),
            total_count: *total_count,
        },
    }
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(3)).collect();
    clipped.push_str("...");
    clipped
}

impl fmt::Display for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, total_count) = match self {
            TableView::Message(message) => return writeln!(f, "  {}", message),
            TableView::Rows { rows, total_count } => (rows, total_count),
        };

        let with_assignee = rows.iter().any(|r| r.assignee.is_some());
        write!(
            f,
            "  {:<5} {:<28} {:<32} {:<12} {:<20}",
            "ID", "TITLE", "DESCRIPTION", "STATUS", "DUE"
        )?;
        if with_assignee {
            write!(f, " ASSIGNEE")?;
        }
        writeln!(f)?;

        for row in rows {
            write!(
                f,
                "  {:<5} {:<28} {:<32} {:<12} {:<20}",
                row.id,
                clip(&row.title, 28),
                clip(&row.description, 32),
                row.status,
                row.due_date
            )?;
            if let Some(assignee) = &row.assignee {
                write!(f, " {}", assignee)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  Showing {} of {} tasks", rows.len(), total_count)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            ViewBody::Login => {
                writeln!(f, "Not logged in. Use `login <email> <password>`.")?;
            }
            ViewBody::Employer(view) => {
                writeln!(f, "{}", view.header)?;
                writeln!(f)?;
                writeln!(f, "Employee summary")?;
                if view.summary.is_empty() {
                    writeln!(f, "  (none)")?;
                }
                for card in &view.summary {
                    writeln!(f, "  {}", card.name)?;
                    for line in &card.lines {
                        writeln!(f, "    {}", line)?;
                    }
                }
                writeln!(f)?;
                writeln!(f, "All tasks ({})", view.filters)?;
                write!(f, "{}", view.table)?;
            }
            ViewBody::Employee(view) => {
                writeln!(f, "{}", view.header)?;
                writeln!(f)?;
                writeln!(f, "My tasks ({})", view.filters)?;
                write!(f, "{}", view.table)?;
            }
        }

        if !self.demo_users.is_empty() {
            writeln!(f)?;
            writeln!(f, "Created users")?;
            for user in &self.demo_users {
                writeln!(f, "  {}, {} ({}) ID: {}", user.name, user.email, user.role, user.id)?;
            }
        }
        Ok(())
    }
}
