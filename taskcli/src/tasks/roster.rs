// taskcli/src/tasks/roster.rs

use crate::models::{EmployeeSummary, User};

/// One assignable employee, whatever endpoint it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&User> for Employee {
    fn from(user: &User) -> Self {
        Employee {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    pub summaries: Vec<EmployeeSummary>,
    pub employees: Vec<Employee>,
}

impl Roster {
    pub fn employee(&self, id: i64) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }
}
