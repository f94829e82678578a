// taskcli/src/view/mod.rs
//! # View Module
//!
//! Role-dependent dashboards. [`Controller`] owns the [`ViewState`] and
//! performs the fetches, [`render`] turns a state into text.

pub mod controller;
pub mod render;
pub mod state;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use render::{render, TableView, View, ViewBody};
pub use state::{
    EmployeeDashboard, EmployerDashboard, LoginPrefill, TaskFilters, TaskForm, TaskTable,
    ViewError, ViewState,
};
