//! # Tasks Module
//!
//! Task creation, assignment, status changes, filtered listings and the
//! per-employee summary.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use models::{Task, TaskStatistics, TaskStatus};
pub use routes::tasks_routes;
pub use services::TasksService;
