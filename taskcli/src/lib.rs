//! Terminal client for the Task Board API.
//!
//! Layers, bottom-up: [`session`] persists the login, [`api`] talks HTTP and
//! normalizes every outcome into an envelope, [`tasks`] injects the session
//! token and turns envelopes into results, and [`view`] drives the
//! role-dependent dashboards and renders them as text.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod shell;
pub mod tasks;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{HttpApi, TaskApi, TaskQuery};
pub use config::ClientConfig;
pub use error::{ConfigError, ServiceError};
pub use session::{FileStorage, MemoryStorage, SessionStore};
pub use tasks::TaskService;
pub use view::{Controller, View, ViewError, ViewState};
