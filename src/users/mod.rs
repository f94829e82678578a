//! # Users Module
//!
//! Registration, profile lookups and the employer-only user directory.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use models::{User, UserProfile, UserRole};
pub use routes::users_routes;
pub use services::UsersService;
