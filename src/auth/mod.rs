//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Email/password login
//! - Password hashing (bcrypt)
//! - JWT token generation and validation
//! - AuthedUser extractor for protected routes

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod password;
pub mod routes;
pub mod token;


pub use extractors::AuthedUser;
pub use models::Claims;
pub use routes::auth_routes;
