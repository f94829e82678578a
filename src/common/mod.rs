// Common module - shared types and utilities across all modules

pub mod config;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod helpers;
pub mod migrations;
pub mod state;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use envelope::{success, Envelope, ErrorBody};
pub use error::ApiError;
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use helpers::{now_timestamp, safe_email_log, safe_token_log};
pub use state::AppState;
pub use validation::{ValidationError, ValidationResult, Validator};
