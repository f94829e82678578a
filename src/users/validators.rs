// src/users/validators.rs

use super::models::CreateUserRequest;
use crate::common::{ValidationResult, Validator};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_NAME_CHARS: usize = 255;

pub struct CreateUserValidator;

impl Validator<CreateUserRequest> for CreateUserValidator {
    fn validate(&self, data: &CreateUserRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require("name", &data.name, "Name is required");
        if data.name.chars().count() > MAX_NAME_CHARS {
            result.add_error("name", "Name must be at most 255 characters");
        }

        if data.email.trim().is_empty() {
            result.add_error("email", "Email is required");
        } else if !looks_like_email(&data.email) {
            result.add_error("email", "Email address is invalid");
        }

        if data.password.is_empty() {
            result.add_error("password", "Password is required");
        } else if data.password.chars().count() < MIN_PASSWORD_LENGTH {
            result.add_error("password", "Password must be at least 8 characters");
        }

        if data.role.parse::<super::models::UserRole>().is_err() {
            result.add_error("role", "Role must be 'employee' or 'employer'");
        }

        result
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}
