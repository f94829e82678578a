// Common validation types and traits

use super::error::ApiError;

#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// Records an error when `value` is blank after trimming.
    pub fn require(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add_error(field, message);
        }
    }

    /// Records an error when `value` is set but not one of `allowed`.
    pub fn one_of(&mut self, field: &str, value: Option<&str>, allowed: &[&str], message: &str) {
        if let Some(v) = value {
            if !allowed.contains(&v) {
                self.add_error(field, message);
            }
        }
    }

    /// `Ok(())` when valid, otherwise the joined field errors.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(ApiError::from(self))
        }
    }
}

pub trait Validator<T> {
    fn validate(&self, data: &T) -> ValidationResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_flags_blank_values() {
        let mut result = ValidationResult::new();
        result.require("title", "   ", "Task title is required");
        result.require("name", "Alice", "Name is required");

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "title");
    }

    #[test]
    fn test_one_of_ignores_unset_values() {
        let mut result = ValidationResult::new();
        result.one_of("sort_order", None, &["asc", "desc"], "bad order");
        assert!(result.into_result().is_ok());

        let mut result = ValidationResult::new();
        result.one_of("sort_order", Some("sideways"), &["asc", "desc"], "bad order");
        assert!(result.into_result().is_err());
    }
}
