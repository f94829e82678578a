// Response envelope shared by every /api/v1 endpoint

use axum::Json;
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// `{status, message?, data?, error?}`
#[derive(Serialize, Debug)]
pub struct Envelope<T> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            message: String::new(),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: ErrorBody) -> Self {
        Self {
            status: "error",
            message: String::new(),
            data: None,
            error: Some(error),
        }
    }
}

/// Wraps handler output in a success envelope.
pub fn success<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope::success(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let body = serde_json::to_value(Envelope::success(serde_json::json!({"tasks": []}))).unwrap();
        assert_eq!(body["status"], "success");
        assert!(body["data"]["tasks"].as_array().unwrap().is_empty());
        assert!(body.get("error").is_none());
        assert!(body.get("message").is_none());
    }
}
